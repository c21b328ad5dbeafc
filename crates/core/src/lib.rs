//! Core library for pokecards
//!
//! This crate implements the **Functional Core** of the pokecards application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The pokecards project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`pokecards_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pokecards`**: HTTP fetching, CLI and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no sleeping, no logging
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`query`]: The card search filter and the query string it produces
//! - [`throttle`]: Rate-limit policy (response classification and linear backoff schedule)
//! - [`cards`]: API response models, the output schema and the transformation between them
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use pokecards_core::cards::transform_response;
//!
//! let body = r#"{"data":[{"id":"2","types":["grass"]},{"id":"1","types":["fire","dragon"]}]}"#;
//! let output = transform_response(body)?;
//!
//! assert!(output.contains("\"Type\": \"fire,dragon\""));
//! ```

pub mod cards;
pub mod query;
pub mod throttle;
