//! Card search filter
//!
//! Pure construction of the Pokémon TCG API search query. The filter used by the
//! CLI is fixed at compile time through [`CardQuery::standard`]; only the page
//! size comes from the caller.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

/// Fields requested from the API through the `select` parameter
pub const SELECT_FIELDS: &str = "id,name,types,hp,rarity";

/// Ordering requested from the API through the `orderBy` parameter
pub const ORDER_BY: &str = "id";

/// Card types matched by the standard filter
pub const STANDARD_TYPES: [&str; 2] = ["fire", "grass"];

/// Minimum hit points matched by the standard filter
pub const STANDARD_MIN_HP: u32 = 90;

/// Rarity matched by the standard filter
pub const STANDARD_RARITY: &str = "rare";

/// Immutable search parameters for a single page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardQuery {
    pub card_types: BTreeSet<String>,
    pub min_hp: u32,
    pub rarity: String,
    pub page_size: NonZeroU32,
}

impl CardQuery {
    /// Fire or grass cards with at least 90 HP and rare rarity
    pub fn standard(page_size: NonZeroU32) -> Self {
        Self {
            card_types: STANDARD_TYPES.iter().map(|t| t.to_string()).collect(),
            min_hp: STANDARD_MIN_HP,
            rarity: STANDARD_RARITY.to_string(),
            page_size,
        }
    }

    /// Render the `q` parameter in the API's Lucene-like search syntax
    ///
    /// Multiple types are OR-ed inside parentheses, e.g.
    /// `(types:fire OR types:grass) hp:[90 TO *] rarity:rare`.
    pub fn search_clause(&self) -> String {
        let types: Vec<String> = self
            .card_types
            .iter()
            .map(|t| format!("types:{t}"))
            .collect();

        let mut clauses = Vec::with_capacity(3);
        match types.len() {
            0 => {}
            1 => clauses.push(types[0].clone()),
            _ => clauses.push(format!("({})", types.join(" OR "))),
        }
        clauses.push(format!("hp:[{} TO *]", self.min_hp));
        clauses.push(format!("rarity:{}", self.rarity));

        clauses.join(" ")
    }

    /// Query string pairs for the first page, unencoded and in request order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.search_clause()),
            ("page", "1".to_string()),
            ("pageSize", self.page_size.to_string()),
            ("select", SELECT_FIELDS.to_string()),
            ("orderBy", ORDER_BY.to_string()),
        ]
    }
}
