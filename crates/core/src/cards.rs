use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error type for card response processing
#[derive(Debug, thiserror::Error)]
pub enum CardsError {
    #[error("Failed to deserialize card response: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("Invalid card at data[{index}] (id: {id}): {source}")]
    InvalidCard {
        index: usize,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize card output: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Card as returned by the Pokémon TCG API
///
/// Every field is optional: the API schema is not guaranteed by this client.
/// Keys are matched after lower-casing, see [`parse_page`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputCard {
    pub id: Option<String>,
    pub name: Option<String>,
    pub hp: Option<String>,
    pub types: Option<Vec<String>>,
    pub rarity: Option<String>,
}

/// One page of API results
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputPage {
    pub data: Option<Vec<InputCard>>,
    #[serde(default)]
    pub page: u32,
    #[serde(default, rename = "pagesize")]
    pub page_size: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default, rename = "totalcount")]
    pub total_count: u32,
}

/// Card in the downstream consumer's schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputCard {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub card_type: Option<String>,
    #[serde(rename = "HP")]
    pub hp: Option<String>,
    #[serde(rename = "Rarity")]
    pub rarity: Option<String>,
}

/// Final artifact handed to the serializer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputCollection {
    #[serde(rename = "Cards")]
    pub cards: Vec<OutputCard>,
}

impl OutputCollection {
    /// Sort cards by `id` ascending, see [`sort_cards`]
    pub fn sort_by_id(&mut self) {
        sort_cards(&mut self.cards);
    }
}

/// Collapse the API's list of types into the consumer's single type string
///
/// Absent or empty lists yield `None`, a single type is returned as is and
/// several types are joined with `,` in their original order.
pub fn join_types(types: Option<&[String]>) -> Option<String> {
    match types {
        None | Some([]) => None,
        Some([single]) => Some(single.clone()),
        Some(many) => Some(many.join(",")),
    }
}

/// Map a single API card onto the output schema
pub fn convert_card(card: InputCard) -> OutputCard {
    let card_type = join_types(card.types.as_deref());

    OutputCard {
        id: card.id,
        name: card.name,
        card_type,
        hp: card.hp,
        rarity: card.rarity,
    }
}

/// Convert a page of API results into the output collection
///
/// Output order follows input order; sorting is a separate step. A page
/// without `data` produces an empty collection.
pub fn convert(page: InputPage) -> OutputCollection {
    let cards = page
        .data
        .unwrap_or_default()
        .into_iter()
        .map(convert_card)
        .collect();

    OutputCollection { cards }
}

/// Stable lexicographic sort by `id`
///
/// Cards without an `id` use the empty string as their key, so they sort
/// before every card that has one.
pub fn sort_cards(cards: &mut [OutputCard]) {
    cards.sort_by(|a, b| {
        let a = a.id.as_deref().unwrap_or_default();
        let b = b.id.as_deref().unwrap_or_default();
        a.cmp(b)
    });
}

/// Remove commas that directly precede a closing `}` or `]`
///
/// Whitespace between the comma and the bracket is kept. Commas inside string
/// literals are never touched.
pub fn strip_trailing_commas(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut output = String::with_capacity(input.len());
    let mut segment_start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in bytes.iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b',' => {
                let next = bytes[i + 1..]
                    .iter()
                    .find(|b| !b.is_ascii_whitespace())
                    .copied();

                if matches!(next, Some(b'}') | Some(b']')) {
                    output.push_str(&input[segment_start..i]);
                    segment_start = i + 1;
                }
            }
            _ => {}
        }
    }

    output.push_str(&input[segment_start..]);
    output
}

/// Lower-case every object key, recursively
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Parse an API response body into an [`InputPage`]
///
/// Field names match case-insensitively, trailing commas are tolerated and
/// unknown fields are ignored.
pub fn parse_page(text: &str) -> Result<InputPage, CardsError> {
    let value: Value =
        serde_json::from_str(&strip_trailing_commas(text)).map_err(CardsError::Deserialization)?;
    let value = lowercase_keys(value);

    InputPage::deserialize(&value).map_err(|source| locate_error(&value, source))
}

/// Point at the first card in `data` that fails to deserialize
///
/// Errors from an in-memory `Value` carry no line or column, so the card index
/// and id are the only way to find the offending record.
fn locate_error(page: &Value, source: serde_json::Error) -> CardsError {
    let invalid = page
        .get("data")
        .and_then(Value::as_array)
        .and_then(|cards| {
            cards.iter().enumerate().find_map(|(index, card)| {
                InputCard::deserialize(card)
                    .err()
                    .map(|source| (index, card, source))
            })
        });

    match invalid {
        Some((index, card, source)) => CardsError::InvalidCard {
            index,
            id: card
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            source,
        },
        None => CardsError::Deserialization(source),
    }
}

/// Pretty-print the collection as JSON
pub fn render(collection: &OutputCollection) -> Result<String, CardsError> {
    serde_json::to_string_pretty(collection).map_err(CardsError::Serialization)
}

/// Parse, convert, sort and render an API response body
pub fn transform_response(text: &str) -> Result<String, CardsError> {
    let page = parse_page(text)?;
    let mut collection = convert(page);
    collection.sort_by_id();
    render(&collection)
}
