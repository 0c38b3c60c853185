use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error(
        "Attribute ({card}, {attribute}) out of range for catalog of {total} cards x {attributes_per_card} attributes"
    )]
    OutOfRange {
        card: usize,
        attribute: usize,
        total: usize,
        attributes_per_card: usize,
    },
    #[error("Thread count must be >= 1")]
    InvalidThreadCount,
    #[error("At least one deck is required")]
    NoDecks,
    #[error("Unknown event selector: {0}")]
    UnknownEvent(u32),
    #[error("Event '{event}' needs {required} attributes per card, catalog has {available}")]
    IncompatibleCatalog {
        event: String,
        required: usize,
        available: usize,
    },
    #[error("Invalid multiply-with-carry multipliers: a={a}, b={b}")]
    InvalidMultipliers { a: u32, b: u32 },
}
