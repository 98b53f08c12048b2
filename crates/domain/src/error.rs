use thiserror::Error;

/// Errors raised while validating domain data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Duplicate price line id '{0}'")]
    DuplicatePriceLineId(String),

    #[error("Price line '{id}' has an invalid price: {value}")]
    InvalidPrice { id: String, value: f64 },
}
