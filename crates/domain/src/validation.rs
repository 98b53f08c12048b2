//! Validation of price-line lists handed over by the application.

use crate::entities::PriceLine;
use crate::error::DomainError;
use std::collections::HashSet;

/// Checks that ids are unique and prices are numbers.
///
/// Inactive lines still take part in the uniqueness check: an id names one
/// line whether or not it is currently drawn.
///
/// # Errors
/// Returns the first duplicate id or NaN price found.
pub fn validate_price_lines(lines: &[PriceLine]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if line.price.is_nan() {
            return Err(DomainError::InvalidPrice {
                id: line.id.to_string(),
                value: line.price,
            });
        }
        if !seen.insert(line.id.as_str()) {
            return Err(DomainError::DuplicatePriceLineId(line.id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_unique_ids() {
        let lines = vec![PriceLine::new("tp", 110.0), PriceLine::new("sl", 0.0)];
        assert!(validate_price_lines(&lines).is_ok());
        assert!(validate_price_lines(&[]).is_ok());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let lines = vec![
            PriceLine::new("tp", 110.0),
            PriceLine::new("sl", 90.0),
            PriceLine::new("tp", -1.0),
        ];
        assert_eq!(
            validate_price_lines(&lines),
            Err(DomainError::DuplicatePriceLineId("tp".to_string()))
        );
    }

    #[test]
    fn test_validate_nan_price() {
        let lines = vec![PriceLine::new("tp", f64::NAN)];
        assert!(matches!(
            validate_price_lines(&lines),
            Err(DomainError::InvalidPrice { .. })
        ));
    }
}
