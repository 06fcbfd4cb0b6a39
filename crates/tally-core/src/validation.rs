//! # Validation Module
//!
//! Input validation for checkout requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Operator UI                                                  │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Rejected before any computation runs                              │
//! │  └── Missing buyer, zero-quantity lines, negative tender               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Business rules (assembler, credit guard)                     │
//! │                                                                         │
//! │  Defense in depth: each layer catches different errors                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::types::{Buyer, CartLine};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a buyer has been selected for checkout.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_buyer_selected;
///
/// assert!(validate_buyer_selected(None).is_err());
/// ```
pub fn validate_buyer_selected(buyer: Option<&Buyer>) -> ValidationResult<&Buyer> {
    match buyer {
        Some(b) if !b.id.trim().is_empty() => Ok(b),
        _ => Err(ValidationError::Required {
            field: "buyer".to_string(),
        }),
    }
}

/// Validates a single line quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates the tendered amount.
pub fn validate_tendered(tendered: Money) -> ValidationResult<()> {
    if tendered.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "tendered".to_string(),
        });
    }
    Ok(())
}

/// Validates the loyalty-point offset.
pub fn validate_point_offset(point_offset: Money) -> ValidationResult<()> {
    if point_offset.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "point_offset".to_string(),
        });
    }
    Ok(())
}

/// Validates a whole cart before assembly.
///
/// ## Rules
/// - At least one line
/// - No more than [`MAX_ORDER_LINES`] lines
/// - Every quantity positive and within [`MAX_LINE_QUANTITY`]
pub fn validate_cart(lines: &[CartLine]) -> Result<(), CoreError> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyCart.into());
    }
    if lines.len() > MAX_ORDER_LINES {
        return Err(CoreError::CartTooLarge {
            max: MAX_ORDER_LINES,
        });
    }
    for line in lines {
        validate_quantity(line.quantity)?;
        if line.quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PriceTiers, RoleClass};

    fn line(quantity: i64) -> CartLine {
        CartLine {
            catalog_item_id: "item-1".to_string(),
            name: "Item 1".to_string(),
            quantity,
            tiers: PriceTiers::default(),
            explicit_gift: false,
        }
    }

    #[test]
    fn test_buyer_required() {
        assert!(validate_buyer_selected(None).is_err());

        let buyer = Buyer {
            id: "  ".to_string(),
            role_class: RoleClass::Ordinary,
            discount_rate: None,
            self_credit_allowed: false,
            guest_credit_allowed: false,
            contact_address: None,
            contact_phone: None,
        };
        assert!(validate_buyer_selected(Some(&buyer)).is_err());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1).is_ok());
    }

    #[test]
    fn test_tendered_must_not_be_negative() {
        assert!(validate_tendered(Money::from_units(-1)).is_err());
        assert!(validate_tendered(Money::zero()).is_ok());
        assert!(validate_tendered(Money::from_units(100)).is_ok());
    }

    #[test]
    fn test_empty_cart_rejected() {
        assert!(matches!(
            validate_cart(&[]),
            Err(CoreError::Validation(ValidationError::EmptyCart))
        ));
    }

    #[test]
    fn test_zero_quantity_line_rejected() {
        assert!(validate_cart(&[line(1), line(0)]).is_err());
    }

    #[test]
    fn test_oversized_quantity_rejected() {
        assert!(matches!(
            validate_cart(&[line(MAX_LINE_QUANTITY + 1)]),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_valid_cart_passes() {
        assert!(validate_cart(&[line(1), line(5)]).is_ok());
    }
}
