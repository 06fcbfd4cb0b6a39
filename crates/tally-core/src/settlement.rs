//! # Payment Reconciler
//!
//! Reconciles tendered payment against the computed amount due.
//!
//! ## Reconciliation Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Reconciliation                               │
//! │                                                                         │
//! │  tendered > due   →  change_or_shortfall > 0  →  "change due"          │
//! │  tendered = due   →  change_or_shortfall = 0  →  settled exactly       │
//! │  tendered < due   →  change_or_shortfall < 0  →  "credit amount"       │
//! │                                                                         │
//! │  Tendered is never clamped to the due amount: overpayment (change)     │
//! │  and underpayment (credit) are both legal outcomes here. Whether a     │
//! │  credit balance is *permitted* is the credit guard's decision, not     │
//! │  the reconciler's.                                                     │
//! │                                                                         │
//! │  CARD: tendered is treated as exactly the due amount. No partial-card  │
//! │  scenario is modeled.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::order::Settlement;
use crate::types::PaymentMethod;

/// Reconciles a tendered amount against the amount due.
///
/// `tendered` must already be validated non-negative (see
/// [`crate::validation::validate_tendered`]); this function assumes it.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::settlement::reconcile;
/// use tally_core::types::PaymentMethod;
///
/// let s = reconcile(Money::from_units(240), Money::from_units(100), PaymentMethod::Cash);
/// assert_eq!(s.credit_amount.units(), 140);
/// assert_eq!(s.paid_amount.units(), 100);
/// ```
pub fn reconcile(
    amount_due: Money,
    tendered: Money,
    payment_method: PaymentMethod,
) -> Settlement {
    // Card terminals settle the exact amount; there is no cash drawer
    // involved and no partial authorization modeled.
    let amount_tendered = match payment_method {
        PaymentMethod::Card => amount_due,
        PaymentMethod::Cash | PaymentMethod::Transfer => tendered,
    };

    let change_or_shortfall = amount_tendered - amount_due;
    let credit_amount = (Money::zero() - change_or_shortfall).clamp_non_negative();
    let paid_amount = amount_tendered.min(amount_due);

    Settlement {
        amount_due,
        amount_tendered,
        change_or_shortfall,
        credit_amount,
        paid_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_payment() {
        let s = reconcile(
            Money::from_units(200),
            Money::from_units(200),
            PaymentMethod::Cash,
        );
        assert_eq!(s.change_or_shortfall.units(), 0);
        assert_eq!(s.credit_amount.units(), 0);
        assert_eq!(s.paid_amount.units(), 200);
        assert!(!s.has_credit());
    }

    #[test]
    fn test_overpayment_yields_change() {
        let s = reconcile(
            Money::from_units(200),
            Money::from_units(250),
            PaymentMethod::Cash,
        );
        assert_eq!(s.change_or_shortfall.units(), 50);
        assert_eq!(s.change_amount().units(), 50);
        assert_eq!(s.credit_amount.units(), 0);
        assert_eq!(s.paid_amount.units(), 200);
    }

    #[test]
    fn test_underpayment_yields_credit() {
        let s = reconcile(
            Money::from_units(240),
            Money::from_units(100),
            PaymentMethod::Cash,
        );
        assert_eq!(s.change_or_shortfall.units(), -140);
        assert_eq!(s.change_amount().units(), 0);
        assert_eq!(s.credit_amount.units(), 140);
        assert_eq!(s.paid_amount.units(), 100);
        assert!(s.has_credit());
    }

    #[test]
    fn test_card_tenders_exactly_the_due_amount() {
        // Whatever the operator keyed in, card settles the due amount
        let s = reconcile(
            Money::from_units(200),
            Money::from_units(9_999),
            PaymentMethod::Card,
        );
        assert_eq!(s.amount_tendered.units(), 200);
        assert_eq!(s.change_or_shortfall.units(), 0);
        assert_eq!(s.credit_amount.units(), 0);
    }

    #[test]
    fn test_transfer_behaves_like_cash() {
        let s = reconcile(
            Money::from_units(200),
            Money::from_units(150),
            PaymentMethod::Transfer,
        );
        assert_eq!(s.credit_amount.units(), 50);
    }

    #[test]
    fn test_credit_and_paid_partition_the_due_amount() {
        // credit = due − paid whenever tendered < due
        for tendered in [0, 1, 100, 239] {
            let s = reconcile(
                Money::from_units(240),
                Money::from_units(tendered),
                PaymentMethod::Cash,
            );
            assert_eq!(
                s.credit_amount.units() + s.paid_amount.units(),
                240,
                "tendered {tendered}"
            );
        }
        // credit = 0 whenever tendered ≥ due
        for tendered in [240, 241, 500] {
            let s = reconcile(
                Money::from_units(240),
                Money::from_units(tendered),
                PaymentMethod::Cash,
            );
            assert_eq!(s.credit_amount.units(), 0, "tendered {tendered}");
        }
    }
}
