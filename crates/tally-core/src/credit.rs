//! # Credit Eligibility Guard
//!
//! Decides whether a payment shortfall may legally become a credit balance.
//!
//! ## Rule Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  role_class   payer_identity    allowed when                           │
//! │  ───────────  ───────────────   ──────────────────────────────────     │
//! │  Guide        SelfPay           buyer.self_credit_allowed              │
//! │  Guide        GuestPay          buyer.guest_credit_allowed             │
//! │  Dealer       (either)          buyer.self_credit_allowed              │
//! │  Ordinary     (either)          never                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Total over the whole role × identity matrix; no combination is left
//! undefined. The assembler treats a `false` here combined with a positive
//! credit amount as a hard precondition failure, raised before any
//! persistence attempt.

use crate::types::{Buyer, PayerIdentity, RoleClass};

/// Whether a shortfall on this buyer/payer combination may be carried as
/// a receivable.
pub fn is_credit_allowed(buyer: &Buyer, payer_identity: PayerIdentity) -> bool {
    match (buyer.role_class, payer_identity) {
        (RoleClass::Guide, PayerIdentity::SelfPay) => buyer.self_credit_allowed,
        (RoleClass::Guide, PayerIdentity::GuestPay) => buyer.guest_credit_allowed,
        (RoleClass::Dealer, _) => buyer.self_credit_allowed,
        (RoleClass::Ordinary, _) => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer(role: RoleClass, self_credit: bool, guest_credit: bool) -> Buyer {
        Buyer {
            id: "buyer-1".to_string(),
            role_class: role,
            discount_rate: None,
            self_credit_allowed: self_credit,
            guest_credit_allowed: guest_credit,
            contact_address: None,
            contact_phone: None,
        }
    }

    #[test]
    fn test_guide_self_pay_uses_self_flag() {
        assert!(is_credit_allowed(
            &buyer(RoleClass::Guide, true, false),
            PayerIdentity::SelfPay
        ));
        assert!(!is_credit_allowed(
            &buyer(RoleClass::Guide, false, true),
            PayerIdentity::SelfPay
        ));
    }

    #[test]
    fn test_guide_guest_pay_uses_guest_flag() {
        assert!(is_credit_allowed(
            &buyer(RoleClass::Guide, false, true),
            PayerIdentity::GuestPay
        ));
        assert!(!is_credit_allowed(
            &buyer(RoleClass::Guide, true, false),
            PayerIdentity::GuestPay
        ));
    }

    #[test]
    fn test_dealer_uses_self_flag_for_either_identity() {
        let dealer = buyer(RoleClass::Dealer, true, false);
        assert!(is_credit_allowed(&dealer, PayerIdentity::SelfPay));
        assert!(is_credit_allowed(&dealer, PayerIdentity::GuestPay));

        let dealer = buyer(RoleClass::Dealer, false, true);
        assert!(!is_credit_allowed(&dealer, PayerIdentity::SelfPay));
        assert!(!is_credit_allowed(&dealer, PayerIdentity::GuestPay));
    }

    #[test]
    fn test_ordinary_never_allowed() {
        let ordinary = buyer(RoleClass::Ordinary, true, true);
        assert!(!is_credit_allowed(&ordinary, PayerIdentity::SelfPay));
        assert!(!is_credit_allowed(&ordinary, PayerIdentity::GuestPay));
    }

    /// The guard is a total function over the 3×2 role/identity matrix.
    #[test]
    fn test_total_over_matrix() {
        for role in [RoleClass::Ordinary, RoleClass::Guide, RoleClass::Dealer] {
            for identity in [PayerIdentity::SelfPay, PayerIdentity::GuestPay] {
                // Just exercise every combination; no panic = total
                let _ = is_credit_allowed(&buyer(role, true, true), identity);
            }
        }
    }
}
