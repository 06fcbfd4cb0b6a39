//! # Cashback Calculator
//!
//! Computes the per-order commission differential for resale scenarios.
//!
//! ## When Cashback Applies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cashback Eligibility                                │
//! │                                                                         │
//! │  buyer.role_class   payer_identity    cashback                         │
//! │  ─────────────────  ──────────────    ────────────────────────────     │
//! │  Guide              GuestPay          Σ (store − dealer) × qty         │
//! │  Guide              SelfPay           0                                │
//! │  Dealer             (either)          0                                │
//! │  Ordinary           (either)          0                                │
//! │                                                                         │
//! │  A guide's customer pays the store-tier price directly; the guide      │
//! │  earns the dealer differential as commission.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The differential is computed from the *tier prices*, not from the billed
//! price: the billed price may itself already equal the dealer tier, which
//! would zero the commission incorrectly.

use crate::money::Money;
use crate::pricing::dealer_tier_price;
use crate::types::{Buyer, CartLine, PayerIdentity, RoleClass};

/// Computes the cashback commission for an order.
///
/// Takes the cart lines (the tier lists) zipped with their resolved gift
/// state: gift lines earn no commission. Returns zero for every role/payer
/// combination other than Guide + GuestPay.
pub fn compute(
    lines: &[(CartLine, bool)],
    buyer: &Buyer,
    payer_identity: PayerIdentity,
) -> Money {
    if buyer.role_class != RoleClass::Guide || payer_identity != PayerIdentity::GuestPay {
        return Money::zero();
    }

    lines
        .iter()
        .filter(|(_, is_gift)| !is_gift)
        .fold(Money::zero(), |acc, (line, _)| {
            let store = line.tiers.store;
            let dealer = dealer_tier_price(line, buyer);
            let differential = (store - dealer).clamp_non_negative();
            acc + differential.multiply_quantity(line.quantity)
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
