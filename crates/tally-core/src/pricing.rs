//! # Pricing Resolver
//!
//! Picks the applicable unit price for a cart line from its tier list and
//! flags gift lines.
//!
//! ## Tier Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tier Selection Order                                │
//! │                                                                         │
//! │  1. Dealer price   ← only Dealer buyers, or Guide buyers on SelfPay    │
//! │  2. Member price                                                        │
//! │  3. Store price                                                         │
//! │  4. Base price     ← used even when zero if nothing else is offered    │
//! │                                                                         │
//! │  The first tier with a strictly positive value wins. An operator       │
//! │  gift flag overrides the outcome and forces the billed price to 0.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure function of its inputs; no side effects, no ambient session state.

use crate::money::Money;
use crate::types::{Buyer, CartLine, GiftReason, PayerIdentity, PriceTier, PricedLine, RoleClass};

/// Whether this buyer/payer combination may be billed at the dealer tier.
///
/// Dealers always qualify. Guides qualify only when paying for themselves;
/// a guest paying on a guide's account is billed like a retail customer
/// (the guide earns the differential as cashback instead).
pub fn dealer_tier_eligible(buyer: &Buyer, payer_identity: PayerIdentity) -> bool {
    match buyer.role_class {
        RoleClass::Dealer => true,
        RoleClass::Guide => payer_identity == PayerIdentity::SelfPay,
        RoleClass::Ordinary => false,
    }
}

/// The dealer-tier unit price for a line, independent of which tier ends up
/// billed.
///
/// The catalog's explicit dealer price wins when positive. When the catalog
/// carries none, the buyer's dealer discount rate (if any) is applied to the
/// reference price, rounded half-up. Zero means "no dealer price exists".
pub fn dealer_tier_price(line: &CartLine, buyer: &Buyer) -> Money {
    if line.tiers.dealer.is_positive() {
        return line.tiers.dealer;
    }
    match buyer.discount_rate {
        Some(rate) => rate.apply(line.tiers.reference_price()),
        None => Money::zero(),
    }
}

/// Resolves a cart line into a priced line for the given buyer and payer.
///
/// ## Resolution Steps
/// 1. Walk the tier order and pick the first strictly positive price
///    (dealer tier only when eligible); fall back to the base price even
///    if it is zero.
/// 2. Force the billed price to 0 when the operator flagged a gift.
/// 3. Derive the gift cause: explicit flag, or a zero billed price against
///    a non-zero reference price.
/// 4. Compute subtotal and discount; the discount never goes negative.
pub fn resolve(line: &CartLine, buyer: &Buyer, payer_identity: PayerIdentity) -> PricedLine {
    let original_unit_price = line.tiers.reference_price();

    let mut candidates: Vec<(PriceTier, Money)> = Vec::with_capacity(4);
    if dealer_tier_eligible(buyer, payer_identity) {
        candidates.push((PriceTier::Dealer, dealer_tier_price(line, buyer)));
    }
    candidates.push((PriceTier::Member, line.tiers.member));
    candidates.push((PriceTier::Store, line.tiers.store));
    candidates.push((PriceTier::Base, line.tiers.base));

    let (chosen_tier, tier_price) = candidates
        .into_iter()
        .find(|(_, price)| price.is_positive())
        // No tier offered a positive price: bill the base price as-is.
        .unwrap_or((PriceTier::Base, line.tiers.base));

    let chosen_unit_price = if line.explicit_gift {
        Money::zero()
    } else {
        tier_price
    };

    let gift = if line.explicit_gift {
        Some(GiftReason::Explicit)
    } else if chosen_unit_price.is_zero() && original_unit_price.is_positive() {
        Some(GiftReason::ZeroTierPrice)
    } else {
        None
    };

    let line_subtotal = chosen_unit_price.multiply_quantity(line.quantity);
    let line_discount = if gift.is_some() {
        original_unit_price.multiply_quantity(line.quantity)
    } else {
        (original_unit_price - chosen_unit_price)
            .multiply_quantity(line.quantity)
            .clamp_non_negative()
    };

    PricedLine {
        catalog_item_id: line.catalog_item_id.clone(),
        name: line.name.clone(),
        quantity: line.quantity,
        original_unit_price,
        chosen_unit_price,
        chosen_tier,
        gift,
        line_subtotal,
        line_discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::DiscountRate;
    use crate::types::PriceTiers;

    fn buyer(role: RoleClass) -> Buyer {
        Buyer {
            id: "buyer-1".to_string(),
            role_class: role,
            discount_rate: None,
            self_credit_allowed: false,
            guest_credit_allowed: false,
            contact_address: None,
            contact_phone: None,
        }
    }

    fn line(tiers: PriceTiers) -> CartLine {
        CartLine {
            catalog_item_id: "item-1".to_string(),
            name: "Item 1".to_string(),
            quantity: 2,
            tiers,
            explicit_gift: false,
        }
    }

    #[test]
    fn test_ordinary_buyer_skips_dealer_tier() {
        let line = line(PriceTiers {
            dealer: Money::from_units(80),
            member: Money::from_units(90),
            store: Money::from_units(100),
            base: Money::from_units(110),
        });

        let priced = resolve(&line, &buyer(RoleClass::Ordinary), PayerIdentity::SelfPay);
        assert_eq!(priced.chosen_tier, PriceTier::Member);
        assert_eq!(priced.chosen_unit_price.units(), 90);
        assert_eq!(priced.original_unit_price.units(), 100);
        assert_eq!(priced.line_subtotal.units(), 180);
        assert_eq!(priced.line_discount.units(), 20);
        assert!(!priced.is_gift());
    }

    #[test]
    fn test_dealer_buyer_gets_dealer_tier() {
        let line = line(PriceTiers {
            dealer: Money::from_units(80),
            member: Money::from_units(90),
            store: Money::from_units(100),
            base: Money::from_units(110),
        });

        let priced = resolve(&line, &buyer(RoleClass::Dealer), PayerIdentity::GuestPay);
        assert_eq!(priced.chosen_tier, PriceTier::Dealer);
        assert_eq!(priced.chosen_unit_price.units(), 80);
    }

    #[test]
    fn test_guide_dealer_tier_only_on_self_pay() {
        let tiers = PriceTiers {
            dealer: Money::from_units(80),
            store: Money::from_units(100),
            base: Money::from_units(110),
            ..PriceTiers::default()
        };

        let self_pay = resolve(&line(tiers), &buyer(RoleClass::Guide), PayerIdentity::SelfPay);
        assert_eq!(self_pay.chosen_tier, PriceTier::Dealer);

        let guest_pay = resolve(&line(tiers), &buyer(RoleClass::Guide), PayerIdentity::GuestPay);
        assert_eq!(guest_pay.chosen_tier, PriceTier::Store);
    }

    #[test]
    fn test_dealer_price_derived_from_discount_rate() {
        let mut dealer = buyer(RoleClass::Dealer);
        dealer.discount_rate = Some(DiscountRate::from_bps(8500));

        // No explicit dealer tier in the catalog
        let line = line(PriceTiers {
            store: Money::from_units(100),
            base: Money::from_units(110),
            ..PriceTiers::default()
        });

        let priced = resolve(&line, &dealer, PayerIdentity::SelfPay);
        assert_eq!(priced.chosen_tier, PriceTier::Dealer);
        assert_eq!(priced.chosen_unit_price.units(), 85);
    }

    #[test]
    fn test_base_price_used_when_only_tier() {
        let line = line(PriceTiers {
            base: Money::from_units(100),
            ..PriceTiers::default()
        });

        let priced = resolve(&line, &buyer(RoleClass::Ordinary), PayerIdentity::SelfPay);
        assert_eq!(priced.chosen_tier, PriceTier::Base);
        assert_eq!(priced.chosen_unit_price.units(), 100);
        // Reference falls back to base, so no discount is recorded
        assert_eq!(priced.line_discount.units(), 0);
    }

    #[test]
    fn test_all_tiers_zero_is_not_a_gift() {
        let line = line(PriceTiers::default());

        let priced = resolve(&line, &buyer(RoleClass::Ordinary), PayerIdentity::SelfPay);
        assert_eq!(priced.chosen_unit_price.units(), 0);
        assert_eq!(priced.chosen_tier, PriceTier::Base);
        // A legitimately free catalog item is not a promotional gift
        assert!(!priced.is_gift());
        assert_eq!(priced.line_discount.units(), 0);
    }

    #[test]
    fn test_zero_tier_with_nonzero_reference_is_gift() {
        // Store price exists, but the operator's catalog resolved the member
        // tier to zero and everything below it too, except the reference.
        let line = CartLine {
            catalog_item_id: "item-1".to_string(),
            name: "Item 1".to_string(),
            quantity: 1,
            tiers: PriceTiers {
                store: Money::from_units(50),
                ..PriceTiers::default()
            },
            explicit_gift: false,
        };

        let priced = resolve(&line, &buyer(RoleClass::Ordinary), PayerIdentity::SelfPay);
        // Store is positive so it gets billed; not a gift
        assert_eq!(priced.chosen_unit_price.units(), 50);
        assert!(!priced.is_gift());
    }

    #[test]
    fn test_explicit_gift_forces_zero_price() {
        let line = CartLine {
            catalog_item_id: "item-1".to_string(),
            name: "Item 1".to_string(),
            quantity: 1,
            tiers: PriceTiers {
                base: Money::from_units(50),
                ..PriceTiers::default()
            },
            explicit_gift: true,
        };

        let priced = resolve(&line, &buyer(RoleClass::Ordinary), PayerIdentity::SelfPay);
        assert_eq!(priced.chosen_unit_price.units(), 0);
        assert_eq!(priced.gift, Some(GiftReason::Explicit));
        assert_eq!(priced.line_subtotal.units(), 0);
        assert_eq!(priced.line_discount.units(), 50);
    }

    #[test]
    fn test_line_discount_never_negative() {
        // Member price above the store reference: discount clamps at zero
        let line = line(PriceTiers {
            member: Money::from_units(120),
            store: Money::from_units(100),
            base: Money::from_units(110),
            ..PriceTiers::default()
        });

        let priced = resolve(&line, &buyer(RoleClass::Ordinary), PayerIdentity::SelfPay);
        assert_eq!(priced.chosen_unit_price.units(), 120);
        assert_eq!(priced.line_discount.units(), 0);
    }
}
