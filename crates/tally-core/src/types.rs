//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartLine     │   │   PricedLine    │   │     Buyer       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  catalog id     │   │  chosen price   │   │  id             │       │
//! │  │  quantity       │   │  chosen tier    │   │  role class     │       │
//! │  │  price tiers    │   │  gift reason    │   │  credit flags   │       │
//! │  │  gift flag      │   │  line discount  │   │  discount rate  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PriceTier     │   │  PayerIdentity  │   │  PaymentMethod  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Dealer         │   │  SelfPay        │   │  Cash           │       │
//! │  │  Member         │   │  GuestPay       │   │  Card           │       │
//! │  │  Store          │   └─────────────────┘   │  Transfer       │       │
//! │  │  Base           │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `CartLine` is transient: created when a product is added to the cart,
//! consumed by the pricing resolver, discarded after order submission. The
//! `PricedLine` it resolves into is frozen into the order (snapshot pattern:
//! later catalog changes never rewrite a persisted order).

use serde::{Deserialize, Serialize};

use crate::money::{DiscountRate, Money};

// =============================================================================
// Price Tiers
// =============================================================================

/// The named price tier actually billed on a line.
///
/// Recorded for display purposes only; downstream computation never branches
/// on the chosen tier name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Dealer/distributor price. Eligible only for Dealer-class buyers, or
    /// Guide-class buyers paying for themselves.
    Dealer,
    /// Member-level price.
    Member,
    /// Store price.
    Store,
    /// Base catalog price (the fallback of last resort).
    Base,
}

/// Candidate unit prices attached to a catalog line.
///
/// A tier with a zero or negative value counts as "not offered"; zero is the
/// catalog's way of saying "no price at this tier". The one exception is the
/// base price, which is used even when zero once every other tier is out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTiers {
    /// Dealer/distributor unit price.
    pub dealer: Money,
    /// Member-level unit price.
    pub member: Money,
    /// Store unit price.
    pub store: Money,
    /// Base catalog unit price.
    pub base: Money,
}

impl PriceTiers {
    /// Returns the price at a named tier.
    pub fn at(&self, tier: PriceTier) -> Money {
        match tier {
            PriceTier::Dealer => self.dealer,
            PriceTier::Member => self.member,
            PriceTier::Store => self.store,
            PriceTier::Base => self.base,
        }
    }

    /// The "struck-through" reference price shown next to the billed price:
    /// the store price when offered, the base price otherwise.
    pub fn reference_price(&self) -> Money {
        if self.store.is_positive() {
            self.store
        } else {
            self.base
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One purchasable entry before pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog item identifier.
    pub catalog_item_id: String,

    /// Display name at time of adding (frozen).
    pub name: String,

    /// Quantity ordered. Must be a positive integer.
    pub quantity: i64,

    /// Candidate unit prices at time of adding (frozen).
    pub tiers: PriceTiers,

    /// Operator marked this line as a promotional gift.
    pub explicit_gift: bool,
}

// =============================================================================
// Gift Reason
// =============================================================================

/// Why a line is billed at zero.
///
/// Kept as a two-cause union so a legitimately free catalog item is never
/// confused with a promotional gift in reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftReason {
    /// Operator flagged the line as a gift at cart time.
    Explicit,
    /// Tier resolution produced a zero price while the reference price
    /// is non-zero.
    ZeroTierPrice,
}

// =============================================================================
// Priced Line
// =============================================================================

/// A cart line after tier resolution.
///
/// ## Invariants
/// - `line_discount` ≥ 0
/// - `line_subtotal` = `chosen_unit_price` × `quantity`
/// - `chosen_unit_price` is 0 whenever `gift` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    /// Catalog item identifier.
    pub catalog_item_id: String,

    /// Display name (frozen from the cart line).
    pub name: String,

    /// Quantity ordered.
    pub quantity: i64,

    /// The "struck-through" reference unit price (store, falling back to base).
    pub original_unit_price: Money,

    /// The unit price actually billed. Zero for gift lines.
    pub chosen_unit_price: Money,

    /// Which named tier was billed. Display only.
    pub chosen_tier: PriceTier,

    /// Set when the line is a gift, with the cause.
    pub gift: Option<GiftReason>,

    /// `chosen_unit_price` × `quantity`.
    pub line_subtotal: Money,

    /// Discount granted against the reference price, never negative.
    pub line_discount: Money,
}

impl PricedLine {
    /// Whether this line is billed as a gift.
    #[inline]
    pub fn is_gift(&self) -> bool {
        self.gift.is_some()
    }
}

// =============================================================================
// Buyer
// =============================================================================

/// Commercial role of a buyer, driving tier eligibility and credit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleClass {
    /// Regular retail member. Never eligible for credit.
    Ordinary,
    /// A guide who resells: earns a commission differential when a guest
    /// pays on their account.
    Guide,
    /// Dealer/distributor buying at the dealer tier.
    Dealer,
}

/// A member/account on whose behalf an order is placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    /// Member identifier.
    pub id: String,

    /// Commercial role.
    pub role_class: RoleClass,

    /// Dealer discount rate in basis points. Applied only when deriving a
    /// dealer-tier price for a line that carries none.
    pub discount_rate: Option<DiscountRate>,

    /// May this buyer carry a credit balance when paying as themself.
    pub self_credit_allowed: bool,

    /// May a guest payment on this buyer's account leave a credit balance.
    pub guest_credit_allowed: bool,

    /// Delivery address.
    pub contact_address: Option<String>,

    /// Contact phone.
    pub contact_phone: Option<String>,
}

// =============================================================================
// Payer Identity
// =============================================================================

/// Who is actually paying at the till.
///
/// Distinguishes a Guide-class buyer paying as themself from a third-party
/// customer paying on the buyer's account. Determines both credit
/// eligibility and whether a cashback differential is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayerIdentity {
    /// The buyer pays for themself.
    SelfPay,
    /// A third party pays on the buyer's account.
    GuestPay,
}

// =============================================================================
// Delivery & Payment Methods
// =============================================================================

/// How the goods leave the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Customer walks out with the goods.
    StorePickup,
    /// Goods are shipped to the contact address.
    Ship,
}

/// How payment is tendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal. Tendered is treated as exactly
    /// the amount due; no partial-card scenario is modeled.
    Card,
    /// Bank transfer.
    Transfer,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_at() {
        let tiers = PriceTiers {
            dealer: Money::from_units(80),
            member: Money::from_units(90),
            store: Money::from_units(100),
            base: Money::from_units(110),
        };
        assert_eq!(tiers.at(PriceTier::Dealer).units(), 80);
        assert_eq!(tiers.at(PriceTier::Base).units(), 110);
    }

    #[test]
    fn test_reference_price_prefers_store() {
        let tiers = PriceTiers {
            store: Money::from_units(100),
            base: Money::from_units(110),
            ..PriceTiers::default()
        };
        assert_eq!(tiers.reference_price().units(), 100);
    }

    #[test]
    fn test_reference_price_falls_back_to_base() {
        let tiers = PriceTiers {
            base: Money::from_units(110),
            ..PriceTiers::default()
        };
        assert_eq!(tiers.reference_price().units(), 110);
    }
}
