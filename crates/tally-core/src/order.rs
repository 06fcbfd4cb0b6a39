//! # Order Types
//!
//! The order header, its settlement figures, and the status vocabulary.
//!
//! ## Order Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             Order                                       │
//! │                                                                         │
//! │  order_number (client-generated, time-based, unique per attempt)       │
//! │  store_id / buyer_id / payer_identity                                  │
//! │  lines: Vec<PricedLine>          ← frozen pricing snapshots            │
//! │  settlement: Settlement          ← due / tendered / change / credit    │
//! │  cashback_amount                 ← guide commission differential       │
//! │  status: OrderStatus             ← driven by the lifecycle module      │
//! │                                                                         │
//! │  Created at submission time; mutated only through status transitions   │
//! │  after persistence; never deleted, only voided.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{DeliveryMethod, PayerIdentity, PaymentMethod, PricedLine};

// =============================================================================
// Settlement
// =============================================================================

/// Reconciled payment figures for one order.
///
/// ## Invariants
/// - `change_or_shortfall` = `amount_tendered` − `amount_due`
/// - `credit_amount` = max(0, −`change_or_shortfall`)
/// - `paid_amount` = min(`amount_tendered`, `amount_due`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Sum of line subtotals minus the loyalty-point offset.
    pub amount_due: Money,

    /// What the payer handed over.
    pub amount_tendered: Money,

    /// Positive = change due back, negative = credit balance.
    pub change_or_shortfall: Money,

    /// The unpaid portion tracked as a receivable against the buyer.
    pub credit_amount: Money,

    /// The portion of the due amount actually covered at the till.
    pub paid_amount: Money,
}

impl Settlement {
    /// Change owed back to the payer, zero when none.
    #[inline]
    pub fn change_amount(&self) -> Money {
        self.change_or_shortfall.clamp_non_negative()
    }

    /// Whether this settlement leaves a receivable open.
    #[inline]
    pub fn has_credit(&self) -> bool {
        self.credit_amount.is_positive()
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a sales order.
///
/// Transitions are owned by the [`crate::lifecycle`] module; nothing else
/// may rewrite an order's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Cancelled. Terminal.
    Void,
    /// Part of the total is still owed; goods not yet dispatched.
    Credit,
    /// Fully paid; goods not yet dispatched.
    Paid,
    /// Goods handed to the carrier.
    Shipped,
    /// Goods out for delivery.
    Delivering,
    /// Walk-out sale or confirmed delivery. Terminal.
    Completed,
}

impl OrderStatus {
    /// Terminal statuses permit no further transition, voiding included.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Void | OrderStatus::Completed)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A finalized sales order ready for (or past) submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Client-generated, time-based, unique per submission attempt.
    /// Doubles as the match key for the ID-recovery polling fallback.
    pub order_number: String,

    /// Store where the order was entered.
    pub store_id: String,

    /// Member the order is booked against.
    pub buyer_id: String,

    /// Who paid at the till.
    pub payer_identity: PayerIdentity,

    /// Frozen priced lines.
    pub lines: Vec<PricedLine>,

    /// How the goods leave the store.
    pub delivery_method: DeliveryMethod,

    /// How payment was tendered.
    pub payment_method: PaymentMethod,

    /// Reconciled payment figures.
    pub settlement: Settlement,

    /// Guide commission differential, zero unless Guide + GuestPay.
    pub cashback_amount: Money,

    /// Loyalty points redeemed against the total.
    pub point_offset: Money,

    /// Current lifecycle status.
    pub status: crate::order::OrderStatus,

    /// Optional signature/reference blob captured at the till.
    pub signature_ref: Option<String>,

    /// When the order was assembled.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of line subtotals before the point offset.
    pub fn lines_subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_subtotal)
    }

    /// Number of lines on the order.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Order Totals (summary view)
// =============================================================================

/// Roll-up of an assembled order for summary screens and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub amount_due: Money,
    pub amount_tendered: Money,
    pub change_amount: Money,
    pub credit_amount: Money,
    pub cashback_amount: Money,
}

impl From<&Order> for OrderTotals {
    fn from(order: &Order) -> Self {
        OrderTotals {
            line_count: order.line_count(),
            total_quantity: order.lines.iter().map(|l| l.quantity).sum(),
            amount_due: order.settlement.amount_due,
            amount_tendered: order.settlement.amount_tendered,
            change_amount: order.settlement.change_amount(),
            credit_amount: order.settlement.credit_amount,
            cashback_amount: order.cashback_amount,
        }
    }
}

// =============================================================================
// Order Number Generation
// =============================================================================

/// Generates an order number in format: YYMMDD-HHMMSS-NNNN
///
/// ## Format
/// - YYMMDD-HHMMSS: timestamp at assembly
/// - NNNN: sub-second entropy to keep concurrent stations apart
///
/// Unique per submission attempt; a retried submission assembles a fresh
/// order and therefore carries a fresh number, which is what makes the
/// pending-order polling fallback unambiguous.
///
/// ## Example
/// `260829-142255-0417`
pub fn generate_order_number() -> String {
    let now = Utc::now();
    let nanos = now.timestamp_subsec_nanos();
    let entropy: u16 = (nanos % 10_000) as u16;
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), entropy)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminality() {
        assert!(OrderStatus::Void.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(!OrderStatus::Credit.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(!OrderStatus::Delivering.is_terminal());
    }

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        // YYMMDD-HHMMSS-NNNN
        assert_eq!(number.len(), 18);
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 6);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 4);
        assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn test_settlement_change_amount() {
        let settlement = Settlement {
            amount_due: Money::from_units(200),
            amount_tendered: Money::from_units(250),
            change_or_shortfall: Money::from_units(50),
            credit_amount: Money::zero(),
            paid_amount: Money::from_units(200),
        };
        assert_eq!(settlement.change_amount().units(), 50);
        assert!(!settlement.has_credit());
    }
}
