//! # Order Assembler
//!
//! Composes pricing, cashback, reconciliation, the credit guard, and the
//! lifecycle into one finalized order ready for submission.
//!
//! ## Assembly Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Assembly                                     │
//! │                                                                         │
//! │  CheckoutRequest                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate (buyer, cart, tender, point offset)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pricing::resolve × N ──► PricedLine[]                                 │
//! │       │                                                                 │
//! │       ├──► cashback::compute ──► cashback_amount                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  amount_due = Σ line_subtotal − point_offset (clamped ≥ 0)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  settlement::reconcile ──► Settlement                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  credit guard ── credit > 0 and not allowed? ──► CreditNotAllowed      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lifecycle::initial_status ──► Order { fresh order_number }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module performs no I/O. It is the single place all business rules
//! converge; nothing here is scattered across UI code. Buyer and payer
//! identity arrive as explicit arguments, never from ambient session state.

use chrono::Utc;

use crate::cashback;
use crate::credit::is_credit_allowed;
use crate::error::{CoreError, CoreResult};
use crate::lifecycle::initial_status;
use crate::money::Money;
use crate::order::{generate_order_number, Order};
use crate::pricing;
use crate::settlement::reconcile;
use crate::types::{Buyer, CartLine, DeliveryMethod, PayerIdentity, PaymentMethod};
use crate::validation::{
    validate_buyer_selected, validate_cart, validate_point_offset, validate_tendered,
};

// =============================================================================
// Checkout Request
// =============================================================================

/// Everything the assembler needs to finalize one order.
///
/// Built by the till once the operator confirms the tender screen. An
/// assembled-but-unsubmitted order can be abandoned at any point with no
/// side effects.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Store where the order is entered.
    pub store_id: String,

    /// The cart as captured at the till.
    pub cart: Vec<CartLine>,

    /// The selected buyer, if any. Checkout without a buyer is rejected.
    pub buyer: Option<Buyer>,

    /// Who is paying at the till.
    pub payer_identity: PayerIdentity,

    /// How the goods leave the store.
    pub delivery_method: DeliveryMethod,

    /// How payment is tendered.
    pub payment_method: PaymentMethod,

    /// Amount handed over by the payer.
    pub tendered: Money,

    /// Loyalty points redeemed against the total.
    pub point_offset: Money,

    /// Optional signature/reference blob captured at the till.
    pub signature_ref: Option<String>,
}

// =============================================================================
// Assembly
// =============================================================================

/// Assembles a finalized order from a checkout request.
///
/// Fails closed: every error below is raised before any network effect can
/// happen. In particular, a settlement that needs credit the buyer is not
/// entitled to is a hard [`CoreError::CreditNotAllowed`], not a warning.
pub fn assemble(request: &CheckoutRequest) -> CoreResult<Order> {
    let buyer = validate_buyer_selected(request.buyer.as_ref())?;
    validate_cart(&request.cart)?;
    validate_tendered(request.tendered)?;
    validate_point_offset(request.point_offset)?;

    // Resolve every cart line against the buyer and payer
    let lines: Vec<_> = request
        .cart
        .iter()
        .map(|line| pricing::resolve(line, buyer, request.payer_identity))
        .collect();

    // Cashback is computed from the tier lists, with gift lines excluded
    let cashback_inputs: Vec<(CartLine, bool)> = request
        .cart
        .iter()
        .cloned()
        .zip(lines.iter().map(|l| l.is_gift()))
        .collect();
    let cashback_amount = cashback::compute(&cashback_inputs, buyer, request.payer_identity);

    let gross = lines
        .iter()
        .fold(Money::zero(), |acc, l| acc + l.line_subtotal);
    let amount_due = (gross - request.point_offset).clamp_non_negative();

    let settlement = reconcile(amount_due, request.tendered, request.payment_method);

    if settlement.has_credit() && !is_credit_allowed(buyer, request.payer_identity) {
        return Err(CoreError::CreditNotAllowed {
            role_class: buyer.role_class,
            payer_identity: request.payer_identity,
            credit_amount: settlement.credit_amount,
        });
    }

    let status = initial_status(&settlement, request.delivery_method);
    let order_number = generate_order_number();

    Ok(Order {
        order_number,
        store_id: request.store_id.clone(),
        buyer_id: buyer.id.clone(),
        payer_identity: request.payer_identity,
        lines,
        delivery_method: request.delivery_method,
        payment_method: request.payment_method,
        settlement,
        cashback_amount,
        point_offset: request.point_offset,
        status,
        signature_ref: request.signature_ref.clone(),
        created_at: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
