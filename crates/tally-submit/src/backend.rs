//! # Order Backend Interface
//!
//! The seam between the orchestrator and the remote store. The backend is a
//! collaborator, not part of this crate: production wires in a real HTTP or
//! RPC client, tests wire in an in-memory fake.
//!
//! ## Call Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Two-Phase Order Create                            │
//! │                                                                         │
//! │  Orchestrator                              Backend                      │
//! │       │                                       │                         │
//! │       │── create_order(header) ──────────────►│  response shape is      │
//! │       │◄─ CreateOrderResponse ────────────────│  NOT reliable           │
//! │       │                                       │                         │
//! │       │   (identifier recovery, see          │                         │
//! │       │    response.rs; may involve:)        │                         │
//! │       │── list_pending(order_number) ────────►│  fallback poll          │
//! │       │◄─ Vec<PendingOrder> ──────────────────│                         │
//! │       │                                       │                         │
//! │       │── create_line_item(payload) ─────────►│  one call per line      │
//! │       │── create_line_item(payload) ─────────►│                         │
//! │       │── create_line_item(payload) ─────────►│                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tally_core::{Money, Order, PricedLine};

use crate::error::SubmitResult;

// =============================================================================
// Response and Payload Types
// =============================================================================

/// Raw create-order response, captured with enough fidelity for the
/// identifier recovery chain to work through its fallbacks.
#[derive(Debug, Clone, Default)]
pub struct CreateOrderResponse {
    /// Parsed JSON body, if the response body parsed as JSON at all.
    pub body: Option<serde_json::Value>,
    /// The body as raw text, kept for the bare-integer fallback.
    pub raw_text: String,
    /// `Location`-style header value, if the backend sent one.
    pub location: Option<String>,
}

/// One line-item creation payload.
///
/// `unit_price` carries the original (struck-through) price; the billed
/// amount travels in `subtotal`, and the difference in `discounted_amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    pub order_id: i64,
    pub catalog_item_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
    pub discounted_amount: Money,
    pub is_gift: bool,
}

impl LineItemPayload {
    /// Build the payload for one resolved line of a now-identified order.
    pub fn from_line(order_id: i64, line: &PricedLine) -> Self {
        Self {
            order_id,
            catalog_item_id: line.catalog_item_id.clone(),
            quantity: line.quantity,
            unit_price: line.original_unit_price,
            subtotal: line.line_subtotal,
            discounted_amount: line.line_discount,
            is_gift: line.is_gift(),
        }
    }
}

/// One entry from the pending-order listing, used only by the ID-recovery
/// poll fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    /// The remote store's identifier for the order header.
    pub id: i64,
    /// The client-generated order number the header was created with.
    pub order_number: String,
}

// =============================================================================
// Backend Trait
// =============================================================================

/// Remote store operations the orchestrator depends on.
///
/// Implementations translate these calls to whatever transport the store
/// speaks. All methods may fail with `RemoteUnavailable`; the orchestrator
/// decides what each failure means for the submission as a whole.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Create the order header. The response shape is unreliable: the body
    /// may be a bare number, an object, an array, or nothing usable.
    async fn create_order(&self, order: &Order) -> SubmitResult<CreateOrderResponse>;

    /// Create one line item attached to an already-identified order.
    async fn create_line_item(&self, payload: &LineItemPayload) -> SubmitResult<()>;

    /// List pending orders filtered by order number. Used only as the last
    /// resort of identifier recovery.
    async fn list_pending(&self, order_number: &str) -> SubmitResult<Vec<PendingOrder>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{
        assemble, Buyer, CartLine, CheckoutRequest, DeliveryMethod, PayerIdentity,
        PaymentMethod, PriceTiers, RoleClass,
    };

    fn sample_order() -> Order {
        let request = CheckoutRequest {
            store_id: "store-1".into(),
            cart: vec![CartLine {
                catalog_item_id: "sku-100".into(),
                name: "Green Tea 500g".into(),
                quantity: 2,
                tiers: PriceTiers {
                    dealer: Money::zero(),
                    member: Money::zero(),
                    store: Money::from_units(120),
                    base: Money::from_units(100),
                },
                explicit_gift: false,
            }],
            buyer: Some(Buyer {
                id: "buyer-1".into(),
                role_class: RoleClass::Ordinary,
                discount_rate: None,
                self_credit_allowed: false,
                guest_credit_allowed: false,
                contact_address: Some("12 Harbor Rd".into()),
                contact_phone: Some("555-0100".into()),
            }),
            payer_identity: PayerIdentity::SelfPay,
            delivery_method: DeliveryMethod::Ship,
            payment_method: PaymentMethod::Cash,
            tendered: Money::from_units(240),
            point_offset: Money::zero(),
            signature_ref: None,
        };
        assemble(&request).unwrap()
    }

    #[test]
    fn test_line_payload_carries_original_price() {
        let order = sample_order();
        let line = &order.lines[0];
        let payload = LineItemPayload::from_line(42, line);

        assert_eq!(payload.order_id, 42);
        assert_eq!(payload.quantity, 2);
        // unit_price is the struck-through reference, not the billed tier
        assert_eq!(payload.unit_price, line.original_unit_price);
        assert_eq!(payload.subtotal, line.line_subtotal);
        assert!(!payload.is_gift);
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let order = sample_order();
        let payload = LineItemPayload::from_line(7, &order.lines[0]);
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json.get("orderId").is_some());
        assert!(json.get("catalogItemId").is_some());
        assert!(json.get("discountedAmount").is_some());
        assert!(json.get("isGift").is_some());
    }
}
