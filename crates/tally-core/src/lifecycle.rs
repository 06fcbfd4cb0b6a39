//! # Order Status State Machine
//!
//! Pure transition rules for the order status lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │   creation ──┬── credit > 0 ──────────────► Credit ──┐                 │
//! │              ├── paid, ship ──────────────► Paid ────┤                 │
//! │              └── paid, store pickup ──────► Completed (walk-out)       │
//! │                                                      │                 │
//! │                                                      ▼                 │
//! │                        Shipped ──► Delivering ──► Completed            │
//! │                                                                         │
//! │   void(): any non-terminal status ──► Void   (irreversible)            │
//! │                                                                         │
//! │   Completed, Void: terminal. Transition attempts are rejected.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Forward transitions are confirmation-gated: the machine takes an explicit
//! `confirmed` flag instead of reaching into any UI dialog, and is a no-op
//! unless confirmed. An order never auto-advances.

use crate::error::{CoreError, CoreResult};
use crate::order::{OrderStatus, Settlement};
use crate::types::DeliveryMethod;

/// Initial status assigned at order creation.
///
/// `Credit` when a receivable is left open, otherwise `Paid`. The one
/// exception is a fully-paid store pickup, which completes on the spot:
/// a walk-out sale needs no further handling.
pub fn initial_status(settlement: &Settlement, delivery_method: DeliveryMethod) -> OrderStatus {
    if settlement.has_credit() {
        OrderStatus::Credit
    } else if delivery_method == DeliveryMethod::StorePickup {
        OrderStatus::Completed
    } else {
        OrderStatus::Paid
    }
}

/// The pure successor mapping. Terminal statuses map to themselves.
pub fn next(status: OrderStatus) -> OrderStatus {
    match status {
        OrderStatus::Credit => OrderStatus::Shipped,
        OrderStatus::Paid => OrderStatus::Shipped,
        OrderStatus::Shipped => OrderStatus::Delivering,
        OrderStatus::Delivering => OrderStatus::Completed,
        OrderStatus::Completed => OrderStatus::Completed,
        OrderStatus::Void => OrderStatus::Void,
    }
}

/// Applies one forward transition.
///
/// - Unconfirmed requests are a no-op: the current status is returned
///   unchanged.
/// - Transition attempts on terminal statuses are rejected with
///   [`CoreError::TerminalStatus`].
pub fn advance(status: OrderStatus, confirmed: bool) -> CoreResult<OrderStatus> {
    if status.is_terminal() {
        return Err(CoreError::TerminalStatus { status });
    }
    if !confirmed {
        return Ok(status);
    }
    Ok(next(status))
}

/// Voids an order from any non-terminal status.
///
/// Irreversible: no operation restores the previous status.
pub fn void(status: OrderStatus) -> CoreResult<OrderStatus> {
    if status.is_terminal() {
        return Err(CoreError::TerminalStatus { status });
    }
    Ok(OrderStatus::Void)
}

// =============================================================================
// Unit Tests
// =============================================================================
