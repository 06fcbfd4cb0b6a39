//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the **heart** of the checkout and order-settlement engine.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tally POS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Till / Back-Office UI                         │   │
//! │  │     Cart entry ──► Tender screen ──► Submit ──► Receipt        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌──────────┐ ┌────────────┐ ┌────────┐           │   │
//! │  │  │ pricing │ │ cashback │ │ settlement │ │ credit │           │   │
//! │  │  └────┬────┘ └────┬─────┘ └─────┬──────┘ └───┬────┘           │   │
//! │  │       └───────────┴───────┬─────┴─────────────┘                │   │
//! │  │                           ▼                                    │   │
//! │  │                      assembler ──► Order                       │   │
//! │  │                           │                                    │   │
//! │  │                      lifecycle (status machine)                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   tally-db (draft store)         tally-submit (orchestrator)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartLine, Buyer, PayerIdentity, etc.)
//! - [`money`] - Integer money type and half-up discount arithmetic
//! - [`order`] - Order header, settlement figures, status vocabulary
//! - [`pricing`] - Tier price resolution and gift flagging
//! - [`cashback`] - Guide commission differential
//! - [`settlement`] - Payment reconciliation
//! - [`credit`] - Credit eligibility guard
//! - [`lifecycle`] - Order status state machine
//! - [`assembler`] - The single convergence point of all business rules
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic given its inputs
//!    (order-number generation reads the clock, nothing else does)
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Whole currency units in i64, round-half-up where
//!    fractions can arise
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **No ambient state**: buyer and payer identity are explicit arguments
//!    everywhere
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::settlement::reconcile;
//! use tally_core::types::PaymentMethod;
//!
//! // A 240-unit order paid 100 in cash leaves a 140 receivable
//! let s = reconcile(Money::from_units(240), Money::from_units(100), PaymentMethod::Cash);
//! assert_eq!(s.credit_amount.units(), 140);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assembler;
pub mod cashback;
pub mod credit;
pub mod error;
pub mod lifecycle;
pub mod money;
pub mod order;
pub mod pricing;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Money` instead of
// `use tally_core::money::Money`

pub use assembler::{assemble, CheckoutRequest};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use order::{generate_order_number, Order, OrderStatus, OrderTotals, Settlement};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single order
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-store in future versions.
pub const MAX_LINE_QUANTITY: i64 = 999;
