//! # tally-submit: Submission Orchestrator for Tally POS
//!
//! Takes an assembled order from tally-core and drives the two-phase,
//! partial-failure-tolerant create sequence against the remote store:
//! header create, identifier recovery, per-line item submission. Also owns
//! the checkout session flow that keeps a local draft until the submission
//! is known to have succeeded.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tally POS Submission Flow                          │
//! │                                                                         │
//! │  ┌────────────┐      ┌─────────────────────────────────────────────┐   │
//! │  │ tally-core │      │            tally-submit (THIS CRATE)        │   │
//! │  │            │      │                                             │   │
//! │  │ assemble() │─────►│  CheckoutFlow                               │   │
//! │  │            │      │    ├── Submitter (orchestrator.rs)          │   │
//! │  └────────────┘      │    │     ├── response.rs  id recovery       │   │
//! │                      │    │     └── OrderBackend (backend.rs)  ───────► remote store
//! │  ┌────────────┐      │    └── DraftRepository  ──────────────────────► tally-db
//! │  │  tally-db  │◄─────│                                             │   │
//! │  └────────────┘      └─────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The remote store seam (`OrderBackend` trait)
//! - [`response`] - Create-response classification and id extraction
//! - [`orchestrator`] - The two-phase submit sequence
//! - [`checkout`] - Session flow: assemble, draft, submit, clear
//! - [`config`] - Poll budget for identifier recovery
//! - [`error`] - Submission error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod response;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{CreateOrderResponse, LineItemPayload, OrderBackend, PendingOrder};
pub use checkout::{new_session_key, CheckoutFlow, CompletedCheckout};
pub use config::SubmitConfig;
pub use error::{LineOutcome, SubmitError, SubmitResult};
pub use orchestrator::Submitter;
pub use response::CreateOrderBody;
