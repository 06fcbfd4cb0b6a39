//! # Submission Error Types
//!
//! Error types for the submission orchestrator and checkout flow.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Submission Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌────────────────────────┐ │
//! │  │   Assembly      │  │   Identifier     │  │   Line Items           │ │
//! │  │                 │  │                  │  │                        │ │
//! │  │  Core(..)       │  │  OrderIdUnres.   │  │  LineItemSubmission-   │ │
//! │  │  (validation,   │  │  (header may     │  │  Failed (partial       │ │
//! │  │   credit guard) │  │   exist remotely)│  │   state reported)      │ │
//! │  └─────────────────┘  └──────────────────┘  └────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌──────────────────┐                             │
//! │  │   Transport     │  │   Local Store    │                             │
//! │  │                 │  │                  │                             │
//! │  │  RemoteUnavail. │  │  Draft(..)       │                             │
//! │  └─────────────────┘  └──────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for submission operations.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Outcome of one line-item creation call, kept for partial-failure reports.
#[derive(Debug, Clone)]
pub struct LineOutcome {
    /// Catalog item id of the line.
    pub catalog_item_id: String,
    /// Zero-based position of the line in the order.
    pub line_index: usize,
    /// Error message if this line failed, None if it persisted.
    pub error: Option<String>,
}

impl LineOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Submission error type covering assembly, identifier recovery, and
/// line-item persistence failures.
#[derive(Debug, Error)]
pub enum SubmitError {
    // =========================================================================
    // Assembly Errors (rejected before any network effect)
    // =========================================================================
    /// Validation or eligibility failure from order assembly.
    #[error(transparent)]
    Core(#[from] tally_core::CoreError),

    // =========================================================================
    // Identifier Recovery Errors
    // =========================================================================
    /// The create-order response yielded no identifier and the pending-order
    /// poll never surfaced the order number. The header may exist remotely
    /// with no line items attached; the operator must resolve this manually.
    #[error(
        "Could not resolve remote id for order {order_number} after {attempts_exhausted} recovery attempts"
    )]
    OrderIdUnresolved {
        order_number: String,
        attempts_exhausted: u32,
    },

    // =========================================================================
    // Line Item Errors
    // =========================================================================
    /// One or more line items failed after the header was created. The order
    /// exists remotely in a partial state; no rollback is attempted.
    #[error(
        "Order {order_id}: {failed_count} of {total_count} line items failed to persist"
    )]
    LineItemSubmissionFailed {
        order_id: i64,
        total_count: usize,
        failed_count: usize,
        outcomes: Vec<LineOutcome>,
    },

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Transport-level failure talking to the remote store.
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    // =========================================================================
    // Local Store Errors
    // =========================================================================
    /// Draft persistence failure.
    #[error("Draft store error: {0}")]
    Draft(#[from] tally_db::DbError),

    /// Failed to serialize or parse an order payload.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Error Categorization (for retry decisions at the call site)
// =============================================================================

impl SubmitError {
    /// Returns true if retrying the whole submission is safe.
    ///
    /// ## Retryable
    /// - Transport failures before any remote state was created
    /// - Draft store failures
    ///
    /// ## Non-Retryable
    /// - Assembly failures (inputs must change first)
    /// - `OrderIdUnresolved` and `LineItemSubmissionFailed`: the header may
    ///   already exist remotely, so a blind retry risks a duplicate order
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmitError::RemoteUnavailable(_) | SubmitError::Draft(_)
        )
    }

    /// Returns true if remote state may exist despite the failure.
    pub fn leaves_partial_state(&self) -> bool {
        matches!(
            self,
            SubmitError::OrderIdUnresolved { .. }
                | SubmitError::LineItemSubmissionFailed { .. }
        )
    }
}
