//! # Checkout Session Flow
//!
//! Ties the pure assembly step, the local draft store, and the submission
//! orchestrator together into one operator-facing flow.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Checkout Session                              │
//! │                                                                         │
//! │  checkout(session, request)                                             │
//! │       │                                                                 │
//! │       ├─ assemble (pure, fails closed) ──► validation / credit errors  │
//! │       ├─ save draft (keyed by session)                                 │
//! │       ├─ submit to remote store                                        │
//! │       │      │                                                          │
//! │       │      ├─ ok ──► clear draft unconditionally ──► done            │
//! │       │      └─ err ─► DRAFT STAYS: operator can resubmit(session)     │
//! │       │                without re-entering the cart                    │
//! │       │                                                                 │
//! │  abandon(session): drop the draft, no remote effect                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{info, warn};

use tally_core::{assemble, generate_order_number, CheckoutRequest, Order};
use tally_db::{CheckoutDraft, DraftRepository};

use crate::backend::OrderBackend;
use crate::error::{SubmitError, SubmitResult};
use crate::orchestrator::Submitter;

/// Fresh key for a new checkout session.
pub fn new_session_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A successfully completed checkout.
#[derive(Debug)]
pub struct CompletedCheckout {
    /// Remote store identifier for the persisted order.
    pub order_id: i64,
    /// The order as it was submitted.
    pub order: Order,
}

/// Operator-facing checkout flow for one station.
pub struct CheckoutFlow<B: OrderBackend> {
    submitter: Submitter<B>,
    drafts: DraftRepository,
}

impl<B: OrderBackend> CheckoutFlow<B> {
    pub fn new(submitter: Submitter<B>, drafts: DraftRepository) -> Self {
        Self { submitter, drafts }
    }

    /// Assemble, persist as a draft, and submit a checkout request.
    ///
    /// Assembly failures happen before any draft or remote effect. If
    /// submission fails, the draft is left in place so the operator can
    /// call [`resubmit`](Self::resubmit) instead of rebuilding the cart.
    pub async fn checkout(
        &self,
        session_key: &str,
        request: &CheckoutRequest,
    ) -> SubmitResult<CompletedCheckout> {
        let order = assemble(request)?;

        let draft = CheckoutDraft::from_order(session_key, &order)?;
        self.drafts.save(&draft).await?;

        self.submit_and_clear(session_key, order).await
    }

    /// Retry submission of a previously assembled order.
    ///
    /// Loads the draft saved by an earlier failed [`checkout`](Self::checkout)
    /// and submits it again. The cart, settlement, and lines are kept as
    /// assembled, but the order number (and timestamp) are regenerated: a
    /// failed create may still have landed server-side, and the number is
    /// the match key for identifier recovery, so reusing it could attach
    /// lines to the wrong header when the pending listing holds both.
    pub async fn resubmit(&self, session_key: &str) -> SubmitResult<CompletedCheckout> {
        let draft = self.drafts.load_required(session_key).await?;
        let mut order = draft.order()?;

        let previous_number = order.order_number.clone();
        order.order_number = generate_order_number();
        order.created_at = Utc::now();

        info!(
            session_key,
            previous_number = %previous_number,
            order_number = %order.order_number,
            "Resubmitting drafted order under a fresh number"
        );

        self.submit_and_clear(session_key, order).await
    }

    /// Abandon an assembled-but-unsubmitted order. No remote effect.
    pub async fn abandon(&self, session_key: &str) -> SubmitResult<()> {
        self.drafts.clear(session_key).await?;
        info!(session_key, "Checkout session abandoned");
        Ok(())
    }

    /// The drafted order for a session, if one exists.
    pub async fn pending_draft(&self, session_key: &str) -> SubmitResult<Option<Order>> {
        match self.drafts.load(session_key).await? {
            Some(draft) => Ok(Some(draft.order()?)),
            None => Ok(None),
        }
    }

    async fn submit_and_clear(
        &self,
        session_key: &str,
        order: Order,
    ) -> SubmitResult<CompletedCheckout> {
        match self.submitter.submit(&order).await {
            Ok(order_id) => {
                // Cleared unconditionally so a finished session can never be
                // restored or resubmitted as a duplicate. A clear failure
                // leaves a stale draft behind, not a failed order: the
                // checkout still reports success with the resolved id,
                // since surfacing it as an error would invite a resubmit
                // of an order that already exists remotely.
                if let Err(e) = self.drafts.clear(session_key).await {
                    warn!(
                        session_key,
                        order_id,
                        error = %e,
                        "Order persisted but draft could not be cleared"
                    );
                }
                Ok(CompletedCheckout { order_id, order })
            }
            Err(e) => {
                warn!(
                    session_key,
                    order_number = %order.order_number,
                    error = %e,
                    partial_state = e.leaves_partial_state(),
                    "Submission failed, draft retained for resubmission"
                );
                Err(e)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
