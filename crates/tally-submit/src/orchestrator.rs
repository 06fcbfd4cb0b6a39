//! # Submission Orchestrator
//!
//! Drives the two-phase, partial-failure-tolerant create sequence against
//! the remote store: create the order header, recover the new order's
//! identifier, then attach each priced line as its own creation call.
//!
//! ## Recovery Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     submit(order) Control Flow                          │
//! │                                                                         │
//! │  create_order(header)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. body id?        ──found──┐     (response.rs, steps 1-3)            │
//! │  2. raw-text id?    ──found──┤                                          │
//! │  3. Location id?    ──found──┤                                          │
//! │       │ none                 │                                          │
//! │       ▼                      │                                          │
//! │  4. poll pending listing     │     up to poll_attempts, with a         │
//! │     by order_number ──found──┤     bounded sleep before each poll      │
//! │       │ exhausted            │                                          │
//! │       ▼                      ▼                                          │
//! │  OrderIdUnresolved      create_line_item × N (sequential)              │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  all ok → order id │ any failed →                      │
//! │                  LineItemSubmissionFailed (partial state reported)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no rollback. Once the header exists remotely, every failure mode
//! reports exactly what was and was not persisted instead of retrying
//! silently.

use tracing::{debug, info, warn};

use tally_core::Order;

use crate::backend::{CreateOrderResponse, LineItemPayload, OrderBackend};
use crate::config::SubmitConfig;
use crate::error::{LineOutcome, SubmitError, SubmitResult};
use crate::response;

/// Submits assembled orders to the remote store.
pub struct Submitter<B: OrderBackend> {
    backend: B,
    config: SubmitConfig,
}

impl<B: OrderBackend> Submitter<B> {
    /// Create a submitter with the default poll budget.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, SubmitConfig::default())
    }

    pub fn with_config(backend: B, config: SubmitConfig) -> Self {
        Self { backend, config }
    }

    /// Access the wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Submit one assembled order. Returns the remote store's identifier
    /// for the created order.
    ///
    /// Not cancellation-safe: once the header create has been dispatched,
    /// the caller must let this run to completion or to a reported failure,
    /// because partial backend state may already exist.
    pub async fn submit(&self, order: &Order) -> SubmitResult<i64> {
        info!(
            order_number = %order.order_number,
            line_count = order.line_count(),
            "Submitting order header"
        );

        let response = self.backend.create_order(order).await?;
        let order_id = self.resolve_order_id(order, &response).await?;

        info!(
            order_number = %order.order_number,
            order_id,
            "Order identifier resolved"
        );

        self.submit_lines(order, order_id).await?;

        info!(order_id, "Order fully persisted");
        Ok(order_id)
    }

    /// Work through the four recovery steps until one yields an identifier.
    async fn resolve_order_id(
        &self,
        order: &Order,
        response: &CreateOrderResponse,
    ) -> SubmitResult<i64> {
        if let Some(id) = response::resolve_immediate(response) {
            debug!(order_id = id, "Identifier recovered from create response");
            return Ok(id);
        }

        warn!(
            order_number = %order.order_number,
            "Create response yielded no identifier, polling pending listing"
        );

        for attempt in 1..=self.config.poll_attempts {
            tokio::time::sleep(self.config.poll_delay).await;

            match self.backend.list_pending(&order.order_number).await {
                Ok(pending) => {
                    if let Some(found) = pending
                        .iter()
                        .find(|p| p.order_number == order.order_number)
                    {
                        debug!(
                            order_id = found.id,
                            attempt, "Identifier recovered from pending listing"
                        );
                        return Ok(found.id);
                    }
                    debug!(attempt, "Order not yet visible in pending listing");
                }
                // The header may already exist, so a transport failure here
                // consumes the attempt instead of aborting as retryable.
                Err(e) => warn!(attempt, error = %e, "Pending listing poll failed"),
            }
        }

        Err(SubmitError::OrderIdUnresolved {
            order_number: order.order_number.clone(),
            attempts_exhausted: self.config.poll_attempts,
        })
    }

    /// Attach every priced line to the identified order, one call per line.
    ///
    /// Lines are dispatched in order and every line is attempted even after
    /// an earlier one fails, so the partial-failure report is complete.
    async fn submit_lines(&self, order: &Order, order_id: i64) -> SubmitResult<()> {
        let mut outcomes = Vec::with_capacity(order.lines.len());

        for (index, line) in order.lines.iter().enumerate() {
            let payload = LineItemPayload::from_line(order_id, line);
            let outcome = match self.backend.create_line_item(&payload).await {
                Ok(()) => LineOutcome {
                    catalog_item_id: line.catalog_item_id.clone(),
                    line_index: index,
                    error: None,
                },
                Err(e) => {
                    warn!(
                        order_id,
                        line_index = index,
                        catalog_item_id = %line.catalog_item_id,
                        error = %e,
                        "Line item creation failed"
                    );
                    LineOutcome {
                        catalog_item_id: line.catalog_item_id.clone(),
                        line_index: index,
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let failed_count = outcomes.iter().filter(|o| !o.succeeded()).count();
        if failed_count > 0 {
            return Err(SubmitError::LineItemSubmissionFailed {
                order_id,
                total_count: outcomes.len(),
                failed_count,
                outcomes,
            });
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
