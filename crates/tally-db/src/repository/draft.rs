//! # Draft Repository
//!
//! Database operations for checkout drafts.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Draft Lifecycle                                   │
//! │                                                                         │
//! │  1. ASSEMBLE                                                           │
//! │     └── assembler produces an Order (no I/O yet)                       │
//! │                                                                         │
//! │  2. SAVE                                                               │
//! │     └── save() → upsert keyed by session                               │
//! │                                                                         │
//! │  3a. SUBMISSION SUCCEEDS                                               │
//! │      └── clear() → row deleted unconditionally                         │
//! │          (prevents accidental resubmission or duplicate restoration)   │
//! │                                                                         │
//! │  3b. SUBMISSION FAILS                                                  │
//! │      └── draft stays; operator retries without re-entering the cart    │
//! │                                                                         │
//! │  Housekeeping: list_stale() finds drafts abandoned past a cutoff.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::Order;

// =============================================================================
// Checkout Draft
// =============================================================================

/// A persisted checkout draft.
///
/// The order is stored as opaque JSON so the table schema never has to
/// chase the core model.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CheckoutDraft {
    /// Operator session this draft belongs to.
    pub session_key: String,

    /// Order number of the draft order, for quick lookup and logs.
    pub order_number: String,

    /// The assembled order serialized as JSON.
    pub payload: String,

    /// When the draft was first saved.
    pub created_at: DateTime<Utc>,

    /// When the draft was last saved.
    pub updated_at: DateTime<Utc>,
}

impl CheckoutDraft {
    /// Builds a draft from an assembled order.
    pub fn from_order(session_key: impl Into<String>, order: &Order) -> DbResult<Self> {
        let now = Utc::now();
        Ok(CheckoutDraft {
            session_key: session_key.into(),
            order_number: order.order_number.clone(),
            payload: serde_json::to_string(order)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Deserializes the draft back into an order.
    pub fn order(&self) -> DbResult<Order> {
        Ok(serde_json::from_str(&self.payload)?)
    }
}

// =============================================================================
// Draft Repository
// =============================================================================

/// Repository for draft database operations.
#[derive(Debug, Clone)]
pub struct DraftRepository {
    pool: SqlitePool,
}

impl DraftRepository {
    /// Creates a new DraftRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DraftRepository { pool }
    }

    /// Saves a draft, replacing any existing draft for the same session.
    ///
    /// ## Upsert Semantics
    /// A session holds at most one draft. Re-saving refreshes the payload
    /// and `updated_at` while keeping the original `created_at`.
    pub async fn save(&self, draft: &CheckoutDraft) -> DbResult<()> {
        debug!(
            session_key = %draft.session_key,
            order_number = %draft.order_number,
            "Saving checkout draft"
        );

        sqlx::query(
            r#"
            INSERT INTO checkout_drafts (
                session_key, order_number, payload, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(session_key) DO UPDATE SET
                order_number = excluded.order_number,
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&draft.session_key)
        .bind(&draft.order_number)
        .bind(&draft.payload)
        .bind(draft.created_at)
        .bind(draft.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Loads the draft for a session, if any.
    pub async fn load(&self, session_key: &str) -> DbResult<Option<CheckoutDraft>> {
        let draft: Option<CheckoutDraft> = sqlx::query_as(
            r#"
            SELECT session_key, order_number, payload, created_at, updated_at
            FROM checkout_drafts
            WHERE session_key = ?1
            "#,
        )
        .bind(session_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(draft)
    }

    /// Clears the draft for a session.
    ///
    /// Unconditional: clearing a session with no draft is not an error.
    /// Called on every successful submission.
    pub async fn clear(&self, session_key: &str) -> DbResult<()> {
        debug!(session_key = %session_key, "Clearing checkout draft");

        sqlx::query("DELETE FROM checkout_drafts WHERE session_key = ?1")
            .bind(session_key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists drafts not touched since the cutoff, oldest first.
    ///
    /// ## Usage
    /// Operator stations recover abandoned sessions at shift start.
    pub async fn list_stale(&self, cutoff: DateTime<Utc>) -> DbResult<Vec<CheckoutDraft>> {
        let drafts: Vec<CheckoutDraft> = sqlx::query_as(
            r#"
            SELECT session_key, order_number, payload, created_at, updated_at
            FROM checkout_drafts
            WHERE updated_at < ?1
            ORDER BY updated_at
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(drafts)
    }

    /// Loads the draft for a session or fails if none exists.
    pub async fn load_required(&self, session_key: &str) -> DbResult<CheckoutDraft> {
        self.load(session_key)
            .await?
            .ok_or_else(|| DbError::draft_not_found(session_key))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use tally_core::money::Money;
    use tally_core::types::{
        Buyer, CartLine, DeliveryMethod, PayerIdentity, PaymentMethod, PriceTiers, RoleClass,
    };
    use tally_core::{assemble, CheckoutRequest};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn test_order() -> tally_core::Order {
        let request = CheckoutRequest {
            store_id: "store-1".to_string(),
            cart: vec![CartLine {
                catalog_item_id: "item-1".to_string(),
                name: "Item 1".to_string(),
                quantity: 2,
                tiers: PriceTiers {
                    base: Money::from_units(100),
                    ..PriceTiers::default()
                },
                explicit_gift: false,
            }],
            buyer: Some(Buyer {
                id: "buyer-1".to_string(),
                role_class: RoleClass::Ordinary,
                discount_rate: None,
                self_credit_allowed: false,
                guest_credit_allowed: false,
                contact_address: None,
                contact_phone: None,
            }),
            payer_identity: PayerIdentity::SelfPay,
            delivery_method: DeliveryMethod::Ship,
            payment_method: PaymentMethod::Cash,
            tendered: Money::from_units(200),
            point_offset: Money::zero(),
            signature_ref: None,
        };
        assemble(&request).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let db = test_db().await;
        let order = test_order();
        let draft = CheckoutDraft::from_order("session-1", &order).unwrap();

        db.drafts().save(&draft).await.unwrap();

        let loaded = db.drafts().load("session-1").await.unwrap().unwrap();
        assert_eq!(loaded.order_number, order.order_number);

        let restored = loaded.order().unwrap();
        assert_eq!(restored.settlement.amount_due, order.settlement.amount_due);
        assert_eq!(restored.lines.len(), 1);
    }

    #[tokio::test]
    async fn test_save_is_upsert_per_session() {
        let db = test_db().await;

        let first = CheckoutDraft::from_order("session-1", &test_order()).unwrap();
        db.drafts().save(&first).await.unwrap();

        let second = CheckoutDraft::from_order("session-1", &test_order()).unwrap();
        db.drafts().save(&second).await.unwrap();

        let loaded = db.drafts().load("session-1").await.unwrap().unwrap();
        assert_eq!(loaded.order_number, second.order_number);
    }

    #[tokio::test]
    async fn test_clear_removes_draft() {
        let db = test_db().await;
        let draft = CheckoutDraft::from_order("session-1", &test_order()).unwrap();
        db.drafts().save(&draft).await.unwrap();

        db.drafts().clear("session-1").await.unwrap();
        assert!(db.drafts().load("session-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_is_unconditional() {
        let db = test_db().await;
        // Clearing a session that never saved anything is fine
        db.drafts().clear("session-never-saved").await.unwrap();
    }

    #[tokio::test]
    async fn test_load_required_fails_when_missing() {
        let db = test_db().await;
        let err = db.drafts().load_required("session-1").await.unwrap_err();
        assert!(matches!(err, DbError::DraftNotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_stale() {
        let db = test_db().await;
        let draft = CheckoutDraft::from_order("session-1", &test_order()).unwrap();
        db.drafts().save(&draft).await.unwrap();

        // Cutoff in the future sees the draft as stale
        let stale = db
            .drafts()
            .list_stale(Utc::now() + chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(stale.len(), 1);

        // Cutoff in the past does not
        let fresh = db
            .drafts()
            .list_stale(Utc::now() - chrono::Duration::hours(1))
            .await
            .unwrap();
        assert!(fresh.is_empty());
    }
}
