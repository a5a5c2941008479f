//! Payment state transitions for payroll entries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult, RecordKind};
use crate::models::{PaymentStatus, PayrollEntry};
use crate::ports::PayrollStore;

/// Moves payroll entries through pending → approved → paid.
pub struct PaymentProcessor<S: PayrollStore> {
    store: Arc<S>,
}

impl<S: PayrollStore> PaymentProcessor<S> {
    /// Creates a processor over a store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Clears a pending entry for payment.
    pub async fn approve_payment(&self, id: Uuid) -> EngineResult<PayrollEntry> {
        let mut entry = self.load_entry(id).await?;
        if entry.payment_status != PaymentStatus::Pending {
            return Err(EngineError::invalid_state(
                RecordKind::PayrollEntry,
                id,
                PaymentStatus::Pending,
                entry.payment_status,
            ));
        }

        self.transition(id, PaymentStatus::Pending, PaymentStatus::Approved, None)
            .await?;

        info!(payroll_entry_id = %id, "Payroll entry approved for payment");
        entry.payment_status = PaymentStatus::Approved;
        Ok(entry)
    }

    /// Marks an entry paid as of now.
    pub async fn pay(&self, id: Uuid) -> EngineResult<PayrollEntry> {
        self.pay_on(id, Utc::now()).await
    }

    /// Marks an entry paid on the given date.
    ///
    /// Both pending and approved entries can be paid. Paying twice is an
    /// [`EngineError::InvalidState`].
    pub async fn pay_on(&self, id: Uuid, paid_at: DateTime<Utc>) -> EngineResult<PayrollEntry> {
        let mut entry = self.load_entry(id).await?;
        if entry.payment_status == PaymentStatus::Paid {
            return Err(EngineError::invalid_state(
                RecordKind::PayrollEntry,
                id,
                "pending or approved",
                entry.payment_status,
            ));
        }

        self.transition(id, entry.payment_status, PaymentStatus::Paid, Some(paid_at))
            .await?;

        info!(
            payroll_entry_id = %id,
            total_amount = %entry.total_amount,
            payment_date = %paid_at,
            "Payroll entry paid"
        );
        entry.payment_status = PaymentStatus::Paid;
        entry.payment_date = Some(paid_at);
        Ok(entry)
    }

    async fn load_entry(&self, id: Uuid) -> EngineResult<PayrollEntry> {
        self.store
            .get_payroll_entry(id)
            .await?
            .ok_or(EngineError::NotFound {
                kind: RecordKind::PayrollEntry,
                id,
            })
    }

    async fn transition(
        &self,
        id: Uuid,
        from: PaymentStatus,
        to: PaymentStatus,
        payment_date: Option<DateTime<Utc>>,
    ) -> EngineResult<()> {
        let won = self
            .store
            .update_payroll_payment_status(id, from, to, payment_date)
            .await?;
        if won {
            return Ok(());
        }

        let actual = match self.store.get_payroll_entry(id).await {
            Ok(Some(current)) => current.payment_status.to_string(),
            Ok(None) => "missing".to_string(),
            Err(_) => "unknown".to_string(),
        };
        warn!(
            payroll_entry_id = %id,
            expected = %from,
            actual = %actual,
            "Payment status changed concurrently"
        );
        Err(EngineError::invalid_state(
            RecordKind::PayrollEntry,
            id,
            from,
            actual,
        ))
    }
}
