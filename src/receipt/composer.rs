//! Receipt composition.
//!
//! The `compose_*` functions are pure: given the same records, names and
//! generation timestamp they build the same [`Document`]. [`ReceiptComposer`]
//! loads those inputs from the store and hands the result to a writer.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{PayrollCalculation, PayrollCalculator, StandingRates};
use crate::config::ReceiptSettings;
use crate::error::{EngineError, EngineResult, RecordKind};
use crate::models::{CareTeamMember, HourCategory, PayrollEntry, WorkLog};
use crate::ports::PayrollStore;

use super::document::{Document, DocumentWriter, Table};
use super::format::{
    format_hours, format_money, format_period, format_rate, format_timestamp, round_money,
};

/// Caregiver label used when a consolidated receipt spans several people.
pub const MULTIPLE_CAREGIVERS: &str = "Multiple Caregivers";

const LINE_ITEM_COLUMNS: [&str; 4] = ["Description", "Hours", "Rate", "Amount"];

/// Derives a stable receipt number from a source record id.
///
/// # Example
///
/// ```
/// use care_payroll_engine::receipt::receipt_id;
/// use uuid::Uuid;
///
/// let id = Uuid::parse_str("0f3a9c2e-1111-4222-8333-444455556666").unwrap();
/// assert_eq!(receipt_id(id), "RCPT-0F3A9C2E");
/// ```
pub fn receipt_id(source: Uuid) -> String {
    let hex = source.simple().to_string();
    format!("RCPT-{}", hex[..8].to_uppercase())
}

fn format_generated(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn base_header(
    document: &mut Document,
    source: Uuid,
    settings: &ReceiptSettings,
    generated_at: DateTime<Utc>,
) {
    document.push_header("Receipt ID", receipt_id(source));
    document.push_header("Issued by", settings.issuer.clone());
    document.push_header("Generated", format_generated(generated_at));
}

/// Builds the receipt for a single work log.
///
/// The whole interval is one line at the rate of the category it falls in.
pub fn compose_work_log_receipt(
    work_log: &WorkLog,
    calculation: &PayrollCalculation,
    caregiver: &str,
    settings: &ReceiptSettings,
    generated_at: DateTime<Utc>,
) -> Document {
    let symbol = settings.currency_symbol.as_str();
    let mut document = Document::new("Work Log Receipt");
    base_header(&mut document, work_log.id, settings, generated_at);
    document.push_header(
        "Work period",
        format_period(work_log.start_time, work_log.end_time),
    );
    document.push_header("Caregiver", caregiver);
    document.push_header("Status", work_log.status.to_string());
    if let Some(holiday) = &calculation.holiday {
        document.push_header("Holiday", holiday.name.clone());
    }

    let mut table = Table::new("Line items", &LINE_ITEM_COLUMNS);
    table.push_row(vec![
        calculation.category.label().to_string(),
        format_hours(calculation.total_hours),
        format_rate(calculation.applied_rate(), symbol),
        format_money(calculation.labor_total, symbol),
    ]);
    table.set_footer(vec![
        "Total".to_string(),
        format_hours(calculation.total_hours),
        String::new(),
        format_money(calculation.labor_total, symbol),
    ]);
    document.tables.push(table);
    document
}

/// Builds the receipt for a single payroll entry.
///
/// One line per non-zero hour category, an expenses line when there are
/// expenses, and a total line carrying the entry's total amount.
pub fn compose_entry_receipt(
    entry: &PayrollEntry,
    caregiver: &str,
    settings: &ReceiptSettings,
    generated_at: DateTime<Utc>,
) -> Document {
    let symbol = settings.currency_symbol.as_str();
    let mut document = Document::new("Payroll Receipt");
    base_header(&mut document, entry.id, settings, generated_at);
    document.push_header("Work period", format_period(entry.work_start, entry.work_end));
    document.push_header("Caregiver", caregiver);
    document.push_header("Status", entry.payment_status.to_string());
    if let Some(paid_at) = entry.payment_date {
        document.push_header("Paid", format_generated(paid_at));
    }

    let mut table = Table::new("Line items", &LINE_ITEM_COLUMNS);
    for category in HourCategory::ALL {
        let hours = entry.hours_for(category);
        if hours.is_zero() {
            continue;
        }
        table.push_row(vec![
            category.label().to_string(),
            format_hours(hours),
            format_rate(entry.rate_for(category), symbol),
            format_money(entry.amount_for(category), symbol),
        ]);
    }
    if entry.expense_total > Decimal::ZERO {
        table.push_row(vec![
            "Expenses".to_string(),
            String::new(),
            String::new(),
            format_money(entry.expense_total, symbol),
        ]);
    }
    table.set_footer(vec![
        "Total".to_string(),
        format_hours(entry.total_hours()),
        String::new(),
        format_money(entry.total_amount, symbol),
    ]);
    document.tables.push(table);
    document
}

/// Builds one receipt covering several payroll entries.
///
/// `names` maps care team member ids to display names and must cover every
/// entry. Entries are listed by work start, then id.
pub fn compose_consolidated_receipt(
    entries: &[PayrollEntry],
    names: &HashMap<Uuid, String>,
    settings: &ReceiptSettings,
    generated_at: DateTime<Utc>,
) -> EngineResult<Document> {
    let mut sorted: Vec<&PayrollEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.work_start.cmp(&b.work_start).then(a.id.cmp(&b.id)));

    let (Some(first), Some(period_start), Some(period_end)) = (
        sorted.first(),
        sorted.iter().map(|e| e.work_start).min(),
        sorted.iter().map(|e| e.work_end).max(),
    ) else {
        return Err(EngineError::calculation(
            "a consolidated receipt needs at least one payroll entry",
        ));
    };

    let name_of = |member_id: Uuid| -> EngineResult<String> {
        names
            .get(&member_id)
            .cloned()
            .ok_or(EngineError::NotFound {
                kind: RecordKind::CareTeamMember,
                id: member_id,
            })
    };

    let members: BTreeSet<Uuid> = sorted.iter().map(|e| e.care_team_member_id).collect();
    let caregiver = match members.iter().next() {
        Some(only) if members.len() == 1 => name_of(*only)?,
        _ => MULTIPLE_CAREGIVERS.to_string(),
    };

    let symbol = settings.currency_symbol.as_str();
    let mut document = Document::new("Consolidated Payroll Receipt");
    base_header(&mut document, first.id, settings, generated_at);
    document.push_header(
        "Period",
        format!(
            "{} to {}",
            format_timestamp(period_start),
            format_timestamp(period_end)
        ),
    );
    document.push_header("Entries", sorted.len().to_string());
    document.push_header("Caregiver", caregiver);

    let mut summary = Table::new("Summary", &["Category", "Hours", "Amount"]);
    let mut total_hours = Decimal::ZERO;
    for category in HourCategory::ALL {
        let hours: Decimal = sorted.iter().map(|e| e.hours_for(category)).sum();
        if hours.is_zero() {
            continue;
        }
        let amount: Decimal = sorted.iter().map(|e| e.amount_for(category)).sum();
        total_hours += hours;
        summary.push_row(vec![
            category.label().to_string(),
            format_hours(hours),
            format_money(amount, symbol),
        ]);
    }
    let expense_total: Decimal = sorted.iter().map(|e| e.expense_total).sum();
    if expense_total > Decimal::ZERO {
        summary.push_row(vec![
            "Expenses".to_string(),
            String::new(),
            format_money(expense_total, symbol),
        ]);
    }
    let grand_total: Decimal = sorted.iter().map(|e| e.total_amount).sum();
    summary.set_footer(vec![
        "Total".to_string(),
        format_hours(total_hours),
        format_money(grand_total, symbol),
    ]);

    let mut detail = Table::new("Entries", &["Date", "Caregiver", "Hours", "Amount"]);
    for entry in &sorted {
        detail.push_row(vec![
            entry.work_start.format("%Y-%m-%d").to_string(),
            name_of(entry.care_team_member_id)?,
            format_hours(entry.total_hours()),
            format_money(entry.total_amount, symbol),
        ]);
    }
    detail.set_footer(vec![
        "Total".to_string(),
        String::new(),
        format_hours(total_hours),
        format_money(grand_total, symbol),
    ]);

    document.tables.push(summary);
    document.tables.push(detail);
    debug!(
        entries = sorted.len(),
        total_amount = %round_money(grand_total),
        "Composed consolidated receipt"
    );
    Ok(document)
}

/// Loads records from the store and renders receipts with a writer.
pub struct ReceiptComposer<S: PayrollStore, W: DocumentWriter> {
    store: Arc<S>,
    writer: W,
    calculator: PayrollCalculator,
    settings: ReceiptSettings,
    generated_at: Option<DateTime<Utc>>,
}

impl<S: PayrollStore, W: DocumentWriter> ReceiptComposer<S, W> {
    /// Creates a composer.
    pub fn new(
        store: Arc<S>,
        writer: W,
        calculator: PayrollCalculator,
        settings: ReceiptSettings,
    ) -> Self {
        Self {
            store,
            writer,
            calculator,
            settings,
            generated_at: None,
        }
    }

    /// Pins the generation timestamp printed on every receipt.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at.unwrap_or_else(Utc::now)
    }

    /// Builds the document for a work log.
    pub async fn work_log_document(&self, work_log_id: Uuid) -> EngineResult<Document> {
        let work_log = self
            .store
            .get_work_log(work_log_id)
            .await?
            .ok_or(EngineError::NotFound {
                kind: RecordKind::WorkLog,
                id: work_log_id,
            })?;
        let member = self.load_member(work_log.care_team_member_id).await?;
        let standing = StandingRates::from(&member);
        let calculation = self.calculator.compute(&work_log, &standing, &[])?;

        Ok(compose_work_log_receipt(
            &work_log,
            &calculation,
            &member.display_name,
            &self.settings,
            self.generated_at(),
        ))
    }

    /// Builds the document for a payroll entry.
    pub async fn payroll_entry_document(&self, entry_id: Uuid) -> EngineResult<Document> {
        let entry = self.load_entry(entry_id).await?;
        let member = self.load_member(entry.care_team_member_id).await?;

        Ok(compose_entry_receipt(
            &entry,
            &member.display_name,
            &self.settings,
            self.generated_at(),
        ))
    }

    /// Builds one document covering the given payroll entries.
    pub async fn consolidated_document(&self, entry_ids: &[Uuid]) -> EngineResult<Document> {
        let mut entries = Vec::with_capacity(entry_ids.len());
        for id in entry_ids {
            entries.push(self.load_entry(*id).await?);
        }
        self.consolidate(&entries).await
    }

    /// Builds one document covering every payroll entry of a care plan.
    pub async fn care_plan_document(&self, care_plan_id: Uuid) -> EngineResult<Document> {
        let entries = self.store.list_payroll_entries(care_plan_id).await?;
        self.consolidate(&entries).await
    }

    /// Renders the receipt for a work log.
    pub async fn render_work_log(&self, work_log_id: Uuid) -> EngineResult<W::Output> {
        let document = self.work_log_document(work_log_id).await?;
        info!(work_log_id = %work_log_id, "Rendering work log receipt");
        self.writer.write(&document)
    }

    /// Renders the receipt for a payroll entry.
    pub async fn render_payroll_entry(&self, entry_id: Uuid) -> EngineResult<W::Output> {
        let document = self.payroll_entry_document(entry_id).await?;
        info!(payroll_entry_id = %entry_id, "Rendering payroll receipt");
        self.writer.write(&document)
    }

    /// Renders one receipt covering the given payroll entries.
    pub async fn render_consolidated(&self, entry_ids: &[Uuid]) -> EngineResult<W::Output> {
        let document = self.consolidated_document(entry_ids).await?;
        info!(entries = entry_ids.len(), "Rendering consolidated receipt");
        self.writer.write(&document)
    }

    /// Renders one receipt covering every payroll entry of a care plan.
    pub async fn render_care_plan(&self, care_plan_id: Uuid) -> EngineResult<W::Output> {
        let document = self.care_plan_document(care_plan_id).await?;
        info!(care_plan_id = %care_plan_id, "Rendering care plan receipt");
        self.writer.write(&document)
    }

    async fn consolidate(&self, entries: &[PayrollEntry]) -> EngineResult<Document> {
        let mut names = HashMap::new();
        for entry in entries {
            if !names.contains_key(&entry.care_team_member_id) {
                let member = self.load_member(entry.care_team_member_id).await?;
                names.insert(member.id, member.display_name);
            }
        }
        compose_consolidated_receipt(entries, &names, &self.settings, self.generated_at())
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

    async fn load_member(&self, id: Uuid) -> EngineResult<CareTeamMember> {
        self.store
            .get_care_team_member(id)
            .await?
            .ok_or(EngineError::NotFound {
                kind: RecordKind::CareTeamMember,
                id,
            })
    }
}
