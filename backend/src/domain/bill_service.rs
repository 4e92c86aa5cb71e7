//! Bill registry: recurring bill definitions and their due-date schedule.

use chrono::{Days, NaiveDate};
use shared::{BillType, RecurringBill, UpcomingBill, BILL_CATEGORY_SUGGESTIONS};
use std::sync::Arc;
use tracing::warn;

use crate::domain::errors::DomainResult;
use crate::domain::models::bill::following_due_date;
use crate::domain::record_service::RecordService;
use crate::storage::{BillRepository, DbConnection};

pub const DEFAULT_UPCOMING_DAYS: u32 = 30;

#[derive(Clone)]
pub struct BillService {
    records: RecordService<RecurringBill>,
    repository: BillRepository,
}

impl BillService {
    pub fn new(db: DbConnection) -> Self {
        let repository = BillRepository::new(db);
        Self {
            records: RecordService::new("recurring bill", Arc::new(repository.clone())),
            repository,
        }
    }

    /// Plain CRUD over bill definitions
    pub fn records(&self) -> &RecordService<RecurringBill> {
        &self.records
    }

    /// List bills, optionally restricted to payable or receivable ones
    pub async fn list_bills(&self, bill_type: Option<BillType>) -> DomainResult<Vec<RecurringBill>> {
        match bill_type {
            Some(bill_type) => Ok(self.repository.list_by_type(bill_type).await?),
            None => self.records.list().await,
        }
    }

    pub fn category_suggestions(&self) -> Vec<String> {
        BILL_CATEGORY_SUGGESTIONS.iter().map(|c| c.to_string()).collect()
    }

    /// Active bills due on or before `as_of + days`, earliest first.
    /// Bills already past due are included and flagged as overdue.
    /// A window reaching past the last representable date ends there.
    pub async fn upcoming_bills(&self, as_of: NaiveDate, days: u32) -> DomainResult<Vec<UpcomingBill>> {
        let horizon = as_of
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        let bills = self.repository.list_active_scheduled().await?;

        let mut upcoming = Vec::new();
        for bill in bills {
            let Some(raw_due) = bill.next_due_date.as_deref() else {
                continue;
            };
            let Ok(due) = NaiveDate::parse_from_str(raw_due, "%Y-%m-%d") else {
                warn!("Skipping bill {} with unreadable due date {:?}", bill.id, raw_due);
                continue;
            };
            if due > horizon {
                continue;
            }

            let days_until_due = (due - as_of).num_days();
            upcoming.push(UpcomingBill {
                due_date: due.format("%Y-%m-%d").to_string(),
                days_until_due,
                overdue: days_until_due < 0,
                following_due_date: following_due_date(bill.frequency, due)
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                bill,
            });
        }

        upcoming.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.bill.name.cmp(&b.bill.name)));
        Ok(upcoming)
    }
}
