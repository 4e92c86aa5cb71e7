//! Reporting totals over the ledger and the balance sheet.

use rust_decimal::Decimal;
use shared::{CategoryTotal, FinancialSummary, LedgerEntry};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

use crate::domain::errors::DomainResult;
use crate::domain::validation::{parse_month, ValidationError};
use crate::storage::{
    AssetRepository, DbConnection, InvestmentRepository, LedgerRepository, LiabilityRepository,
    RecordStorage, TradingAccountRepository,
};

#[derive(Clone)]
pub struct SummaryService {
    income: LedgerRepository,
    expenses: LedgerRepository,
    assets: AssetRepository,
    liabilities: LiabilityRepository,
    investments: InvestmentRepository,
    trading_accounts: TradingAccountRepository,
}

impl SummaryService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            income: LedgerRepository::income(db.clone()),
            expenses: LedgerRepository::expenses(db.clone()),
            assets: AssetRepository::new(db.clone()),
            liabilities: LiabilityRepository::new(db.clone()),
            investments: InvestmentRepository::new(db.clone()),
            trading_accounts: TradingAccountRepository::new(db),
        }
    }

    /// Build the summary; `month` (`YYYY-MM`) restricts only the ledger totals
    pub async fn summarize(&self, month: Option<&str>) -> DomainResult<FinancialSummary> {
        if let Some(month) = month {
            parse_month(month)?;
        }

        let income = self.income.list_for_month(month).await?;
        let expenses = self.expenses.list_for_month(month).await?;

        let total_income = sum("income", income.iter().map(|e| e.amount.as_str()))?;
        let total_expenses = sum("expenses", expenses.iter().map(|e| e.amount.as_str()))?;

        let total_assets = sum("assets", self.assets.list().await?.iter().map(|a| a.value.as_str()))?;
        let total_liabilities = sum(
            "liabilities",
            self.liabilities.list().await?.iter().map(|l| l.amount.as_str()),
        )?;
        let total_investments = sum(
            "investments",
            self.investments
                .list()
                .await?
                .iter()
                .map(|i| i.current_value.as_str()),
        )?;
        let total_trading_balance = sum(
            "trading balance",
            self.trading_accounts
                .list()
                .await?
                .iter()
                .map(|t| t.current_balance.as_str()),
        )?;

        let net_cash_flow = total_income
            .checked_sub(total_expenses)
            .ok_or(ValidationError::AmountOverflow("net cash flow"))?;
        let net_worth = total_assets
            .checked_add(total_investments)
            .and_then(|v| v.checked_add(total_trading_balance))
            .and_then(|v| v.checked_sub(total_liabilities))
            .ok_or(ValidationError::AmountOverflow("net worth"))?;

        Ok(FinancialSummary {
            month: month.map(str::to_string),
            total_income: total_income.to_string(),
            total_expenses: total_expenses.to_string(),
            net_cash_flow: net_cash_flow.to_string(),
            total_assets: total_assets.to_string(),
            total_liabilities: total_liabilities.to_string(),
            total_investments: total_investments.to_string(),
            total_trading_balance: total_trading_balance.to_string(),
            net_worth: net_worth.to_string(),
            income_by_category: by_category("income", &income)?,
            expenses_by_category: by_category("expenses", &expenses)?,
        })
    }
}

fn to_decimal(amount: &str) -> Decimal {
    Decimal::from_str(amount).unwrap_or_else(|_| {
        warn!("Ignoring unparseable stored amount {:?}", amount);
        Decimal::ZERO
    })
}

/// Checked sum; `what` names the total in the overflow error
fn sum<'a>(what: &'static str, amounts: impl Iterator<Item = &'a str>) -> Result<Decimal, ValidationError> {
    amounts
        .map(to_decimal)
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or(ValidationError::AmountOverflow(what))
}

fn by_category(what: &'static str, entries: &[LedgerEntry]) -> Result<Vec<CategoryTotal>, ValidationError> {
    let mut totals: BTreeMap<&str, (Decimal, u32)> = BTreeMap::new();
    for entry in entries {
        let slot = totals.entry(entry.category.as_str()).or_insert((Decimal::ZERO, 0));
        slot.0 = slot
            .0
            .checked_add(to_decimal(&entry.amount))
            .ok_or(ValidationError::AmountOverflow(what))?;
        slot.1 += 1;
    }

    Ok(totals
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total: total.to_string(),
            count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use shared::{Asset, Liability};

    fn entry(id: &str, date: &str, amount: &str, category: &str) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            date: date.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            description: None,
            member: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    async fn setup_test() -> (DbConnection, SummaryService) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let service = SummaryService::new(db.clone());
        (db, service)
    }

    #[tokio::test]
    async fn test_empty_database_summarizes_to_zero() {
        let (_db, service) = setup_test().await;

        let summary = service.summarize(None).await.unwrap();
        assert_eq!(summary.total_income, "0");
        assert_eq!(summary.net_worth, "0");
        assert!(summary.expenses_by_category.is_empty());
    }

    #[tokio::test]
    async fn test_ledger_totals_and_categories() {
        let (db, service) = setup_test().await;
        let income = LedgerRepository::income(db.clone());
        let expenses = LedgerRepository::expenses(db);

        income.store(&entry("i1", "2024-03-01", "50000.00", "Salary")).await.unwrap();
        income.store(&entry("i2", "2024-03-15", "2500.50", "Rent")).await.unwrap();
        income.store(&entry("i3", "2024-02-01", "48000.00", "Salary")).await.unwrap();
        expenses.store(&entry("e1", "2024-03-02", "2500.00", "Electricity")).await.unwrap();
        expenses.store(&entry("e2", "2024-03-09", "1200.25", "Groceries")).await.unwrap();
        expenses.store(&entry("e3", "2024-03-16", "800.75", "Groceries")).await.unwrap();

        let march = service.summarize(Some("2024-03")).await.unwrap();
        assert_eq!(march.month.as_deref(), Some("2024-03"));
        assert_eq!(march.total_income, "52500.50");
        assert_eq!(march.total_expenses, "4501.00");
        assert_eq!(march.net_cash_flow, "47999.50");
        assert_eq!(
            march.expenses_by_category,
            vec![
                CategoryTotal {
                    category: "Electricity".to_string(),
                    total: "2500.00".to_string(),
                    count: 1,
                },
                CategoryTotal {
                    category: "Groceries".to_string(),
                    total: "2001.00".to_string(),
                    count: 2,
                },
            ]
        );

        let all_time = service.summarize(None).await.unwrap();
        assert_eq!(all_time.total_income, "100500.50");
    }

    #[tokio::test]
    async fn test_net_worth_combines_balance_sheet() {
        let (db, service) = setup_test().await;

        AssetRepository::new(db.clone())
            .store(&Asset {
                id: "a1".to_string(),
                name: "Flat".to_string(),
                category: "Property".to_string(),
                value: "4000000.00".to_string(),
                acquired_date: None,
                description: None,
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            })
            .await
            .unwrap();
        LiabilityRepository::new(db)
            .store(&Liability {
                id: "l1".to_string(),
                name: "Home loan".to_string(),
                category: "Loan".to_string(),
                amount: "2500000.00".to_string(),
                interest_rate: Some("8.4".to_string()),
                due_date: None,
                description: None,
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            })
            .await
            .unwrap();

        let summary = service.summarize(Some("2024-03")).await.unwrap();
        assert_eq!(summary.total_assets, "4000000.00");
        assert_eq!(summary.total_liabilities, "2500000.00");
        assert_eq!(summary.net_worth, "1500000.00");
    }

    #[tokio::test]
    async fn test_overflowing_totals_are_reported_not_panicked() {
        let (db, service) = setup_test().await;
        let income = LedgerRepository::income(db);

        income.store(&entry("i1", "2024-03-01", "79228162514264337593543950335", "Salary")).await.unwrap();
        income.store(&entry("i2", "2024-03-02", "79228162514264337593543950335", "Salary")).await.unwrap();

        assert!(matches!(
            service.summarize(None).await,
            Err(DomainError::Validation(ValidationError::AmountOverflow("income")))
        ));
        // A month without the oversized rows still summarizes
        assert_eq!(service.summarize(Some("2024-04")).await.unwrap().total_income, "0");
    }

    #[tokio::test]
    async fn test_invalid_month_is_rejected() {
        let (_db, service) = setup_test().await;
        assert!(matches!(
            service.summarize(Some("March")).await,
            Err(DomainError::Validation(_))
        ));
    }
}
