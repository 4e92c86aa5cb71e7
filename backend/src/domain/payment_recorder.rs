//! Payment recorder: writes a payment against a recurring bill and, for
//! payable bills, the expense it mirrors into. Both rows are written in one
//! transaction, so a payment is never stored without its expense.

use shared::{BillPayment, BillType, RecordPaymentRequest, RecordPaymentResponse};
use tracing::{error, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::bill::{mirrored_expense, validate_payment_request};
use crate::domain::models::{generate_id, now_timestamp};
use crate::domain::validation::ValidationError;
use crate::storage::{
    BillPaymentRepository, BillRepository, DbConnection, LedgerRepository, LedgerTable,
};

#[derive(Clone)]
pub struct PaymentRecorder {
    db: DbConnection,
    payments: BillPaymentRepository,
}

impl PaymentRecorder {
    pub fn new(db: DbConnection) -> Self {
        Self {
            payments: BillPaymentRepository::new(db.clone()),
            db,
        }
    }

    pub async fn record_payment(&self, request: RecordPaymentRequest) -> DomainResult<RecordPaymentResponse> {
        validate_payment_request(&request)?;

        // Dropping the transaction on any early return rolls it back.
        // The bill check reads through it so it sees the same row the inserts reference.
        let mut tx = self.db.pool().begin().await?;
        let bill = BillRepository::get_with(&mut *tx, &request.bill_id)
            .await?
            .ok_or_else(|| ValidationError::UnknownBill(request.bill_id.clone()))?;

        let payment = BillPayment {
            id: generate_id(),
            bill_id: Some(bill.id.clone()),
            date: request.date,
            amount: request.amount,
            status: request.status,
            notes: request.notes,
            created_at: now_timestamp(),
        };
        let expense = match bill.bill_type {
            BillType::Payable => Some(mirrored_expense(&bill, &payment, generate_id())),
            BillType::Receivable => None,
        };

        BillPaymentRepository::insert_with(&mut *tx, &payment).await?;
        if let Some(expense) = &expense {
            if let Err(e) = LedgerRepository::insert_with(&mut *tx, LedgerTable::Expenses, expense).await {
                error!("Failed to mirror payment {} into expenses: {}", payment.id, e);
                return Err(e.into());
            }
        }
        tx.commit().await?;

        match &expense {
            Some(expense) => info!(
                "Recorded payment {} for bill {} (mirrored as expense {})",
                payment.id, bill.id, expense.id
            ),
            None => info!("Recorded payment {} for bill {}", payment.id, bill.id),
        }

        Ok(RecordPaymentResponse { payment, expense })
    }

    pub async fn list_payments(&self, bill_id: Option<&str>) -> DomainResult<Vec<BillPayment>> {
        Ok(self.payments.list_payments(bill_id).await?)
    }

    pub async fn get_payment(&self, id: &str) -> DomainResult<BillPayment> {
        self.payments
            .get_payment(id)
            .await?
            .ok_or_else(|| DomainError::not_found("bill payment", id))
    }

    /// Delete a payment. Any expense it mirrored into stays in the ledger.
    pub async fn delete_payment(&self, id: &str) -> DomainResult<()> {
        if !self.payments.delete_payment(id).await? {
            return Err(DomainError::not_found("bill payment", id));
        }
        info!("Deleted bill payment {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bill_service::BillService;
    use crate::storage::RecordStorage;
    use shared::{BillFrequency, CreateRecurringBillRequest, PaymentStatus, RecurringBill};

    struct Fixture {
        db: DbConnection,
        bills: BillService,
        recorder: PaymentRecorder,
        expenses: LedgerRepository,
        payments: BillPaymentRepository,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        Fixture {
            bills: BillService::new(db.clone()),
            recorder: PaymentRecorder::new(db.clone()),
            expenses: LedgerRepository::expenses(db.clone()),
            payments: BillPaymentRepository::new(db.clone()),
            db,
        }
    }

    async fn create_bill(fixture: &Fixture, name: &str, bill_type: BillType, amount: &str) -> RecurringBill {
        fixture
            .bills
            .records()
            .create(CreateRecurringBillRequest {
                name: name.to_string(),
                bill_type,
                category: name.to_string(),
                amount: amount.to_string(),
                frequency: BillFrequency::Monthly,
                next_due_date: Some("2024-03-01".to_string()),
                member: String::new(),
                is_active: true,
                description: None,
            })
            .await
            .expect("Failed to create bill")
    }

    fn payment_request(bill_id: &str, amount: &str) -> RecordPaymentRequest {
        RecordPaymentRequest {
            bill_id: bill_id.to_string(),
            date: "2024-03-01".to_string(),
            amount: amount.to_string(),
            status: PaymentStatus::Paid,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_payable_bill_mirrors_one_expense() {
        let fixture = setup_test().await;
        let bill = create_bill(&fixture, "Electricity", BillType::Payable, "2500.00").await;

        let response = fixture
            .recorder
            .record_payment(payment_request(&bill.id, "2500.00"))
            .await
            .expect("Failed to record payment");

        assert_eq!(response.payment.bill_id.as_deref(), Some(bill.id.as_str()));
        assert_eq!(response.payment.status, PaymentStatus::Paid);
        assert_eq!(fixture.payments.count().await.unwrap(), 1);

        let expenses = fixture.expenses.list().await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "Electricity");
        assert_eq!(expenses[0].amount, "2500.00");
        assert_eq!(expenses[0].date, "2024-03-01");
        assert_eq!(Some(&expenses[0]), response.expense.as_ref());
    }

    #[tokio::test]
    async fn test_receivable_bill_writes_no_expense() {
        let fixture = setup_test().await;
        let bill = create_bill(&fixture, "Shop rent", BillType::Receivable, "10000.00").await;

        let response = fixture
            .recorder
            .record_payment(payment_request(&bill.id, "10000.00"))
            .await
            .expect("Failed to record payment");

        assert!(response.expense.is_none());
        assert_eq!(fixture.payments.count().await.unwrap(), 1);
        assert_eq!(fixture.expenses.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_each_payment_mirrors_separately() {
        let fixture = setup_test().await;
        let bill = create_bill(&fixture, "Internet", BillType::Payable, "999.00").await;

        for _ in 0..3 {
            fixture
                .recorder
                .record_payment(payment_request(&bill.id, "999.00"))
                .await
                .unwrap();
        }

        assert_eq!(fixture.payments.count().await.unwrap(), 3);
        assert_eq!(fixture.expenses.count().await.unwrap(), 3);
        assert_eq!(fixture.recorder.list_payments(Some(&bill.id)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_bill_is_rejected_without_writes() {
        let fixture = setup_test().await;

        let result = fixture
            .recorder
            .record_payment(payment_request("no-such-bill", "10.00"))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::UnknownBill(_)))
        ));
        assert_eq!(fixture.payments.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_payment_against_deleted_bill_is_unknown_bill() {
        let fixture = setup_test().await;
        let bill = create_bill(&fixture, "Cable", BillType::Payable, "450.00").await;
        fixture.bills.records().delete(&bill.id).await.unwrap();

        let result = fixture
            .recorder
            .record_payment(payment_request(&bill.id, "450.00"))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::UnknownBill(_)))
        ));
        assert_eq!(fixture.payments.count().await.unwrap(), 0);
        assert_eq!(fixture.expenses.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_mirror_rolls_back_payment() {
        let fixture = setup_test().await;
        let bill = create_bill(&fixture, "Water", BillType::Payable, "300.00").await;

        // Make the second write of the transaction fail
        sqlx::query("DROP TABLE expenses")
            .execute(fixture.db.pool())
            .await
            .expect("Failed to drop expenses");

        let result = fixture
            .recorder
            .record_payment(payment_request(&bill.id, "300.00"))
            .await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
        assert_eq!(fixture.payments.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_deleting_bill_keeps_payment_history() {
        let fixture = setup_test().await;
        let bill = create_bill(&fixture, "Phone", BillType::Payable, "499.00").await;
        let recorded = fixture
            .recorder
            .record_payment(payment_request(&bill.id, "499.00"))
            .await
            .unwrap();

        fixture.bills.records().delete(&bill.id).await.unwrap();

        let payment = fixture.recorder.get_payment(&recorded.payment.id).await.unwrap();
        assert_eq!(payment.bill_id, None);
        assert_eq!(payment.amount, "499.00");
        assert_eq!(fixture.expenses.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deleting_payment_keeps_mirrored_expense() {
        let fixture = setup_test().await;
        let bill = create_bill(&fixture, "Gas", BillType::Payable, "850.00").await;
        let recorded = fixture
            .recorder
            .record_payment(payment_request(&bill.id, "850.00"))
            .await
            .unwrap();

        fixture.recorder.delete_payment(&recorded.payment.id).await.unwrap();

        assert!(matches!(
            fixture.recorder.get_payment(&recorded.payment.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(fixture.expenses.count().await.unwrap(), 1);
        assert!(matches!(
            fixture.recorder.delete_payment(&recorded.payment.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
