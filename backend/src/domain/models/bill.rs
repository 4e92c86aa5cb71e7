use chrono::{Days, Months, NaiveDate};
use shared::{
    BillFrequency, BillPayment, CreateRecurringBillRequest, LedgerEntry, RecordPaymentRequest,
    RecurringBill, UpdateRecurringBillRequest,
};

use super::Record;
use crate::domain::validation::{
    limit_text, optional_date, optional_text, parse_amount, parse_date, require_text, ValidationError,
};

impl Record for RecurringBill {
    type Create = CreateRecurringBillRequest;
    type Update = UpdateRecurringBillRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, created_at: String, request: CreateRecurringBillRequest) -> Self {
        RecurringBill {
            id,
            name: request.name,
            bill_type: request.bill_type,
            category: request.category,
            amount: request.amount,
            frequency: request.frequency,
            next_due_date: request.next_due_date,
            member: request.member,
            is_active: request.is_active,
            description: request.description,
            created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateRecurringBillRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(bill_type) = update.bill_type {
            self.bill_type = bill_type;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(next_due_date) = update.next_due_date {
            self.next_due_date = next_due_date;
        }
        if let Some(member) = update.member {
            self.member = member;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        parse_amount("amount", &self.amount)?;
        optional_date("nextDueDate", self.next_due_date.as_deref())?;
        limit_text("member", &self.member)?;
        optional_text("description", self.description.as_deref())
    }
}

/// The due date one period after `due`
pub fn following_due_date(frequency: BillFrequency, due: NaiveDate) -> Option<NaiveDate> {
    match frequency {
        BillFrequency::Weekly => due.checked_add_days(Days::new(7)),
        BillFrequency::Monthly => due.checked_add_months(Months::new(1)),
        BillFrequency::Yearly => due.checked_add_months(Months::new(12)),
    }
}

/// Check a payment request on its own, before the bill is looked up
pub fn validate_payment_request(request: &RecordPaymentRequest) -> Result<(), ValidationError> {
    require_text("billId", &request.bill_id)?;
    parse_date("date", &request.date)?;
    parse_amount("amount", &request.amount)?;
    limit_text("notes", &request.notes)
}

/// Build the expense a payment against a payable bill mirrors into
pub fn mirrored_expense(bill: &RecurringBill, payment: &BillPayment, id: String) -> LedgerEntry {
    let notes = payment.notes.trim();
    let description = if notes.is_empty() {
        bill.name.clone()
    } else {
        format!("{} - {}", bill.name, notes)
    };

    LedgerEntry {
        id,
        date: payment.date.clone(),
        amount: payment.amount.clone(),
        category: bill.category.clone(),
        description: Some(description),
        member: Some(bill.member.clone()).filter(|m| !m.is_empty()),
        created_at: payment.created_at.clone(),
    }
}
