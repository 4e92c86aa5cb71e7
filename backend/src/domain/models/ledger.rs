use shared::{CreateLedgerEntryRequest, LedgerEntry, UpdateLedgerEntryRequest};

use super::Record;
use crate::domain::validation::{optional_text, parse_amount, parse_date, require_text, ValidationError};

impl Record for LedgerEntry {
    type Create = CreateLedgerEntryRequest;
    type Update = UpdateLedgerEntryRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, created_at: String, request: CreateLedgerEntryRequest) -> Self {
        LedgerEntry {
            id,
            date: request.date,
            amount: request.amount,
            category: request.category,
            description: request.description,
            member: request.member,
            created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateLedgerEntryRequest) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(member) = update.member {
            self.member = member;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        parse_date("date", &self.date)?;
        parse_amount("amount", &self.amount)?;
        require_text("category", &self.category)?;
        optional_text("description", self.description.as_deref())?;
        optional_text("member", self.member.as_deref())
    }
}
