use shared::{CreateTradingAccountRequest, TradingAccount, UpdateTradingAccountRequest};

use super::Record;
use crate::domain::validation::{optional_text, parse_amount, require_text, validate_currency, ValidationError};

impl Record for TradingAccount {
    type Create = CreateTradingAccountRequest;
    type Update = UpdateTradingAccountRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, created_at: String, request: CreateTradingAccountRequest) -> Self {
        TradingAccount {
            id,
            broker: request.broker,
            account_number: request.account_number,
            currency: request.currency,
            deposit: request.deposit,
            current_balance: request.current_balance,
            description: request.description,
            created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateTradingAccountRequest) {
        if let Some(broker) = update.broker {
            self.broker = broker;
        }
        if let Some(account_number) = update.account_number {
            self.account_number = account_number;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(deposit) = update.deposit {
            self.deposit = deposit;
        }
        if let Some(current_balance) = update.current_balance {
            self.current_balance = current_balance;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("broker", &self.broker)?;
        require_text("accountNumber", &self.account_number)?;
        validate_currency(&self.currency)?;
        parse_amount("deposit", &self.deposit)?;
        parse_amount("currentBalance", &self.current_balance)?;
        optional_text("description", self.description.as_deref())
    }
}
