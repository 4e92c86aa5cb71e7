//! Assets, liabilities and investments.

use shared::{
    Asset, CreateAssetRequest, CreateInvestmentRequest, CreateLiabilityRequest, Investment,
    Liability, UpdateAssetRequest, UpdateInvestmentRequest, UpdateLiabilityRequest,
};

use super::Record;
use crate::domain::validation::{
    optional_amount, optional_date, optional_text, parse_amount, require_text, ValidationError,
};

impl Record for Asset {
    type Create = CreateAssetRequest;
    type Update = UpdateAssetRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, created_at: String, request: CreateAssetRequest) -> Self {
        Asset {
            id,
            name: request.name,
            category: request.category,
            value: request.value,
            acquired_date: request.acquired_date,
            description: request.description,
            created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateAssetRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(value) = update.value {
            self.value = value;
        }
        if let Some(acquired_date) = update.acquired_date {
            self.acquired_date = acquired_date;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        parse_amount("value", &self.value)?;
        optional_date("acquiredDate", self.acquired_date.as_deref())?;
        optional_text("description", self.description.as_deref())
    }
}

impl Record for Liability {
    type Create = CreateLiabilityRequest;
    type Update = UpdateLiabilityRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, created_at: String, request: CreateLiabilityRequest) -> Self {
        Liability {
            id,
            name: request.name,
            category: request.category,
            amount: request.amount,
            interest_rate: request.interest_rate,
            due_date: request.due_date,
            description: request.description,
            created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateLiabilityRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(interest_rate) = update.interest_rate {
            self.interest_rate = interest_rate;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        parse_amount("amount", &self.amount)?;
        optional_amount("interestRate", self.interest_rate.as_deref())?;
        optional_date("dueDate", self.due_date.as_deref())?;
        optional_text("description", self.description.as_deref())
    }
}

impl Record for Investment {
    type Create = CreateInvestmentRequest;
    type Update = UpdateInvestmentRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_create(id: String, created_at: String, request: CreateInvestmentRequest) -> Self {
        Investment {
            id,
            name: request.name,
            investment_type: request.investment_type,
            amount_invested: request.amount_invested,
            current_value: request.current_value,
            purchase_date: request.purchase_date,
            description: request.description,
            created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateInvestmentRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(investment_type) = update.investment_type {
            self.investment_type = investment_type;
        }
        if let Some(amount_invested) = update.amount_invested {
            self.amount_invested = amount_invested;
        }
        if let Some(current_value) = update.current_value {
            self.current_value = current_value;
        }
        if let Some(purchase_date) = update.purchase_date {
            self.purchase_date = purchase_date;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("investmentType", &self.investment_type)?;
        parse_amount("amountInvested", &self.amount_invested)?;
        parse_amount("currentValue", &self.current_value)?;
        optional_date("purchaseDate", self.purchase_date.as_deref())?;
        optional_text("description", self.description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liability_interest_rate_is_optional_but_checked() {
        let mut loan = Liability::from_create(
            "l1".to_string(),
            "2024-01-01T00:00:00+00:00".to_string(),
            CreateLiabilityRequest {
                name: "Car loan".to_string(),
                category: "Loan".to_string(),
                amount: "350000.00".to_string(),
                interest_rate: None,
                due_date: Some("2027-06-30".to_string()),
                description: None,
            },
        );
        assert!(loan.validate().is_ok());

        loan.apply_update(UpdateLiabilityRequest {
            interest_rate: Some(Some("9.5%".to_string())),
            ..Default::default()
        });
        assert!(matches!(
            loan.validate(),
            Err(ValidationError::InvalidAmount { field: "interestRate", .. })
        ));
    }

    #[test]
    fn test_investment_requires_both_values() {
        let fund = Investment::from_create(
            "inv1".to_string(),
            "2024-01-01T00:00:00+00:00".to_string(),
            CreateInvestmentRequest {
                name: "Index fund".to_string(),
                investment_type: "Mutual Fund".to_string(),
                amount_invested: "10000.00".to_string(),
                current_value: "".to_string(),
                purchase_date: None,
                description: None,
            },
        );
        assert!(matches!(
            fund.validate(),
            Err(ValidationError::InvalidAmount { field: "currentValue", .. })
        ));
    }
}
