//! Wire types shared between the finance tracker backend and its clients.
//!
//! Every entity is serialized with camelCase field names. Amounts are kept as
//! decimal text exactly as the client submitted them, dates as `YYYY-MM-DD`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category suggestions offered when creating a recurring bill
pub const BILL_CATEGORY_SUGGESTIONS: &[&str] = &[
    "Rent",
    "Electricity",
    "Water",
    "Gas",
    "Internet",
    "Phone",
    "Insurance",
    "Loan EMI",
    "Subscription",
    "Salary",
    "Maintenance",
    "Tax",
    "Other",
];

/// Deserializes a field that distinguishes "absent" from explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`: a missing key
/// yields `None`, `null` yields `Some(None)` and a value yields `Some(Some(v))`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Error returned when a stored or submitted enum value is not recognised
#[derive(Debug, Clone, PartialEq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseEnumError { kind: $kind, value: other.to_string() }),
                }
            }
        }
    };
}

text_enum!(
    /// Direction of a recurring bill
    BillType, "bill type" {
        Payable => "payable",
        Receivable => "receivable",
    }
);

text_enum!(
    /// How often a recurring bill falls due
    BillFrequency, "bill frequency" {
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
);

text_enum!(
    /// Settlement state of a bill payment
    PaymentStatus, "payment status" {
        Paid => "paid",
        Pending => "pending",
        Overdue => "overdue",
    }
);

text_enum!(
    /// Operational state of a rental vehicle
    VehicleStatus, "vehicle status" {
        Active => "active",
        Maintenance => "maintenance",
        Idle => "idle",
    }
);

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Paid
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Active
    }
}

// ---------------------------------------------------------------------------
// Ledger (income and expenses)
// ---------------------------------------------------------------------------

/// A single income or expense row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub member: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLedgerEntryRequest {
    pub date: String,
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub member: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLedgerEntryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub member: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Balance sheet: assets, liabilities, investments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: String,
    pub value: String,
    pub acquired_date: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub name: String,
    pub category: String,
    pub value: String,
    #[serde(default)]
    pub acquired_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub acquired_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: String,
    pub name: String,
    pub category: String,
    pub amount: String,
    /// Annual interest rate in percent
    pub interest_rate: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiabilityRequest {
    pub name: String,
    pub category: String,
    pub amount: String,
    #[serde(default)]
    pub interest_rate: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLiabilityRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,
    pub investment_type: String,
    pub amount_invested: String,
    pub current_value: String,
    pub purchase_date: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvestmentRequest {
    pub name: String,
    pub investment_type: String,
    pub amount_invested: String,
    pub current_value: String,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvestmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_invested: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Rental fleet and trading accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalVehicle {
    pub id: String,
    pub vehicle_number: String,
    pub model: String,
    pub driver_name: Option<String>,
    pub monthly_rent: String,
    pub status: VehicleStatus,
    pub acquired_date: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalVehicleRequest {
    pub vehicle_number: String,
    pub model: String,
    #[serde(default)]
    pub driver_name: Option<String>,
    pub monthly_rent: String,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub acquired_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRentalVehicleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub acquired_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

/// A forex trading account held with a broker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingAccount {
    pub id: String,
    pub broker: String,
    pub account_number: String,
    pub currency: String,
    pub deposit: String,
    pub current_balance: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTradingAccountRequest {
    pub broker: String,
    pub account_number: String,
    pub currency: String,
    pub deposit: String,
    pub current_balance: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTradingAccountRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Recurring bills and payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBill {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub bill_type: BillType,
    pub category: String,
    pub amount: String,
    pub frequency: BillFrequency,
    pub next_due_date: Option<String>,
    pub member: String,
    pub is_active: bool,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecurringBillRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub bill_type: BillType,
    pub category: String,
    pub amount: String,
    pub frequency: BillFrequency,
    #[serde(default)]
    pub next_due_date: Option<String>,
    #[serde(default)]
    pub member: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecurringBillRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub bill_type: Option<BillType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<BillFrequency>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

/// A payment recorded against a recurring bill.
///
/// `bill_id` is `None` only after the referenced bill has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayment {
    pub id: String,
    pub bill_id: Option<String>,
    pub date: String,
    pub amount: String,
    pub status: PaymentStatus,
    pub notes: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub bill_id: String,
    pub date: String,
    pub amount: String,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub notes: String,
}

/// Result of recording a payment; `expense` is present for payable bills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentResponse {
    pub payment: BillPayment,
    pub expense: Option<LedgerEntry>,
}

/// An active bill falling due within the requested window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingBill {
    pub bill: RecurringBill,
    pub due_date: String,
    /// Negative when the bill is overdue
    pub days_until_due: i64,
    pub overdue: bool,
    pub following_due_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Month (`YYYY-MM`) the ledger totals are restricted to, if any
    pub month: Option<String>,
    pub total_income: String,
    pub total_expenses: String,
    pub net_cash_flow: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub total_investments: String,
    pub total_trading_balance: String,
    pub net_worth: String,
    pub income_by_category: Vec<CategoryTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
}

/// Body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recurring_bill_uses_camel_case_and_type_key() {
        let bill = RecurringBill {
            id: "b1".to_string(),
            name: "Electricity".to_string(),
            bill_type: BillType::Payable,
            category: "Electricity".to_string(),
            amount: "2500.00".to_string(),
            frequency: BillFrequency::Monthly,
            next_due_date: Some("2024-03-01".to_string()),
            member: "Asha".to_string(),
            is_active: true,
            description: None,
            created_at: "2024-02-01T00:00:00+00:00".to_string(),
        };

        let value = serde_json::to_value(&bill).unwrap();
        assert_eq!(value["type"], "payable");
        assert_eq!(value["frequency"], "monthly");
        assert_eq!(value["nextDueDate"], "2024-03-01");
        assert_eq!(value["isActive"], true);
        assert!(value.get("billType").is_none());
    }

    #[test]
    fn test_create_bill_defaults() {
        let request: CreateRecurringBillRequest = serde_json::from_value(json!({
            "name": "Office rent",
            "type": "receivable",
            "category": "Rent",
            "amount": "10000.00",
            "frequency": "monthly"
        }))
        .unwrap();

        assert!(request.is_active);
        assert_eq!(request.member, "");
        assert_eq!(request.next_due_date, None);
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateRecurringBillRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateRecurringBillRequest =
            serde_json::from_value(json!({ "description": null })).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: UpdateRecurringBillRequest =
            serde_json::from_value(json!({ "description": "quarterly review" })).unwrap();
        assert_eq!(set.description, Some(Some("quarterly review".to_string())));
    }

    #[test]
    fn test_payment_request_defaults_to_paid() {
        let request: RecordPaymentRequest = serde_json::from_value(json!({
            "billId": "b1",
            "date": "2024-03-01",
            "amount": "2500.00"
        }))
        .unwrap();

        assert_eq!(request.status, PaymentStatus::Paid);
        assert_eq!(request.notes, "");
    }

    #[test]
    fn test_enum_text_parsing() {
        assert_eq!("weekly".parse::<BillFrequency>(), Ok(BillFrequency::Weekly));
        assert_eq!(PaymentStatus::Overdue.as_str(), "overdue");

        let err = "fortnightly".parse::<BillFrequency>().unwrap_err();
        assert_eq!(err.to_string(), "unknown bill frequency \"fortnightly\"");
    }
}
