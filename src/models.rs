// Wire types shared with the banking backend.
//
// Every entity here is owned by the backend. The console only keeps the last
// copy it received, so nothing in this module computes or mutates balances.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// ACCOUNT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Everyday account (the first option in the open-account form)
    #[default]
    Checking,

    /// Interest-bearing account
    Savings,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::Checking, AccountType::Savings];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
        }
    }

    /// Capitalized name used in tables and selectors
    pub fn title(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Some(AccountType::Checking),
            "savings" => Some(AccountType::Savings),
            _ => None,
        }
    }
}

// ============================================================================
// ENTITIES (as returned by the backend)
// ============================================================================

/// Bank client record used to group accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
}

/// Customer-owned ledger entry. `balance` is whatever the backend last sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub customer_id: String,

    pub account_type: AccountType,

    /// ISO 4217 code (USD, EUR, ...)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Missing balances render as zero. Decimal backends send strings.
    #[serde(default, deserialize_with = "number_or_string")]
    pub balance: Option<f64>,

    #[serde(default)]
    pub nickname: Option<String>,
}

impl Account {
    /// Nickname when set and non-empty, otherwise the account type
    pub fn label(&self) -> &str {
        match self.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => self.account_type.as_str(),
        }
    }
}

pub fn default_currency() -> String {
    "USD".to_string()
}

/// Accept `150.5`, `"150.50"` or `null`. Unparsable strings count as missing.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Amount>::deserialize(deserializer)? {
        Some(Amount::Number(n)) => Some(n),
        Some(Amount::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Currencies offered by the open-account form, first one is the default
pub const SUPPORTED_CURRENCIES: [&str; 6] = ["USD", "EUR", "GBP", "INR", "JPY", "AUD"];

// ============================================================================
// REQUEST BODIES
// ============================================================================

/// `POST /api/customers`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub email: String,
    /// Empty string when the operator left it blank
    pub phone: String,
    pub address: String,
}

/// `POST /api/accounts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAccount {
    pub customer_id: String,
    pub account_type: AccountType,
    pub currency: String,
    pub balance: f64,
    /// Serialized as `null` when absent
    pub nickname: Option<String>,
}

/// Body of deposit and withdraw calls. A NaN amount goes out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRequest {
    pub amount: f64,
    pub note: String,
}

/// `POST /api/transactions/transfer`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Whatever the backend answers to a successful mutation. The console only
/// uses it to confirm success, so it is kept as raw JSON and never has to
/// match an entity shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(pub serde_json::Value);

// ============================================================================
// TRANSACTION KIND
// ============================================================================

/// Single-account balance movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    /// Path segment under `/api/transactions/`, also used in status messages
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
        }
    }
}
