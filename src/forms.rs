// Form inputs for the dashboard
//
// Inputs are kept as raw text, exactly as typed. Conversion to request bodies
// happens on submit, where required fields are enforced and numbers are
// coerced the same way a browser number input would hand them over.

use thiserror::Error;

use crate::models::{
    default_currency, AccountType, NewAccount, NewCustomer, TransferRequest,
};

/// Submission blocked before anything was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Email must be a valid address")]
    InvalidEmail,
}

/// `Number(raw)` semantics: blank means 0, anything unparsable means NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust accepts "inf"/"nan" spellings that Number() does not
        s if s.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) => f64::NAN,
        s => s.parse::<f64>().unwrap_or(f64::NAN),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.contains(' ')
        }
        None => false,
    }
}

// ============================================================================
// CREATE CUSTOMER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerForm {
    pub fn to_request(&self) -> Result<NewCustomer, FormError> {
        if self.full_name.is_empty() {
            return Err(FormError::Required("Full name"));
        }
        if self.email.is_empty() {
            return Err(FormError::Required("Email"));
        }
        if !looks_like_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }

        Ok(NewCustomer {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// OPEN ACCOUNT
// ============================================================================

/// The owning customer is not part of this form: it is the dashboard's
/// selected customer, shared with the account list filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountForm {
    pub account_type: AccountType,
    pub currency: String,
    pub balance: String,
    pub nickname: String,
}

impl Default for AccountForm {
    fn default() -> Self {
        Self {
            account_type: AccountType::default(),
            currency: default_currency(),
            balance: "0".to_string(),
            nickname: String::new(),
        }
    }
}

impl AccountForm {
    pub fn to_request(&self, customer_id: Option<&str>) -> Result<NewAccount, FormError> {
        let customer_id = match customer_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(FormError::Required("Customer")),
        };

        // Unparsable or blank balances open at zero
        let balance = coerce_number(&self.balance);
        let balance = if balance.is_nan() { 0.0 } else { balance };

        Ok(NewAccount {
            customer_id,
            account_type: self.account_type,
            currency: self.currency.clone(),
            balance,
            nickname: non_empty(&self.nickname),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// TRANSFER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferForm {
    pub from_account_id: Option<String>,
    pub to_account_id: Option<String>,
    pub amount: String,
    pub note: String,
}

impl TransferForm {
    /// Identical from/to ids and non-positive amounts are passed through;
    /// the backend decides whether they are acceptable.
    pub fn to_request(&self) -> Result<TransferRequest, FormError> {
        let from_account_id = self
            .from_account_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(FormError::Required("From account"))?;
        let to_account_id = self
            .to_account_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(FormError::Required("To account"))?;
        if self.amount.trim().is_empty() {
            return Err(FormError::Required("Amount"));
        }

        Ok(TransferRequest {
            from_account_id,
            to_account_id,
            amount: coerce_number(&self.amount),
            note: non_empty(&self.note),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number("50"), 50.0);
        assert_eq!(coerce_number(" 12.5 "), 12.5);
        assert_eq!(coerce_number("-3"), -3.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert!(coerce_number("abc").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("12abc").is_nan());
    }

    #[test]
    fn test_customer_form_requires_name_and_email() {
        let mut form = CustomerForm::default();
        assert_eq!(form.to_request(), Err(FormError::Required("Full name")));

        form.full_name = "Grace Hopper".to_string();
        assert_eq!(form.to_request(), Err(FormError::Required("Email")));

        form.email = "grace".to_string();
        assert_eq!(form.to_request(), Err(FormError::InvalidEmail));

        form.email = "grace@navy.mil".to_string();
        let request = form.to_request().unwrap();
        assert_eq!(request.phone, "");
        assert_eq!(request.address, "");
    }

    #[test]
    fn test_customer_form_reset() {
        let mut form = CustomerForm {
            full_name: "A".to_string(),
            email: "a@b.c".to_string(),
            phone: "1".to_string(),
            address: "x".to_string(),
        };
        form.reset();
        assert_eq!(form, CustomerForm::default());
    }

    #[test]
    fn test_account_form_defaults() {
        let form = AccountForm::default();
        assert_eq!(form.to_request(None), Err(FormError::Required("Customer")));

        let request = form.to_request(Some("c1")).unwrap();
        assert_eq!(request.customer_id, "c1");
        assert_eq!(request.account_type, AccountType::Checking);
        assert_eq!(request.currency, "USD");
        assert_eq!(request.balance, 0.0);
        assert_eq!(request.nickname, None);
    }

    #[test]
    fn test_account_form_bad_balance_is_zero() {
        let form = AccountForm {
            balance: "lots".to_string(),
            nickname: "Holiday".to_string(),
            ..AccountForm::default()
        };
        let request = form.to_request(Some("c1")).unwrap();
        assert_eq!(request.balance, 0.0);
        assert_eq!(request.nickname.as_deref(), Some("Holiday"));
    }

    #[test]
    fn test_transfer_form_passes_same_account_through() {
        let form = TransferForm {
            from_account_id: Some("a1".to_string()),
            to_account_id: Some("a1".to_string()),
            amount: "-20".to_string(),
            note: String::new(),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.from_account_id, request.to_account_id);
        assert_eq!(request.amount, -20.0);
        assert_eq!(request.note, None);
    }

    #[test]
    fn test_transfer_form_required_fields() {
        let mut form = TransferForm::default();
        assert_eq!(form.to_request(), Err(FormError::Required("From account")));

        form.from_account_id = Some("a1".to_string());
        assert_eq!(form.to_request(), Err(FormError::Required("To account")));

        form.to_account_id = Some("a2".to_string());
        assert_eq!(form.to_request(), Err(FormError::Required("Amount")));
    }
}
