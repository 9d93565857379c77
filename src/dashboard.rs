// Dashboard state and its transitions
//
// No I/O here. Intents return the effects to run; each finished effect comes
// back as an `Event` for `Dashboard::apply`. See `effects` for the runner.

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::forms::{coerce_number, AccountForm, CustomerForm, TransferForm};
use crate::models::{
    Account, Customer, NewAccount, NewCustomer, Receipt, TransactionKind, TransactionRequest,
    TransferRequest,
};

// ============================================================================
// EFFECTS & EVENTS
// ============================================================================

/// Backend call requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchCustomers,
    FetchAccounts { customer_id: Option<String> },
    Mutate(Mutation),
}

/// State-changing backend call
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateCustomer(NewCustomer),
    CreateAccount(NewAccount),
    Transact {
        kind: TransactionKind,
        account_id: String,
        request: TransactionRequest,
    },
    Transfer(TransferRequest),
}

impl Mutation {
    pub fn action(&self) -> Action {
        match self {
            Mutation::CreateCustomer(_) => Action::CreateCustomer,
            Mutation::CreateAccount(_) => Action::CreateAccount,
            Mutation::Transact { kind, .. } => Action::Transact(*kind),
            Mutation::Transfer(_) => Action::Transfer,
        }
    }
}

/// Which user action a mutation came from; decides messages and follow-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateCustomer,
    CreateAccount,
    Transact(TransactionKind),
    Transfer,
}

impl Action {
    pub fn success_message(&self) -> String {
        match self {
            Action::CreateCustomer => "Customer created".to_string(),
            Action::CreateAccount => "Account created".to_string(),
            Action::Transact(kind) => format!("{} successful", kind.as_str()),
            Action::Transfer => "Transfer successful".to_string(),
        }
    }

    /// Shown when the backend gives no usable detail
    pub fn fallback_message(&self) -> String {
        match self {
            Action::CreateCustomer => "Error creating customer".to_string(),
            Action::CreateAccount => "Error creating account".to_string(),
            Action::Transact(kind) => format!("Failed to {}", kind.as_str()),
            Action::Transfer => "Transfer failed".to_string(),
        }
    }
}

/// Completion of an [`Effect`]
#[derive(Debug)]
pub enum Event {
    CustomersLoaded(Result<Vec<Customer>, ApiError>),
    AccountsLoaded(Result<Vec<Account>, ApiError>),
    Mutated {
        action: Action,
        result: Result<Receipt, ApiError>,
    },
}

pub const CUSTOMERS_LOAD_FAILED: &str = "Failed to load customers";
pub const ACCOUNTS_LOAD_FAILED: &str = "Failed to load accounts";

// ============================================================================
// DASHBOARD STATE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub customers: Vec<Customer>,
    pub accounts: Vec<Account>,

    /// Owner for new accounts and the account list filter
    pub selected_customer: Option<String>,

    /// Target of deposit/withdraw. Not cleared when the filter changes.
    pub selected_account: Option<String>,

    /// Deposit/withdraw inputs, raw text
    pub amount: String,
    pub note: String,

    /// True while a mutation is in flight
    pub loading: bool,

    /// Last status line; stays until the next action overwrites it
    pub message: String,

    pub customer_form: CustomerForm,
    pub account_form: AccountForm,
    pub transfer_form: TransferForm,
}

impl Dashboard {
    /// Fresh dashboard plus the initial loads (customers and every account)
    pub fn mount() -> (Self, Vec<Effect>) {
        (
            Self::default(),
            vec![
                Effect::FetchCustomers,
                Effect::FetchAccounts { customer_id: None },
            ],
        )
    }

    /// Selected account, if it is in the currently listed accounts
    pub fn selected_account(&self) -> Option<&Account> {
        let id = self.selected_account.as_deref()?;
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn customer_name(&self, customer_id: &str) -> Option<&str> {
        self.customers
            .iter()
            .find(|c| c.id == customer_id)
            .map(|c| c.full_name.as_str())
    }

    /// Deposit/withdraw are only possible with a selected account
    pub fn can_transact(&self) -> bool {
        self.selected_account.is_some() && !self.loading
    }

    fn accounts_refresh(&self) -> Effect {
        Effect::FetchAccounts {
            customer_id: self.selected_customer.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------------

    /// Change the account list filter and reload it
    pub fn select_customer(&mut self, customer_id: Option<String>) -> Vec<Effect> {
        self.selected_customer = customer_id.filter(|id| !id.is_empty());
        debug!(customer = ?self.selected_customer, "customer selected");
        vec![self.accounts_refresh()]
    }

    pub fn select_account(&mut self, account_id: Option<String>) {
        self.selected_account = account_id.filter(|id| !id.is_empty());
    }

    pub fn submit_customer(&mut self) -> Vec<Effect> {
        if self.loading {
            return Vec::new();
        }
        match self.customer_form.to_request() {
            Ok(request) => self.begin(Mutation::CreateCustomer(request)),
            Err(e) => self.block(e.to_string()),
        }
    }

    pub fn submit_account(&mut self) -> Vec<Effect> {
        if self.loading {
            return Vec::new();
        }
        match self
            .account_form
            .to_request(self.selected_customer.as_deref())
        {
            Ok(request) => self.begin(Mutation::CreateAccount(request)),
            Err(e) => self.block(e.to_string()),
        }
    }

    /// Deposit or withdraw `amount` on the selected account. Any amount is
    /// forwarded, including zero, negative and NaN.
    pub fn submit_transaction(&mut self, kind: TransactionKind) -> Vec<Effect> {
        if self.loading {
            return Vec::new();
        }
        let Some(account_id) = self.selected_account.clone() else {
            return Vec::new();
        };

        let request = TransactionRequest {
            amount: coerce_number(&self.amount),
            note: self.note.clone(),
        };
        self.begin(Mutation::Transact {
            kind,
            account_id,
            request,
        })
    }

    pub fn submit_transfer(&mut self) -> Vec<Effect> {
        if self.loading {
            return Vec::new();
        }
        match self.transfer_form.to_request() {
            Ok(request) => self.begin(Mutation::Transfer(request)),
            Err(e) => self.block(e.to_string()),
        }
    }

    fn begin(&mut self, mutation: Mutation) -> Vec<Effect> {
        info!(action = ?mutation.action(), "submitting");
        self.loading = true;
        vec![Effect::Mutate(mutation)]
    }

    fn block(&mut self, reason: String) -> Vec<Effect> {
        self.message = reason;
        Vec::new()
    }

    // ------------------------------------------------------------------------
    // Completions
    // ------------------------------------------------------------------------

    /// Fold a finished effect into the state; returns follow-up effects.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::CustomersLoaded(Ok(customers)) => {
                self.customers = customers;
                Vec::new()
            }
            Event::CustomersLoaded(Err(e)) => {
                warn!(error = %e, "customer list fetch failed");
                self.message = CUSTOMERS_LOAD_FAILED.to_string();
                Vec::new()
            }
            Event::AccountsLoaded(Ok(accounts)) => {
                self.accounts = accounts;
                Vec::new()
            }
            Event::AccountsLoaded(Err(e)) => {
                warn!(error = %e, "account list fetch failed");
                self.message = ACCOUNTS_LOAD_FAILED.to_string();
                Vec::new()
            }
            Event::Mutated { action, result } => {
                self.loading = false;
                match result {
                    Ok(receipt) => {
                        debug!(?action, ?receipt, "backend accepted");
                        self.complete(action)
                    }
                    Err(e) => {
                        warn!(?action, error = %e, "mutation failed");
                        self.message = e
                            .detail()
                            .map(str::to_string)
                            .unwrap_or_else(|| action.fallback_message());
                        Vec::new()
                    }
                }
            }
        }
    }

    fn complete(&mut self, action: Action) -> Vec<Effect> {
        info!(?action, "mutation succeeded");
        self.message = action.success_message();
        match action {
            Action::CreateCustomer => {
                self.customer_form.reset();
                vec![Effect::FetchCustomers]
            }
            Action::CreateAccount => {
                self.account_form.reset();
                vec![self.accounts_refresh()]
            }
            Action::Transact(_) => {
                self.amount.clear();
                self.note.clear();
                vec![self.accounts_refresh()]
            }
            Action::Transfer => {
                self.transfer_form.reset();
                vec![self.accounts_refresh()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    fn account(id: &str, customer_id: &str, balance: f64) -> Account {
        Account {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            account_type: AccountType::Checking,
            currency: "USD".to_string(),
            balance: Some(balance),
            nickname: None,
        }
    }

    fn rejected(detail: Option<&str>) -> ApiError {
        ApiError::Rejected {
            status: 400,
            detail: detail.map(str::to_string),
        }
    }

    fn filled_customer_form(dashboard: &mut Dashboard) {
        dashboard.customer_form.full_name = "Ada Lovelace".to_string();
        dashboard.customer_form.email = "ada@example.com".to_string();
    }

    #[test]
    fn test_mount_loads_both_lists() {
        let (dashboard, effects) = Dashboard::mount();
        assert!(!dashboard.loading);
        assert_eq!(
            effects,
            vec![
                Effect::FetchCustomers,
                Effect::FetchAccounts { customer_id: None }
            ]
        );
    }

    #[test]
    fn test_select_customer_refetches_filtered() {
        let mut dashboard = Dashboard::default();
        dashboard.selected_account = Some("a9".to_string());

        let effects = dashboard.select_customer(Some("c1".to_string()));
        assert_eq!(
            effects,
            vec![Effect::FetchAccounts {
                customer_id: Some("c1".to_string())
            }]
        );
        // Selection survives the filter change
        assert_eq!(dashboard.selected_account.as_deref(), Some("a9"));

        let effects = dashboard.select_customer(Some(String::new()));
        assert_eq!(effects, vec![Effect::FetchAccounts { customer_id: None }]);
    }

    #[test]
    fn test_stale_selected_account_has_no_balance() {
        let mut dashboard = Dashboard::default();
        dashboard.select_account(Some("gone".to_string()));
        dashboard.apply(Event::AccountsLoaded(Ok(vec![account("a1", "c1", 5.0)])));
        assert!(dashboard.selected_account().is_none());

        dashboard.select_account(Some("a1".to_string()));
        assert_eq!(dashboard.selected_account().unwrap().balance, Some(5.0));
    }

    #[test]
    fn test_create_customer_success_resets_and_refreshes() {
        let mut dashboard = Dashboard::default();
        filled_customer_form(&mut dashboard);

        let effects = dashboard.submit_customer();
        assert!(dashboard.loading);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Mutate(Mutation::CreateCustomer(_))]
        ));

        let follow_up = dashboard.apply(Event::Mutated {
            action: Action::CreateCustomer,
            result: Ok(Receipt::default()),
        });
        assert!(!dashboard.loading);
        assert_eq!(dashboard.message, "Customer created");
        assert_eq!(dashboard.customer_form, CustomerForm::default());
        assert_eq!(follow_up, vec![Effect::FetchCustomers]);
    }

    #[test]
    fn test_failure_uses_detail_then_fallback() {
        let mut dashboard = Dashboard::default();
        filled_customer_form(&mut dashboard);
        dashboard.submit_customer();

        dashboard.apply(Event::Mutated {
            action: Action::CreateCustomer,
            result: Err(rejected(Some("Email already registered"))),
        });
        assert_eq!(dashboard.message, "Email already registered");
        assert!(!dashboard.loading);
        // Form is kept so the operator can fix it
        assert_eq!(dashboard.customer_form.full_name, "Ada Lovelace");

        for (action, fallback) in [
            (Action::CreateCustomer, "Error creating customer"),
            (Action::CreateAccount, "Error creating account"),
            (Action::Transact(TransactionKind::Deposit), "Failed to deposit"),
            (Action::Transact(TransactionKind::Withdraw), "Failed to withdraw"),
            (Action::Transfer, "Transfer failed"),
        ] {
            dashboard.loading = true;
            let follow_up = dashboard.apply(Event::Mutated {
                action,
                result: Err(rejected(None)),
            });
            assert_eq!(dashboard.message, fallback);
            assert!(!dashboard.loading);
            assert!(follow_up.is_empty());
        }
    }

    #[test]
    fn test_decode_failure_uses_fallback() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Event::Mutated {
            action: Action::Transfer,
            result: Err(ApiError::Decode("eof".to_string())),
        });
        assert_eq!(dashboard.message, "Transfer failed");
    }

    #[test]
    fn test_required_fields_block_submission() {
        let mut dashboard = Dashboard::default();
        assert!(dashboard.submit_customer().is_empty());
        assert_eq!(dashboard.message, "Full name is required");
        assert!(!dashboard.loading);

        assert!(dashboard.submit_account().is_empty());
        assert_eq!(dashboard.message, "Customer is required");

        assert!(dashboard.submit_transfer().is_empty());
        assert_eq!(dashboard.message, "From account is required");
    }

    #[test]
    fn test_create_account_uses_selected_customer() {
        let mut dashboard = Dashboard::default();
        dashboard.select_customer(Some("c7".to_string()));
        dashboard.account_form.nickname = "Emergency".to_string();

        let effects = dashboard.submit_account();
        match effects.as_slice() {
            [Effect::Mutate(Mutation::CreateAccount(request))] => {
                assert_eq!(request.customer_id, "c7");
                assert_eq!(request.nickname.as_deref(), Some("Emergency"));
            }
            other => panic!("unexpected effects: {:?}", other),
        }

        let follow_up = dashboard.apply(Event::Mutated {
            action: Action::CreateAccount,
            result: Ok(Receipt(serde_json::json!({ "inserted_id": "a1" }))),
        });
        assert_eq!(dashboard.message, "Account created");
        assert_eq!(dashboard.account_form, AccountForm::default());
        assert_eq!(
            follow_up,
            vec![Effect::FetchAccounts {
                customer_id: Some("c7".to_string())
            }]
        );
        // Selected customer is not part of the form reset
        assert_eq!(dashboard.selected_customer.as_deref(), Some("c7"));
    }

    #[test]
    fn test_transaction_requires_selected_account() {
        let mut dashboard = Dashboard::default();
        dashboard.amount = "50".to_string();
        assert!(dashboard
            .submit_transaction(TransactionKind::Deposit)
            .is_empty());
        assert!(!dashboard.loading);
        assert!(!dashboard.can_transact());
    }

    #[test]
    fn test_transaction_forwards_any_amount() {
        let mut dashboard = Dashboard::default();
        dashboard.select_account(Some("a1".to_string()));
        dashboard.amount = "not a number".to_string();

        let effects = dashboard.submit_transaction(TransactionKind::Withdraw);
        match effects.as_slice() {
            [Effect::Mutate(Mutation::Transact {
                kind,
                account_id,
                request,
            })] => {
                assert_eq!(*kind, TransactionKind::Withdraw);
                assert_eq!(account_id, "a1");
                assert!(request.amount.is_nan());
                assert_eq!(request.note, "");
            }
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    #[test]
    fn test_deposit_success_clears_inputs() {
        let mut dashboard = Dashboard::default();
        dashboard.select_customer(Some("c1".to_string()));
        dashboard.select_account(Some("a1".to_string()));
        dashboard.amount = "50".to_string();
        dashboard.note = "paycheck".to_string();
        dashboard.submit_transaction(TransactionKind::Deposit);

        let follow_up = dashboard.apply(Event::Mutated {
            action: Action::Transact(TransactionKind::Deposit),
            result: Ok(Receipt::default()),
        });
        assert_eq!(dashboard.message, "deposit successful");
        assert!(dashboard.amount.is_empty());
        assert!(dashboard.note.is_empty());
        assert_eq!(
            follow_up,
            vec![Effect::FetchAccounts {
                customer_id: Some("c1".to_string())
            }]
        );
    }

    #[test]
    fn test_balance_only_changes_on_refetch() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Event::AccountsLoaded(Ok(vec![account("a1", "c1", 100.0)])));
        dashboard.select_account(Some("a1".to_string()));
        dashboard.amount = "50".to_string();
        dashboard.submit_transaction(TransactionKind::Deposit);
        dashboard.apply(Event::Mutated {
            action: Action::Transact(TransactionKind::Deposit),
            result: Ok(Receipt::default()),
        });
        assert_eq!(dashboard.selected_account().unwrap().balance, Some(100.0));

        // Backend decides the new balance; the console just shows it
        dashboard.apply(Event::AccountsLoaded(Ok(vec![account("a1", "c1", 149.5)])));
        assert_eq!(dashboard.selected_account().unwrap().balance, Some(149.5));
    }

    #[test]
    fn test_loading_ignores_second_submission() {
        let mut dashboard = Dashboard::default();
        filled_customer_form(&mut dashboard);
        assert_eq!(dashboard.submit_customer().len(), 1);
        assert!(dashboard.submit_customer().is_empty());

        dashboard.select_account(Some("a1".to_string()));
        assert!(dashboard
            .submit_transaction(TransactionKind::Deposit)
            .is_empty());
        assert!(dashboard.submit_transfer().is_empty());
    }

    #[test]
    fn test_transfer_same_account_is_not_blocked() {
        let mut dashboard = Dashboard::default();
        dashboard.transfer_form = TransferForm {
            from_account_id: Some("a1".to_string()),
            to_account_id: Some("a1".to_string()),
            amount: "10".to_string(),
            note: "loop".to_string(),
        };
        let effects = dashboard.submit_transfer();
        match effects.as_slice() {
            [Effect::Mutate(Mutation::Transfer(request))] => {
                assert_eq!(request.from_account_id, "a1");
                assert_eq!(request.to_account_id, "a1");
                assert_eq!(request.note.as_deref(), Some("loop"));
            }
            other => panic!("unexpected effects: {:?}", other),
        }

        dashboard.apply(Event::Mutated {
            action: Action::Transfer,
            result: Ok(Receipt::default()),
        });
        assert_eq!(dashboard.message, "Transfer successful");
        assert_eq!(dashboard.transfer_form, TransferForm::default());
    }

    #[test]
    fn test_list_failures_keep_previous_lists() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Event::AccountsLoaded(Ok(vec![account("a1", "c1", 1.0)])));

        dashboard.apply(Event::AccountsLoaded(Err(rejected(None))));
        assert_eq!(dashboard.message, ACCOUNTS_LOAD_FAILED);
        assert_eq!(dashboard.accounts.len(), 1);

        dashboard.apply(Event::CustomersLoaded(Err(ApiError::Decode(
            "bad".to_string(),
        ))));
        assert_eq!(dashboard.message, CUSTOMERS_LOAD_FAILED);
    }

    #[test]
    fn test_later_list_completion_wins() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Event::AccountsLoaded(Ok(vec![
            account("a1", "c1", 1.0),
            account("a2", "c2", 2.0),
        ])));
        dashboard.apply(Event::AccountsLoaded(Ok(vec![account("a2", "c2", 2.0)])));
        assert_eq!(dashboard.accounts.len(), 1);
        assert_eq!(dashboard.accounts[0].id, "a2");
    }

    #[test]
    fn test_customer_name_lookup() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Event::CustomersLoaded(Ok(vec![Customer {
            id: "c1".to_string(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            address: None,
        }])));
        assert_eq!(dashboard.customer_name("c1"), Some("Ada Lovelace"));
        assert_eq!(dashboard.customer_name("c2"), None);
    }
}
