// Bank Console - Core Library
// Exposes the API client, dashboard state and helpers for the CLI and tests

pub mod api;
pub mod config;
pub mod currency;
pub mod dashboard;
pub mod effects;
pub mod forms;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use api::{extract_detail, ApiClient, ApiError, BankApi};
pub use config::{Config, ConfigArgs, ConfigError};
pub use currency::format_currency;
pub use dashboard::{Action, Dashboard, Effect, Event, Mutation};
pub use effects::{perform, settle, submit, Submission};
pub use forms::{coerce_number, AccountForm, CustomerForm, FormError, TransferForm};
pub use models::{
    Account, AccountType, Customer, NewAccount, NewCustomer, Receipt, TransactionKind,
    TransactionRequest, TransferRequest, SUPPORTED_CURRENCIES,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
