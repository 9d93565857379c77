// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use bank_console::currency::format_currency;
use bank_console::dashboard::{Dashboard, Effect};
use bank_console::{
    logging, settle, submit, AccountType, ApiClient, Config, ConfigArgs, Submission,
    TransactionKind,
};
use clap::{Parser, Subcommand};
use tracing::info;

/// Back-office console for the banking API
#[derive(Debug, Parser)]
#[command(name = "bank-console", version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Run a single operation instead of the interactive dashboard
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List customers
    Customers,

    /// List accounts, optionally for one customer
    Accounts {
        #[arg(long)]
        customer: Option<String>,
    },

    /// Create a customer
    CreateCustomer {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
    },

    /// Open an account for a customer
    OpenAccount {
        #[arg(long)]
        customer: String,
        #[arg(long, default_value = "checking", value_parser = parse_account_type)]
        account_type: AccountType,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
        #[arg(long, default_value = "")]
        nickname: String,
    },

    /// Deposit into an account
    Deposit {
        #[arg(long)]
        account: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Withdraw from an account
    Withdraw {
        #[arg(long)]
        account: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Move money between two accounts
    Transfer {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value = "")]
        note: String,
    },
}

fn parse_account_type(s: &str) -> Result<AccountType, String> {
    AccountType::parse(s).ok_or_else(|| format!("unknown account type {:?} (checking|savings)", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_args(&cli.config)?;
    let api = ApiClient::new(&config.base_url, config.timeout)
        .context("failed to build HTTP client")?;

    match cli.command {
        Some(command) => {
            logging::init_stderr();
            run_command(&api, command).await
        }
        None => {
            logging::init_file(&config.log_file)?;
            info!(base_url = %config.base_url, "starting dashboard");
            run_ui_mode(api).await
        }
    }
}

async fn run_command(api: &ApiClient, command: Command) -> Result<()> {
    let mut dashboard = Dashboard::default();

    let effects = match command {
        Command::Customers => {
            settle(api, &mut dashboard, vec![Effect::FetchCustomers]).await;
            ensure_loaded(&dashboard)?;
            print_customers(&dashboard);
            return Ok(());
        }
        Command::Accounts { customer } => {
            let effects = dashboard.select_customer(customer);
            settle(api, &mut dashboard, vec![Effect::FetchCustomers]).await;
            settle(api, &mut dashboard, effects).await;
            ensure_loaded(&dashboard)?;
            print_accounts(&dashboard);
            return Ok(());
        }
        Command::CreateCustomer {
            full_name,
            email,
            phone,
            address,
        } => {
            dashboard.customer_form.full_name = full_name;
            dashboard.customer_form.email = email;
            dashboard.customer_form.phone = phone;
            dashboard.customer_form.address = address;
            dashboard.submit_customer()
        }
        Command::OpenAccount {
            customer,
            account_type,
            currency,
            balance,
            nickname,
        } => {
            dashboard.selected_customer = Some(customer);
            dashboard.account_form.account_type = account_type;
            dashboard.account_form.currency = currency;
            dashboard.account_form.balance = balance;
            dashboard.account_form.nickname = nickname;
            dashboard.submit_account()
        }
        Command::Deposit {
            account,
            amount,
            note,
        } => {
            dashboard.select_account(Some(account));
            dashboard.amount = amount;
            dashboard.note = note;
            dashboard.submit_transaction(TransactionKind::Deposit)
        }
        Command::Withdraw {
            account,
            amount,
            note,
        } => {
            dashboard.select_account(Some(account));
            dashboard.amount = amount;
            dashboard.note = note;
            dashboard.submit_transaction(TransactionKind::Withdraw)
        }
        Command::Transfer {
            from,
            to,
            amount,
            note,
        } => {
            dashboard.transfer_form.from_account_id = Some(from);
            dashboard.transfer_form.to_account_id = Some(to);
            dashboard.transfer_form.amount = amount;
            dashboard.transfer_form.note = note;
            dashboard.submit_transfer()
        }
    };

    match submit(api, &mut dashboard, effects).await {
        Submission::Blocked(reason) | Submission::Failed(reason) => bail!("{}", reason),
        Submission::Accepted {
            message,
            refresh_error: Some(error),
        } => {
            // Already applied on the backend; retrying would repeat it
            println!("✓ {}", message);
            eprintln!("⚠️  {}", error);
        }
        Submission::Accepted { message, .. } => {
            println!("✓ {}", message);
            if dashboard.accounts.is_empty() {
                print_customers(&dashboard);
            } else {
                print_accounts(&dashboard);
            }
        }
    }
    Ok(())
}

fn ensure_loaded(dashboard: &Dashboard) -> Result<()> {
    if dashboard.message.is_empty() {
        Ok(())
    } else {
        bail!("{}", dashboard.message)
    }
}

fn print_customers(dashboard: &Dashboard) {
    println!("\n{:<26} {:<30} {:<30}", "ID", "Name", "Email");
    println!("{}", "━".repeat(88));
    for c in &dashboard.customers {
        println!("{:<26} {:<30} {:<30}", c.id, c.full_name, c.email);
    }
    println!("\n{} customers", dashboard.customers.len());
}

fn print_accounts(dashboard: &Dashboard) {
    println!(
        "\n{:<26} {:<24} {:<16} {:<10} {:>16}",
        "ID", "Customer", "Nickname", "Type", "Balance"
    );
    println!("{}", "━".repeat(96));
    for a in &dashboard.accounts {
        let customer = dashboard.customer_name(&a.customer_id).unwrap_or("—");
        let nickname = match a.nickname.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => "—",
        };
        println!(
            "{:<26} {:<24} {:<16} {:<10} {:>16}",
            a.id,
            customer,
            nickname,
            a.account_type.title(),
            format_currency(a.balance, &a.currency)
        );
    }
    println!("\n{} accounts", dashboard.accounts.len());
}

#[cfg(feature = "tui")]
async fn run_ui_mode(api: ApiClient) -> Result<()> {
    println!("🏦 Connecting to {} ...", api.base_url());
    ui::run_ui(std::sync::Arc::new(api)).await?;
    println!("✅ Console closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_ui_mode(_api: ApiClient) -> Result<()> {
    eprintln!("❌ Interactive mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run a single operation: bank-console --help");
    std::process::exit(1);
}
