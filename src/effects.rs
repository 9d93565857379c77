// Runs dashboard effects against a `BankApi`

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::api::BankApi;
use crate::dashboard::{Dashboard, Effect, Event, Mutation};

/// Execute one effect and report how it ended.
pub async fn perform<A: BankApi + ?Sized>(api: &A, effect: Effect) -> Event {
    debug!(?effect, "performing effect");
    match effect {
        Effect::FetchCustomers => Event::CustomersLoaded(api.list_customers().await),
        Effect::FetchAccounts { customer_id } => {
            Event::AccountsLoaded(api.list_accounts(customer_id.as_deref()).await)
        }
        Effect::Mutate(mutation) => {
            let action = mutation.action();
            let result = match mutation {
                Mutation::CreateCustomer(request) => api.create_customer(&request).await,
                Mutation::CreateAccount(request) => api.create_account(&request).await,
                Mutation::Transact {
                    kind,
                    account_id,
                    request,
                } => api.transact(kind, &account_id, &request).await,
                Mutation::Transfer(request) => api.transfer(&request).await,
            };
            Event::Mutated { action, result }
        }
    }
}

/// Run `effects` and every follow-up they cause until nothing is pending.
///
/// Effects run one after another in request order, which makes the final
/// state deterministic. The interactive dashboard runs them concurrently
/// instead (see `ui`).
pub async fn settle<A: BankApi + ?Sized>(
    api: &A,
    dashboard: &mut Dashboard,
    effects: Vec<Effect>,
) {
    let mut pending = VecDeque::from(effects);
    while let Some(effect) = pending.pop_front() {
        let event = perform(api, effect).await;
        pending.extend(dashboard.apply(event));
    }
}

/// Outcome of one submitted form, decided by the mutation alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Stopped locally; nothing was sent.
    Blocked(String),

    /// Backend refused the mutation or could not be reached.
    Failed(String),

    /// Backend accepted the mutation. `refresh_error` is set when the
    /// follow-up reload failed afterwards.
    Accepted {
        message: String,
        refresh_error: Option<String>,
    },
}

/// Run the effects returned by a `submit_*` intent.
///
/// Unlike [`settle`], a failed refresh after an accepted mutation does not
/// turn the outcome into a failure: the money already moved.
pub async fn submit<A: BankApi + ?Sized>(
    api: &A,
    dashboard: &mut Dashboard,
    effects: Vec<Effect>,
) -> Submission {
    let mut pending = effects.into_iter();
    let Some(effect) = pending.next() else {
        return Submission::Blocked(dashboard.message.clone());
    };

    let event = perform(api, effect).await;
    let accepted = matches!(event, Event::Mutated { result: Ok(_), .. });
    let mut follow_up: Vec<Effect> = pending.collect();
    follow_up.extend(dashboard.apply(event));

    if !accepted {
        return Submission::Failed(dashboard.message.clone());
    }

    let message = dashboard.message.clone();
    settle(api, dashboard, follow_up).await;

    let refresh_error = (dashboard.message != message).then(|| dashboard.message.clone());
    if let Some(error) = &refresh_error {
        warn!(%error, "refresh after accepted mutation failed");
    }
    Submission::Accepted {
        message,
        refresh_error,
    }
}
