use std::{cell::RefCell, future::Future, rc::Rc};

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{
    icons::icon_clipboard,
    stat_card::{StatCard, StatIcon},
};
use crate::{
    api::ApiClient,
    error::{ApiError, ApiResult},
    models::{Transaction, TransactionType},
    money::format_currency,
    session::{LocalStorage, SessionStore},
    totals::Totals,
};

const CONFIRM_DELETE: &str = "Are you sure you want to delete this transaction?";

/// Runs `delete` only if `confirm` says yes. `None` means the user backed out
/// and no request was made.
pub async fn delete_if_confirmed<C, F, Fut>(confirm: C, delete: F) -> Option<ApiResult<()>>
where
    C: FnOnce() -> bool,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResult<()>>,
{
    if !confirm() {
        return None;
    }
    Some(delete().await)
}

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(CONFIRM_DELETE).ok())
        .unwrap_or(false)
}

/// Hands out fetch tickets so that only the most recent fetch may write its
/// result.
#[derive(Default)]
pub struct FetchGeneration(u64);

impl FetchGeneration {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// The list to show after a fetch, or `None` to keep the current one.
///
/// A server-reported error (e.g. an expired token) empties the list so stale
/// totals are not left on screen; transport failures keep what is shown.
pub fn list_after_fetch(result: ApiResult<Vec<Transaction>>) -> Option<Vec<Transaction>> {
    match result {
        Ok(list) => Some(list),
        Err(ApiError::Rejected(message)) => {
            log::error!("Server refused to list transactions: {message}");
            Some(Vec::new())
        }
        Err(error) => {
            log::error!("Error loading transactions: {error}");
            None
        }
    }
}

#[derive(Clone)]
struct ListState {
    api: ApiClient,
    transactions: UseStateHandle<Vec<Transaction>>,
    loading: UseStateHandle<bool>,
    generation: Rc<RefCell<FetchGeneration>>,
}

impl ListState {
    /// Fetches the full list and replaces local state with it.
    fn reload(&self) {
        let Some(token) = LocalStorage.token() else {
            return;
        };
        let ticket = self.generation.borrow_mut().next();
        let state = self.clone();

        spawn_local(async move {
            let result = state.api.list_transactions(&token).await;
            if let Some(list) = list_after_fetch(result) {
                if state.generation.borrow().is_current(ticket) {
                    state.transactions.set(list);
                } else {
                    log::debug!("Discarding stale transaction list (fetch {ticket})");
                }
            }
            state.loading.set(false);
        });
    }

    fn delete(&self, id: String) {
        let Some(token) = LocalStorage.token() else {
            return;
        };
        let state = self.clone();

        spawn_local(async move {
            let api = state.api.clone();
            let outcome =
                delete_if_confirmed(confirm_delete, || async move {
                    api.delete_transaction(&token, &id).await
                })
                .await;

            match outcome {
                Some(Ok(())) => state.reload(),
                Some(Err(error)) => log::error!("Error deleting transaction: {error}"),
                None => {}
            }
        });
    }
}

#[derive(Properties, PartialEq)]
pub struct TransactionListProps {
    /// Changing this value re-fetches the list.
    pub refresh: u32,
}

#[function_component(TransactionList)]
pub fn transaction_list(props: &TransactionListProps) -> Html {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let transactions = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let generation = use_mut_ref(FetchGeneration::default);
    let state = ListState {
        api,
        transactions,
        loading,
        generation,
    };

    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                state.reload();
                || ()
            },
            props.refresh,
        );
    }

    if *state.loading {
        return html! {
            <div class="text-center py-12">
                <p class="text-sm text-slate-500">{"Loading transactions..."}</p>
            </div>
        };
    }

    let totals = Totals::from_transactions(&state.transactions);

    html! {
        <div class="space-y-6">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard title="Total Income" amount={totals.income} icon={StatIcon::UpRight} />
                <StatCard title="Total Expenses" amount={totals.expenses} icon={StatIcon::CreditCard} />
                <StatCard title="Balance" amount={totals.balance} icon={StatIcon::Wallet} flag_negative=true />
            </div>

            <div class="bg-white rounded-xl shadow-sm border border-slate-100 overflow-hidden">
                <div class="px-6 py-4 border-b border-slate-100">
                    <h3 class="text-lg font-semibold text-slate-900 tracking-tight">{"Recent Transactions"}</h3>
                </div>
                <div class="divide-y divide-slate-100">
                    if state.transactions.is_empty() {
                        <div class="px-6 py-12 text-center">
                            <div class="w-12 h-12 mx-auto mb-4 bg-slate-50 rounded-full flex items-center justify-center">
                                { icon_clipboard() }
                            </div>
                            <p class="text-sm text-slate-500">{"No transactions yet"}</p>
                            <p class="text-xs text-slate-400 mt-1">{"Add your first transaction to get started"}</p>
                        </div>
                    } else {
                        { for state.transactions.iter().map(|transaction| transaction_row(transaction, &state)) }
                    }
                </div>
            </div>
        </div>
    }
}

fn transaction_row(transaction: &Transaction, state: &ListState) -> Html {
    let is_income = transaction.transaction_type == TransactionType::Income;
    let (sign, amount_class, badge_class) = if is_income {
        (
            "+",
            "text-lg font-semibold tabular-nums text-green-600",
            "px-2 py-0.5 text-xs font-medium rounded-full bg-green-50 text-green-700",
        )
    } else {
        (
            "\u{2212}",
            "text-lg font-semibold tabular-nums text-slate-900",
            "px-2 py-0.5 text-xs font-medium rounded-full bg-slate-100 text-slate-700",
        )
    };

    let on_delete = {
        let state = state.clone();
        let id = transaction.id.clone();
        Callback::from(move |_| state.delete(id.clone()))
    };

    let description = transaction
        .description
        .as_deref()
        .filter(|text| !text.is_empty());

    html! {
        <div key={transaction.id.clone()} class="px-6 py-4 flex justify-between items-center hover:bg-slate-50">
            <div class="flex-1 min-w-0">
                <div class="flex items-center gap-3 mb-1">
                    <div class={amount_class}>{ format!("{sign}{}", format_currency(transaction.amount)) }</div>
                    <span class={badge_class}>{ transaction.transaction_type.as_str() }</span>
                </div>
                if let Some(text) = description {
                    <div class="text-sm text-slate-600 truncate">{ text.to_string() }</div>
                }
                <div class="text-xs text-slate-400 mt-0.5">{ transaction.date.clone() }</div>
            </div>
            <button
                onclick={on_delete}
                class="ml-4 px-3 py-1.5 text-xs font-medium text-slate-600 hover:text-red-600 hover:bg-red-50 rounded-lg border border-slate-200"
            >
                {"Delete"}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[tokio::test]
    async fn declining_the_prompt_sends_nothing() {
        let called = Cell::new(false);

        let outcome = delete_if_confirmed(
            || false,
            || {
                called.set(true);
                async { Ok(()) }
            },
        )
        .await;

        assert_eq!(outcome, None);
        assert!(!called.get());
    }

    #[tokio::test]
    async fn confirming_sends_the_delete() {
        let called = Cell::new(false);

        let outcome = delete_if_confirmed(
            || true,
            || {
                called.set(true);
                async { Ok(()) }
            },
        )
        .await;

        assert_eq!(outcome, Some(Ok(())));
        assert!(called.get());
    }

    #[tokio::test]
    async fn delete_failures_are_returned() {
        let outcome = delete_if_confirmed(
            || true,
            || async { Err(ApiError::Rejected("Not found".to_string())) },
        )
        .await;

        assert_eq!(outcome, Some(Err(ApiError::Rejected("Not found".to_string()))));
    }

    fn income(id: &str, amount: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: None,
            transaction_type: TransactionType::Income,
            date: "2025-03-01".to_string(),
            created_at: "2025-03-01T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn fetched_list_replaces_the_current_one() {
        let list = vec![income("a", 100), income("b", 200)];

        assert_eq!(list_after_fetch(Ok(list.clone())), Some(list));
    }

    #[test]
    fn server_error_empties_the_list() {
        let result = Err(ApiError::Rejected("Unauthorized".to_string()));

        assert_eq!(list_after_fetch(result), Some(Vec::new()));
    }

    #[test]
    fn transport_error_keeps_the_current_list() {
        let result = Err(ApiError::Network("failed to fetch".to_string()));

        assert_eq!(list_after_fetch(result), None);
    }

    #[test]
    fn only_the_latest_fetch_is_current() {
        let mut generation = FetchGeneration::default();
        let first = generation.next();
        let second = generation.next();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
