use std::future::Future;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::{
    api::ApiClient,
    error::{ApiError, ApiResult},
    models::{NewTransaction, Transaction, TransactionType},
    money::{parse_amount, AmountError},
    session::{LocalStorage, SessionStore},
};

/// What the user has typed so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    pub transaction_type: TransactionType,
    pub amount: String,
    pub description: String,
}

impl Draft {
    pub fn to_payload(&self) -> Result<NewTransaction, AmountError> {
        let description = self.description.trim();
        Ok(NewTransaction {
            amount: parse_amount(&self.amount)?,
            description: (!description.is_empty()).then(|| description.to_string()),
            transaction_type: self.transaction_type,
            date: None,
        })
    }
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// No token stored; nothing was sent.
    NoSession,
    Invalid(AmountError),
    Created(Transaction),
    Failed(ApiError),
}

/// Validates `draft` and hands it to `create` along with the token.
pub async fn submit<F, Fut>(token: Option<String>, draft: &Draft, create: F) -> SubmitOutcome
where
    F: FnOnce(String, NewTransaction) -> Fut,
    Fut: Future<Output = ApiResult<Transaction>>,
{
    let Some(token) = token else {
        return SubmitOutcome::NoSession;
    };
    let payload = match draft.to_payload() {
        Ok(payload) => payload,
        Err(error) => return SubmitOutcome::Invalid(error),
    };

    match create(token, payload).await {
        Ok(created) => SubmitOutcome::Created(created),
        Err(error) => SubmitOutcome::Failed(error),
    }
}

/// What the form does once a submit has finished.
#[derive(Debug, PartialEq)]
pub enum SubmitEffect {
    /// Clear every field.
    Reset,
    ShowError(String),
    Nothing,
}

/// Runs `on_created` exactly once for a created transaction and never
/// otherwise.
pub fn apply_outcome(outcome: SubmitOutcome, on_created: impl FnOnce()) -> SubmitEffect {
    match outcome {
        SubmitOutcome::Created(created) => {
            log::debug!("Created transaction {}", created.id);
            on_created();
            SubmitEffect::Reset
        }
        SubmitOutcome::Invalid(reason) => SubmitEffect::ShowError(reason.to_string()),
        SubmitOutcome::Failed(reason) => {
            log::error!("Error creating transaction: {reason}");
            SubmitEffect::Nothing
        }
        SubmitOutcome::NoSession => SubmitEffect::Nothing,
    }
}

#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    /// Called once after each transaction the server accepts.
    pub on_success: Callback<()>,
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let draft = use_state(Draft::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let token = LocalStorage.token();
            if token.is_none() {
                return;
            }

            let api = api.clone();
            let draft = draft.clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_success = on_success.clone();
            let current = (*draft).clone();

            error.set(None);
            loading.set(true);

            spawn_local(async move {
                let outcome = submit(token, &current, |token, payload| async move {
                    api.create_transaction(&token, &payload).await
                })
                .await;

                match apply_outcome(outcome, || on_success.emit(())) {
                    SubmitEffect::Reset => draft.set(Draft::default()),
                    SubmitEffect::ShowError(message) => error.set(Some(message)),
                    SubmitEffect::Nothing => {}
                }
                loading.set(false);
            });
        })
    };

    let on_type = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.transaction_type = TransactionType::from_form_value(&select.value());
            draft.set(next);
        })
    };

    let on_amount = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.amount = input.value();
            draft.set(next);
        })
    };

    let on_description = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.description = input.value();
            draft.set(next);
        })
    };

    let is_income = draft.transaction_type == TransactionType::Income;

    html! {
        <form onsubmit={on_submit} class="bg-white p-6 rounded-xl shadow-sm border border-slate-100 space-y-5">
            <div>
                <h3 class="text-lg font-semibold text-slate-900 tracking-tight">{"New Transaction"}</h3>
                <p class="text-xs text-slate-500 mt-1">{"Add income or expense"}</p>
            </div>

            <div>
                <label class="block text-xs font-medium text-slate-600 mb-2 uppercase tracking-wide">{"Type"}</label>
                <select class="w-full px-4 py-2 border border-slate-200 rounded-lg" onchange={on_type}>
                    <option value="expense" selected={!is_income}>{"Expense"}</option>
                    <option value="income" selected={is_income}>{"Income"}</option>
                </select>
            </div>

            <div>
                <label class="block text-xs font-medium text-slate-600 mb-2 uppercase tracking-wide">{"Amount"}</label>
                <div class="relative">
                    <div class="absolute inset-y-0 left-0 pl-4 flex items-center pointer-events-none">
                        <span class="text-slate-500 text-sm">{"$"}</span>
                    </div>
                    <input
                        type="number"
                        step="0.01"
                        class="w-full pl-8 pr-4 py-2 border border-slate-200 rounded-lg"
                        placeholder="0.00"
                        required=true
                        value={draft.amount.clone()}
                        oninput={on_amount}
                    />
                </div>
            </div>

            <div>
                <label class="block text-xs font-medium text-slate-600 mb-2 uppercase tracking-wide">{"Description"}</label>
                <input
                    type="text"
                    class="w-full px-4 py-2 border border-slate-200 rounded-lg"
                    placeholder="What was this for?"
                    value={draft.description.clone()}
                    oninput={on_description}
                />
            </div>

            if let Some(msg) = &*error {
                <div class="text-sm text-red-500">{ msg.clone() }</div>
            }

            <button type="submit" class="w-full bg-slate-900 text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity" disabled={*loading}>
                { if *loading { "Adding..." } else { "Add Transaction" } }
            </button>
        </form>
    }
}
