use std::future::Future;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api::ApiClient,
    components::{
        icons::icon_log_out, transaction_form::TransactionForm,
        transaction_list::TransactionList,
    },
    error::ApiResult,
    route::Route,
    session::{LocalStorage, SessionGate, SessionStore},
};

/// Tells the server the session is over, then forgets it locally whatever the
/// server said.
pub async fn sign_out<S, F, Fut>(store: &S, notify_server: F)
where
    S: SessionStore,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = ApiResult<()>>,
{
    if let Some(token) = store.token() {
        if let Err(error) = notify_server(token).await {
            log::warn!("Server logout failed, signing out locally anyway: {error}");
        }
    }
    store.clear();
}

/// The next value of the list's refresh signal; always differs from `current`.
pub fn next_refresh(current: u32) -> u32 {
    current.wrapping_add(1)
}

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub on_navigate: Callback<Route>,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let gate = use_state(|| SessionGate::Unresolved);
    let refresh = use_state(|| 0u32);

    {
        let gate = gate.clone();
        let on_navigate = props.on_navigate.clone();
        use_effect_with_deps(
            move |_| {
                let resolved = SessionGate::resolve(&LocalStorage);
                if resolved == SessionGate::Unauthenticated {
                    on_navigate.emit(Route::Login);
                }
                gate.set(resolved);
                || ()
            },
            (),
        );
    }

    let on_logout = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| {
            let api = api.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                sign_out(&LocalStorage, |token| async move { api.logout(&token).await }).await;
                on_navigate.emit(Route::Login);
            });
        })
    };

    let on_transaction_added = {
        let refresh = refresh.clone();
        Callback::from(move |_| refresh.set(next_refresh(*refresh)))
    };

    let user = match &*gate {
        SessionGate::Authenticated(user) => user.clone(),
        SessionGate::Unauthenticated => return html! {},
        SessionGate::Unresolved => {
            return html! {
                <div class="min-h-screen flex items-center justify-center">
                    <p class="text-sm text-slate-500">{"Loading..."}</p>
                </div>
            };
        }
    };

    html! {
        <div class="min-h-screen bg-slate-50">
            <nav class="bg-white border-b border-slate-100">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex justify-between items-center h-16">
                        <div>
                            <h1 class="text-lg font-semibold text-slate-900 tracking-tight">{"Finance Tracker"}</h1>
                            <p class="text-xs text-slate-500">{ user.email }</p>
                        </div>
                        <button onclick={on_logout} class="flex items-center gap-2 px-4 py-2 text-xs font-medium text-slate-700 hover:bg-slate-50 rounded-lg border border-slate-200">
                            { icon_log_out() }
                            <span>{"Sign Out"}</span>
                        </button>
                    </div>
                </div>
            </nav>

            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                    <div class="lg:col-span-1">
                        <TransactionForm on_success={on_transaction_added} />
                    </div>
                    <div class="lg:col-span-2">
                        <TransactionList refresh={*refresh} />
                    </div>
                </div>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        error::ApiError,
        models::{Session, User},
        session::memory::MemoryStore,
    };

    fn signed_in_store() -> MemoryStore {
        let store = MemoryStore::default();
        store.save(&Session {
            access_token: "tok".to_string(),
            user: User {
                email: "jo@example.com".to_string(),
                ..Default::default()
            },
        });
        store
    }

    #[test]
    fn refresh_signal_always_changes() {
        assert_eq!(next_refresh(0), 1);
        assert_eq!(next_refresh(41), 42);
        assert_eq!(next_refresh(u32::MAX), 0);
    }

    #[tokio::test]
    async fn failed_server_logout_still_clears_the_session() {
        let store = signed_in_store();

        sign_out(&store, |_| async {
            Err(ApiError::Network("offline".to_string()))
        })
        .await;

        assert_eq!(store.len(), 0);
        assert_eq!(SessionGate::resolve(&store), SessionGate::Unauthenticated);
    }

    #[tokio::test]
    async fn server_is_told_with_the_stored_token() {
        let store = signed_in_store();
        let seen = Cell::new(false);

        sign_out(&store, |token| {
            assert_eq!(token, "tok");
            seen.set(true);
            async { Ok(()) }
        })
        .await;

        assert!(seen.get());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn without_a_token_the_server_is_not_called() {
        let store = MemoryStore::default();
        let called = Cell::new(false);

        sign_out(&store, |_| {
            called.set(true);
            async { Ok(()) }
        })
        .await;

        assert!(!called.get());
    }
}
