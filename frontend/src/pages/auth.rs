use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    api::ApiClient,
    error::ApiError,
    models::AuthResponse,
    route::Route,
    session::{LocalStorage, SessionStore},
};

const SIGNUP_REDIRECT_MS: u32 = 2_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// Persists the session carried by a login response.
fn store_login(response: AuthResponse, store: &impl SessionStore) -> Result<(), ApiError> {
    let session = response
        .into_session()
        .ok_or_else(|| ApiError::Decode("login response carried no session".to_string()))?;
    store.save(&session);
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub mode: AuthMode,
    pub on_navigate: Callback<Route>,
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let signed_up = use_state(|| false);
    let is_login = props.mode == AuthMode::Login;

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let signed_up = signed_up.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let email_val = (*email).clone();
            let password_val = (*password).clone();
            let error = error.clone();
            let loading = loading.clone();
            let signed_up = signed_up.clone();
            let on_navigate = on_navigate.clone();

            error.set(None);
            loading.set(true);

            spawn_local(async move {
                let result = if is_login {
                    api.login(&email_val, &password_val)
                        .await
                        .and_then(|response| store_login(response, &LocalStorage))
                } else {
                    api.signup(&email_val, &password_val).await.map(|_| ())
                };

                match result {
                    Ok(()) if is_login => on_navigate.emit(Route::Dashboard),
                    Ok(()) => {
                        signed_up.set(true);
                        Timeout::new(SIGNUP_REDIRECT_MS, move || on_navigate.emit(Route::Login))
                            .forget();
                    }
                    Err(reason) => {
                        if !matches!(reason, ApiError::Rejected(_)) {
                            log::error!("Authentication request failed: {reason}");
                        }
                        error.set(Some(reason.user_message()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let go_to = |route: Route| {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(route))
    };

    if *signed_up {
        return html! {
            <div class="min-h-screen flex items-center justify-center px-4 bg-slate-50">
                <div class="w-full max-w-md bg-white border border-slate-100 rounded-2xl shadow-lg p-8 text-center">
                    <h2 class="text-2xl font-semibold text-slate-900">{"Account created"}</h2>
                    <p class="text-sm text-slate-500 mt-2">{"Check your email to confirm your account. Redirecting to sign in..."}</p>
                </div>
            </div>
        };
    }

    html! {
        <div class="min-h-screen flex items-center justify-center px-4 bg-slate-50">
            <div class="w-full max-w-md bg-white border border-slate-100 rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h2 class="text-2xl font-semibold text-slate-900">{ if is_login { "Welcome back" } else { "Create your account" } }</h2>
                    <p class="text-sm text-slate-500 mt-2">
                        { if is_login { "Sign in to your account" } else { "Start tracking your income and expenses" } }
                    </p>
                </div>

                if let Some(msg) = &*error {
                    <div class="mb-4 bg-red-50 border border-red-100 text-red-600 px-4 py-3 rounded-lg text-sm">{ msg.clone() }</div>
                }

                <form class="space-y-5" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label for="email" class="block text-xs font-medium text-slate-600 uppercase tracking-wide">{"Email Address"}</label>
                        <input
                            id="email"
                            type="email"
                            required=true
                            placeholder="you@example.com"
                            class="w-full px-4 py-2 border border-slate-200 rounded-lg focus:outline-none focus:ring-2 focus:ring-slate-900"
                            value={(*email).clone()}
                            oninput={{
                                let email = email.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    email.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label for="password" class="block text-xs font-medium text-slate-600 uppercase tracking-wide">{"Password"}</label>
                        <input
                            id="password"
                            type="password"
                            required=true
                            class="w-full px-4 py-2 border border-slate-200 rounded-lg focus:outline-none focus:ring-2 focus:ring-slate-900"
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>

                    <button
                        type="submit"
                        class="w-full bg-slate-900 text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        {
                            match (*loading, is_login) {
                                (true, true) => "Signing in...",
                                (true, false) => "Creating account...",
                                (false, true) => "Sign In",
                                (false, false) => "Sign Up",
                            }
                        }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-slate-500">
                    { if is_login { "New to Finance Tracker?" } else { "Already have an account?" } }
                    if is_login {
                        <button class="ml-2 font-semibold text-slate-900" onclick={go_to(Route::Signup)}>{"Create an account"}</button>
                    } else {
                        <button class="ml-2 font-semibold text-slate-900" onclick={go_to(Route::Login)}>{"Sign in"}</button>
                    }
                </div>
            </div>
        </div>
    }
}
