use yew::prelude::*;

mod api;
mod components;
mod config;
mod error;
mod models;
mod money;
mod pages;
mod route;
mod session;
mod totals;

use api::ApiClient;
use pages::{
    auth::{AuthMode, AuthScreen},
    dashboard::DashboardPage,
};
use route::Route;

#[function_component(App)]
fn app() -> Html {
    let route = use_state(Route::current);
    let api = use_state(ApiClient::default);

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            if *route != next {
                next.push_history();
                route.set(next);
            }
        })
    };

    let content = match *route {
        Route::Login => html! {
            <AuthScreen key="login" mode={AuthMode::Login} on_navigate={on_navigate} />
        },
        Route::Signup => html! {
            <AuthScreen key="signup" mode={AuthMode::Signup} on_navigate={on_navigate} />
        },
        Route::Dashboard => html! { <DashboardPage on_navigate={on_navigate} /> },
    };

    html! {
        <ContextProvider<ApiClient> context={(*api).clone()}>
            { content }
        </ContextProvider<ApiClient>>
    }
}

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    log::info!("Using API at {}", config::api_base_url());
    yew::Renderer::<App>::new().render();
}
