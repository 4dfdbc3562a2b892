use wasm_bindgen::JsValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Unknown paths land on the dashboard, whose session gate sends
    /// signed-out visitors to the login screen.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            _ => Route::Dashboard,
        }
    }

    /// The route matching the address bar when the app starts.
    pub fn current() -> Self {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .map(|path| Route::from_path(&path))
            .unwrap_or(Route::Dashboard)
    }

    /// Puts this route's path in the address bar without reloading.
    pub fn push_history(&self) {
        let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
            return;
        };
        if let Err(error) = history.push_state_with_url(&JsValue::NULL, "", Some(self.path())) {
            log::warn!("Could not update history: {error:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_map_to_routes() {
        assert_eq!(Route::from_path("/login"), Route::Login);
        assert_eq!(Route::from_path("/signup/"), Route::Signup);
        assert_eq!(Route::from_path("/dashboard"), Route::Dashboard);
    }

    #[test]
    fn unknown_paths_go_to_the_dashboard() {
        assert_eq!(Route::from_path("/"), Route::Dashboard);
        assert_eq!(Route::from_path("/nope"), Route::Dashboard);
    }

    #[test]
    fn paths_round_trip() {
        for route in [Route::Login, Route::Signup, Route::Dashboard] {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }
}
