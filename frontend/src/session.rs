//! The locally cached session: an access token and the user it belongs to.
//!
//! Every component reads and writes the session through [SessionStore], so
//! there is a single place where the storage keys live and a single `clear`
//! that logs the user out locally.

use crate::models::{Session, User};

const TOKEN_KEY: &str = "access_token";
const USER_KEY: &str = "user";

/// Key/value persistence for the session.
///
/// Implementors only provide the raw string operations; the session
/// semantics are shared by all of them.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);

    /// The stored access token, if there is a non-empty one.
    fn token(&self) -> Option<String> {
        self.get_item(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    fn user(&self) -> Option<User> {
        let raw = self.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                log::warn!("Ignoring unreadable stored user record: {error}");
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        self.set_item(TOKEN_KEY, &session.access_token);
        match serde_json::to_string(&session.user) {
            Ok(raw) => self.set_item(USER_KEY, &raw),
            Err(error) => log::error!("Could not store user record: {error}"),
        }
    }

    /// Removes both the token and the user record.
    fn clear(&self) {
        self.remove_item(TOKEN_KEY);
        self.remove_item(USER_KEY);
    }
}

/// The browser's `localStorage`. Silently does nothing when storage is
/// unavailable (e.g. disabled by privacy settings).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::error!("Could not write `{key}` to local storage");
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Whether the current visitor may see the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionGate {
    /// The store has not been read yet.
    Unresolved,
    Unauthenticated,
    Authenticated(User),
}

impl SessionGate {
    /// Reads the store once. A token without a readable user record still
    /// counts as signed in; the header just has no email to show.
    pub fn resolve(store: &impl SessionStore) -> Self {
        match store.token() {
            None => SessionGate::Unauthenticated,
            Some(_) => SessionGate::Authenticated(store.user().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
pub mod memory {
    use std::{cell::RefCell, collections::HashMap};

    use super::SessionStore;

    #[derive(Default)]
    pub struct MemoryStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub fn len(&self) -> usize {
            self.items.borrow().len()
        }
    }

    impl SessionStore for MemoryStore {
        fn get_item(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set_item(&self, key: &str, value: &str) {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }

        fn remove_item(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{memory::MemoryStore, *};
    use crate::{
        models::{AuthResponse, Transaction, TransactionType},
        totals::Totals,
    };

    fn session(email: &str) -> Session {
        Session {
            access_token: "token-123".to_string(),
            user: User {
                email: email.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn no_token_is_unauthenticated() {
        let store = MemoryStore::default();

        assert_eq!(SessionGate::resolve(&store), SessionGate::Unauthenticated);
    }

    #[test]
    fn empty_token_is_unauthenticated() {
        let store = MemoryStore::default();
        store.set_item(TOKEN_KEY, "");

        assert_eq!(SessionGate::resolve(&store), SessionGate::Unauthenticated);
    }

    #[test]
    fn saved_session_is_authenticated() {
        let store = MemoryStore::default();
        store.save(&session("jo@example.com"));

        assert_eq!(store.token().as_deref(), Some("token-123"));
        match SessionGate::resolve(&store) {
            SessionGate::Authenticated(user) => assert_eq!(user.email, "jo@example.com"),
            other => panic!("expected authenticated, got {other:?}"),
        }
    }

    #[test]
    fn token_with_corrupt_user_is_still_authenticated() {
        let store = MemoryStore::default();
        store.set_item(TOKEN_KEY, "token-123");
        store.set_item(USER_KEY, "{not json");

        assert_eq!(
            SessionGate::resolve(&store),
            SessionGate::Authenticated(User::default())
        );
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = MemoryStore::default();
        store.save(&session("jo@example.com"));
        assert_eq!(store.len(), 2);

        store.clear();

        assert_eq!(store.len(), 0);
        assert_eq!(SessionGate::resolve(&store), SessionGate::Unauthenticated);
    }

    #[test]
    fn login_then_single_income_gives_matching_totals() {
        let store = MemoryStore::default();
        let response: AuthResponse = serde_json::from_value(json!({
            "user": { "email": "jo@example.com" },
            "session": { "access_token": "token-123" }
        }))
        .unwrap();
        store.save(&response.into_session().unwrap());

        assert!(matches!(
            SessionGate::resolve(&store),
            SessionGate::Authenticated(_)
        ));

        let transactions = vec![Transaction {
            id: "t1".to_string(),
            amount: 500,
            description: Some("Paycheck".to_string()),
            transaction_type: TransactionType::Income,
            date: "2025-03-01".to_string(),
            created_at: "2025-03-01T09:00:00Z".to_string(),
        }];
        let totals = Totals::from_transactions(&transactions);

        assert_eq!(totals.income, 500);
        assert_eq!(totals.expenses, 0);
        assert_eq!(totals.balance, 500);
    }
}
