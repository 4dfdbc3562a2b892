use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Parses the value of the type `<select>`. Anything unknown is an expense.
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "income" => TransactionType::Income,
            _ => TransactionType::Expense,
        }
    }
}

/// A transaction as stored by the server. Amounts are in minor units.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub id: String,
    pub amount: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /api/transactions`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTransaction {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransactionList {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// The user record returned at login. Only `email` is read; everything else
/// is carried along untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Body of a login or signup response. Signup may omit the session when the
/// account still needs confirming.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub session: Option<SessionToken>,
}

impl AuthResponse {
    pub fn into_session(self) -> Option<Session> {
        let token = self.session?;
        Some(Session {
            access_token: token.access_token,
            user: self.user.unwrap_or_default(),
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
