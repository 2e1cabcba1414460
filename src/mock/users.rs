//! # Mock Users
//!
//! A deterministic user collection for demos and tests. The same `count`
//! always yields the same users: every second user is a `LEAD`, the rest
//! alternate between `CUSTOMER` and `ADMIN`.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datasource::InMemoryDataSource;
use crate::engine::Entity;

const FIRST_NAMES: [&str; 8] = [
    "Alice", "Bruno", "Chen", "Dana", "Emeka", "Farah", "Goran", "Hana",
];

const LAST_NAMES: [&str; 5] = ["Smith", "Okafor", "Lindqvist", "Moreau", "Tanaka"];

/// 2024-01-01T00:00:00Z
const EPOCH_SECONDS: i64 = 1_704_067_200;

/// Account category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Lead,
    Customer,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Lead => "LEAD",
            UserType::Customer => "CUSTOMER",
            UserType::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mock user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub active: bool,
    pub score: u32,
}

/// Queryable user fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserField {
    Id,
    DisplayName,
    Email,
    UserType,
    CreatedAt,
    Active,
    Score,
}

impl AsRef<str> for UserField {
    fn as_ref(&self) -> &str {
        match self {
            UserField::Id => "id",
            UserField::DisplayName => "displayName",
            UserField::Email => "email",
            UserField::UserType => "userType",
            UserField::CreatedAt => "createdAt",
            UserField::Active => "active",
            UserField::Score => "score",
        }
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        let value = match name {
            "id" => Value::from(self.id.as_str()),
            "displayName" => Value::from(self.display_name.as_str()),
            "email" => Value::from(self.email.as_str()),
            "userType" => Value::from(self.user_type.as_str()),
            "createdAt" => Value::from(self.created_at.to_rfc3339()),
            "active" => Value::from(self.active),
            "score" => Value::from(self.score),
            _ => return None,
        };
        Some(Cow::Owned(value))
    }
}

/// Build the `index`-th mock user
pub fn mock_user(index: usize) -> User {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];

    let user_type = if index % 2 == 0 {
        UserType::Lead
    } else if index % 4 == 1 {
        UserType::Customer
    } else {
        UserType::Admin
    };

    let offset = i64::try_from(index)
        .ok()
        .and_then(|hours| hours.checked_mul(3600))
        .unwrap_or(0);
    let created_at =
        DateTime::<Utc>::from_timestamp(EPOCH_SECONDS.saturating_add(offset), 0).unwrap_or_default();

    User {
        id: format!("user-{:04}", index),
        display_name: format!("{} {}", first, last),
        email: format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            index
        ),
        user_type,
        created_at,
        active: index % 3 != 0,
        score: ((index * 37) % 100) as u32,
    }
}

/// Generate `count` users with ids `user-0000` upward
pub fn generate_users(count: usize) -> Vec<User> {
    (0..count).map(mock_user).collect()
}

/// Generated users as JSON documents
pub fn generate_user_documents(count: usize) -> serde_json::Result<Vec<Value>> {
    generate_users(count)
        .into_iter()
        .map(serde_json::to_value)
        .collect()
}

/// In-memory source seeded with `count` generated users
pub fn mock_users_source(count: usize) -> InMemoryDataSource<User> {
    InMemoryDataSource::new("mock-users", generate_users(count))
}
