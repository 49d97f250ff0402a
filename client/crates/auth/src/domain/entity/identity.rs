//! Identity Entity
//!
//! The user behind the current token, as resolved from `GET /users/me`.

use std::collections::BTreeSet;

use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_object::user_role::UserRole;

/// Identity record as the server sends it
///
/// Every field is optional so a sparse record still decodes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIdentity {
    pub id: Value,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub roles: Option<Vec<String>>,
    pub is_admin: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Canonical identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    /// Always contains [`UserRole::User`]
    pub roles: BTreeSet<UserRole>,
}

impl Identity {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }
}

impl From<RawIdentity> for Identity {
    fn from(raw: RawIdentity) -> Self {
        let id = UserId::from_json(&raw.id).unwrap_or_else(|| {
            tracing::warn!("Identity record without a usable id");
            UserId::new("")
        });

        let mut roles = BTreeSet::from([UserRole::User]);
        for code in raw.roles.iter().flatten() {
            match UserRole::from_code(code) {
                Some(role) => {
                    roles.insert(role);
                }
                None => tracing::warn!(role = %code, "Ignoring unknown role"),
            }
        }
        if raw.is_admin.unwrap_or(false) || raw.is_superuser.unwrap_or(false) {
            roles.insert(UserRole::Admin);
        }

        Self {
            id,
            username: raw.username.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            full_name: raw.full_name.filter(|name| !name.trim().is_empty()),
            roles,
        }
    }
}
