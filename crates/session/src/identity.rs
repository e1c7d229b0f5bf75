//! Authenticated identity: stable profile of the session owner.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use gridwatch_core::{DomainError, IdentityId};

/// Authorization role of an identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
    Citizen,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Citizen => "citizen",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "operator" => Ok(Role::Operator),
            "citizen" => Ok(Role::Citizen),
            other => Err(DomainError::validation("role", format!("unknown role '{other}'"))),
        }
    }
}

/// An authenticated user's stable profile.
///
/// # Invariants
/// - At most one identity is "current" at any time (enforced by `SessionStore`).
/// - Immutable except via explicit profile edit; destroyed on logout.
///
/// Serialized field names are the external persistence contract
/// (`{id, email, name, role}`) and must round-trip field-for-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: IdentityId::new(),
            email: email.into(),
            name: name.into(),
            role,
        }
    }
}
