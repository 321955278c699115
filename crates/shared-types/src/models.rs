use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::RoleTag;

/// The signed-in account as seen by the client.
///
/// Built from the Supabase auth user id plus the matching row of the
/// `users` profile table. The role is kept exactly as stored; use
/// [`CurrentUser::role_tag`] to compare it against a policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub role: String,
}

impl CurrentUser {
    pub fn new(id: Uuid, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }

    /// Normalized role, or `None` for roles this portal does not know.
    pub fn role_tag(&self) -> Option<RoleTag> {
        RoleTag::parse(&self.role)
    }

    /// First word of the display name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}
