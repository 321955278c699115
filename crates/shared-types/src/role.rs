use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag attached to a portal account.
///
/// - `DivisionAdmin` — manages the schools of a whole division.
/// - `Admin` — school-level administrator.
/// - `SchoolHead` — principal of a single school.
/// - `SuperAdmin` — platform operator.
/// - `Registrar` — enrollment and records staff.
/// - `Teacher` — classroom staff.
///
/// Stored in the backend as a free-form string, so parsing is lenient and
/// unknown values are not an error: they simply match no policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    DivisionAdmin,
    Admin,
    SchoolHead,
    SuperAdmin,
    Registrar,
    Teacher,
}

impl RoleTag {
    pub const ALL: [RoleTag; 6] = [
        RoleTag::DivisionAdmin,
        RoleTag::Admin,
        RoleTag::SchoolHead,
        RoleTag::SuperAdmin,
        RoleTag::Registrar,
        RoleTag::Teacher,
    ];

    /// Parse a stored role string.
    ///
    /// Case-insensitive; spaces, hyphens and underscores are interchangeable,
    /// so `"super admin"`, `"Super-Admin"` and `"super_admin"` are the same tag.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "division_admin" => Some(RoleTag::DivisionAdmin),
            "admin" => Some(RoleTag::Admin),
            "school_head" => Some(RoleTag::SchoolHead),
            "super_admin" => Some(RoleTag::SuperAdmin),
            "registrar" => Some(RoleTag::Registrar),
            "teacher" => Some(RoleTag::Teacher),
            _ => None,
        }
    }

    /// Canonical snake_case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::DivisionAdmin => "division_admin",
            RoleTag::Admin => "admin",
            RoleTag::SchoolHead => "school_head",
            RoleTag::SuperAdmin => "super_admin",
            RoleTag::Registrar => "registrar",
            RoleTag::Teacher => "teacher",
        }
    }

    /// Human-readable label for badges and headers.
    pub fn label(&self) -> &'static str {
        match self {
            RoleTag::DivisionAdmin => "Division Admin",
            RoleTag::Admin => "Admin",
            RoleTag::SchoolHead => "School Head",
            RoleTag::SuperAdmin => "Super Admin",
            RoleTag::Registrar => "Registrar",
            RoleTag::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
