//! User roles and the role filter used by admin listings.

use serde::{Deserialize, Serialize};

/// Role assigned to a user at creation.
///
/// Roles are immutable after creation: there is no promote/demote operation
/// anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Manages users and stores; sees the full listing surface.
    Admin,
    /// Signs up, browses stores, submits ratings.
    NormalUser,
    /// Sees aggregated feedback for the stores they own.
    StoreOwner,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::NormalUser => write!(f, "normal_user"),
            Self::StoreOwner => write!(f, "store_owner"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "normal_user" => Ok(Self::NormalUser),
            "store_owner" => Ok(Self::StoreOwner),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Role filter for the admin user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFilter {
    /// No role restriction.
    #[default]
    All,
    Admin,
    NormalUser,
    StoreOwner,
}

impl RoleFilter {
    /// The concrete role to match, or `None` for [`RoleFilter::All`].
    #[must_use]
    pub const fn as_role(self) -> Option<UserRole> {
        match self {
            Self::All => None,
            Self::Admin => Some(UserRole::Admin),
            Self::NormalUser => Some(UserRole::NormalUser),
            Self::StoreOwner => Some(UserRole::StoreOwner),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_from_str_roundtrip() {
        for role in [UserRole::Admin, UserRole::NormalUser, UserRole::StoreOwner] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        assert!("superuser".parse::<UserRole>().is_err());
        assert!("".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_uses_snake_case() {
        let json = serde_json::to_string(&UserRole::StoreOwner).unwrap();
        assert_eq!(json, "\"store_owner\"");
        let parsed: UserRole = serde_json::from_str("\"normal_user\"").unwrap();
        assert_eq!(parsed, UserRole::NormalUser);
    }

    #[test]
    fn test_role_filter_as_role() {
        assert_eq!(RoleFilter::All.as_role(), None);
        assert_eq!(RoleFilter::StoreOwner.as_role(), Some(UserRole::StoreOwner));
    }

    #[test]
    fn test_role_filter_default_is_all() {
        assert_eq!(RoleFilter::default(), RoleFilter::All);
    }
}
