//! User & Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role used for capability checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Role {
    Customer,
    Staff,
    Kitchen,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Kitchen => "kitchen",
            Role::Admin => "admin",
        }
    }

    /// Roles that see every order instead of only their own
    pub const fn sees_all_orders(&self) -> bool {
        matches!(self, Role::Staff | Role::Kitchen | Role::Admin)
    }

    /// Roles enrolled in the kitchen notification topic
    pub const fn is_kitchen_crew(&self) -> bool {
        matches!(self, Role::Kitchen | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "staff" => Ok(Role::Staff),
            "kitchen" => Ok(Role::Kitchen),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User row (includes the password hash, never serialized to clients)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Self-service registration payload (always creates a customer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login / register response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

/// Admin payload for creating staff, kitchen or admin accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Customer, Role::Staff, Role::Kitchen, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role)
            );
        }
        assert!("chef".parse::<Role>().is_err());
    }

    #[test]
    fn role_capabilities() {
        assert!(Role::Kitchen.is_kitchen_crew());
        assert!(Role::Admin.is_kitchen_crew());
        assert!(!Role::Staff.is_kitchen_crew());
        assert!(Role::Staff.sees_all_orders());
        assert!(!Role::Customer.sees_all_orders());
    }
}
