//! Users and their roles.

use crate::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Trader,
    Consumer,
    Reporter,
}

impl Role {
    /// Whether this role may submit price observations.
    pub fn can_report_prices(&self) -> bool {
        match self {
            Role::Reporter => true,
            Role::Farmer | Role::Trader | Role::Consumer => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Trader => "trader",
            Role::Consumer => "consumer",
            Role::Reporter => "reporter",
        }
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
        match s.trim().to_ascii_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "trader" => Ok(Role::Trader),
            "consumer" => Ok(Role::Consumer),
            "reporter" => Ok(Role::Reporter),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A directory entry. The password is stored in plaintext; this is a mock directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

/// Registration payload; the directory assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            phone: self.phone,
            password: self.password,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_reporters_can_report() {
        assert!(Role::Reporter.can_report_prices());
        assert!(!Role::Farmer.can_report_prices());
        assert!(!Role::Trader.can_report_prices());
        assert!(!Role::Consumer.can_report_prices());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Reporter).unwrap(), "\"reporter\"");
        assert_eq!("TRADER".parse::<Role>(), Ok(Role::Trader));
    }
}
