//! User inputs and their validated forms.

use serde::{Deserialize, Serialize};

/// Raw user data as received from a caller, prior to validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub membership: bool,
    pub credit_card: CreditCardInput,
}

/// Raw payment instrument fields, prior to validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardInput {
    pub number: String,
    pub cvc: String,
    pub exp_month: u32,
    pub exp_year: u32,
}

/// A validated user. Only constructed by [`crate::Validator::user`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub membership: bool,
    pub credit_card: CreditCard,
}

impl User {
    /// Returns the payer name used on payment orders.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    /// Classifies the user for booking records.
    pub fn user_type(&self) -> UserType {
        UserType::from_membership(self.membership)
    }
}

/// A validated payment instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub number: String,
    pub cvc: String,
    pub exp_month: u32,
    pub exp_year: u32,
}

/// User classification persisted on booking records.
///
/// Members are `loyal`, everyone else is `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Loyal,
    Normal,
}

impl UserType {
    /// Derives the classification from the membership flag.
    pub fn from_membership(membership: bool) -> Self {
        if membership {
            UserType::Loyal
        } else {
            UserType::Normal
        }
    }

    /// Returns the classification as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Loyal => "loyal",
            UserType::Normal => "normal",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(membership: bool) -> User {
        User {
            name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            membership,
            credit_card: CreditCard {
                number: "4242424242424242".to_string(),
                cvc: "123".to_string(),
                exp_month: 12,
                exp_year: 2027,
            },
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_user(false).full_name(), "Ann Lee");
    }

    #[test]
    fn test_user_type_from_membership() {
        assert_eq!(UserType::from_membership(true), UserType::Loyal);
        assert_eq!(UserType::from_membership(false), UserType::Normal);
        assert_eq!(sample_user(true).user_type(), UserType::Loyal);
    }

    #[test]
    fn test_user_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserType::Loyal).unwrap(), "\"loyal\"");
        assert_eq!(
            serde_json::to_string(&UserType::Normal).unwrap(),
            "\"normal\""
        );
    }

    #[test]
    fn test_user_type_display() {
        assert_eq!(UserType::Loyal.to_string(), "loyal");
        assert_eq!(UserType::Normal.to_string(), "normal");
    }

    #[test]
    fn test_membership_defaults_to_false() {
        let json = r#"{
            "name": "Ann",
            "last_name": "Lee",
            "email": "ann@x.com",
            "credit_card": {
                "number": "4242424242424242",
                "cvc": "123",
                "exp_month": 12,
                "exp_year": 2027
            }
        }"#;
        let input: UserInput = serde_json::from_str(json).unwrap();
        assert!(!input.membership);
    }
}
