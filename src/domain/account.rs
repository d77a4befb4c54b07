use rust_decimal::Decimal;

use crate::domain::Error;

/// Opaque, stable account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: String, // normalised, lookup only
    pub balance: Decimal,
}

impl Account {
    pub fn new(email: String) -> Self {
        Self {
            id: AccountId::generate(),
            email,
            balance: Decimal::ZERO,
        }
    }
}

/// Trims and lowercases an email so lookups are case-insensitive.
pub fn normalize_email(raw: &str) -> Result<String, Error> {
    let email = raw.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(Error::InvalidEmail(raw.to_owned()));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        assert!(matches!(
            normalize_email("alice.example.com"),
            Err(Error::InvalidEmail(_))
        ));
        assert!(matches!(normalize_email("@x"), Err(Error::InvalidEmail(_))));
        assert!(matches!(
            normalize_email("a b@x"),
            Err(Error::InvalidEmail(_))
        ));
    }

    #[test]
    fn new_account_starts_empty() {
        let account = Account::new("bob@example.com".to_string());
        assert_eq!(account.balance, Decimal::ZERO);
        assert_ne!(account.id, Account::new("bob@example.com".into()).id);
    }
}
