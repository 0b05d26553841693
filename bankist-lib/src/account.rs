//! Bank accounts and their movements

use std::{borrow::Borrow, fmt};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The short login identifier of an account.
///
/// A handle is the lowercase initials of the owner's name, so "Jessica Davis"
/// logs in as `jd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(String);

impl Handle {
    /// Derive the handle for an owner's full name
    #[must_use]
    pub fn from_owner(owner: &str) -> Self {
        let initials = owner
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase)
            .collect();
        Self(initials)
    }

    /// The handle as typed at the login prompt
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Handle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A numeric account PIN. Compared in plaintext.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pin(u32);

impl Pin {
    /// Wrap a raw PIN
    #[must_use]
    pub const fn new(pin: u32) -> Self {
        Self(pin)
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Whether a movement added money to the account or took it away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Money in
    Deposit,

    /// Money out. Zero-value movements are counted here too.
    Withdrawal,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => f.write_str("deposit"),
            Self::Withdrawal => f.write_str("withdrawal"),
        }
    }
}

/// A single signed transaction on an account, with the time it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    /// Positive for inflows, negative for outflows
    pub amount: Decimal,

    /// When the movement was booked
    pub date: DateTime<Utc>,
}

impl Movement {
    /// The direction of the movement
    #[must_use]
    pub fn kind(&self) -> Kind {
        if self.amount > Decimal::ZERO {
            Kind::Deposit
        } else {
            Kind::Withdrawal
        }
    }
}

/// A customer account.
///
/// Movements are append-only. An amount and its date are stored together, so
/// there is always exactly one date per movement.
#[derive(Debug, Clone)]
pub struct Account {
    owner: String,
    handle: Handle,
    pin: Pin,
    interest_rate: Decimal,
    currency: String,
    locale: String,
    movements: Vec<Movement>,
}

impl Account {
    /// Open an account with no movements. The handle is derived from `owner`.
    ///
    /// `interest_rate` is a percentage, so `1.2` means 1.2%.
    pub fn new(owner: impl Into<String>, pin: Pin, interest_rate: Decimal) -> Self {
        let owner = owner.into();
        let handle = Handle::from_owner(&owner);
        Self {
            owner,
            handle,
            pin,
            interest_rate,
            currency: "EUR".to_string(),
            locale: "en-US".to_string(),
            movements: Vec::default(),
        }
    }

    /// Set the currency code and locale used when the account is displayed
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>, locale: impl Into<String>) -> Self {
        self.currency = currency.into();
        self.locale = locale.into();
        self
    }

    /// Append historical movements
    #[must_use]
    pub fn with_movements(mut self, movements: impl IntoIterator<Item = Movement>) -> Self {
        self.movements.extend(movements);
        self
    }

    /// The owner's full name
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The first word of the owner's name
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or_default()
    }

    /// The login identifier of the account
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Check a PIN against the one the account was opened with
    #[must_use]
    pub fn verify(&self, pin: Pin) -> bool {
        self.pin == pin
    }

    /// Interest rate, as a percentage
    #[must_use]
    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// ISO currency code
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Display locale, such as `en-US`
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// All movements in the order they were booked
    #[must_use]
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// The signed amounts of all movements, in booking order
    pub fn amounts(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.movements.iter().map(|movement| movement.amount)
    }

    /// The dates of all movements, in booking order
    pub fn dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|movement| movement.date)
    }

    pub(crate) fn push(&mut self, amount: Decimal, date: DateTime<Utc>) {
        self.movements.push(Movement { amount, date });
    }
}

/// Account data as it is written in the accounts config file.
///
/// Amounts and dates are kept in two parallel lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    /// The owner's full name
    pub owner: String,

    /// The account PIN
    pub pin: Pin,

    /// Interest rate, as a percentage
    pub interest_rate: Decimal,

    /// ISO currency code
    pub currency: String,

    /// Display locale
    pub locale: String,

    /// Signed movement amounts
    #[serde(default)]
    pub movements: Vec<Decimal>,

    /// One timestamp per entry in `movements`
    #[serde(default)]
    pub movement_dates: Vec<DateTime<Utc>>,
}

/// Errors raised when turning a [`Seed`] into an [`Account`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeedError {
    /// The movement and date lists differ in length
    #[error("account '{owner}' has {movements} movements but {dates} movement dates")]
    MismatchedDates {
        /// the owner of the offending account
        owner: String,
        /// number of movement amounts
        movements: usize,
        /// number of movement dates
        dates: usize,
    },
}

impl TryFrom<Seed> for Account {
    type Error = SeedError;

    fn try_from(seed: Seed) -> Result<Self, Self::Error> {
        if seed.movements.len() != seed.movement_dates.len() {
            return Err(SeedError::MismatchedDates {
                owner: seed.owner,
                movements: seed.movements.len(),
                dates: seed.movement_dates.len(),
            });
        }

        let movements = seed
            .movements
            .into_iter()
            .zip(seed.movement_dates)
            .map(|(amount, date)| Movement { amount, date });

        Ok(Self::new(seed.owner, seed.pin, seed.interest_rate)
            .with_currency(seed.currency, seed.locale)
            .with_movements(movements))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use test_case::test_case;

    use super::*;

    #[test_case("Jonas Schmedtmann" => "js"; "two words")]
    #[test_case("Steven Thomas Williams" => "stw"; "three words")]
    #[test_case("  Sarah   Smith " => "ss"; "extra whitespace")]
    #[test_case("Émile Zola" => "éz"; "non ascii")]
    #[test_case("" => ""; "empty")]
    fn handle_from_owner(owner: &str) -> String {
        Handle::from_owner(owner).to_string()
    }

    #[test]
    fn pin_is_redacted_in_debug_output() {
        assert_eq!(format!("{:?}", Pin::new(1111)), "Pin(****)");
    }

    #[test]
    fn zero_is_a_withdrawal() {
        let movement = Movement {
            amount: Decimal::ZERO,
            date: Utc::now(),
        };
        assert_eq!(movement.kind(), Kind::Withdrawal);
    }

    #[test]
    fn deserialise_yaml() {
        let raw = r#"
        owner: Jessica Davis
        pin: 2222
        interest_rate: 1.5
        currency: USD
        locale: en-US
        movements: [5000, 3400, -150]
        movement_dates:
          - 2019-11-01T13:15:33.035Z
          - 2019-11-30T09:48:16.867Z
          - 2019-12-25T06:04:23.907Z
        "#;

        let seed: Seed = serde_yaml::from_str(raw).unwrap();
        let account = Account::try_from(seed).unwrap();

        assert_eq!(account.handle().as_str(), "jd");
        assert_eq!(account.first_name(), "Jessica");
        assert_eq!(account.interest_rate(), dec!(1.5));
        assert!(account.verify(Pin::new(2222)));
        assert!(!account.verify(Pin::new(1111)));
        assert_eq!(
            account.amounts().collect::<Vec<_>>(),
            vec![dec!(5000), dec!(3400), dec!(-150)]
        );
        assert_eq!(account.dates().count(), 3);
    }

    #[test]
    fn seed_with_missing_dates_is_rejected() {
        let seed = Seed {
            owner: "Jonas Schmedtmann".to_string(),
            pin: Pin::new(1111),
            interest_rate: dec!(1.2),
            currency: "EUR".to_string(),
            locale: "pt-PT".to_string(),
            movements: vec![dec!(200), dec!(455.23)],
            movement_dates: vec![Utc::now()],
        };

        assert_eq!(
            Account::try_from(seed).unwrap_err(),
            SeedError::MismatchedDates {
                owner: "Jonas Schmedtmann".to_string(),
                movements: 2,
                dates: 1,
            }
        );
    }
}
