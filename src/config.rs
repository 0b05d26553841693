use bankist_lib::{account::Seed, Accounts, Pin, Settings};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Error;

pub static BIN_NAME: &str = std::env!("CARGO_PKG_NAME");

/// The contents of the `accounts` config file
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountsFile {
    pub accounts: Vec<Seed>,
}

impl Default for AccountsFile {
    fn default() -> Self {
        Self {
            accounts: vec![
                seed(
                    "Jonas Schmedtmann",
                    1111,
                    Decimal::new(12, 1),
                    ("EUR", "pt-PT"),
                    &[
                        (20000, 2, "2019-11-18T21:31:17.178Z"),
                        (45523, 2, "2019-12-23T07:42:02.383Z"),
                        (-3065, 1, "2020-01-28T09:15:04.904Z"),
                        (25000, 0, "2020-04-01T10:17:24.185Z"),
                        (-64221, 2, "2020-05-08T14:11:59.604Z"),
                        (-1339, 1, "2020-05-27T17:01:17.194Z"),
                        (7997, 2, "2020-11-21T23:36:17.929Z"),
                        (1300, 0, "2020-11-23T10:51:36.790Z"),
                    ],
                ),
                seed(
                    "Jessica Davis",
                    2222,
                    Decimal::new(15, 1),
                    ("USD", "en-US"),
                    &[
                        (5000, 0, "2019-11-01T13:15:33.035Z"),
                        (3400, 0, "2019-11-30T09:48:16.867Z"),
                        (-150, 0, "2019-12-25T06:04:23.907Z"),
                        (-790, 0, "2020-01-25T14:18:46.235Z"),
                        (-3210, 0, "2020-02-05T16:33:06.386Z"),
                        (-1000, 0, "2020-04-10T14:43:26.374Z"),
                        (8500, 0, "2020-06-25T18:49:59.371Z"),
                        (-30, 0, "2020-11-23T12:01:20.894Z"),
                    ],
                ),
            ],
        }
    }
}

/// Movements are `(mantissa, scale, date)`, so `(45523, 2, ..)` is 455.23
fn seed(
    owner: &str,
    pin: u32,
    interest_rate: Decimal,
    (currency, locale): (&str, &str),
    movements: &[(i64, u32, &str)],
) -> Seed {
    Seed {
        owner: owner.to_string(),
        pin: Pin::new(pin),
        interest_rate,
        currency: currency.to_string(),
        locale: locale.to_string(),
        movements: movements
            .iter()
            .map(|&(mantissa, scale, _)| Decimal::new(mantissa, scale))
            .collect(),
        movement_dates: movements
            .iter()
            .map(|&(_, _, date)| {
                date.parse::<DateTime<Utc>>()
                    .expect("demo movement dates are RFC 3339 literals")
            })
            .collect(),
    }
}

pub fn settings() -> Result<Settings, confy::ConfyError> {
    confy::load(BIN_NAME, "settings")
}

pub fn accounts() -> Result<Accounts, Error> {
    let file: AccountsFile = confy::load(BIN_NAME, "accounts")?;
    Ok(Accounts::from_seeds(file.accounts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_accounts() {
        let accounts = Accounts::from_seeds(AccountsFile::default().accounts).unwrap();

        let jonas = accounts.get("js").unwrap();
        assert_eq!(jonas.movements().len(), 8);
        assert_eq!(jonas.amounts().nth(1), Some(Decimal::new(45523, 2)));
        assert_eq!(
            jonas.dates().next().unwrap().to_rfc3339(),
            "2019-11-18T21:31:17.178+00:00"
        );
        assert_eq!(accounts.get("jd").unwrap().currency(), "USD");
    }

    #[test]
    fn demo_dates_all_parse() {
        let epoch = DateTime::<Utc>::default();
        for seed in AccountsFile::default().accounts {
            assert!(seed.movement_dates.iter().all(|date| *date > epoch));
        }
    }

    #[test]
    #[should_panic(expected = "RFC 3339")]
    fn malformed_demo_date_fails_loudly() {
        seed(
            "Jonas Schmedtmann",
            1111,
            Decimal::ONE,
            ("EUR", "pt-PT"),
            &[(1, 0, "2019-13-45")],
        );
    }

    #[test]
    fn deserialise_yaml() {
        let raw = r#"
        accounts:
          - owner: Steven Thomas Williams
            pin: 3333
            interest_rate: 0.7
            currency: GBP
            locale: en-GB
            movements: [200, -200, 340]
            movement_dates:
              - 2020-01-01T10:00:00Z
              - 2020-01-02T10:00:00Z
              - 2020-01-03T10:00:00Z
        "#;

        let file: AccountsFile = serde_yaml::from_str(raw).unwrap();
        let accounts = Accounts::from_seeds(file.accounts).unwrap();

        assert_eq!(accounts.get("stw").unwrap().owner(), "Steven Thomas Williams");
    }
}
