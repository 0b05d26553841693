use bankist_lib::Format;
use chrono::{DateTime, Locale, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{iso, Money};

/// Formats money with `rusty-money` and dates with chrono's locale tables.
///
/// `rusty-money` takes digit grouping from the currency itself, so the
/// locale only affects dates. Amounts always show the currency's minor units.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocaleFormat;

impl Format for LocaleFormat {
    fn money(&self, amount: Decimal, _locale: &str, currency: &str) -> String {
        match iso::find(currency) {
            Some(currency) => {
                let mut amount = amount.round_dp_with_strategy(
                    currency.exponent,
                    RoundingStrategy::MidpointAwayFromZero,
                );
                amount.rescale(currency.exponent);
                Money::from_decimal(amount, currency).to_string()
            }
            None => format!("{:.2} {}", amount, currency),
        }
    }

    fn date(&self, date: DateTime<Utc>, locale: &str) -> String {
        date.format_localized("%x", chrono_locale(locale))
            .to_string()
    }

    fn date_time(&self, date: DateTime<Utc>, locale: &str) -> String {
        date.format_localized("%x, %H:%M", chrono_locale(locale))
            .to_string()
    }
}

/// `en-US` -> `en_US`, falling back to POSIX for unknown locales
fn chrono_locale(locale: &str) -> Locale {
    Locale::try_from(locale.replace('-', "_").as_str()).unwrap_or(Locale::POSIX)
}
