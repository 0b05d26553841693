//! The ledger view engine.
//!
//! Everything here is derived from an account's movements on demand. Nothing
//! is cached, so a view can never drift from the movements it describes.

use std::{borrow::Cow, fmt};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::account::{Account, Movement};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// The account balance: the sum of all movements
#[must_use]
pub fn balance(account: &Account) -> Decimal {
    account.amounts().sum()
}

/// The sum of all inflows
#[must_use]
pub fn total_in(account: &Account) -> Decimal {
    account.amounts().filter(|amount| *amount > Decimal::ZERO).sum()
}

/// The magnitude of the sum of all outflows
#[must_use]
pub fn total_out(account: &Account) -> Decimal {
    account
        .amounts()
        .filter(|amount| *amount < Decimal::ZERO)
        .sum::<Decimal>()
        .abs()
}

/// Interest earned on deposits.
///
/// Each deposit earns `amount * rate / 100`, but only contributions of at
/// least one unit are paid out; smaller ones count as zero.
#[must_use]
pub fn interest(account: &Account) -> Decimal {
    let rate = account.interest_rate();
    account
        .amounts()
        .filter(|amount| *amount > Decimal::ZERO)
        .map(|deposit| deposit * rate / Decimal::ONE_HUNDRED)
        .map(|interest| {
            if interest >= Decimal::ONE {
                interest
            } else {
                Decimal::ZERO
            }
        })
        .sum()
}

/// Balance, totals and interest of an account at a point in time
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// see [`balance`]
    pub balance: Decimal,

    /// see [`total_in`]
    pub total_in: Decimal,

    /// see [`total_out`]
    pub total_out: Decimal,

    /// see [`interest`]
    pub interest: Decimal,
}

impl Summary {
    /// Compute the summary of an account
    #[must_use]
    pub fn of(account: &Account) -> Self {
        Self {
            balance: balance(account),
            total_in: total_in(account),
            total_out: total_out(account),
            interest: interest(account),
        }
    }
}

/// The order movements are displayed in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// The order the movements were booked in
    #[default]
    Chronological,

    /// Ascending by amount
    ByAmount,
}

impl Order {
    /// The other order
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Chronological => Self::ByAmount,
            Self::ByAmount => Self::Chronological,
        }
    }
}

/// The movements of an account in display order.
///
/// Sorting works on a copy; the account itself is never reordered. Equal
/// amounts keep their booking order.
#[must_use]
pub fn ordered_movements(account: &Account, order: Order) -> Cow<'_, [Movement]> {
    match order {
        Order::Chronological => Cow::Borrowed(account.movements()),
        Order::ByAmount => {
            let mut movements = account.movements().to_vec();
            movements.sort_by(|a, b| a.amount.cmp(&b.amount));
            Cow::Owned(movements)
        }
    }
}

/// How long ago a movement happened, as shown next to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLabel {
    /// Less than half a day either side of now
    Today,

    /// About one day away
    Yesterday,

    /// Between two and seven days away
    DaysAgo(i64),

    /// Further away than a week. Rendered as an absolute date.
    Date(DateTime<Utc>),
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("Today"),
            Self::Yesterday => f.write_str("Yesterday"),
            Self::DaysAgo(days) => write!(f, "{} days ago", days),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Label a movement date relative to `now`.
///
/// The distance is measured in whole days rounded to the nearest day, in
/// either direction.
#[must_use]
pub fn relative_date_label(date: DateTime<Utc>, now: DateTime<Utc>) -> DateLabel {
    match days_between(date, now) {
        0 => DateLabel::Today,
        1 => DateLabel::Yesterday,
        days @ 2..=7 => DateLabel::DaysAgo(days),
        _ => DateLabel::Date(date),
    }
}

fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let millis = (b - a).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY / 2) / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    use super::*;
    use crate::account::Pin;

    fn account(rate: Decimal, amounts: &[Decimal]) -> Account {
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
        Account::new("Jonas Schmedtmann", Pin::new(1111), rate).with_movements(
            amounts
                .iter()
                .map(|&amount| Movement { amount, date }),
        )
    }

    #[test]
    fn summary() {
        let account = account(
            dec!(1.2),
            &[
                dec!(200),
                dec!(455.23),
                dec!(-306.5),
                dec!(25000),
                dec!(-642.21),
                dec!(-133.9),
                dec!(79.97),
                dec!(1300),
            ],
        );

        let summary = Summary::of(&account);

        assert_eq!(summary.balance, dec!(25952.59));
        assert_eq!(summary.total_in, dec!(27035.20));
        assert_eq!(summary.total_out, dec!(1082.61));
        // 200 -> 2.4, 455.23 -> 5.46276, 25000 -> 300, 79.97 -> 0.95964 (dropped), 1300 -> 15.6
        assert_eq!(summary.interest, dec!(323.46276));
    }

    #[test]
    fn small_interest_contributions_are_dropped() {
        let account = account(dec!(1.2), &[dec!(1000), dec!(1.2)]);
        assert_eq!(interest(&account), dec!(12));
    }

    #[test_case(&[] ; "no movements")]
    #[test_case(&[dec!(-20), dec!(-5)] ; "only withdrawals")]
    fn empty_reductions_are_zero(amounts: &[Decimal]) {
        let account = account(dec!(1.5), amounts);
        assert_eq!(total_in(&account), Decimal::ZERO);
        assert_eq!(interest(&account), Decimal::ZERO);
        assert_eq!(balance(&account), -total_out(&account));
    }

    #[test]
    fn sorting_leaves_the_account_untouched() {
        let account = account(dec!(1.2), &[dec!(200), dec!(-306.5), dec!(79.97)]);

        let sorted: Vec<_> = ordered_movements(&account, Order::ByAmount)
            .iter()
            .map(|m| m.amount)
            .collect();
        let chronological: Vec<_> = ordered_movements(&account, Order::Chronological)
            .iter()
            .map(|m| m.amount)
            .collect();

        assert_eq!(sorted, vec![dec!(-306.5), dec!(79.97), dec!(200)]);
        assert_eq!(chronological, vec![dec!(200), dec!(-306.5), dec!(79.97)]);
        assert_eq!(account.amounts().collect::<Vec<_>>(), chronological);
    }

    #[test]
    fn sorted_rows_keep_their_dates() {
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
        let account = Account::new("Jonas Schmedtmann", Pin::new(1111), dec!(1.2)).with_movements([
            Movement {
                amount: dec!(500),
                date: earlier,
            },
            Movement {
                amount: dec!(-50),
                date: later,
            },
        ]);

        let sorted = ordered_movements(&account, Order::ByAmount);

        assert_eq!(sorted[0].date, later);
        assert_eq!(sorted[1].date, earlier);
    }

    #[test]
    fn order_toggles() {
        assert_eq!(Order::default().toggled(), Order::ByAmount);
        assert_eq!(Order::ByAmount.toggled(), Order::Chronological);
    }

    #[test_case(Duration::hours(0) => DateLabel::Today ; "same moment")]
    #[test_case(Duration::hours(11) => DateLabel::Today ; "under half a day")]
    #[test_case(Duration::hours(12) => DateLabel::Yesterday ; "half a day rounds up")]
    #[test_case(Duration::hours(36) => DateLabel::DaysAgo(2) ; "a day and a half")]
    #[test_case(Duration::days(7) => DateLabel::DaysAgo(7) ; "a week")]
    #[test_case(Duration::hours(-30) => DateLabel::Yesterday ; "future dates count too")]
    fn relative_labels(ago: Duration) -> DateLabel {
        let now = Utc.with_ymd_and_hms(2020, 11, 23, 10, 0, 0).unwrap();
        relative_date_label(now - ago, now)
    }

    #[test]
    fn old_dates_are_absolute() {
        let now = Utc.with_ymd_and_hms(2020, 11, 23, 10, 0, 0).unwrap();
        let date = now - Duration::days(8);

        let label = relative_date_label(date, now);

        assert_eq!(label, DateLabel::Date(date));
        assert_eq!(label.to_string(), "2020-11-15");
        assert_eq!(DateLabel::DaysAgo(3).to_string(), "3 days ago");
    }

    proptest! {
        #[test]
        fn inflow_minus_outflow_is_balance(
            cents in prop::collection::vec(-10_000_000i64..10_000_000i64, 0..32)
        ) {
            let amounts: Vec<_> = cents.into_iter().map(|c| Decimal::new(c, 2)).collect();
            let account = account(dec!(1.2), &amounts);

            prop_assert_eq!(total_in(&account) - total_out(&account), balance(&account));
            prop_assert!(interest(&account) >= Decimal::ZERO);
        }
    }
}
