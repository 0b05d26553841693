//! The view model handed to the presentation layer

use std::io;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    account::{Account, Kind},
    ledger::{self, DateLabel, Order, Summary},
    session::Countdown,
};

/// Turns amounts and dates into display strings
pub trait Format {
    /// Format an amount of money in the given locale and ISO currency
    fn money(&self, amount: Decimal, locale: &str, currency: &str) -> String;

    /// Format a calendar date in the given locale
    fn date(&self, date: DateTime<Utc>, locale: &str) -> String;

    /// Format a date and time of day in the given locale
    fn date_time(&self, date: DateTime<Utc>, locale: &str) -> String;
}

/// A presentation surface
pub trait Render {
    /// Show a complete view
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying output.
    fn render(&mut self, view: &View) -> io::Result<()>;

    /// Show the countdown after a tick. Surfaces that redraw the whole view
    /// anyway can ignore this.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying output.
    fn countdown(&mut self, _countdown: Countdown) -> io::Result<()> {
        Ok(())
    }

    /// Tell the user an action was not carried out
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying output.
    fn alert(&mut self, message: &str) -> io::Result<()>;
}

/// One movement as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the displayed order
    pub number: usize,

    /// Deposit or withdrawal
    pub kind: Kind,

    /// Relative or absolute date
    pub date: String,

    /// Formatted amount
    pub amount: String,
}

/// Everything the presentation layer shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Whether the account area is shown at all
    pub visible: bool,

    /// The greeting line
    pub welcome: String,

    /// The current date and time, next to the balance
    pub date: String,

    /// Movements in display order, oldest (or smallest) first
    pub rows: Vec<Row>,

    /// Formatted balance
    pub balance: String,

    /// Formatted sum of deposits
    pub total_in: String,

    /// Formatted sum of withdrawals
    pub total_out: String,

    /// Formatted interest
    pub interest: String,

    /// Time left before logout, as `MM:SS`
    pub timer: String,

    /// The order the rows are in
    pub order: Order,
}

impl View {
    /// The view shown when nobody is logged in
    #[must_use]
    pub fn logged_out() -> Self {
        Self {
            visible: false,
            welcome: "Log in to get started".to_string(),
            date: String::new(),
            rows: Vec::new(),
            balance: String::new(),
            total_in: String::new(),
            total_out: String::new(),
            interest: String::new(),
            timer: "00:00".to_string(),
            order: Order::default(),
        }
    }

    /// The view of a logged-in account
    pub fn of<F: Format>(
        account: &Account,
        countdown: Countdown,
        order: Order,
        now: DateTime<Utc>,
        format: &F,
    ) -> Self {
        let locale = account.locale();
        let money = |amount| format.money(amount, locale, account.currency());

        let rows = ledger::ordered_movements(account, order)
            .iter()
            .enumerate()
            .map(|(index, movement)| Row {
                number: index + 1,
                kind: movement.kind(),
                date: match ledger::relative_date_label(movement.date, now) {
                    DateLabel::Date(date) => format.date(date, locale),
                    label => label.to_string(),
                },
                amount: money(movement.amount),
            })
            .collect();

        let summary = Summary::of(account);

        Self {
            visible: true,
            welcome: format!("Hello, {}", account.first_name()),
            date: format.date_time(now, locale),
            rows,
            balance: money(summary.balance),
            total_in: money(summary.total_in),
            total_out: money(summary.total_out),
            interest: money(summary.interest),
            timer: countdown.to_string(),
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        account::{Movement, Pin},
        accounts::Accounts,
        bank::{Bank, Settings},
        clock::ManualClock,
    };

    struct Plain;

    impl Format for Plain {
        fn money(&self, amount: Decimal, _locale: &str, currency: &str) -> String {
            format!("{:.2} {}", amount, currency)
        }

        fn date(&self, date: DateTime<Utc>, locale: &str) -> String {
            format!("{} ({})", date.format("%d/%m/%Y"), locale)
        }

        fn date_time(&self, date: DateTime<Utc>, _locale: &str) -> String {
            date.format("%d/%m/%Y, %H:%M").to_string()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 11, 23, 10, 0, 0).unwrap()
    }

    fn bank() -> Bank<ManualClock> {
        let account = Account::new("Jessica Davis", Pin::new(2222), dec!(1.5))
            .with_currency("USD", "en-US")
            .with_movements([
                Movement {
                    amount: dec!(5000),
                    date: now() - Duration::days(20),
                },
                Movement {
                    amount: dec!(-150),
                    date: now() - Duration::days(3),
                },
                Movement {
                    amount: dec!(-30),
                    date: now() - Duration::hours(2),
                },
            ]);
        let mut accounts = Accounts::default();
        accounts.insert(account).unwrap();
        Bank::new(accounts, Settings::default(), ManualClock::new(now()))
    }

    #[test]
    fn logged_out() {
        let view = bank().view(&Plain);

        assert!(!view.visible);
        assert_eq!(view.welcome, "Log in to get started");
        assert!(view.rows.is_empty());
    }

    #[test]
    fn logged_in() {
        let mut bank = bank();
        bank.login("jd", Pin::new(2222)).unwrap();

        let view = bank.view(&Plain);

        assert!(view.visible);
        assert_eq!(view.welcome, "Hello, Jessica");
        assert_eq!(view.date, "23/11/2020, 10:00");
        assert_eq!(view.balance, "4820.00 USD");
        assert_eq!(view.total_in, "5000.00 USD");
        assert_eq!(view.total_out, "180.00 USD");
        assert_eq!(view.interest, "75.00 USD");
        assert_eq!(view.timer, "05:00");
        assert_eq!(
            view.rows,
            vec![
                Row {
                    number: 1,
                    kind: Kind::Deposit,
                    date: "03/11/2020 (en-US)".to_string(),
                    amount: "5000.00 USD".to_string(),
                },
                Row {
                    number: 2,
                    kind: Kind::Withdrawal,
                    date: "3 days ago".to_string(),
                    amount: "-150.00 USD".to_string(),
                },
                Row {
                    number: 3,
                    kind: Kind::Withdrawal,
                    date: "Today".to_string(),
                    amount: "-30.00 USD".to_string(),
                },
            ]
        );
    }

    #[test]
    fn sorted() {
        let mut bank = bank();
        bank.login("jd", Pin::new(2222)).unwrap();
        bank.toggle_sort().unwrap();

        let view = bank.view(&Plain);

        let amounts: Vec<_> = view.rows.iter().map(|row| row.amount.as_str()).collect();
        assert_eq!(amounts, vec!["-150.00 USD", "-30.00 USD", "5000.00 USD"]);
        assert_eq!(view.rows[0].date, "3 days ago");
        assert_eq!(view.order, Order::ByAmount);
    }
}
