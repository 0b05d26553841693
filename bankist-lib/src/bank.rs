//! The user-facing operations of the bank

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{instrument, Level};

use crate::{
    account::{Account, Handle, Pin},
    accounts::Accounts,
    clock::{Clock, SystemClock},
    ledger::{self, Order},
    loan::{self, PendingLoan, PendingLoans},
    session::{Countdown, Session, Tick, TimerId},
    view::{Format, View},
};

/// Tunable behaviour of the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Seconds of inactivity before a session is logged out
    pub timeout_secs: u32,

    /// How long an approved loan takes to arrive, in milliseconds
    pub loan_delay_ms: u32,

    /// The fraction of a loan that some existing movement must cover
    pub loan_deposit_ratio: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            loan_delay_ms: 1500,
            loan_deposit_ratio: Decimal::new(1, 1),
        }
    }
}

impl Settings {
    fn loan_delay(&self) -> Duration {
        Duration::milliseconds(i64::from(self.loan_delay_ms))
    }
}

/// Why a transfer was refused
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum TransferRejection {
    /// Only positive amounts can be sent
    #[error("amount must be positive")]
    NonPositiveAmount,

    /// The sender's balance is lower than the amount
    #[error("insufficient funds")]
    InsufficientFunds,

    /// No active account has the receiving handle
    #[error("unknown receiver")]
    UnknownReceiver,

    /// Sender and receiver are the same account
    #[error("cannot transfer to your own account")]
    SelfTransfer,
}

/// Rejected user actions.
///
/// These are expected outcomes of normal use. None of them change any
/// account.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The handle and PIN do not match an account (or the current account,
    /// when closing)
    #[error("wrong username and/or PIN")]
    InvalidCredentials,

    /// A transfer precondition failed
    #[error("transfer not approved: {0}")]
    TransferRejected(#[from] TransferRejection),

    /// The account has no movement large enough to back the loan
    #[error("loan not approved")]
    LoanRejected,

    /// The action needs a logged-in account
    #[error("no active session")]
    NoActiveSession,
}

/// The bank: all accounts, the login session and loans in flight.
///
/// Every method runs to completion and leaves the accounts consistent. Time
/// only moves through the injected [`Clock`] and through
/// [`tick`](Bank::tick), so the whole bank can be driven deterministically.
#[derive(Debug)]
pub struct Bank<C = SystemClock> {
    accounts: Accounts,
    session: Session,
    loans: PendingLoans,
    settings: Settings,
    clock: C,
}

impl<C: Clock> Bank<C> {
    /// Open the bank for business
    pub fn new(accounts: Accounts, settings: Settings, clock: C) -> Self {
        Self {
            accounts,
            session: Session::new(settings.timeout_secs),
            loans: PendingLoans::default(),
            settings,
            clock,
        }
    }

    /// The active accounts
    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// The login session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The logged-in account
    pub fn current(&self) -> Option<&Account> {
        self.session
            .current()
            .and_then(|handle| self.accounts.get(handle.as_str()))
    }

    /// The id of the running countdown. Changes whenever the countdown is
    /// restarted.
    pub fn timer(&self) -> Option<TimerId> {
        self.session.countdown().map(|countdown| countdown.id())
    }

    /// The time according to the bank's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// When the next approved loan will be paid out
    pub fn next_loan_due(&self) -> Option<DateTime<Utc>> {
        self.loans.next_due()
    }

    /// Log in, replacing any current session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if no account has this handle or
    /// the PIN is wrong. The current session, if any, is left as it was.
    #[instrument(skip(self, pin))]
    pub fn login(&mut self, handle: &str, pin: Pin) -> Result<Countdown, Error> {
        let account = self
            .accounts
            .get(handle)
            .filter(|account| account.verify(pin))
            .ok_or(Error::InvalidCredentials)?;

        let countdown = self.session.start(account.handle().clone());
        tracing::event!(Level::INFO, owner = account.owner(), "logged in");

        Ok(countdown)
    }

    /// Send money from the logged-in account to another account.
    ///
    /// Successful or not, the attempt counts as activity and restarts the
    /// countdown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveSession`] when logged out and
    /// [`Error::TransferRejected`] when a precondition fails.
    #[instrument(skip(self))]
    pub fn transfer(&mut self, to: &str, amount: Decimal) -> Result<(), Error> {
        let sender = self.session.current().cloned().ok_or(Error::NoActiveSession)?;

        let result = self.try_transfer(&sender, to, amount);
        self.session.touch();

        match &result {
            Ok(()) => tracing::event!(Level::INFO, "transfer complete"),
            Err(e) => tracing::event!(Level::WARN, %e, "transfer rejected"),
        }

        result
    }

    fn try_transfer(&mut self, sender: &Handle, to: &str, amount: Decimal) -> Result<(), Error> {
        if amount <= Decimal::ZERO {
            return Err(TransferRejection::NonPositiveAmount.into());
        }

        let balance = self
            .accounts
            .get(sender.as_str())
            .map(ledger::balance)
            .ok_or(Error::NoActiveSession)?;
        if balance < amount {
            return Err(TransferRejection::InsufficientFunds.into());
        }

        let receiver = self
            .accounts
            .get(to)
            .ok_or(TransferRejection::UnknownReceiver)?;
        if receiver.handle() == sender {
            return Err(TransferRejection::SelfTransfer.into());
        }

        // both accounts are known to exist at this point
        if let Some(account) = self.accounts.get_mut(sender.as_str()) {
            account.push(-amount, self.clock.now());
        }
        if let Some(account) = self.accounts.get_mut(to) {
            account.push(amount, self.clock.now());
        }

        Ok(())
    }

    /// Ask for a loan for the logged-in account. The amount is rounded down to
    /// a whole number.
    ///
    /// An approved loan is paid out once its delay has passed, by
    /// [`complete_due_loans`](Bank::complete_due_loans). Successful or not,
    /// the request counts as activity and restarts the countdown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveSession`] when logged out and
    /// [`Error::LoanRejected`] if no movement covers the required share of
    /// the loan.
    #[instrument(skip(self))]
    pub fn request_loan(&mut self, amount: Decimal) -> Result<PendingLoan, Error> {
        let account = self.current().ok_or(Error::NoActiveSession)?;
        let amount = amount.floor();

        let result = if loan::eligible(account, amount, self.settings.loan_deposit_ratio) {
            let loan = PendingLoan {
                handle: account.handle().clone(),
                amount,
                due: self.clock.now() + self.settings.loan_delay(),
            };
            self.loans.push(loan.clone());
            tracing::event!(Level::INFO, %amount, due = %loan.due, "loan approved");
            Ok(loan)
        } else {
            tracing::event!(Level::WARN, %amount, "loan rejected");
            Err(Error::LoanRejected)
        };

        self.session.touch();
        result
    }

    /// Pay out every approved loan whose delay has passed.
    ///
    /// A loan is paid into the account that requested it, even if that
    /// account is no longer logged in. Loans for closed accounts are dropped.
    /// Paying the logged-in account restarts its countdown.
    pub fn complete_due_loans(&mut self) -> Vec<PendingLoan> {
        let now = self.clock.now();
        let mut completed = Vec::new();

        for loan in self.loans.take_due(now) {
            match self.accounts.get_mut(loan.handle.as_str()) {
                Some(account) => {
                    account.push(loan.amount, now);
                    if self.session.current() == Some(&loan.handle) {
                        self.session.touch();
                    }
                    tracing::event!(Level::INFO, handle = %loan.handle, amount = %loan.amount, "loan paid out");
                    completed.push(loan);
                }
                None => {
                    tracing::event!(Level::WARN, handle = %loan.handle, "account closed before loan was paid out");
                }
            }
        }

        completed
    }

    /// Close the logged-in account and log out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveSession`] when logged out and
    /// [`Error::InvalidCredentials`] unless the handle and PIN match the
    /// logged-in account.
    #[instrument(skip(self, pin))]
    pub fn close_account(&mut self, handle: &str, pin: Pin) -> Result<Account, Error> {
        let account = self.current().ok_or(Error::NoActiveSession)?;
        if account.handle().as_str() != handle || !account.verify(pin) {
            tracing::event!(Level::WARN, "close rejected");
            return Err(Error::InvalidCredentials);
        }

        let handle = self.session.end().ok_or(Error::NoActiveSession)?;
        let account = self
            .accounts
            .remove(handle.as_str())
            .ok_or(Error::NoActiveSession)?;
        tracing::event!(Level::INFO, owner = account.owner(), "account closed");

        Ok(account)
    }

    /// Switch between chronological and by-amount display order
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveSession`] when logged out.
    pub fn toggle_sort(&mut self) -> Result<Order, Error> {
        self.session.toggle_order().ok_or(Error::NoActiveSession)
    }

    /// Deliver a one-second tick to the countdown identified by `timer`
    pub fn tick(&mut self, timer: TimerId) -> Tick {
        let tick = self.session.tick(timer);
        if let Tick::Expired(_) = tick {
            tracing::event!(Level::INFO, "session expired, logged out");
        }
        tick
    }

    /// Compute what the render surface should show right now
    pub fn view<F: Format>(&self, format: &F) -> View {
        match (self.current(), self.session.countdown()) {
            (Some(account), Some(countdown)) => View::of(
                account,
                countdown,
                self.session.order(),
                self.clock.now(),
                format,
            ),
            _ => View::logged_out(),
        }
    }
}
