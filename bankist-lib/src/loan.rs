//! Loans waiting to be paid out, and the rule for approving them

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::account::{Account, Handle};

/// An approved loan waiting to be paid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoan {
    /// The account the loan was approved for
    pub handle: Handle,

    /// The whole amount to be paid out
    pub amount: Decimal,

    /// When the money arrives
    pub due: DateTime<Utc>,
}

/// A loan is granted if the account has at least one movement worth
/// `deposit_ratio` of it
pub(crate) fn eligible(account: &Account, amount: Decimal, deposit_ratio: Decimal) -> bool {
    let required = amount * deposit_ratio;
    amount > Decimal::ZERO && account.amounts().any(|movement| movement >= required)
}

/// Loans waiting for their due time, soonest first. Loans due at the same
/// time stay in the order they were approved.
#[derive(Debug, Default)]
pub(crate) struct PendingLoans {
    queue: VecDeque<PendingLoan>,
}

impl PendingLoans {
    pub fn push(&mut self, loan: PendingLoan) {
        let index = self.queue.partition_point(|queued| queued.due <= loan.due);
        self.queue.insert(index, loan);
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.queue.front().map(|loan| loan.due)
    }

    /// Remove and return every loan due at or before `now`
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<PendingLoan> {
        let count = self.queue.partition_point(|loan| loan.due <= now);
        self.queue.drain(..count).collect()
    }
}
