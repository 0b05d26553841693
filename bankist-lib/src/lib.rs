//! Core of a demo personal-banking app: accounts, the derived ledger view and
//! the idle-timeout login session

#![deny(clippy::all, missing_debug_implementations, missing_docs)]
#![warn(clippy::pedantic, missing_copy_implementations)]

pub mod account;
pub use account::{Account, Handle, Kind, Movement, Pin};
pub mod accounts;
#[doc(inline)]
pub use accounts::Accounts;
pub mod bank;
#[doc(inline)]
pub use bank::{Bank, Error, Settings, TransferRejection};
pub mod clock;
pub use clock::{Clock, ManualClock, SystemClock};
pub mod ledger;
pub use ledger::{Order, Summary};
mod loan;
pub use loan::PendingLoan;
pub mod session;
pub use session::{Countdown, Session, Tick, TimerId};
pub mod view;
pub use view::{Format, Render, Row, View};
