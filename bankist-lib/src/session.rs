//! The login session and its idle-timeout countdown

use std::fmt;

use crate::{account::Handle, ledger::Order};

/// Identifies one countdown.
///
/// Every (re)started countdown gets a fresh id. A tick carrying an older id
/// belongs to a countdown that has been replaced and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// The idle-timeout countdown of a logged-in session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    id: TimerId,
    remaining: u32,
}

impl Countdown {
    /// The timer this countdown belongs to
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Seconds left before logout
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Displays as `MM:SS`
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// The result of delivering a tick to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown moved on by one second
    Running(Countdown),

    /// The countdown reached zero and the session was logged out. Carries the
    /// final `00:00` state.
    Expired(Countdown),

    /// The tick was for a countdown that no longer exists
    Ignored,
}

#[derive(Debug)]
enum State {
    LoggedOut,
    LoggedIn {
        handle: Handle,
        countdown: Countdown,
        order: Order,
    },
}

/// Tracks who is logged in and when they will be logged out.
///
/// There is a single countdown slot, so starting a countdown always cancels
/// the previous one.
#[derive(Debug)]
pub struct Session {
    state: State,
    timeout: u32,
    next_timer: u64,
}

impl Session {
    /// A logged-out session whose countdowns start at `timeout` seconds
    #[must_use]
    pub fn new(timeout: u32) -> Self {
        Self {
            state: State::LoggedOut,
            timeout,
            next_timer: 0,
        }
    }

    /// The handle of the logged-in account, if any
    #[must_use]
    pub fn current(&self) -> Option<&Handle> {
        match &self.state {
            State::LoggedOut => None,
            State::LoggedIn { handle, .. } => Some(handle),
        }
    }

    /// Whether an account is logged in
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }

    /// The active countdown, if any
    #[must_use]
    pub fn countdown(&self) -> Option<Countdown> {
        match &self.state {
            State::LoggedOut => None,
            State::LoggedIn { countdown, .. } => Some(*countdown),
        }
    }

    /// The display order chosen for this session
    #[must_use]
    pub fn order(&self) -> Order {
        match &self.state {
            State::LoggedOut => Order::default(),
            State::LoggedIn { order, .. } => *order,
        }
    }

    /// Log `handle` in, replacing any existing session
    pub(crate) fn start(&mut self, handle: Handle) -> Countdown {
        let countdown = self.new_countdown();
        self.state = State::LoggedIn {
            handle,
            countdown,
            order: Order::default(),
        };
        countdown
    }

    /// Restart the countdown after user activity. Does nothing when logged
    /// out.
    pub(crate) fn touch(&mut self) -> Option<Countdown> {
        let fresh = self.new_countdown();
        match &mut self.state {
            State::LoggedOut => None,
            State::LoggedIn { countdown, .. } => {
                *countdown = fresh;
                Some(fresh)
            }
        }
    }

    pub(crate) fn toggle_order(&mut self) -> Option<Order> {
        match &mut self.state {
            State::LoggedOut => None,
            State::LoggedIn { order, .. } => {
                *order = order.toggled();
                Some(*order)
            }
        }
    }

    /// Log out, returning the handle that was logged in
    pub(crate) fn end(&mut self) -> Option<Handle> {
        match std::mem::replace(&mut self.state, State::LoggedOut) {
            State::LoggedOut => None,
            State::LoggedIn { handle, .. } => Some(handle),
        }
    }

    /// Advance the countdown identified by `timer` by one second
    pub(crate) fn tick(&mut self, timer: TimerId) -> Tick {
        let countdown = match &mut self.state {
            State::LoggedIn { countdown, .. } if countdown.id == timer => countdown,
            _ => return Tick::Ignored,
        };

        countdown.remaining = countdown.remaining.saturating_sub(1);
        let countdown = *countdown;

        if countdown.remaining == 0 {
            self.end();
            Tick::Expired(countdown)
        } else {
            Tick::Running(countdown)
        }
    }

    fn new_countdown(&mut self) -> Countdown {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        Countdown {
            id,
            remaining: self.timeout,
        }
    }
}
