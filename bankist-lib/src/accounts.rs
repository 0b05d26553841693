//! The registry of active accounts

use indexmap::IndexMap;

use crate::account::{Account, Handle, Seed, SeedError};

/// Errors that can occur when registering accounts
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Handles are login identifiers, so two active accounts may not share one
    #[error("an account with handle '{0}' is already registered")]
    DuplicateHandle(Handle),

    /// The account data could not be turned into an account
    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// The set of active accounts, keyed by [`Handle`] and kept in registration
/// order
#[derive(Debug, Default, Clone)]
pub struct Accounts {
    accounts: IndexMap<Handle, Account>,
}

impl Accounts {
    /// Build a registry from account seed data
    ///
    /// # Errors
    ///
    /// Fails if any seed is malformed or two owners derive the same handle.
    pub fn from_seeds(seeds: impl IntoIterator<Item = Seed>) -> Result<Self, Error> {
        let mut accounts = Self::default();
        for seed in seeds {
            accounts.insert(Account::try_from(seed)?)?;
        }
        Ok(accounts)
    }

    /// Register an account
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateHandle`] if the handle is already taken.
    pub fn insert(&mut self, account: Account) -> Result<(), Error> {
        let handle = account.handle().clone();
        if self.accounts.contains_key(&handle) {
            return Err(Error::DuplicateHandle(handle));
        }
        self.accounts.insert(handle, account);
        Ok(())
    }

    /// Look up an account by handle
    #[must_use]
    pub fn get(&self, handle: &str) -> Option<&Account> {
        self.accounts.get(handle)
    }

    pub(crate) fn get_mut(&mut self, handle: &str) -> Option<&mut Account> {
        self.accounts.get_mut(handle)
    }

    /// Closed accounts are gone for good
    pub(crate) fn remove(&mut self, handle: &str) -> Option<Account> {
        self.accounts.shift_remove(handle)
    }

    /// Number of active accounts
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Checks whether there are zero active accounts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over the active accounts in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}

impl<'a> IntoIterator for &'a Accounts {
    type Item = &'a Account;

    type IntoIter = indexmap::map::Values<'a, Handle, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.values()
    }
}
