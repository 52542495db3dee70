//! Registered accounts, indexed by id and by email.
//!
//! Hashing and verification are CPU-bound; HTTP handlers call into this
//! module from `web::block`.

use bcrypt::{hash, verify};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{Result, ShortenerError};
use crate::models::user::Account;

#[derive(Debug)]
pub struct UserDirectory {
    accounts: DashMap<String, Account>,
    emails: DashMap<String, String>, // email -> account id
    cost: u32,
}

impl UserDirectory {
    pub fn new(cost: u32) -> Self {
        Self {
            accounts: DashMap::new(),
            emails: DashMap::new(),
            cost,
        }
    }

    /// Create an account and return its id. Emails match case-sensitively and
    /// the first registration wins.
    pub fn register(&self, email: &str, password: &str) -> Result<String> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ShortenerError::MissingField);
        }
        if self.emails.contains_key(email) {
            return Err(ShortenerError::EmailConflict);
        }

        let password_hash = hash(password, self.cost)?;
        let account = Account::new(email.to_string(), password_hash);

        match self.emails.entry(email.to_string()) {
            // Lost a race with a concurrent registration of the same email
            Entry::Occupied(_) => Err(ShortenerError::EmailConflict),
            Entry::Vacant(slot) => {
                let id = account.id.clone();
                self.accounts.insert(id.clone(), account);
                slot.insert(id.clone());
                log::info!("Registered account {}", id);
                Ok(id)
            }
        }
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let Some(id) = self.emails.get(email).map(|id| id.value().clone()) else {
            log::warn!("Login attempt for unknown email");
            return Err(ShortenerError::InvalidCredentials);
        };
        let Some(password_hash) = self
            .accounts
            .get(&id)
            .map(|account| account.password_hash.clone())
        else {
            return Err(ShortenerError::InvalidCredentials);
        };

        match verify(password, &password_hash) {
            Ok(true) => Ok(id),
            Ok(false) => {
                log::warn!("Wrong password for account {}", id);
                Err(ShortenerError::InvalidCredentials)
            }
            Err(e) => {
                log::warn!("Password verification failed for account {}: {}", id, e);
                Err(ShortenerError::InvalidCredentials)
            }
        }
    }

    pub fn is_authenticated(&self, account_id: &str) -> bool {
        self.accounts.contains_key(account_id)
    }

    pub fn find(&self, account_id: &str) -> Option<Account> {
        self.accounts.get(account_id).map(|account| account.value().clone())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
