//! Waiter sessions
//!
//! PIN-based login for waiters and managers. PINs are stored as argon2
//! hashes. The ledger never reads the session itself: the current waiter
//! id is passed explicitly into every call that needs it, and
//! [`PosSession`] is the seam the presentation layer resolves it through.

use std::collections::HashMap;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use parking_lot::RwLock;
use shared::models::{Waiter, WaiterCreate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// Supplies the authenticated waiter identity, if any
pub trait PosSession {
    fn current_waiter(&self) -> Option<Uuid>;
}

/// Which login screen the PIN came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    Waiter,
    Manager,
}

/// Waiter store with PIN verification
#[derive(Debug, Default)]
pub struct WaiterDirectory {
    waiters: RwLock<HashMap<Uuid, Waiter>>,
}

impl WaiterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, payload: WaiterCreate) -> AppResult<Waiter> {
        let full_name = payload.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(AppError::validation("waiter name must not be empty"));
        }
        if payload.pin.trim().is_empty() {
            return Err(AppError::validation("PIN must not be empty"));
        }

        let waiter = Waiter {
            id: Uuid::new_v4(),
            full_name,
            pin_hash: hash_pin(&payload.pin)?,
            is_active: true,
            is_manager: payload.is_manager,
        };
        self.waiters.write().insert(waiter.id, waiter.clone());
        Ok(waiter)
    }

    pub fn get(&self, id: Uuid) -> Option<Waiter> {
        self.waiters.read().get(&id).cloned()
    }

    /// Verify a PIN against all active waiters.
    pub fn login_with_pin(&self, pin: &str) -> Option<Waiter> {
        let waiters = self.waiters.read();
        waiters
            .values()
            .filter(|w| w.is_active)
            .find(|w| verify_pin(&w.pin_hash, pin))
            .cloned()
    }

    /// Like [`login_with_pin`](Self::login_with_pin) but only managers
    /// qualify.
    pub fn login_manager_with_pin(&self, pin: &str) -> Option<Waiter> {
        self.login_with_pin(pin).filter(|w| w.is_manager)
    }
}

/// One terminal's authenticated state
#[derive(Debug, Clone, Default)]
pub struct Session {
    waiter: Option<Waiter>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolve a PIN into an authenticated session.
    pub fn login(directory: &WaiterDirectory, pin: &str, mode: LoginMode) -> AppResult<Self> {
        let waiter = match mode {
            LoginMode::Waiter => directory.login_with_pin(pin),
            LoginMode::Manager => directory.login_manager_with_pin(pin),
        };
        match waiter {
            Some(waiter) => {
                info!(waiter = %waiter.full_name, manager = waiter.is_manager, "Login");
                Ok(Self { waiter: Some(waiter) })
            }
            None => {
                warn!(mode = ?mode, "Login rejected: PIN did not match");
                Err(AppError::Unauthorized)
            }
        }
    }

    pub fn logout(&mut self) {
        self.waiter = None;
    }

    pub fn waiter(&self) -> Option<&Waiter> {
        self.waiter.as_ref()
    }

    pub fn is_manager(&self) -> bool {
        self.waiter.as_ref().is_some_and(|w| w.is_manager)
    }

    /// The waiter id required by ledger calls, or an authorization failure
    /// for the presentation layer to handle.
    pub fn require_waiter(&self) -> AppResult<Uuid> {
        self.current_waiter().ok_or(AppError::Unauthorized)
    }
}

impl PosSession for Session {
    fn current_waiter(&self) -> Option<Uuid> {
        self.waiter.as_ref().map(|w| w.id)
    }
}

fn hash_pin(pin: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("PIN hashing failed: {e}")))
}

fn verify_pin(hash: &str, pin: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(pin.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
