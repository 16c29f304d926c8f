//!
//! # Service Layer
//!
//! Services compose the store, the credential hasher and the token service
//! into the register/login and task CRUD workflows. They speak a two-channel
//! error model: expected business outcomes (duplicate email, invalid
//! credentials, task not found or not owned) come back as typed values in
//! `Ok(...)`, while genuine infrastructure faults propagate as
//! `Err(AppError)` with operation context already logged.

pub mod tasks;
pub mod users;

use crate::error::AppError;

/// Wraps a store fault with the failing operation's context.
///
/// The detailed error is logged here; only the generic operation verb
/// travels upward, so the boundary can answer 500 without leaking internals.
pub(crate) fn store_fault(op: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        log::error!("database error while {}: {}", op, err);
        AppError::Database(op)
    }
}

/// True when the error is the store's unique-constraint violation signal.
///
/// Used to branch duplicate-email registration into a 409 without sniffing
/// error message text.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
