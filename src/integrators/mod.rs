//! Integrators
pub mod plain;
pub mod scalar;

use crate::core::error::IntegrationError;
use log::{debug, error, warn};
use std::backtrace::Backtrace;
use std::fmt::Debug;

/// Log the outcome of a call to the public entry point `entry`. Failures are logged here, and only
/// here, so that every failure shows up exactly once.
fn log_outcome<T: Debug>(entry: &str, result: &Result<T, IntegrationError>) {
    match result {
        Ok(estimate) => debug!("{}: estimate {:?}", entry, estimate),
        Err(err @ IntegrationError::InternalFailure(_)) => {
            error!("{}: {}\n{}", entry, err, Backtrace::capture());
        }
        Err(err) => warn!("{}: {}", entry, err),
    }
}
