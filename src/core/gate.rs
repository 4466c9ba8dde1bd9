//! Shared-password gate in front of every mutating command.

use crate::config::Config;
use crate::errors::{AppError, AppResult};

pub struct AccessGate<'a> {
    expected: Option<&'a str>,
}

impl<'a> AccessGate<'a> {
    pub fn new(expected: Option<&'a str>) -> Self {
        // An empty password in the config counts as "no password".
        Self {
            expected: expected.filter(|p| !p.is_empty()),
        }
    }

    pub fn from_config(cfg: &'a Config) -> Self {
        Self::new(cfg.shared_password.as_deref())
    }

    pub fn is_open(&self) -> bool {
        self.expected.is_none()
    }

    /// Allow `action` only when the gate is open or `provided` matches.
    pub fn check(&self, provided: Option<&str>, action: &str) -> AppResult<()> {
        let Some(expected) = self.expected else {
            return Ok(());
        };

        match provided {
            Some(given) if same_secret(given, expected) => Ok(()),
            Some(_) => {
                tracing::warn!(action, "rejected: wrong shared password");
                Err(AppError::AccessDenied(format!(
                    "wrong password for '{action}'"
                )))
            }
            None => Err(AppError::AccessDenied(format!(
                "'{action}' requires the shared password (--password or TEAMLEDGER_PASSWORD)"
            ))),
        }
    }
}

/// Comparison whose duration does not depend on where the inputs differ.
fn same_secret(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
