//! Shared-password gate in front of moderation.
//!
//! One password unlocks every moderation action for whoever types it. There
//! are no per-operator credentials and no audit trail beyond the logs; a
//! deployment that needs real access control should put one in front.

use super::WallError;
use crate::config::AdminConfig;
use tracing::warn;

#[derive(Clone, Default)]
pub struct AdminGate {
    password: Option<String>,
}

impl AdminGate {
    #[must_use]
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|p| !p.is_empty()),
        }
    }

    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.password.clone())
    }

    /// Compare an entered password against the configured one.
    pub fn check(&self, attempt: &str) -> Result<(), WallError> {
        match &self.password {
            None => Err(WallError::AdminDisabled),
            Some(password) if password == attempt => Ok(()),
            Some(_) => {
                warn!("Rejected moderation attempt with an incorrect password");
                Err(WallError::Unauthorized)
            }
        }
    }
}
