// Allow dead code: Infrastructure accessors for embedding
#![allow(dead_code)]

//! Session state derived from loaded key material.
//!
//! A `Session` is an explicit value owned by the caller rather than
//! process-wide state; exclusive access for `init` is enforced by the
//! borrow checker, so no locking is involved.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::key::KeyMaterial;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session has not been initialized")]
    NotInitialized,
}

#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub organization_id: String,
    pub key_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Session {
    data: Option<SessionData>,
}

impl Session {
    pub fn new() -> Self {
        Self { data: None }
    }

    /// Store the given key material as the active credential and
    /// derive the bearer token from it. Re-init replaces prior state.
    pub fn init(&mut self, key: KeyMaterial) {
        self.data = Some(SessionData {
            // The key secret is accepted directly as a bearer token;
            // there is no exchange endpoint.
            token: key.secret,
            organization_id: key.organization_id,
            key_id: key.key_id,
            created_at: Utc::now(),
        });
    }

    /// Get the bearer token for the active credential
    pub fn token(&self) -> Result<&str, SessionError> {
        self.data
            .as_ref()
            .map(|d| d.token.as_str())
            .ok_or(SessionError::NotInitialized)
    }

    /// Get the organization the active credential belongs to
    pub fn organization_id(&self) -> Result<&str, SessionError> {
        self.data
            .as_ref()
            .map(|d| d.organization_id.as_str())
            .ok_or(SessionError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&SessionData> {
        self.data.as_ref()
    }
}
