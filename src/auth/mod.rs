//! Authentication module for key material and session state.
//!
//! This module provides:
//! - `KeyLoader`/`KeyMaterial`: parsing of `key.json` documents
//! - `Session`: holder of the active credential and derived bearer token
//! - `CredentialStore`: OS-level key storage via keyring

pub mod credentials;
pub mod key;
pub mod session;

pub use credentials::CredentialStore;
pub use key::{KeyLoadError, KeyLoader, KeyMaterial};
pub use session::{Session, SessionError};
