//! Loading of API key material from a local `key.json` document.
//!
//! Keys are issued by the Verbatim console (Console > Keys) and
//! downloaded as a small JSON document. The document is parsed into
//! `KeyMaterial` once at startup and never written back.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyLoadError {
    #[error("failed to read key file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed key document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("key document has an empty {0} field")]
    EmptyField(&'static str),
}

/// Credential record loaded from a key document.
/// The secret doubles as the bearer token; the service does not
/// require a separate token-exchange call.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyMaterial {
    #[serde(rename = "organizationId")]
    pub organization_id: String,

    pub secret: String,

    #[serde(rename = "keyId", default)]
    pub key_id: Option<String>,

    /// Stamped by the console when the key was issued.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl KeyMaterial {
    /// A loaded key must carry a usable identity and secret, even if
    /// the document was syntactically valid.
    fn validate(self) -> Result<Self, KeyLoadError> {
        if self.organization_id.is_empty() {
            return Err(KeyLoadError::EmptyField("organizationId"));
        }
        if self.secret.is_empty() {
            return Err(KeyLoadError::EmptyField("secret"));
        }
        Ok(self)
    }
}

pub struct KeyLoader;

impl KeyLoader {
    /// Load key material from a file on disk
    pub fn from_path(path: &Path) -> Result<KeyMaterial, KeyLoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load key material from a readable byte stream
    pub fn from_reader(mut reader: impl Read) -> Result<KeyMaterial, KeyLoadError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }

    /// Parse key material from a JSON string
    pub fn from_json(contents: &str) -> Result<KeyMaterial, KeyLoadError> {
        let key: KeyMaterial = serde_json::from_str(contents)?;
        key.validate()
    }
}
