//! OS keychain storage for imported key documents.

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "verbatimctl";

pub struct CredentialStore;

impl CredentialStore {
    /// Store a key document in the OS keychain, keyed by organization
    pub fn store(organization_id: &str, key_json: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, organization_id)
            .context("Failed to create keyring entry")?;
        entry
            .set_password(key_json)
            .context("Failed to store key in keychain")?;
        Ok(())
    }

    /// Retrieve the key document for an organization from the OS keychain
    pub fn get(organization_id: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, organization_id)
            .context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve key from keychain")
    }

    /// Delete the stored key document for an organization
    pub fn delete(organization_id: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, organization_id)
            .context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete key from keychain")?;
        Ok(())
    }

    /// Check if a key is stored for an organization
    pub fn has_key(organization_id: &str) -> bool {
        if let Ok(entry) = Entry::new(SERVICE_NAME, organization_id) {
            entry.get_password().is_ok()
        } else {
            false
        }
    }
}
