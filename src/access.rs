use std::collections::HashSet;

use tracing::warn;

use crate::error::AccessError;

/// Exact-match gate over the configured access codes.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    codes: HashSet<String>,
}

impl AccessGate {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        AccessGate { codes }
    }

    pub fn check(&self, code: &str) -> Result<(), AccessError> {
        if self.codes.is_empty() {
            return Err(AccessError::NotConfigured);
        }
        if self.codes.contains(code.trim()) {
            Ok(())
        } else {
            warn!("rejected access code");
            Err(AccessError::Denied)
        }
    }
}
