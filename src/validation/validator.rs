use crate::{TransactionHeader, error::BatchError};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct Validator {
    batcher_public_key: String,
}

impl Validator {
    pub fn new(batcher_public_key: impl Into<String>) -> Self {
        Self {
            batcher_public_key: batcher_public_key.into(),
        }
    }

    /// Validate every header in order, stopping at the first failure
    pub fn validate_all(
        &self,
        headers: &[TransactionHeader],
        expected_signer: &str,
    ) -> Result<(), BatchError> {
        for (index, header) in headers.iter().enumerate() {
            if let Err(e) = self.validate(header, expected_signer) {
                warn!("Rejecting transaction {} of {}: {}", index, headers.len(), e);
                return Err(e);
            }
        }

        debug!("{} transaction headers validated", headers.len());
        Ok(())
    }

    /// Validate a single transaction header
    /// Returns Ok(()) if valid, the first failing check otherwise
    pub fn validate(
        &self,
        header: &TransactionHeader,
        expected_signer: &str,
    ) -> Result<(), BatchError> {
        // 1. Built for this batcher
        self.check_batcher(header)?;

        // 2. Signed by the caller
        self.check_signer(header, expected_signer)?;

        Ok(())
    }

    fn check_batcher(&self, header: &TransactionHeader) -> Result<(), BatchError> {
        if header.batcher_public_key != self.batcher_public_key {
            return Err(BatchError::InvalidRequest {
                expected: self.batcher_public_key.clone(),
            });
        }
        Ok(())
    }

    fn check_signer(
        &self,
        header: &TransactionHeader,
        expected_signer: &str,
    ) -> Result<(), BatchError> {
        if header.signer_public_key != expected_signer {
            return Err(BatchError::Unauthorized);
        }
        Ok(())
    }
}
