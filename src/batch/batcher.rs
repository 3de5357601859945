//! Batcher Module
//!
//! Connects decoding, header validation and batch signing.
//!
//! # Flow
//! 1. Fail fast if the server has no signing key
//! 2. Decode the `TransactionList` and every transaction header
//! 3. Validate each header (batcher key, then signer key)
//! 4. Seal the untouched transaction list via `BatchEncoder`

use crate::{
    Batch, TransactionHeader, TransactionList,
    batch::BatchEncoder,
    config::SigningConfig,
    error::{BatchError, SigningError},
    signing::Signer,
    validation::Validator,
};
use prost::Message;
use tracing::{debug, info, warn};

/// Lifecycle of the batcher, fixed at construction
#[derive(Debug)]
enum State {
    /// No key configured; every request fails
    Disabled,
    Active {
        encoder: BatchEncoder,
        validator: Validator,
    },
}

/// Turns caller-submitted transaction lists into signed batches
///
/// Immutable after construction, so a single instance can be shared
/// behind an `Arc` by concurrent requests.
#[derive(Debug)]
pub struct Batcher {
    state: State,
}

impl Batcher {
    /// Creates a batcher from an optional hex private key
    ///
    /// `None` or a blank key yields a disabled batcher. A key that is
    /// present but malformed is an error rather than a silent downgrade.
    pub fn new(private_key: Option<&str>) -> Result<Self, SigningError> {
        match private_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => Ok(Self::with_signer(Signer::from_hex(key)?)),
            None => Ok(Self::disabled()),
        }
    }

    /// Creates a batcher from the key named in the signing configuration
    pub fn from_config(config: &SigningConfig) -> Result<Self, SigningError> {
        match config.private_key() {
            Some(key) => Self::new(Some(&key)),
            None => {
                warn!(
                    "Use the \"{}\" environment variable to set a key.",
                    config.private_key_env
                );
                Ok(Self::disabled())
            }
        }
    }

    pub fn with_signer(signer: Signer) -> Self {
        let validator = Validator::new(signer.public_key());
        let encoder = BatchEncoder::new(signer);
        info!("Batcher active with public key {}", encoder.public_key());

        Self {
            state: State::Active { encoder, validator },
        }
    }

    pub fn disabled() -> Self {
        warn!("No signing key provided, server cannot submit transactions");
        Self {
            state: State::Disabled,
        }
    }

    /// Public key batches are signed with, `None` when disabled
    pub fn public_key(&self) -> Option<&str> {
        match &self.state {
            State::Active { encoder, .. } => Some(encoder.public_key()),
            State::Disabled => None,
        }
    }

    /// Batch an encoded transaction list on behalf of `expected_signer`
    ///
    /// Every transaction must name this server as batcher and
    /// `expected_signer` as signer. The first violation aborts the whole
    /// request; on success the batch holds exactly the submitted
    /// transactions in their original order.
    ///
    /// # Arguments
    /// * `txn_list` - Encoded `TransactionList`
    /// * `expected_signer` - Authenticated public key of the caller
    pub fn batch(&self, txn_list: &[u8], expected_signer: &str) -> Result<Batch, BatchError> {
        let (encoder, validator) = match &self.state {
            State::Active { encoder, validator } => (encoder, validator),
            State::Disabled => return Err(BatchError::Config),
        };

        let txns = TransactionList::decode(txn_list)?.transactions;
        let headers = txns
            .iter()
            .map(|txn| TransactionHeader::decode(txn.header.as_slice()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Decoded {} transactions for {}", txns.len(), expected_signer);

        validator.validate_all(&headers, expected_signer)?;

        let batch = encoder.create(txns)?;
        info!(
            "Batch {} created with {} transactions",
            batch.header_signature,
            batch.transactions.len()
        );
        Ok(batch)
    }
}
