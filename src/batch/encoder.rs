//! Batch Encoder Module
//!
//! This module is responsible for sealing transactions into signed batches.
//! The batch header lists the transactions' header signatures in order and is
//! signed with the batcher's key.

use crate::{
    Batch, BatchHeader, BatchList, Transaction,
    error::SigningError,
    signing::Signer,
};
use prost::Message;

/// Signs batches with a fixed batcher key
#[derive(Debug, Clone)]
pub struct BatchEncoder {
    signer: Signer,
}

impl BatchEncoder {
    pub fn new(signer: Signer) -> Self {
        Self { signer }
    }

    /// Public key batches are signed with
    pub fn public_key(&self) -> &str {
        self.signer.public_key()
    }

    /// Create a signed batch from transactions
    ///
    /// The transactions are carried over unchanged and in the given order.
    ///
    /// # Arguments
    /// * `transactions` - Ordered list of already-signed transactions
    pub fn create(&self, transactions: Vec<Transaction>) -> Result<Batch, SigningError> {
        let header = BatchHeader {
            signer_public_key: self.signer.public_key().to_string(),
            transaction_ids: transactions
                .iter()
                .map(|txn| txn.header_signature.clone())
                .collect(),
        }
        .encode_to_vec();

        let header_signature = self.signer.sign(&header)?;

        Ok(Batch {
            header,
            header_signature,
            transactions,
            trace: false,
        })
    }

    /// Encode batches into a `BatchList` blob ready for submission
    pub fn encode(batches: Vec<Batch>) -> Vec<u8> {
        BatchList { batches }.encode_to_vec()
    }
}
