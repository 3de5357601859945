use crate::{
    Transaction, TransactionHeader, TransactionList,
    error::SigningError,
    signing::Signer,
};
use prost::Message;
use rand::RngCore;
use sha2::{Digest, Sha512};

/// Builds and signs transactions for a single transaction family
///
/// Header fields shared by every transaction (family, batcher, inputs,
/// outputs, dependencies) are set once on the encoder; `create` fills in
/// the per-transaction nonce and payload hash.
#[derive(Debug, Clone)]
pub struct TransactionEncoder {
    signer: Signer,
    family_name: String,
    family_version: String,
    batcher_public_key: String,
    inputs: Vec<String>,
    outputs: Vec<String>,
    dependencies: Vec<String>,
}

impl TransactionEncoder {
    /// Creates an encoder whose transactions are batched by their own signer
    ///
    /// Call [`with_batcher`](Self::with_batcher) when a server batches them.
    pub fn new(signer: Signer, family_name: &str, family_version: &str) -> Self {
        let batcher_public_key = signer.public_key().to_string();
        Self {
            signer,
            family_name: family_name.to_string(),
            family_version: family_version.to_string(),
            batcher_public_key,
            inputs: Vec::new(),
            outputs: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_batcher(mut self, batcher_public_key: &str) -> Self {
        self.batcher_public_key = batcher_public_key.to_string();
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<String>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<String>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn signer_public_key(&self) -> &str {
        self.signer.public_key()
    }

    /// Build the header for `payload` with a fresh random nonce
    pub fn header_for(&self, payload: &[u8]) -> TransactionHeader {
        let mut nonce = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut nonce);

        TransactionHeader {
            batcher_public_key: self.batcher_public_key.clone(),
            dependencies: self.dependencies.clone(),
            family_name: self.family_name.clone(),
            family_version: self.family_version.clone(),
            inputs: self.inputs.clone(),
            nonce: hex::encode(nonce),
            outputs: self.outputs.clone(),
            payload_sha512: hex::encode(Sha512::digest(payload)),
            signer_public_key: self.signer.public_key().to_string(),
        }
    }

    /// Create a signed transaction carrying `payload`
    pub fn create(&self, payload: Vec<u8>) -> Result<Transaction, SigningError> {
        let header = self.header_for(&payload);
        self.create_with_header(&header, payload)
    }

    /// Sign an explicit header; the caller is responsible for its contents
    pub fn create_with_header(
        &self,
        header: &TransactionHeader,
        payload: Vec<u8>,
    ) -> Result<Transaction, SigningError> {
        let header = header.encode_to_vec();
        let header_signature = self.signer.sign(&header)?;

        Ok(Transaction {
            header,
            header_signature,
            payload,
        })
    }

    /// Encode transactions into a `TransactionList` blob
    pub fn encode(transactions: Vec<Transaction>) -> Vec<u8> {
        TransactionList { transactions }.encode_to_vec()
    }
}
