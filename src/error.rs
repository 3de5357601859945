//! Error types returned by the batching pipeline.

use thiserror::Error;

/// Failures of the secp256k1 key and signature helpers
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("signing failed")]
    SigningFailed,
}

/// Failures of a single `Batcher::batch` call
///
/// Every variant is terminal for the call; no partial batch is produced.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The server was started without a signing key
    #[error("Server has no signing key, and cannot batch transactions")]
    Config,
    /// The transaction list or one of its headers could not be decoded
    #[error("Malformed transaction list: {0}")]
    Decode(#[from] prost::DecodeError),
    /// A transaction names a different batcher than this server
    #[error("Transactions must use batcher public key: {expected}")]
    InvalidRequest { expected: String },
    /// A transaction was signed by someone other than the caller
    #[error("Authorized user must match the signing key")]
    Unauthorized,
    #[error("Failed to sign batch: {0}")]
    Signing(#[from] SigningError),
}
