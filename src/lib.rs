//! This crate implements a transaction batching service.
//! Clients submit lists of transactions they have already signed; the service checks
//! that each transaction was built for this batcher and signed by the caller, then
//! seals the list into a batch signed with the server's key.

pub mod types; // Protobuf wire messages for transactions and batches.
pub mod error; // Error types for signing and batching.
pub mod signing; // secp256k1 keys and signatures.
pub mod transaction; // Client-side transaction construction.
pub mod validation; // Per-transaction header checks.
pub mod batch; // Batch creation and the request-time batcher.
pub mod api; // HTTP endpoints.
pub mod config; // Defines and loads service configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use error::{BatchError, SigningError};
pub use batch::Batcher;
