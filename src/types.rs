//! Wire Types Module
//!
//! Protobuf messages exchanged with clients and the validator network.
//! Field tags follow the Sawtooth `transaction.proto` and `batch.proto`
//! definitions so encoded bytes are interchangeable with other SDKs.

/// Header of a single transaction, signed by the transaction's author
#[derive(Clone, PartialEq, prost::Message)]
pub struct TransactionHeader {
    /// Public key of the party allowed to batch this transaction
    #[prost(string, tag = "1")]
    pub batcher_public_key: String,
    #[prost(string, repeated, tag = "2")]
    pub dependencies: Vec<String>,
    #[prost(string, tag = "3")]
    pub family_name: String,
    #[prost(string, tag = "4")]
    pub family_version: String,
    #[prost(string, repeated, tag = "5")]
    pub inputs: Vec<String>,
    #[prost(string, tag = "6")]
    pub nonce: String,
    #[prost(string, repeated, tag = "7")]
    pub outputs: Vec<String>,
    /// Hex SHA-512 of the payload
    #[prost(string, tag = "9")]
    pub payload_sha512: String,
    /// Public key of the transaction's author
    #[prost(string, tag = "10")]
    pub signer_public_key: String,
}

/// A signed transaction with its still-encoded header
#[derive(Clone, PartialEq, prost::Message)]
pub struct Transaction {
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    /// Hex signature over `header`; doubles as the transaction id
    #[prost(string, tag = "2")]
    pub header_signature: String,
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TransactionList {
    #[prost(message, repeated, tag = "1")]
    pub transactions: Vec<Transaction>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BatchHeader {
    #[prost(string, tag = "1")]
    pub signer_public_key: String,
    /// Header signatures of the batched transactions, in batch order
    #[prost(string, repeated, tag = "2")]
    pub transaction_ids: Vec<String>,
}

/// Sealed batch signed by the batcher
#[derive(Clone, PartialEq, prost::Message)]
pub struct Batch {
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    #[prost(string, tag = "2")]
    pub header_signature: String,
    #[prost(message, repeated, tag = "3")]
    pub transactions: Vec<Transaction>,
    #[prost(bool, tag = "4")]
    pub trace: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BatchList {
    #[prost(message, repeated, tag = "1")]
    pub batches: Vec<Batch>,
}
