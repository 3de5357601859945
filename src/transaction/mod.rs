//! Transaction Module
//!
//! Client-side construction of signed transactions. The batching server never
//! creates transactions itself; this encoder exists so clients and tests can
//! produce transaction lists the batcher accepts.

mod encoder;

pub use encoder::TransactionEncoder;
