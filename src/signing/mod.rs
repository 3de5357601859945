//! Signing Module
//!
//! secp256k1 key handling for batch and transaction signatures.
//! Keys and signatures travel as lowercase hex: 33-byte compressed public keys
//! and 64-byte compact ECDSA signatures over the SHA-256 digest of the message.

mod keys;


pub use keys::{Signer, verify};
