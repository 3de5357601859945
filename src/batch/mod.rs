//! Batch Creation Module
//!
//! This module handles batch creation and sealing:
//! - BatchEncoder: Signs a batch header over ordered transactions
//! - Batcher: Validates submitted transactions before handing them to the encoder

mod encoder;
pub mod batcher;

#[cfg(test)]
mod tests;

pub use encoder::BatchEncoder;
pub use batcher::Batcher;
