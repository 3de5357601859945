//! Transaction Validation Module
//!
//! This module checks decoded transaction headers before they are batched.
//! Every header must name this server as its batcher and the caller as its signer.

mod validator;
pub use validator::Validator;
