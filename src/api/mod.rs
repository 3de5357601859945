//! API Module
//!
//! This module handles the HTTP API for batching client transactions.
//! It provides the endpoints clients use to submit transaction lists.

mod server;


pub use server::{ApiError, AppState, AUTHED_KEY_HEADER, BatchResponse, BatcherInfo, Server, router};
