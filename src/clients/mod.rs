//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP client for the Firestore REST API.

pub mod firestore_client;

// Re-export main types for convenience
pub use firestore_client::{FirestoreClient, UpstreamBody};
