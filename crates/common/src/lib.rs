//! Commonly used resources for the sift workspace.
//!
//! This crate provides the shared pieces of the transaction classifier: hex
//! and unit formatting helpers, a retrying HTTP JSON fetcher, and the two
//! chain-facing collaborator boundaries (token decimals lookup and contract
//! ABI lookup).

/// Constants used throughout the workspace.
pub mod constants;

/// Chain-facing collaborators: token metadata over RPC and ABI lookup
/// services.
pub mod ether;

/// General utility functions for hex strings, HTTP, and unit formatting.
pub mod utils;
