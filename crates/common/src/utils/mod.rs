/// HTTP request and response handling utilities.
pub mod http;

/// String manipulation and hex formatting utilities.
pub mod strings;

/// Conversions between raw on-chain integers and human-readable amounts.
pub mod units;
