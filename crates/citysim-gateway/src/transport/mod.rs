//! Transport layer (HTTP/JSON).
//!
//! Decodes the request body once, hands the manifest to the calculator, and
//! serializes the result. No state survives a request.

pub mod simulate;
