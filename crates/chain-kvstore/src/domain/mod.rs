//! # Domain Layer
//!
//! Pure column-schema logic: identifiers, codecs, the chain column registry,
//! and the error taxonomy. Nothing in here touches an engine.

pub mod columns;
pub mod errors;
pub mod schema;

/// Hash type (32-byte digest), the key type of root-addressed columns.
pub type Hash = [u8; 32];
