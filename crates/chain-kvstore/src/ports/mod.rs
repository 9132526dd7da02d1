//! # Ports
//!
//! Interfaces this crate requires from the outside world. The only outbound
//! dependency is the ordered engine the store runs on.

pub mod outbound;

pub use outbound::{BatchOperation, OrderedEngine};
