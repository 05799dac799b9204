//! URL helpers for Link-Harvester
//!
//! This module provides seed label derivation and the scheme filter applied
//! to every discovered link.

mod label;
mod scheme;

// Re-export main functions
pub use label::derive_label;
pub use scheme::{has_accepted_scheme, ACCEPTED_SCHEMES};
