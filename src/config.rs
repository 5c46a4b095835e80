//! Top-level configuration for the harness.
//!
//! Individual parts of the harness can be used without pulling in this
//! configuration layer, but it provides a convenient substrate for handling
//! harness-wide defaults (§11), distinct from the per-call `Options` of
//! §6.1.

pub mod color;
pub mod err;
pub mod iteration;
pub mod report;
pub mod search;
pub mod top;

pub use top::Config;
