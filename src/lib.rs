//! A generative, linearizability-checking test harness for stateful
//! systems.
//!
//! A caller supplies a factory for a fresh system under test, an immutable
//! model of expected behavior, and a set of operation specifications (via
//! [define_op!]). The harness generates randomized sequences of operations,
//! runs them against the system — optionally across multiple concurrent
//! threads — records the observed results, and searches for at least one
//! linearization under which the model predicts exactly what was observed.
//! If none exists, the input is shrunk and the minimal failing case is
//! reported.
//!
//! See [api::check_system] for the entry point.

extern crate crossbeam;

pub mod api;
pub mod config;
pub mod err;
pub mod generative;
pub mod history;
pub mod op;
pub mod report;
pub mod runner;
pub mod search;
pub mod trial;
pub mod world;

pub use api::{check_system, Options};
pub use err::{Error, Result};
