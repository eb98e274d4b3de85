//! Test doubles shared by unit tests and the behaviour suites in `tests/`.
//!
//! Compiled for `cfg(test)` and for the `test-support` feature.

mod clock;
mod in_memory;

pub use clock::FixedClock;
pub use in_memory::{
    InMemoryPatients, InMemoryReferenceInteractions, InMemorySavedInteractions,
    InMemoryStaging, ScriptedOracle,
};
