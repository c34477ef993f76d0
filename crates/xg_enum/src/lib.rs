//! xg_enum — combination enumerator and the test-context repository.
//!
//! Builds on [`xg_deps`] (the compliance check) and produces the collection
//! [`xg_orch`] schedules runs for: [`enumerator::enumerate_combinations`]
//! turns per-option candidate value lists into the deduplicated, compliant
//! set of [`xg_core::bundle::TestContext`]s, and [`repository::Repository`]
//! plus [`mask::TestContextMask`] let later stages (and test code) query
//! that set back out again.

#![forbid(unsafe_code)]

pub mod enumerator;
pub mod errors;
pub mod mask;
pub mod repository;

pub mod prelude {
    pub use crate::enumerator::{enumerate_combinations, CandidateValues};
    pub use crate::errors::{EnumError, EnumResult};
    pub use crate::mask::{MaskOption, TestContextMask, WellSpecifiedValue};
    pub use crate::repository::Repository;
}
