//! Grade aggregation and decision engine.
//!
//! Turns a sparse set of per-sub-unit grades into credit-weighted averages
//! and categorical decisions at three levels: teaching unit (UE), semester,
//! and academic year. Every function here is pure and total over its typed
//! inputs; intake validation and persistence live in the surrounding layers.

pub mod annual;
pub mod decision;
pub mod semester;
pub mod types;
pub mod ue;
pub mod utility;
