//! Time Line Module - time steps offered by heterogeneous well data sources
//!
//! ## Pipeline
//!
//! - `harvest`: time steps one source has for a well
//! - `reconcile`: match-or-adjacent selection against a baseline time line
//! - `aggregate`: per-kind harvesting, baseline choice and merge into a
//!   [`TimeStepSourceMap`](crate::types::TimeStepSourceMap)
//!
//! Every function here is a pure transformation over caller-supplied
//! handles. Missing data yields empty results, never errors.

mod aggregate;
mod harvest;
mod reconcile;

pub use aggregate::aggregate;
pub use harvest::{harvest, observed_file_time_steps, sim_well_time_steps, HarvestOptions};
pub use reconcile::reconcile;
