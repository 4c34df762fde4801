//! Shared data structures for well plot time-step reconciliation
//!
//! - `source`: data source kinds and tagged source references
//! - `channel`: RFT channel kinds, flow phases, plot families
//! - `timeline`: time stamps and the ordered time step → source map
//! - `curve`: curve definitions and existing plot curves

mod channel;
mod curve;
mod source;
mod timeline;

pub use channel::*;
pub use curve::*;
pub use source::*;
pub use timeline::*;
