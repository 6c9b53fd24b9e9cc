//! Domain models for the glucose tracker.

mod measurement;
mod profile;
mod row;
mod statistics;

pub use measurement::*;
pub use profile::*;
pub use row::*;
pub use statistics::*;
