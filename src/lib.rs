//! Workspace entry crate.
//!
//! Host applications can depend on `rakbuku-workspace` and reach the whole
//! core through the re-exported façade instead of wiring each workspace
//! crate individually.

pub use core_service::{bootstrap, CoreError, CoreService, Result};
