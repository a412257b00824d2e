//! Helpers shared by the fuel CLI binaries.

pub mod report;
