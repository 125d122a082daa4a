//! Report renderers for an analyzed project profile.
//!
//! - [`terminal`]: colored summary with tables for detected types and the setup plan.
//! - [`json`]: the response payload consumed by installers and other tools.

pub mod json;
pub mod terminal;
