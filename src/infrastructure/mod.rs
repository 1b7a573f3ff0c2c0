//! Infrastructure layer - store access and process-level plumbing

pub mod logging;
pub mod migrations;
pub mod user;
