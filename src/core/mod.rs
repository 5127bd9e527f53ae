//! Core services and infrastructure

pub mod error_handling;
pub mod isolation;
pub mod logging;
