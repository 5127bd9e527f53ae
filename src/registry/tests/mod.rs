//! Test modules for the contribution registry
