//! Test modules for the module host

mod lifecycle;
mod utils;
