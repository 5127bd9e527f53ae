//! Test modules for the host command boundary

mod utils;
