//! Command-line front end: parse a file, rename bindings, print the result.

pub mod args;
pub mod driver;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
