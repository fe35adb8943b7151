//! Command-line front end for the headless driver.

pub mod args;

pub use args::{parse, parse_from, Args, Command};
