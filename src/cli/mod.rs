//! Command-line front end

mod merge;
mod style;

pub use merge::{MergeCommand, print_error, run_merge};
