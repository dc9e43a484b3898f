//! CLI command implementations

pub mod check;
pub mod generate;
pub mod init_config;
pub mod json_output;
pub mod run;
pub mod scales;
pub mod validate;

mod keys;
mod reporting;
