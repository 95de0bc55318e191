//! Constrained password generation and output.

pub mod charset;
mod generate;
pub mod output;
pub mod policy;
mod reserve;

pub use charset::{Category, Requirement, Requirements};
pub use generate::{generate, generate_into};
pub use output::generate_batch;
