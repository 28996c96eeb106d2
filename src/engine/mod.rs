pub mod runner;

pub use runner::{RunResult, Runner};
