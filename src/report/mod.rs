pub mod sink;
pub mod summary;

pub use sink::{save_returns_csv, ReturnPoint};
pub use summary::RunSummary;
