pub mod ledger;

pub use ledger::{BuySize, Ledger};
