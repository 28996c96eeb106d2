//a Rust-based signal-driven backtesting engine for equities

pub mod config;
pub mod data;
pub mod engine;
pub mod portfolio;
pub mod report;
pub mod signals;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{RuleKind, RunConfig};
    pub use crate::data::{
        group_by_code, group_prices_by_code, load_price_csv, load_signal_csv, save_signal_csv,
        PriceBar, SignalBar,
    };
    pub use crate::engine::{RunResult, Runner};
    pub use crate::portfolio::{BuySize, Ledger};
    pub use crate::report::{save_returns_csv, ReturnPoint, RunSummary};
    pub use crate::signals::derive_signals;
    pub use crate::strategy::{
        count_only::CountOnlyRule, trend_count::TrendAndCountRule, volume_ratio::VolumeRatioRule,
        Action, Position, Rule,
    };
}
