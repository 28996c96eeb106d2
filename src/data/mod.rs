pub mod bar;
pub mod loader;

pub use bar::{PriceBar, SignalBar};
pub use loader::{
    group_by_code, group_prices_by_code, load_price_csv, load_signal_csv, save_signal_csv,
};
