pub mod count_only;
pub mod trend_count;
pub mod volume_ratio;

use crate::data::SignalBar;
use serde::{Deserialize, Serialize};

//position flag for one run: long or nothing, no short side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Flat,
    Long,
}

//what a rule wants the runner to do with the current bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Enter,
    Exit,
    Hold,
}

//decision rule interface all strategies implement
//rules are pure: they read the bar's signal fields and the current
//position flag and never touch the ledger
pub trait Rule: Send {
    //decides the action for the current bar
    fn decide(&self, bar: &SignalBar, position: Position) -> Action;

    //returns the rule name
    fn name(&self) -> &str;
}
