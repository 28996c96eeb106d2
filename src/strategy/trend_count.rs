use crate::data::SignalBar;
use crate::strategy::{Action, Position, Rule};

//trend-and-count rule
//enters when the uptrend flag is set and more than 4 conditions hold
//exits when the flag drops or the count falls to 4 or fewer
#[derive(Debug, Clone, Default)]
pub struct TrendAndCountRule;

impl TrendAndCountRule {
    pub fn new() -> Self {
        TrendAndCountRule
    }
}

impl Rule for TrendAndCountRule {
    fn decide(&self, bar: &SignalBar, position: Position) -> Action {
        match position {
            Position::Flat => {
                if bar.trend_flag && bar.condition_count > 4 {
                    Action::Enter
                } else {
                    Action::Hold
                }
            }
            Position::Long => {
                if !bar.trend_flag || bar.condition_count <= 4 {
                    Action::Exit
                } else {
                    Action::Hold
                }
            }
        }
    }

    fn name(&self) -> &str {
        "trend_count"
    }
}
