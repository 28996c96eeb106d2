use crate::data::SignalBar;
use crate::strategy::{Action, Position, Rule};

//volume-ratio rule
//enters when up-volume at least matches down-volume
//exits when the ratio dips below 1 or the condition count falls to 4 or fewer
#[derive(Debug, Clone, Default)]
pub struct VolumeRatioRule;

impl VolumeRatioRule {
    pub fn new() -> Self {
        VolumeRatioRule
    }
}

impl Rule for VolumeRatioRule {
    fn decide(&self, bar: &SignalBar, position: Position) -> Action {
        match position {
            Position::Flat => {
                if bar.up_down_ratio >= 1.0 {
                    Action::Enter
                } else {
                    Action::Hold
                }
            }
            Position::Long => {
                if bar.up_down_ratio < 1.0 || bar.condition_count <= 4 {
                    Action::Exit
                } else {
                    Action::Hold
                }
            }
        }
    }

    fn name(&self) -> &str {
        "ud_ratio"
    }
}
