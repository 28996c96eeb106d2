use crate::data::SignalBar;
use crate::strategy::{Action, Position, Rule};

//count-only rule
//enters when more than 2 conditions hold, exits at 2 or fewer
#[derive(Debug, Clone, Default)]
pub struct CountOnlyRule;

impl CountOnlyRule {
    pub fn new() -> Self {
        CountOnlyRule
    }
}

impl Rule for CountOnlyRule {
    fn decide(&self, bar: &SignalBar, position: Position) -> Action {
        match position {
            Position::Flat => {
                if bar.condition_count > 2 {
                    Action::Enter
                } else {
                    Action::Hold
                }
            }
            Position::Long => {
                if bar.condition_count <= 2 {
                    Action::Exit
                } else {
                    Action::Hold
                }
            }
        }
    }

    fn name(&self) -> &str {
        "count_only"
    }
}
