use crate::strategy::count_only::CountOnlyRule;
use crate::strategy::trend_count::TrendAndCountRule;
use crate::strategy::volume_ratio::VolumeRatioRule;
use crate::strategy::Rule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//which decision rule a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    TrendAndCount,
    CountOnly,
    VolumeRatio,
}

impl RuleKind {
    //parse rule kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trend_count" | "trend_and_count" => Some(RuleKind::TrendAndCount),
            "count_only" | "count" => Some(RuleKind::CountOnly),
            "ud_ratio" | "volume_ratio" => Some(RuleKind::VolumeRatio),
            _ => None,
        }
    }

    //constructs the boxed rule
    pub fn build(&self) -> Box<dyn Rule> {
        match self {
            RuleKind::TrendAndCount => Box::new(TrendAndCountRule::new()),
            RuleKind::CountOnly => Box::new(CountOnlyRule::new()),
            RuleKind::VolumeRatio => Box::new(VolumeRatioRule::new()),
        }
    }
}

//complete configuration for one backtest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    //starting capital
    pub initial_amount: f64,

    //fixed transaction cost per order
    pub fixed_cost: f64,

    //proportional transaction cost per order
    pub proportional_cost: f64,

    //decision rule
    pub rule: RuleKind,

    //per-trade trace printing
    pub verbose: bool,

    //optional output path for the return log csv
    pub output_returns_csv: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            initial_amount: 1000.0,
            fixed_cost: 0.0,
            proportional_cost: 0.0,
            rule: RuleKind::TrendAndCount,
            verbose: false,
            output_returns_csv: None,
        }
    }
}

impl RunConfig {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
