use crate::config::RunConfig;
use crate::data::SignalBar;
use crate::portfolio::{BuySize, Ledger};
use crate::report::{ReturnPoint, RunSummary};
use crate::strategy::{Action, Position, Rule};
use chrono::NaiveDate;
use indexmap::IndexMap;

//result of a backtest run: the summary plus the full per-bar return log
#[derive(Debug, Clone)]
pub struct RunResult {
    pub summary: RunSummary,
    pub returns: Vec<ReturnPoint>,
}

//drives one rule across all instrument series, bar by bar
//owns the ledger and the position flag for the duration of one run;
//both carry across instruments within the run (source behavior, see
//DESIGN.md) - concurrent runs must each build their own runner
pub struct Runner {
    ledger: Ledger,
    position: Position,
}

impl Runner {
    //creates a runner with a fresh ledger from the run configuration
    pub fn new(config: &RunConfig) -> Self {
        let mut ledger = Ledger::new(
            config.initial_amount,
            config.fixed_cost,
            config.proportional_cost,
        );
        ledger.verbose = config.verbose;

        Runner {
            ledger,
            position: Position::Flat,
        }
    }

    //runs the backtest, consuming the runner so ledger state cannot
    //leak into a second run
    //series are processed strictly sequentially in map order; empty
    //series are skipped; after the last bar of the last instrument the
    //ledger is closed out at that bar's price
    pub fn run(mut self, rule: &dyn Rule, data: &IndexMap<String, Vec<SignalBar>>) -> RunResult {
        let mut returns = Vec::new();
        let mut last_bar: Option<(NaiveDate, f64)> = None;

        for (code, series) in data {
            for bar in series {
                match rule.decide(bar, self.position) {
                    Action::Enter if self.position == Position::Flat => {
                        let amount = self.ledger.cash;
                        self.ledger.buy(bar.date, bar.close, BuySize::Cash(amount));
                        self.position = Position::Long;
                    }
                    Action::Exit if self.position == Position::Long => {
                        let units = self.ledger.units;
                        self.ledger.sell(bar.date, bar.close, units);
                        self.position = Position::Flat;
                    }
                    _ => {}
                }

                //one log entry per bar, with or without a trade
                returns.push(ReturnPoint::new(
                    code.clone(),
                    bar.date,
                    self.ledger.cumulative_return,
                ));

                last_bar = Some((bar.date, bar.close));
            }
        }

        //terminal close-out at the final bar's price, regardless of state
        if let Some((date, price)) = last_bar {
            self.ledger.close_out(date, price);
            self.position = Position::Flat;
        }

        RunResult {
            summary: self.ledger.summary(),
            returns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleKind;
    use crate::strategy::trend_count::TrendAndCountRule;
    use approx::assert_relative_eq;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, day).unwrap()
    }

    fn bar(code: &str, day: u32, close: f64, trend: bool, count: u8) -> SignalBar {
        SignalBar::new_unchecked(d(day), code.into(), close, trend, count, 0.0)
    }

    fn config() -> RunConfig {
        RunConfig {
            initial_amount: 1000.0,
            ..RunConfig::default()
        }
    }

    fn series(bars: Vec<SignalBar>) -> IndexMap<String, Vec<SignalBar>> {
        crate::data::group_by_code(&bars)
    }

    #[test]
    fn enters_exits_and_realizes_profit() {
        //flat at d1, buy full cash at 12, sell all at 15
        let data = series(vec![
            bar("7203", 4, 10.0, false, 0),
            bar("7203", 5, 12.0, true, 5),
            bar("7203", 6, 15.0, true, 4),
        ]);

        let result = Runner::new(&config()).run(&TrendAndCountRule::new(), &data);

        let units = (1000.0_f64 / 12.0).floor(); //83
        assert_relative_eq!(result.summary.total_return, (15.0 - 12.0) * units);
        assert_relative_eq!(
            result.summary.final_balance,
            1000.0 + (15.0 - 12.0) * units
        );
        //buy, sell, terminal close-out
        assert_eq!(result.summary.trades, 3);

        //log is per-bar: flat, still flat after buy, realized after sell
        assert_eq!(result.returns.len(), 3);
        assert_relative_eq!(result.returns[0].cumulative_return, 0.0);
        assert_relative_eq!(result.returns[1].cumulative_return, 0.0);
        assert_relative_eq!(result.returns[2].cumulative_return, (15.0 - 12.0) * units);
    }

    #[test]
    fn return_log_has_one_entry_per_bar() {
        let data = series(vec![
            bar("7203", 4, 10.0, false, 0),
            bar("7203", 5, 11.0, false, 0),
            bar("9984", 4, 50.0, false, 0),
        ]);

        let result = Runner::new(&config()).run(&TrendAndCountRule::new(), &data);
        assert_eq!(result.returns.len(), 3);
    }

    #[test]
    fn skips_empty_instrument_series() {
        let mut data = series(vec![bar("7203", 4, 10.0, false, 0)]);
        data.insert("9984".into(), Vec::new());

        let result = Runner::new(&config()).run(&TrendAndCountRule::new(), &data);
        assert_eq!(result.returns.len(), 1);
    }

    #[test]
    fn no_trigger_run_reports_insufficient_trades() {
        let data = series(vec![
            bar("7203", 4, 10.0, false, 0),
            bar("7203", 5, 11.0, false, 1),
        ]);

        let result = Runner::new(&config()).run(&TrendAndCountRule::new(), &data);

        //flat log at the initial cumulative return
        assert!(result
            .returns
            .iter()
            .all(|p| p.cumulative_return == 0.0));
        assert!(result.summary.win_rate.is_none());
        assert_relative_eq!(result.summary.final_balance, 1000.0);
        //terminal close-out still counts a trade
        assert_eq!(result.summary.trades, 1);

        //printing the degenerate summary must not panic
        result.summary.pretty_print_table();
    }

    #[test]
    fn run_over_zero_bars_yields_empty_log() {
        let data: IndexMap<String, Vec<SignalBar>> = IndexMap::new();
        let result = Runner::new(&config()).run(&TrendAndCountRule::new(), &data);

        assert!(result.returns.is_empty());
        assert_eq!(result.summary.trades, 0);
        assert!(result.summary.win_rate.is_none());
    }

    #[test]
    fn open_position_is_closed_out_at_series_end() {
        let data = series(vec![
            bar("7203", 4, 10.0, true, 5),
            bar("7203", 5, 14.0, true, 5),
        ]);

        let result = Runner::new(&config()).run(&TrendAndCountRule::new(), &data);

        //100 units bought at 10, liquidated at 14 without costs
        assert_relative_eq!(result.summary.final_balance, 1400.0);
        //buy + close-out
        assert_eq!(result.summary.trades, 2);
    }

    #[test]
    fn ledger_and_position_carry_across_instruments() {
        //entered on the last bar of the first instrument, exited on the
        //first bar of the second: the run shares one ledger throughout
        let data = series(vec![
            bar("7203", 4, 10.0, true, 5),
            bar("9984", 4, 12.0, true, 4),
        ]);

        let result = Runner::new(&config()).run(&TrendAndCountRule::new(), &data);

        assert_relative_eq!(result.summary.total_return, (12.0 - 10.0) * 100.0);
        assert_relative_eq!(result.summary.final_balance, 1200.0);
    }

    #[test]
    fn identical_inputs_produce_identical_return_logs() {
        let data = series(vec![
            bar("7203", 4, 10.0, true, 5),
            bar("7203", 5, 12.0, true, 4),
            bar("9984", 4, 50.0, true, 6),
            bar("9984", 5, 55.0, false, 3),
        ]);

        let rule = RuleKind::TrendAndCount.build();
        let first = Runner::new(&config()).run(rule.as_ref(), &data);
        let second = Runner::new(&config()).run(rule.as_ref(), &data);

        assert_eq!(first.returns, second.returns);
    }
}
