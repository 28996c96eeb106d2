use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

//summary statistics for one backtest run
//the option fields are None when too few trades closed to define them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub initial_amount: f64,
    pub final_balance: f64,
    pub total_return: f64,
    pub net_performance: f64,
    pub trades: u64,
    pub win_trades: u64,
    pub lose_trades: u64,
    pub win_rate: Option<f64>,
    pub avg_return: Option<f64>,
    pub payoff_ratio: Option<f64>,
}

//renders a guarded ratio, or the insufficient-trades marker
fn guarded(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    match value {
        Some(v) => fmt(v),
        None => "n/a (insufficient trades)".to_string(),
    }
}

impl RunSummary {
    //prints the summary in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Initial Amount"),
            Cell::new(&format!("{:.2}", self.initial_amount)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Balance"),
            Cell::new(&format!("{:.2}", self.final_balance)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Return"),
            Cell::new(&format!("{:.2}", self.total_return)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Net Performance"),
            Cell::new(&format!("{:.2}%", self.net_performance * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Trades"),
            Cell::new(&format!("{}", self.trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Trades"),
            Cell::new(&format!("{}", self.win_trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Lose Trades"),
            Cell::new(&format!("{}", self.lose_trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Rate"),
            Cell::new(&guarded(self.win_rate, |v| format!("{:.2}%", v * 100.0))),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Avg Return"),
            Cell::new(&guarded(self.avg_return, |v| format!("{:.2}", v))),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Payoff Ratio"),
            Cell::new(&guarded(self.payoff_ratio, |v| format!("{:.3}", v))),
        ]));

        table.printstd();
    }
}
