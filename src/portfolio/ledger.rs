use crate::report::RunSummary;
use chrono::NaiveDate;

//sizing for a buy order: an explicit unit count, or a cash amount
//converted to whole units at the order price
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuySize {
    Units(u64),
    Cash(f64),
}

//the accounting ledger for one backtest run
//cash and units are mutated only through buy/sell/close_out
#[derive(Debug, Clone)]
pub struct Ledger {
    //starting capital
    pub initial_amount: f64,

    //current cash balance
    pub cash: f64,

    //held units, never negative (no short positions)
    pub units: u64,

    //fixed transaction cost per order
    pub fixed_cost: f64,

    //proportional transaction cost per order
    pub proportional_cost: f64,

    //trade counters
    pub trades: u64,
    pub win_trades: u64,
    pub lose_trades: u64,

    //accumulated win/loss amounts for the payoff ratio
    pub win_amount: f64,
    pub lose_amount: f64,

    //realized return accumulated over closed trades
    pub cumulative_return: f64,

    //price markers for the open round trip, 0 when flat
    buy_price: f64,
    sell_price: f64,

    //per-trade trace printing
    pub verbose: bool,
}

impl Ledger {
    //creates a new ledger with initial capital and cost rates
    pub fn new(initial_amount: f64, fixed_cost: f64, proportional_cost: f64) -> Self {
        Ledger {
            initial_amount,
            cash: initial_amount,
            units: 0,
            fixed_cost,
            proportional_cost,
            trades: 0,
            win_trades: 0,
            lose_trades: 0,
            win_amount: 0.0,
            lose_amount: 0.0,
            cumulative_return: 0.0,
            buy_price: 0.0,
            sell_price: 0.0,
            verbose: false,
        }
    }

    //places a buy order
    //cash-sized buys floor the unit count to amount / price
    //does not guard against insufficient cash: a unit-sized buy larger
    //than the balance overdrafts silently, the caller owns that check
    pub fn buy(&mut self, date: NaiveDate, price: f64, size: BuySize) -> u64 {
        let units = match size {
            BuySize::Units(units) => units,
            BuySize::Cash(amount) => (amount / price).floor() as u64,
        };

        self.buy_price = price;
        self.cash -= (units as f64 * price) * (1.0 + self.proportional_cost) + self.fixed_cost;
        self.units += units;
        self.trades += 1;

        if self.verbose {
            println!("{} | buying {} units at {:.2}", date, units, price);
            self.print_balance(date);
            self.print_net_wealth(date, price);
        }

        units
    }

    //places a sell order and books the realized return of the round trip
    //zero-return trades count in neither the win nor the loss bucket
    pub fn sell(&mut self, date: NaiveDate, price: f64, units: u64) {
        self.sell_price = price;
        self.cash += (units as f64 * price) * (1.0 - self.proportional_cost) - self.fixed_cost;
        self.units -= units;
        self.trades += 1;

        if self.verbose {
            println!("{} | selling {} units at {:.2}", date, units, price);
            self.print_balance(date);
            self.print_net_wealth(date, price);
        }

        let ret = (self.sell_price - self.buy_price) * units as f64;
        if ret > 0.0 {
            self.win_trades += 1;
            self.win_amount += ret;
        } else if ret < 0.0 {
            self.lose_trades += 1;
            self.lose_amount += ret;
        }

        self.buy_price = 0.0;
        self.sell_price = 0.0;
        self.cumulative_return += ret;
    }

    //force-sells all remaining units at `price` without cost adjustment
    //with zero open units the trade is still counted but cash is unchanged
    pub fn close_out(&mut self, date: NaiveDate, price: f64) {
        self.cash += self.units as f64 * price;
        self.units = 0;
        self.trades += 1;

        if self.verbose {
            println!("{} | closing out at {:.2}", date, price);
            self.print_balance(date);
        }
    }

    //current net wealth: cash plus holdings marked at `price`
    pub fn net_wealth(&self, price: f64) -> f64 {
        self.units as f64 * price + self.cash
    }

    //builds the run summary from the current ledger state
    //degenerate ratios come back as None instead of NaN
    pub fn summary(&self) -> RunSummary {
        let closed = self.win_trades + self.lose_trades;

        let win_rate = if closed > 0 {
            Some(self.win_trades as f64 / closed as f64)
        } else {
            None
        };

        let avg_return = if closed > 0 {
            Some((self.cash - self.initial_amount) / closed as f64)
        } else {
            None
        };

        let payoff_ratio = if self.win_trades > 0 && self.lose_trades > 0 {
            let avg_win = self.win_amount / self.win_trades as f64;
            let avg_loss = self.lose_amount / self.lose_trades as f64;
            Some((avg_win / avg_loss).abs())
        } else {
            None
        };

        RunSummary {
            initial_amount: self.initial_amount,
            final_balance: self.cash,
            total_return: self.cumulative_return,
            net_performance: (self.cash - self.initial_amount) / self.initial_amount,
            trades: self.trades,
            win_trades: self.win_trades,
            lose_trades: self.lose_trades,
            win_rate,
            avg_return,
            payoff_ratio,
        }
    }

    fn print_balance(&self, date: NaiveDate) {
        println!("{} | current balance {:.2}", date, self.cash);
    }

    fn print_net_wealth(&self, date: NaiveDate, price: f64) {
        println!("{} | current net wealth {:.2}", date, self.net_wealth(price));
    }
}
