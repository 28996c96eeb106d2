//signal derivation: turns raw close/volume series into the per-bar
//signal fields the backtest engine consumes
//all rolling windows use every available sample until the window fills

use crate::data::{PriceBar, SignalBar};
use statrs::statistics::Statistics;

//rolling window lengths, in bars
const MA_FAST_WINDOW: usize = 51;
const MA_MID_WINDOW: usize = 151;
const MA_SLOW_WINDOW: usize = 201;
const EXTREMA_WINDOW: usize = 53;
const VOLUME_WINDOW: usize = 53;

//momentum composite lags and weights
const MOMENTUM_LAGS: [usize; 4] = [63, 126, 189, 252];
const MOMENTUM_WEIGHTS: [f64; 4] = [0.4, 0.2, 0.2, 0.2];
const MOMENTUM_THRESHOLD: f64 = 1.7;

//rolling mean over the trailing `window` values (shorter at the series head)
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            values[start..=i].mean()
        })
        .collect()
}

//rolling minimum over the trailing `window` values
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            values[start..=i].min()
        })
        .collect()
}

//rolling maximum over the trailing `window` values
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            values[start..=i].max()
        })
        .collect()
}

//percent change over a fixed lag, none until the lag has history
fn pct_change(values: &[f64], lag: usize, i: usize) -> Option<f64> {
    if i < lag {
        return None;
    }
    let base = values[i - lag];
    if base == 0.0 {
        return None;
    }
    Some((values[i] - base) / base)
}

//weighted momentum composite, none until all lags have history
fn momentum(closes: &[f64], i: usize) -> Option<f64> {
    let mut total = 0.0;
    for (lag, weight) in MOMENTUM_LAGS.iter().zip(MOMENTUM_WEIGHTS.iter()) {
        total += pct_change(closes, *lag, i)? * weight;
    }
    Some(total * 100.0)
}

//rolling up-volume over down-volume ratio
//a bar's volume counts toward the up sum when volume did not shrink from
//the previous bar and toward the down sum when it did not grow; the first
//bar of a series counts toward neither
//an undefined or infinite ratio maps to 0
pub fn up_down_ratio(volumes: &[f64]) -> Vec<f64> {
    let n = volumes.len();
    let mut up = vec![0.0; n];
    let mut down = vec![0.0; n];

    for i in 1..n {
        let prev = volumes[i - 1];
        let change = (volumes[i] - prev) / prev;
        if change >= 0.0 {
            up[i] = volumes[i];
        }
        if change <= 0.0 {
            down[i] = volumes[i];
        }
    }

    (0..n)
        .map(|i| {
            let start = (i + 1).saturating_sub(VOLUME_WINDOW);
            let up_sum: f64 = up[start..=i].iter().sum();
            let down_sum: f64 = down[start..=i].iter().sum();
            let ratio = up_sum / down_sum;
            if ratio.is_finite() {
                ratio
            } else {
                0.0
            }
        })
        .collect()
}

//derives the signal series for one instrument
//`bars` must already be sorted chronologically (see group_prices_by_code)
pub fn derive_signals(code: &str, bars: &[PriceBar]) -> Vec<SignalBar> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let ma_fast = rolling_mean(&closes, MA_FAST_WINDOW);
    let ma_mid = rolling_mean(&closes, MA_MID_WINDOW);
    let ma_slow = rolling_mean(&closes, MA_SLOW_WINDOW);
    let low_52 = rolling_min(&closes, EXTREMA_WINDOW);
    let high_52 = rolling_max(&closes, EXTREMA_WINDOW);
    let ratios = up_down_ratio(&volumes);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let close = bar.close;

            let cond1 = close > ma_mid[i] && close > ma_slow[i];
            let cond2 = ma_mid[i] > ma_slow[i];
            let cond4 = ma_fast[i] > ma_mid[i] && ma_fast[i] > ma_slow[i];
            let cond5 = close > ma_fast[i];
            let cond6 = close > low_52[i] * 1.3;
            let cond7 = close > high_52[i] * 0.75;
            let cond8 = momentum(&closes, i).map_or(false, |m| m > MOMENTUM_THRESHOLD);

            let conditions = [cond1, cond2, cond4, cond5, cond6, cond7, cond8];
            let condition_count = conditions.iter().filter(|&&c| c).count() as u8;

            let trend_flag = cond1 && cond4 && cond5 && cond6;

            SignalBar::new_unchecked(
                bar.date,
                code.to_string(),
                close,
                trend_flag,
                condition_count,
                ratios[i],
            )
        })
        .collect()
}
