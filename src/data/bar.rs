use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    #[error("Invalid close price: {0}")]
    InvalidClose(f64),
    #[error("Negative volume: {0}")]
    NegativeVolume(f64),
    #[error("Invalid up/down volume ratio: {0}")]
    InvalidRatio(f64),
    #[error("Condition count {0} exceeds the number of conditions")]
    InvalidConditionCount(u8),
}

//number of uptrend conditions a bar can satisfy
pub const CONDITION_COUNT_MAX: u8 = 7;

//represents a single daily price observation with its precomputed signal fields
//the engine only consumes the signals, it never recomputes them per bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalBar {
    pub date: NaiveDate,
    pub code: String,
    pub close: f64,
    //true when the uptrend gate conditions all hold
    pub trend_flag: bool,
    //how many of the uptrend conditions hold (0..=7)
    pub condition_count: u8,
    //rolling up-volume over down-volume ratio, 0 when undefined
    pub up_down_ratio: f64,
}

impl SignalBar {
    //creates a new SignalBar with validation
    pub fn new(
        date: NaiveDate,
        code: String,
        close: f64,
        trend_flag: bool,
        condition_count: u8,
        up_down_ratio: f64,
    ) -> Result<Self, BarError> {
        //validate positive, finite close
        if !close.is_finite() || close <= 0.0 {
            return Err(BarError::InvalidClose(close));
        }

        //validate finite, non-negative ratio
        if !up_down_ratio.is_finite() || up_down_ratio < 0.0 {
            return Err(BarError::InvalidRatio(up_down_ratio));
        }

        //validate condition count range
        if condition_count > CONDITION_COUNT_MAX {
            return Err(BarError::InvalidConditionCount(condition_count));
        }

        Ok(SignalBar {
            date,
            code,
            close,
            trend_flag,
            condition_count,
            up_down_ratio,
        })
    }

    //creates a SignalBar without validation
    pub fn new_unchecked(
        date: NaiveDate,
        code: String,
        close: f64,
        trend_flag: bool,
        condition_count: u8,
        up_down_ratio: f64,
    ) -> Self {
        SignalBar {
            date,
            code,
            close,
            trend_flag,
            condition_count,
            up_down_ratio,
        }
    }
}

//raw upstream row: close and volume only, input to signal derivation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub code: String,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    //creates a new PriceBar with validation
    pub fn new(date: NaiveDate, code: String, close: f64, volume: f64) -> Result<Self, BarError> {
        if !close.is_finite() || close <= 0.0 {
            return Err(BarError::InvalidClose(close));
        }

        if !volume.is_finite() || volume < 0.0 {
            return Err(BarError::NegativeVolume(volume));
        }

        Ok(PriceBar {
            date,
            code,
            close,
            volume,
        })
    }
}
