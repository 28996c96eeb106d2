use crate::data::bar::{PriceBar, SignalBar};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SignalCsvRecord {
    code: String,
    date: String,
    close: f64,
    //0 or 1 as written by the warehouse export
    trend_flag: u8,
    condition_count: u8,
    up_down_ratio: f64,
}

#[derive(Debug, Deserialize)]
struct PriceCsvRecord {
    code: String,
    date: String,
    close: f64,
    volume: f64,
}

fn parse_date(raw: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").context(format!(
        "Failed to parse date '{}' at line {}",
        raw, line
    ))
}

//loads precomputed signal bars from a csv file
pub fn load_signal_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SignalBar>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: SignalCsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        let date = parse_date(&record.date, index + 2)?;

        let bar = SignalBar::new(
            date,
            record.code,
            record.close,
            record.trend_flag != 0,
            record.condition_count,
            record.up_down_ratio,
        )
        .context(format!("Invalid signal bar at line {}", index + 2))?;

        bars.push(bar);
    }

    Ok(bars)
}

//loads raw price/volume bars from a csv file
pub fn load_price_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: PriceCsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        let date = parse_date(&record.date, index + 2)?;

        let bar = PriceBar::new(date, record.code, record.close, record.volume)
            .context(format!("Invalid price bar at line {}", index + 2))?;

        bars.push(bar);
    }

    Ok(bars)
}

#[derive(Debug, serde::Serialize)]
struct SignalCsvOut<'a> {
    code: &'a str,
    date: NaiveDate,
    close: f64,
    trend_flag: u8,
    condition_count: u8,
    up_down_ratio: f64,
}

//writes signal bars to a csv file in the same layout load_signal_csv reads
pub fn save_signal_csv<P: AsRef<Path>>(bars: &[SignalBar], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer =
        csv::Writer::from_path(path).context(format!("Failed to create CSV file: {:?}", path))?;

    for bar in bars {
        writer
            .serialize(SignalCsvOut {
                code: &bar.code,
                date: bar.date,
                close: bar.close,
                trend_flag: bar.trend_flag as u8,
                condition_count: bar.condition_count,
                up_down_ratio: bar.up_down_ratio,
            })
            .context("Failed to write signal bar row")?;
    }

    writer.flush().context("Failed to flush signal CSV")?;
    Ok(())
}

//groups bars by instrument code, preserving first-seen code order,
//and sorts each series chronologically
pub fn group_by_code(bars: &[SignalBar]) -> IndexMap<String, Vec<SignalBar>> {
    let mut grouped: IndexMap<String, Vec<SignalBar>> = IndexMap::new();

    for bar in bars {
        grouped.entry(bar.code.clone()).or_default().push(bar.clone());
    }

    for series in grouped.values_mut() {
        series.sort_by(|a, b| a.date.cmp(&b.date));
    }

    grouped
}

//same grouping for raw price bars, input to signal derivation
pub fn group_prices_by_code(bars: &[PriceBar]) -> IndexMap<String, Vec<PriceBar>> {
    let mut grouped: IndexMap<String, Vec<PriceBar>> = IndexMap::new();

    for bar in bars {
        grouped.entry(bar.code.clone()).or_default().push(bar.clone());
    }

    for series in grouped.values_mut() {
        series.sort_by(|a, b| a.date.cmp(&b.date));
    }

    grouped
}
