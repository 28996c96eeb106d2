use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

//one row of the return log: appended after every bar, trade or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub code: String,
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub cumulative_return: f64,
}

impl ReturnPoint {
    pub fn new(code: String, date: NaiveDate, cumulative_return: f64) -> Self {
        ReturnPoint {
            code,
            date,
            cumulative_return,
        }
    }
}

//persists the return log as an ordered csv table (the downstream sink)
pub fn save_returns_csv<P: AsRef<Path>>(returns: &[ReturnPoint], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer =
        csv::Writer::from_path(path).context(format!("Failed to create CSV file: {:?}", path))?;

    for point in returns {
        writer
            .serialize(point)
            .context("Failed to write return log row")?;
    }

    writer.flush().context("Failed to flush return log")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, day).unwrap()
    }

    #[test]
    fn writes_ordered_rows_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("returns.csv");

        let returns = vec![
            ReturnPoint::new("7203".into(), d(4), 0.0),
            ReturnPoint::new("7203".into(), d(5), 250.0),
        ];

        save_returns_csv(&returns, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("code,date,return"));
        assert_eq!(lines.next(), Some("7203,2021-01-04,0.0"));
        assert_eq!(lines.next(), Some("7203,2021-01-05,250.0"));
    }
}
