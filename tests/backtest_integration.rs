use kabuto::prelude::*;
use std::io::Write;

//end-to-end: signal csv in, run, return-log csv out
#[test]
fn csv_in_run_csv_out() {
    let dir = tempfile::tempdir().unwrap();
    let signals_path = dir.path().join("signals.csv");
    let returns_path = dir.path().join("returns.csv");

    let mut file = std::fs::File::create(&signals_path).unwrap();
    writeln!(file, "code,date,close,trend_flag,condition_count,up_down_ratio").unwrap();
    writeln!(file, "7203,2021-01-04,10.0,0,0,0.0").unwrap();
    writeln!(file, "7203,2021-01-05,12.0,1,5,1.2").unwrap();
    writeln!(file, "7203,2021-01-06,15.0,1,4,0.9").unwrap();
    drop(file);

    let bars = load_signal_csv(&signals_path).unwrap();
    let data = group_by_code(&bars);

    let config = RunConfig {
        initial_amount: 1000.0,
        ..RunConfig::default()
    };
    let rule = RuleKind::TrendAndCount.build();
    let result = Runner::new(&config).run(rule.as_ref(), &data);

    //83 units bought at 12, sold at 15
    assert_eq!(result.summary.trades, 3);
    assert_eq!(result.summary.win_trades, 1);
    assert!((result.summary.total_return - 249.0).abs() < 1e-9);

    save_returns_csv(&result.returns, &returns_path).unwrap();

    let contents = std::fs::read_to_string(&returns_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4); //header + one row per bar
    assert_eq!(lines[0], "code,date,return");
    assert_eq!(lines[1], "7203,2021-01-04,0.0");
    assert_eq!(lines[3], "7203,2021-01-06,249.0");
}

//end-to-end: raw price csv through signal derivation into a backtest
#[test]
fn derive_then_run() {
    let dir = tempfile::tempdir().unwrap();
    let prices_path = dir.path().join("prices.csv");
    let signals_path = dir.path().join("signals.csv");

    let mut file = std::fs::File::create(&prices_path).unwrap();
    writeln!(file, "code,date,close,volume").unwrap();
    //a flat stretch then a strong rise, enough for the trend gate
    for i in 0..54 {
        writeln!(file, "7203,2021-{:02}-{:02},100.0,1000", 1 + i / 28, 1 + i % 28).unwrap();
    }
    for i in 0..20 {
        writeln!(
            file,
            "7203,2021-{:02}-{:02},{:.1},1000",
            3 + i / 28,
            1 + i % 28,
            150.0 + 2.0 * i as f64
        )
        .unwrap();
    }
    drop(file);

    let prices = load_price_csv(&prices_path).unwrap();
    let grouped = group_prices_by_code(&prices);

    let mut signals = Vec::new();
    for (code, series) in &grouped {
        signals.extend(derive_signals(code, series));
    }
    assert_eq!(signals.len(), prices.len());

    //the derived file must round-trip through the loader
    save_signal_csv(&signals, &signals_path).unwrap();
    let reloaded = load_signal_csv(&signals_path).unwrap();
    assert_eq!(reloaded.len(), signals.len());

    //the late rally satisfies the trend gate, so the rule trades
    let last = signals.last().unwrap();
    assert!(last.trend_flag);
    assert!(last.condition_count > 4);

    let data = group_by_code(&reloaded);
    let config = RunConfig {
        initial_amount: 10000.0,
        ..RunConfig::default()
    };
    let rule = RuleKind::TrendAndCount.build();
    let result = Runner::new(&config).run(rule.as_ref(), &data);

    assert_eq!(result.returns.len(), reloaded.len());
    assert!(result.summary.trades >= 1);
}

//running the same inputs twice produces byte-identical return logs
#[test]
fn runs_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let signals_path = dir.path().join("signals.csv");

    let mut file = std::fs::File::create(&signals_path).unwrap();
    writeln!(file, "code,date,close,trend_flag,condition_count,up_down_ratio").unwrap();
    writeln!(file, "9984,2021-01-04,50.0,1,6,1.5").unwrap();
    writeln!(file, "9984,2021-01-05,55.0,0,3,0.4").unwrap();
    writeln!(file, "7203,2021-01-04,10.0,1,5,1.0").unwrap();
    writeln!(file, "7203,2021-01-05,12.0,1,4,1.0").unwrap();
    drop(file);

    let run_once = || {
        let bars = load_signal_csv(&signals_path).unwrap();
        let data = group_by_code(&bars);
        let config = RunConfig::default();
        let rule = RuleKind::TrendAndCount.build();
        let result = Runner::new(&config).run(rule.as_ref(), &data);

        let path = dir.path().join(format!("returns-{}.csv", std::process::id()));
        save_returns_csv(&result.returns, &path).unwrap();
        std::fs::read(&path).unwrap()
    };

    assert_eq!(run_once(), run_once());
}
