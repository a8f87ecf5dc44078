use chrono::Local;
use csv::Writer;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// "debug" | "info" | "warn" | "error" | "off"
pub fn parse_log_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" | "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// Terminal logger, plus a file logger named log_<date>_<time>.txt in `log_dir` if given.
/// Returns the path of the log file. The global logger can be set once per process,
/// a second call fails with `SetLoggerError`.
pub fn init_logger(
    level: LevelFilter,
    log_dir: Option<&Path>,
) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    let mut log_path = None;
    if let Some(dir) = log_dir {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = dir.join(format!("log_{}.txt", date_and_time));
        loggers.push(WriteLogger::new(level, Config::default(), File::create(&path)?));
        log_path = Some(path);
    }
    CombinedLogger::init(loggers)?;
    Ok(log_path)
}

/// "Task 3: Jacobi Method", "x1" -> "task3_x1.csv"
pub fn series_file_name(task_key: &str, series: &str) -> String {
    let clean: String = series
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}_{}.csv", task_key, clean.trim_matches('_'))
}

/// Writes {x, y} pairs as a two column csv file with a header row
pub fn save_series_to_csv(
    points: &[(f64, f64)],
    headers: (&str, &str),
    filename: &Path,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record([headers.0, headers.1])?;
    for (x, y) in points {
        writer.write_record(&[x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
