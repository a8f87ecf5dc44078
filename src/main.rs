#![allow(non_snake_case)]
use CompMathTasks::Utils::logger::{init_logger, parse_log_level, save_series_to_csv, series_file_name};
use CompMathTasks::Utils::task_parser::parse_task_file;
use CompMathTasks::tasks::{Task, TaskReport};
use clap::Parser;
use log::{error, info};
use simplelog::LevelFilter;
use std::error::Error;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style};

/// Runs the computational mathematics tasks and prints their results
#[derive(Parser, Debug)]
#[command(name = "compmath")]
#[command(version)]
struct Args {
    /// task file with one section per task; without it every task runs with its defaults
    task_file: Option<PathBuf>,
    /// directory for the csv files of the plotted series
    #[arg(long, value_name = "DIR")]
    csv: Option<PathBuf>,
    /// debug, info, warn, error or off
    #[arg(long, value_name = "LEVEL", default_value = "warn", value_parser = log_level)]
    log: LevelFilter,
    /// directory for a timestamped log file
    #[arg(long, value_name = "DIR")]
    log_file: Option<PathBuf>,
}

fn log_level(level: &str) -> Result<LevelFilter, String> {
    parse_log_level(level)
        .ok_or_else(|| format!("loglevel must be debug, info, warn or error, got {}", level))
}

/// tasks of the task file in numeric order, or all tasks with defaults
fn load_tasks(task_file: Option<&PathBuf>) -> Result<Vec<Task>, Box<dyn Error>> {
    let Some(path) = task_file else {
        return Ok(Task::all());
    };
    let document = parse_task_file(path)?;
    let mut tasks = document
        .iter()
        .map(|(title, section)| Task::from_section(title, section))
        .collect::<Result<Vec<Task>, _>>()?;
    tasks.sort_by_key(|t| t.key());
    info!("{} tasks read from {}", tasks.len(), path.display());
    Ok(tasks)
}

fn print_report(report: &TaskReport) {
    let mut builder = Builder::default();
    builder.push_record(["quantity", "value"]);
    for (label, value) in &report.rows {
        builder.push_record([label.clone(), value.to_string()]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    println!("\n{}\n{}", report.title, table);
}

fn save_report(report: &TaskReport, dir: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    for series in &report.series {
        let path = dir.join(series_file_name(&report.key, &series.name));
        save_series_to_csv(&series.points, (series.x_label.as_str(), series.y_label.as_str()), &path)?;
        info!("series '{}' saved to {}", series.name, path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if let Some(path) = init_logger(args.log, args.log_file.as_deref())? {
        info!("logging to {}", path.display());
    }
    let tasks = load_tasks(args.task_file.as_ref())?;

    let mut failed = 0;
    for task in &tasks {
        match task.calculate() {
            Ok(report) => {
                print_report(&report);
                if let Some(dir) = &args.csv {
                    save_report(&report, dir)?;
                }
            }
            Err(e) => {
                failed += 1;
                error!("{} failed: {}", task, e);
                println!("\n{}\nerror: {}", task, e);
            }
        }
    }
    if failed > 0 {
        return Err(format!("{} of {} tasks failed", failed, tasks.len()).into());
    }
    Ok(())
}
