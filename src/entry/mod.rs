mod output;

use std::ffi::OsString;
use std::path::Path;

use clap::{CommandFactory, FromArgMatches};
use tracing::info;

use benchkit::args::{BenchArgs, Command};
use benchkit::config::{RunSettings, load_config, resolve_settings};
use benchkit::error::AppResult;

use crate::summary::{memory_lines, print_lines, time_lines};
use crate::workload::{run_memory, run_time};
use output::chart_run_dir;

pub(crate) fn run() -> AppResult<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(&args, config.as_ref())?;

    crate::logger::init_logging(&settings);
    if config.is_some() {
        info!("loaded configuration file");
    }

    execute(&settings)
}

fn parse_args() -> AppResult<Option<BenchArgs>> {
    let mut cmd = BenchArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    Ok(Some(BenchArgs::from_arg_matches(&matches)?))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--")
}

fn execute(settings: &RunSettings) -> AppResult<()> {
    let run_dir = settings
        .charts_path
        .as_deref()
        .map(|base| chart_run_dir(base, settings.command));

    match settings.command {
        Command::Time => {
            let results = run_time(settings)?;
            let result = results.get()?;
            print_lines(&time_lines(result, &settings.percentiles));
            if let Some(dir) = run_dir.as_deref() {
                let path = dir.join("time.png");
                benchkit::charts::plot_time(
                    result,
                    "Time per step",
                    "step",
                    &settings.percentiles,
                    &path,
                )?;
                report_chart(&path);
            }
        }
        Command::Memory => {
            let results = run_memory(settings)?;
            let result = results.get()?;
            print_lines(&memory_lines(result, &settings.percentiles));
            if let Some(dir) = run_dir.as_deref() {
                let path = dir.join("memory.png");
                benchkit::charts::plot_memory(result, "Memory per step", "step", &path)?;
                report_chart(&path);
            }
        }
    }
    Ok(())
}

fn report_chart(path: &Path) {
    info!("chart written to {}", path.display());
}
