use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, Timelike};

use benchkit::args::Command;

/// Fresh directory for the charts of one run, below `base`.
pub(super) fn chart_run_dir(base: &Path, command: Command) -> PathBuf {
    base.join(chart_run_dir_name(command))
}

fn chart_run_dir_name(command: Command) -> String {
    let now = Local::now();
    let stamp = format!(
        "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    );
    format!("run-{}_{}", stamp, command_segment(command))
}

const fn command_segment(command: Command) -> &'static str {
    match command {
        Command::Time => "time",
        Command::Memory => "memory",
    }
}
