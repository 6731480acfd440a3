//! PNG charts of finished kit results.
mod memory;
mod palette;
mod time;


use std::path::Path;

use crate::error::ChartError;

pub use memory::{MemorySeries, memory_series, plot_memory};
pub use palette::Palette;
pub use time::{TimeSeries, plot_time, time_series};

/// Chart canvas size in pixels.
const CHART_SIZE: (u32, u32) = (1600, 600);

fn ensure_parent_dir(path: &Path) -> Result<(), ChartError> {
    let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(parent).map_err(|err| ChartError::CreateDir {
        path: parent.to_path_buf(),
        source: err,
    })
}

fn y_max<'a>(series: impl IntoIterator<Item = &'a [u64]>) -> u64 {
    series
        .into_iter()
        .flat_map(|values| values.iter().copied())
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
