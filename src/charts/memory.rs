use std::path::Path;

use plotters::prelude::*;

use crate::error::ChartError;
use crate::mem::MemStats;
use crate::result::MemResult;

use super::{CHART_SIZE, Palette, ensure_parent_dir, y_max};

/// Per-step mean values of a memory chart, in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySeries {
    pub allocated: Vec<u64>,
    pub sys: Vec<u64>,
    pub effective: Vec<u64>,
}

#[must_use]
pub fn memory_series(result: &MemResult) -> MemorySeries {
    let avg = |pick: fn(&MemStats) -> u64| -> Vec<u64> {
        result.each.iter().map(|step| pick(&step.avg)).collect()
    };
    MemorySeries {
        allocated: avg(|mem| mem.allocated),
        sys: avg(|mem| mem.sys),
        effective: avg(MemStats::effective),
    }
}

/// Plot mean memory counters per step: bytes allocated, bytes reserved from
/// the operating system and effective consumption.
///
/// # Errors
///
/// Returns an error when the result has no steps, the output directory
/// cannot be created, or drawing fails.
pub fn plot_memory(
    result: &MemResult,
    title: &str,
    x_label: &str,
    path: &Path,
) -> Result<(), ChartError> {
    if result.each.is_empty() {
        return Err(ChartError::NoSteps);
    }
    ensure_parent_dir(path)?;
    let series = memory_series(result);
    let steps = result.each.len() as u64;
    let top = y_max([
        series.allocated.as_slice(),
        series.sys.as_slice(),
        series.effective.as_slice(),
    ]);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(90)
        .build_cartesian_2d(0u64..steps, 0u64..top)?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Memory usage (bytes)")
        .draw()?;

    let mut palette = Palette::dark();
    let lines: [(&str, &[u64]); 3] = [
        ("current heap size", &series.allocated),
        ("memory reserved from OS", &series.sys),
        ("effective memory consumption", &series.effective),
    ];
    for (label, values) in lines {
        let color = palette.pick();
        chart
            .draw_series(LineSeries::new(
                (0u64..).zip(values.iter().copied()),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color)
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;
    root.present()?;
    Ok(())
}
