use std::path::Path;

use plotters::prelude::*;

use crate::error::ChartError;
use crate::result::TimeResult;
use crate::stats::Percentile;

use super::{CHART_SIZE, Palette, ensure_parent_dir, y_max};

/// Per-step values of a time chart, in microseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeries {
    pub avg: Vec<u64>,
    pub min: Vec<u64>,
    pub max: Vec<u64>,
    pub markers: Vec<(Percentile, Vec<u64>)>,
}

fn micros(value: std::time::Duration) -> u64 {
    u64::try_from(value.as_micros()).unwrap_or(u64::MAX)
}

#[must_use]
pub fn time_series(result: &TimeResult, markers: &[Percentile]) -> TimeSeries {
    TimeSeries {
        avg: result.each.iter().map(|step| micros(step.avg)).collect(),
        min: result.each.iter().map(|step| micros(step.min)).collect(),
        max: result.each.iter().map(|step| micros(step.max)).collect(),
        markers: markers
            .iter()
            .map(|marker| {
                let values = result
                    .each
                    .iter()
                    .map(|step| micros(step.p(*marker)))
                    .collect();
                (*marker, values)
            })
            .collect(),
    }
}

/// Plot mean time per step, with the significant band's min/max as error
/// bars and one line per percentile marker.
///
/// # Errors
///
/// Returns an error when the result has no steps, the output directory
/// cannot be created, or drawing fails.
pub fn plot_time(
    result: &TimeResult,
    title: &str,
    x_label: &str,
    markers: &[Percentile],
    path: &Path,
) -> Result<(), ChartError> {
    if result.each.is_empty() {
        return Err(ChartError::NoSteps);
    }
    ensure_parent_dir(path)?;
    let series = time_series(result, markers);
    let steps = result.each.len() as u64;
    let top = y_max(
        [series.max.as_slice(), series.avg.as_slice()]
            .into_iter()
            .chain(series.markers.iter().map(|(_, values)| values.as_slice())),
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0u64..steps, 0u64..top)?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Time (us)")
        .draw()?;

    let mut dark = Palette::dark();
    let mut soft = Palette::soft();

    let bar_color = soft.pick();
    chart.draw_series(
        series
            .min
            .iter()
            .zip(series.avg.iter())
            .zip(series.max.iter())
            .zip(0u64..)
            .map(|(((min, avg), max), step)| {
                ErrorBar::new_vertical(step, *min, *avg, *max, bar_color.filled(), 6)
            }),
    )?;

    let avg_color = dark.pick();
    chart
        .draw_series(LineSeries::new(
            (0u64..).zip(series.avg.iter().copied()),
            avg_color.stroke_width(2),
        ))?
        .label("mean")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x.saturating_add(20), y)], avg_color)
        });

    for (marker, values) in &series.markers {
        let color = dark.pick();
        chart
            .draw_series(LineSeries::new(
                (0u64..).zip(values.iter().copied()),
                color,
            ))?
            .label(marker.to_string())
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
