use plotters::prelude::{BitMapBackend, DrawingAreaErrorKind, DrawingBackend};
use std::path::PathBuf;
use thiserror::Error;

type PlottersError = DrawingAreaErrorKind<<BitMapBackend<'static> as DrawingBackend>::ErrorType>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to create chart directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Drawing failed: {source}")]
    Drawing {
        #[from]
        source: PlottersError,
    },
    #[error("Nothing to plot: the result has no steps.")]
    NoSteps,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
}
