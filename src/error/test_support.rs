use super::{BenchError, ChartError};

impl From<&'static str> for BenchError {
    fn from(message: &'static str) -> Self {
        BenchError::TestExpectation { message }
    }
}

impl From<&'static str> for ChartError {
    fn from(message: &'static str) -> Self {
        ChartError::TestExpectation { message }
    }
}
