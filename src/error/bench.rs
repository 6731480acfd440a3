use thiserror::Error;

/// Errors raised by the instrumentation kit and its probes.
///
/// `Domain` and `Sequencing` are caller programming errors: a wrong step id or
/// a missing probe call silently invalidates that step's statistics, so they
/// are surfaced immediately instead of being recorded.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Step id {id} is outside the kit's step domain [0, {n}).")]
    Domain { id: usize, n: usize },
    #[error("After({id}) called without a matching Before({id}).")]
    Sequencing { id: usize },
    #[error("Cannot {operation} while the kit is {state}.")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
}

pub type BenchResult<T> = Result<T, BenchError>;
