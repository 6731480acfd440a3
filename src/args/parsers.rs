use super::types::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult};
use crate::stats::Percentile;

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_percentile(s: &str) -> AppResult<Percentile> {
    s.parse::<Percentile>().map_err(AppError::from)
}
