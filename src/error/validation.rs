use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Percentile must not be empty.")]
    PercentileEmpty,
    #[error("Invalid percentile '{value}'. Expected a number between 0 and 100.")]
    InvalidPercentileFormat { value: String },
    #[error("Invalid percentile '{value}': {source}")]
    InvalidPercentileNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Percentile '{value}' has more than two decimal places.")]
    PercentileTooPrecise { value: String },
    #[error("Percentile {hundredths} (in hundredths) is above 100.")]
    PercentileOutOfRange { hundredths: u64 },
    #[error("Value must be >= 1.")]
    MustBePositive,
    #[error("Invalid number '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
