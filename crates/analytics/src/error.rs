use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Cannot compute statistics of an empty sample: {0}")]
    EmptySample(String),

    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Both samples have zero variance; the t statistic is undefined")]
    ZeroVariance,

    #[error(transparent)]
    Core(#[from] core_types::CoreError),

    #[error(transparent)]
    Analyzer(#[from] analyzer::AnalyzerError),
}
