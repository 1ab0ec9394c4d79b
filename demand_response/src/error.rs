use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemandResponseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DemandResponseError {
    /// Every hour is priced above the threshold, so there is nowhere to shift load to.
    #[error("no off-peak hours among {hours} hours, cannot spread shifted load")]
    NoOffPeakHours { hours: usize },

    #[error("consumption has {consumption} values but prices has {prices}")]
    LengthMismatch { consumption: usize, prices: usize },

    #[error("input series are empty")]
    EmptySeries,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
