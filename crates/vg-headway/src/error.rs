use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeadwayError {
    #[error("flow rate {rate} v/h is below {floor} v/h, where the headway model is not valid")]
    BelowFloor { rate: f64, floor: f64 },

    #[error("flow rate must be a finite positive number, got {0}")]
    InvalidRate(f64),

    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),

    #[error("headway table error: {0}")]
    Table(String),
}

pub type HeadwayResult<T> = Result<T, HeadwayError>;
