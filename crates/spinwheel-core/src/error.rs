use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("wheel has no segments")]
    EmptyWheel,

    #[error("segment {0} has an empty label and is not the special prize")]
    UnlabeledSegment(usize),

    #[error("segments {first} and {second} are both marked as the special prize")]
    MultipleSpecialPrizes { first: usize, second: usize },

    #[error("special prize segment {0} has an empty prize marker")]
    EmptyPrizeMarker(usize),

    #[error("invalid spin range: {min}..={max} degrees")]
    InvalidSpinRange { min: f64, max: f64 },

    #[error("config error: {0}")]
    Config(String),
}
