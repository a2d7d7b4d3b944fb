//! Model engine errors.

use effortmd_types::{CostDriver, Rating};
use thiserror::Error;

/// Fatal estimation failures. None of these are transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CocomoError {
    #[error("effective size must be a positive, finite KLOC value, got {kloc}")]
    InvalidSize { kloc: f64 },

    #[error(
        "unknown rating '{rating}' for cost driver {driver}; expected one of \
         very_low, low, nominal, high, very_high, extra_high"
    )]
    UnknownDriverRating { driver: String, rating: String },

    #[error("unknown cost driver '{name}'")]
    UnknownDriver { name: String },

    #[error("rating '{rating}' is not defined for cost driver {driver}")]
    UndefinedRating { driver: CostDriver, rating: Rating },

    #[error("degenerate schedule {schedule} months for effort {effort} person-months")]
    DegenerateSchedule { effort: f64, schedule: f64 },
}
