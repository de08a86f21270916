// Level detection and alerting algorithms
pub mod clustering;
pub mod pivots;
pub mod proximity;
pub mod qualifier;
pub mod volatility;

pub use {
    clustering::cluster_levels,
    pivots::find_pivots,
    proximity::{detect_approach, proximity_tolerance, stop_and_target},
    qualifier::qualify_levels,
    volatility::average_true_range,
};
