mod alert;
mod level;
mod series;

pub use {
    alert::{AlertEvent, AlertKey},
    level::{Level, Pivot, PivotKind},
    series::CandleSeries,
};
