// Domain types and value objects
mod candle;

pub use candle::{Candle, CandleType};
