pub mod candle;
pub mod fetch;
pub mod interval;
pub mod time;

pub use candle::Candle;
pub use fetch::*;
pub use interval::Interval;
pub use time::parse_date_millis;
