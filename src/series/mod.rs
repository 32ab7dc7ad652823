//! Pure series transforms: timeframe filtering and moving averages.

pub mod sma;
pub mod window;

pub use sma::sma;
pub use window::filter;
