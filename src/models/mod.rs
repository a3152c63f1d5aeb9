mod metrics;
mod nlq;

pub use metrics::*;
pub use nlq::*;
