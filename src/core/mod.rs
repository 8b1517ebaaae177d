pub mod aggregator;
pub mod cache;
pub mod classifier;
pub mod presence;
pub mod producer;
pub mod shift;
pub mod source;
pub mod status;
