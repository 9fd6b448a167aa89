pub mod normalizer;

pub use normalizer::{normalize, Metric, RawStats};
