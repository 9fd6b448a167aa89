pub mod sofascore;
pub mod traits;

pub use sofascore::SofascoreProvider;
pub use traits::StatsProvider;

#[cfg(test)]
pub use traits::MockStatsProvider;
