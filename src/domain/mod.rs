pub mod live_match;
pub mod recommendation;
pub mod stats;
pub mod update;

pub use live_match::*;
pub use recommendation::*;
pub use stats::*;
pub use update::*;
