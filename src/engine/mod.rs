pub mod key_stats;
pub mod stats;
pub mod stopwatch;
