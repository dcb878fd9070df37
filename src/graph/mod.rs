pub mod overlap;

pub use overlap::OverlapGraph;
