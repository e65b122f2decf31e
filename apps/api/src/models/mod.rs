// Row types and status lifecycles for the three coordinated populations
// plus the match records the engine materializes between them.

pub mod candidate;
pub mod matching;
pub mod organization;
pub mod posting;
