//! Command implementations

pub mod advise;
pub mod simple;
pub mod simulate;

pub use advise::{AdviceResult, advise_hand};
pub use simple::run_simple;
pub use simulate::{MatchOutcome, SimulationConfig, SimulationResult, play_match, run_simulation};
