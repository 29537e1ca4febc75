//! # Replenishment Simulation
//!
//! 逐期模擬驅動：基準規劃後依實際銷售逐期修正

pub mod scenario;
pub mod simulation;

// Re-export 主要類型
pub use scenario::Scenario;
pub use simulation::{Simulation, SimulationReport, SimulationStep};
