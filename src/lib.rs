//! # Replenish
//!
//! 週期補貨模擬：靜態規劃、動態調整與逐期模擬

pub use replen_calc::{Adjustment, DynamicAdjuster, PlanOutcome, PlanWarning, StaticPlanner};
pub use replen_core::{
    DemandSeries, OrderPlan, PolicyConfig, ReplenError, ReplenishmentPolicy, Result,
    StockTrajectory,
};
pub use replen_sim::{Scenario, Simulation, SimulationReport, SimulationStep};
pub use rust_decimal::Decimal;
