//! # Replenishment Calculation Engine
//!
//! 靜態規劃與動態調整計算引擎

pub mod adjuster;
pub mod constraint;
pub mod planner;
pub mod policy;

// Re-export 主要類型
pub use adjuster::{Adjustment, DynamicAdjuster};
pub use planner::StaticPlanner;
pub use policy::{policy_for, BatchSizePolicy, OrderFrequencyPolicy, OrderPolicy};

use replen_core::{OrderPlan, StockTrajectory};
use serde::Serialize;

/// 靜態規劃結果
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    /// 基準訂購計劃
    pub orders: OrderPlan,

    /// 依基準計劃推算的庫存軌跡
    pub stock: StockTrajectory,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,
}

impl PlanOutcome {
    /// 是否有警告等級以上的訊息
    pub fn has_warnings(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Warning)
    }
}

/// 規劃警告
#[derive(Debug, Clone, Serialize)]
pub struct PlanWarning {
    /// 期別（1 起算）
    pub period: usize,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(period: usize, message: String, severity: WarningSeverity) -> Self {
        Self {
            period,
            message,
            severity,
        }
    }

    pub fn info(period: usize, message: String) -> Self {
        Self::new(period, message, WarningSeverity::Info)
    }

    pub fn warning(period: usize, message: String) -> Self {
        Self::new(period, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
