//! # Replenishment Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod inventory;
pub mod plan;

// Re-export 主要類型
pub use config::{PolicyConfig, ReplenishmentPolicy};
pub use demand::DemandSeries;
pub use inventory::StockTrajectory;
pub use plan::OrderPlan;

/// 補貨計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReplenError {
    #[error("無效的配置: {0}")]
    InvalidConfiguration(String),

    #[error("期別超出範圍: 第 {index} 期（共 {len} 期）")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("無效的數量: {0}")]
    InvalidQuantity(String),

    #[error("序列長度不符: 預期 {expected}，實際 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("情境資料錯誤: {0}")]
    Scenario(String),
}

pub type Result<T> = std::result::Result<T, ReplenError>;

/// 將 1 起算的期別轉為 0 起算的索引
pub(crate) fn period_index(period: usize, len: usize) -> Result<usize> {
    if period == 0 || period > len {
        return Err(ReplenError::IndexOutOfRange { index: period, len });
    }
    Ok(period - 1)
}
