//! 模擬情境

use std::io::Read;

use replen_core::{DemandSeries, PolicyConfig, ReplenError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 一次模擬所需的全部輸入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// 歷史需求
    pub demand: DemandSeries,

    /// 實際銷售（可少於歷史需求期數）
    pub sales: DemandSeries,

    /// 期初庫存
    pub initial_stock: Decimal,

    /// 策略配置
    pub config: PolicyConfig,
}

impl Scenario {
    /// 從 JSON 字串讀取
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ReplenError::Scenario(e.to_string()))
    }

    /// 從任意讀取器讀取 JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| ReplenError::Scenario(e.to_string()))
    }
}
