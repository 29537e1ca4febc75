//! 補貨策略配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReplenError, Result};

/// 補貨策略參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// 名目批量（每張訂單的基本單位，必須 > 0）
    pub order_size: Decimal,

    /// 最小訂購量
    #[serde(default)]
    pub min_order_size: Decimal,

    /// 最大持有庫存（單期訂購上限）
    #[serde(default = "unbounded")]
    pub max_stock_held: Decimal,

    /// 緩衝庫存（預測需求之上額外保留的數量）
    #[serde(default)]
    pub buffer_stock: Decimal,

    /// 誤差門檻：實際銷售與歷史需求的偏差低於此值時不做動態調整
    #[serde(default)]
    pub max_error: Decimal,

    /// 補貨策略
    #[serde(default)]
    pub policy: ReplenishmentPolicy,
}

fn unbounded() -> Decimal {
    Decimal::MAX
}

impl PolicyConfig {
    /// 創建新的策略配置（預設為批量調整策略，無上下限）
    pub fn new(order_size: Decimal) -> Self {
        Self {
            order_size,
            min_order_size: Decimal::ZERO,
            max_stock_held: Decimal::MAX,
            buffer_stock: Decimal::ZERO,
            max_error: Decimal::ZERO,
            policy: ReplenishmentPolicy::BatchSize,
        }
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_min_order_size(mut self, qty: Decimal) -> Self {
        self.min_order_size = qty;
        self
    }

    /// 建構器模式：設置最大持有庫存
    pub fn with_max_stock_held(mut self, qty: Decimal) -> Self {
        self.max_stock_held = qty;
        self
    }

    /// 建構器模式：設置緩衝庫存
    pub fn with_buffer_stock(mut self, qty: Decimal) -> Self {
        self.buffer_stock = qty;
        self
    }

    /// 建構器模式：設置誤差門檻
    pub fn with_max_error(mut self, error: Decimal) -> Self {
        self.max_error = error;
        self
    }

    /// 建構器模式：設置補貨策略
    pub fn with_policy(mut self, policy: ReplenishmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 建構器模式：以布林旗標選擇策略
    ///
    /// # 參數
    /// * `adjust` - true 調整批量大小，false 調整訂購頻率
    ///
    /// # 範例
    /// ```
    /// # use replen_core::{PolicyConfig, ReplenishmentPolicy};
    /// # use rust_decimal::Decimal;
    /// let config = PolicyConfig::new(Decimal::from(20)).with_adjust_batch_size(false);
    /// assert_eq!(config.policy, ReplenishmentPolicy::OrderFrequency);
    /// ```
    pub fn with_adjust_batch_size(self, adjust: bool) -> Self {
        self.with_policy(ReplenishmentPolicy::from_adjust_batch_size(adjust))
    }

    /// 是否為批量調整策略
    pub fn adjusts_batch_size(&self) -> bool {
        self.policy == ReplenishmentPolicy::BatchSize
    }

    /// 檢查配置是否可用於模擬
    ///
    /// 訂購頻率策略只能以 `order_size` 的整數倍移動，
    /// 因此 `[min_order_size, max_stock_held]` 內至少要有一個倍數。
    pub fn validate(&self) -> Result<()> {
        if self.order_size <= Decimal::ZERO {
            return Err(ReplenError::InvalidConfiguration(format!(
                "order_size 必須大於 0，目前為 {}",
                self.order_size
            )));
        }

        for (name, value) in [
            ("min_order_size", self.min_order_size),
            ("buffer_stock", self.buffer_stock),
            ("max_error", self.max_error),
        ] {
            if value < Decimal::ZERO {
                return Err(ReplenError::InvalidConfiguration(format!(
                    "{} 不可為負數，目前為 {}",
                    name, value
                )));
            }
        }

        if self.min_order_size > self.max_stock_held {
            return Err(ReplenError::InvalidConfiguration(format!(
                "min_order_size ({}) 大於 max_stock_held ({})",
                self.min_order_size, self.max_stock_held
            )));
        }

        if self.policy == ReplenishmentPolicy::OrderFrequency {
            let lowest_multiple = self
                .min_order_size
                .checked_div(self.order_size)
                .and_then(|ratio| ratio.ceil().checked_mul(self.order_size))
                .ok_or_else(|| {
                    ReplenError::InvalidConfiguration(format!(
                        "order_size ({}) 相對 min_order_size ({}) 過小，倍數超出可表示範圍",
                        self.order_size, self.min_order_size
                    ))
                })?;
            if lowest_multiple > self.max_stock_held {
                return Err(ReplenError::InvalidConfiguration(format!(
                    "[{}, {}] 之間沒有 {} 的整數倍",
                    self.min_order_size, self.max_stock_held, self.order_size
                )));
            }
        }

        Ok(())
    }

    /// 從 JSON 字串讀取配置並驗證
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ReplenError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// 補貨策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReplenishmentPolicy {
    /// 批量調整 - 固定訂購節奏，調整每張訂單數量
    #[default]
    BatchSize,

    /// 頻率調整 - 固定每張訂單數量，調整下單張數
    OrderFrequency,
}

impl ReplenishmentPolicy {
    /// 由布林旗標轉換
    pub fn from_adjust_batch_size(adjust: bool) -> Self {
        if adjust {
            Self::BatchSize
        } else {
            Self::OrderFrequency
        }
    }
}
