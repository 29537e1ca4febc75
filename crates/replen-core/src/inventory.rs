//! 庫存軌跡模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{period_index, ReplenError, Result};

/// 每期期初庫存（期別由 1 起算，永不為負）
///
/// 遞推關係：`stock[i+1] = max(0, stock[i] + order[i] - consumption[i])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockTrajectory {
    levels: Vec<Decimal>,
}

impl StockTrajectory {
    /// 只含期初庫存的軌跡
    pub fn starting_at(initial_stock: Decimal) -> Result<Self> {
        if initial_stock < Decimal::ZERO {
            return Err(ReplenError::InvalidQuantity(format!(
                "期初庫存不可為負數: {}",
                initial_stock
            )));
        }
        Ok(Self {
            levels: vec![initial_stock],
        })
    }

    /// 依訂購量與消耗量推算完整軌跡
    ///
    /// 回傳長度等於 `orders` 的期數；最後一期之後的庫存不列入。
    pub fn project(
        initial_stock: Decimal,
        orders: &[Decimal],
        consumption: &[Decimal],
    ) -> Result<Self> {
        if orders.len() != consumption.len() {
            return Err(ReplenError::LengthMismatch {
                expected: consumption.len(),
                actual: orders.len(),
            });
        }

        let mut trajectory = Self::starting_at(initial_stock)?;
        let steps = orders.len().saturating_sub(1);
        for (order, used) in orders.iter().zip(consumption.iter()).take(steps) {
            trajectory.advance(*order, *used);
        }
        Ok(trajectory)
    }

    /// 單期庫存遞推
    pub fn next_level(stock: Decimal, order: Decimal, consumption: Decimal) -> Decimal {
        (stock + order - consumption).max(Decimal::ZERO)
    }

    /// 追加下一期期初庫存，回傳新的庫存水位
    pub fn advance(&mut self, order: Decimal, consumption: Decimal) -> Decimal {
        let next = Self::next_level(self.current(), order, consumption);
        self.levels.push(next);
        next
    }

    /// 最新一期的庫存
    pub fn current(&self) -> Decimal {
        self.levels.last().copied().unwrap_or(Decimal::ZERO)
    }

    /// 取得第 `period` 期期初庫存（1 起算）
    pub fn get(&self, period: usize) -> Result<Decimal> {
        let idx = period_index(period, self.levels.len())?;
        Ok(self.levels[idx])
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn as_slice(&self) -> &[Decimal] {
        &self.levels
    }

    /// 最低庫存水位
    pub fn min_level(&self) -> Decimal {
        self.levels.iter().copied().min().unwrap_or(Decimal::ZERO)
    }
}
