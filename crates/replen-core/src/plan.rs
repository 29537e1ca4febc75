//! 訂購計劃模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{period_index, Result};

/// 訂購計劃（每期一筆訂購量，期別由 1 起算）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderPlan {
    orders: Vec<Decimal>,
}

impl OrderPlan {
    /// 由既有訂購量創建
    pub fn new(orders: Vec<Decimal>) -> Self {
        Self { orders }
    }

    /// 創建每期訂購量相同的計劃
    pub fn uniform(periods: usize, quantity: Decimal) -> Self {
        Self {
            orders: vec![quantity; periods],
        }
    }

    /// 期數
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// 取得第 `period` 期訂購量（1 起算）
    pub fn get(&self, period: usize) -> Result<Decimal> {
        let idx = period_index(period, self.orders.len())?;
        Ok(self.orders[idx])
    }

    /// 設置第 `period` 期訂購量（1 起算）
    pub fn set(&mut self, period: usize, quantity: Decimal) -> Result<()> {
        let idx = period_index(period, self.orders.len())?;
        self.orders[idx] = quantity;
        Ok(())
    }

    /// 建構器模式：回傳只改動單一期別的新計劃
    pub fn with_order(mut self, period: usize, quantity: Decimal) -> Result<Self> {
        self.set(period, quantity)?;
        Ok(self)
    }

    pub fn as_slice(&self) -> &[Decimal] {
        &self.orders
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Decimal] {
        &mut self.orders
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decimal> {
        self.orders.iter()
    }

    /// 總訂購量
    pub fn total(&self) -> Decimal {
        self.orders.iter().copied().sum()
    }

    /// 對每期訂購量套用轉換（供最終約束使用）
    pub fn map_in_place<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, Decimal) -> Decimal,
    {
        for (idx, order) in self.as_mut_slice().iter_mut().enumerate() {
            *order = f(idx + 1, *order);
        }
    }

    /// 與另一份計劃比較，列出不同的期別（1 起算）
    pub fn diff_periods(&self, other: &OrderPlan) -> Vec<usize> {
        self.orders
            .iter()
            .zip(other.orders.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, _)| idx + 1)
            .collect()
    }
}

impl From<Vec<Decimal>> for OrderPlan {
    fn from(orders: Vec<Decimal>) -> Self {
        Self::new(orders)
    }
}
