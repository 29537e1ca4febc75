//! 需求序列模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{period_index, ReplenError, Result};

/// 歷史需求序列（每期一筆，期別由 1 起算）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Decimal>", into = "Vec<Decimal>")]
pub struct DemandSeries {
    values: Vec<Decimal>,
}

impl DemandSeries {
    /// 創建新的需求序列，拒絕負數需求
    pub fn new(values: Vec<Decimal>) -> Result<Self> {
        if let Some((idx, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| **v < Decimal::ZERO)
        {
            return Err(ReplenError::InvalidQuantity(format!(
                "第 {} 期需求為負數: {}",
                idx + 1,
                value
            )));
        }
        Ok(Self { values })
    }

    /// 由整數需求創建
    pub fn from_units<I>(units: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        Self::new(units.into_iter().map(Decimal::from).collect())
    }

    /// 期數
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 取得第 `period` 期需求（1 起算）
    pub fn get(&self, period: usize) -> Result<Decimal> {
        let idx = period_index(period, self.values.len())?;
        Ok(self.values[idx])
    }

    /// 以 0 起算的切片檢視
    pub fn as_slice(&self) -> &[Decimal] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decimal> {
        self.values.iter()
    }

    /// 總需求
    pub fn total(&self) -> Decimal {
        self.values.iter().copied().sum()
    }
}

impl TryFrom<Vec<Decimal>> for DemandSeries {
    type Error = ReplenError;

    fn try_from(values: Vec<Decimal>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<DemandSeries> for Vec<Decimal> {
    fn from(series: DemandSeries) -> Self {
        series.values
    }
}
