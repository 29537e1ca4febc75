//! 動態訂購調整

use replen_core::{DemandSeries, OrderPlan, PolicyConfig, ReplenError};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::policy::{policy_for, SalesSignal};

/// 單期調整記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    /// 期別（1 起算）
    pub period: usize,
    /// 歷史需求
    pub historical: Decimal,
    /// 實際銷售
    pub observed: Decimal,
    /// 偏差絕對值
    pub deviation: Decimal,
    /// 偏差是否達到誤差門檻
    pub triggered: bool,
    /// 調整前訂購量
    pub before: Decimal,
    /// 約束前的建議訂購量
    pub proposed: Decimal,
    /// 約束後訂購量
    pub after: Decimal,
}

/// 動態調整器：依實際銷售修正單一期別的訂購量
pub struct DynamicAdjuster;

impl DynamicAdjuster {
    /// 回傳修正後的計劃，只有 `period`（1 起算）可能不同
    pub fn adjust(
        demand: &DemandSeries,
        observed_sales: Decimal,
        previous_plan: &OrderPlan,
        current_stock: Decimal,
        config: &PolicyConfig,
        period: usize,
    ) -> replen_core::Result<OrderPlan> {
        Self::adjust_with_report(
            demand,
            observed_sales,
            previous_plan,
            current_stock,
            config,
            period,
        )
        .map(|(plan, _)| plan)
    }

    /// 同 [`DynamicAdjuster::adjust`]，另回傳調整記錄
    ///
    /// `current_stock` 必須是該期在實際庫存軌跡上的值。
    pub fn adjust_with_report(
        demand: &DemandSeries,
        observed_sales: Decimal,
        previous_plan: &OrderPlan,
        current_stock: Decimal,
        config: &PolicyConfig,
        period: usize,
    ) -> replen_core::Result<(OrderPlan, Adjustment)> {
        config.validate()?;

        if previous_plan.len() != demand.len() {
            return Err(ReplenError::LengthMismatch {
                expected: demand.len(),
                actual: previous_plan.len(),
            });
        }
        if observed_sales < Decimal::ZERO {
            return Err(ReplenError::InvalidQuantity(format!(
                "第 {} 期實際銷售為負數: {}",
                period, observed_sales
            )));
        }
        if current_stock < Decimal::ZERO {
            return Err(ReplenError::InvalidQuantity(format!(
                "第 {} 期庫存為負數: {}",
                period, current_stock
            )));
        }

        let historical = demand.get(period)?;
        let before = previous_plan.get(period)?;
        let signal = SalesSignal {
            historical,
            observed: observed_sales,
            order: before,
            stock: current_stock,
        };

        let policy = policy_for(config.policy);
        let deviation = signal.deviation();
        let triggered = deviation >= config.max_error;

        let proposed = if triggered {
            policy.react(&signal, config)
        } else {
            before
        };
        let after = policy.constrain_adjusted(proposed, config);

        tracing::debug!(
            "第 {} 期動態調整: 歷史 {}, 實際 {}, 偏差 {}（門檻 {}）, 訂購 {} → {} → {}",
            period,
            historical,
            observed_sales,
            deviation,
            config.max_error,
            before,
            proposed,
            after
        );

        let plan = previous_plan.clone().with_order(period, after)?;
        let adjustment = Adjustment {
            period,
            historical,
            observed: observed_sales,
            deviation,
            triggered,
            before,
            proposed,
            after,
        };

        Ok((plan, adjustment))
    }
}
