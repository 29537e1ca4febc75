//! 補貨策略實現
//!
//! 兩種策略共用同一組操作：靜態規劃時修正單期訂購量、
//! 動態調整時回應銷售偏差，以及各自的約束規則。

use std::fmt::Debug;

use replen_core::{PolicyConfig, ReplenishmentPolicy};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::constraint::{
    batches_to_cover, clamp_to_bounds, clamp_to_multiples, round_to_multiple, whole_batches_in,
};

/// 靜態規劃單期的輸入
#[derive(Debug, Clone, Copy)]
pub struct PlanningStep {
    /// 本期期初庫存
    pub stock: Decimal,
    /// 本期目前訂購量
    pub order: Decimal,
    /// 本期需求
    pub demand: Decimal,
    /// 下一期需求
    pub next_demand: Decimal,
}

impl PlanningStep {
    /// 本期結束時的預計庫存
    pub fn expected_stock(&self) -> Decimal {
        self.stock + self.order - self.demand
    }
}

/// 動態調整單期的輸入
#[derive(Debug, Clone, Copy)]
pub struct SalesSignal {
    /// 歷史需求（趨勢）
    pub historical: Decimal,
    /// 實際銷售
    pub observed: Decimal,
    /// 目前訂購量
    pub order: Decimal,
    /// 本期實際期初庫存
    pub stock: Decimal,
}

impl SalesSignal {
    /// 偏差絕對值
    pub fn deviation(&self) -> Decimal {
        (self.observed - self.historical).abs()
    }

    /// 銷售是否高於趨勢
    pub fn above_trend(&self) -> bool {
        self.observed > self.historical
    }
}

/// 單期規劃動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanAction {
    /// 不需調整
    Unchanged,
    /// 因下一期缺貨而加量
    Raised,
    /// 加量後觸及最大持有庫存
    CappedAtMax,
    /// 因庫存過剩而減量
    Reduced,
}

/// 單期規劃結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDecision {
    pub quantity: Decimal,
    pub action: PlanAction,
}

impl PeriodDecision {
    fn new(quantity: Decimal, action: PlanAction) -> Self {
        Self { quantity, action }
    }
}

/// 補貨策略
pub trait OrderPolicy: Debug + Send + Sync {
    /// 對應的配置選項
    fn kind(&self) -> ReplenishmentPolicy;

    /// 靜態規劃：依下一期需求修正本期訂購量
    fn plan_period(&self, step: &PlanningStep, config: &PolicyConfig) -> PeriodDecision;

    /// 動態調整：偏差超過門檻後的建議訂購量（未約束）
    fn react(&self, signal: &SalesSignal, config: &PolicyConfig) -> Decimal;

    /// 動態調整後的約束
    fn constrain_adjusted(&self, quantity: Decimal, config: &PolicyConfig) -> Decimal;

    /// 計劃完成後的最終約束
    fn constrain_final(&self, quantity: Decimal, config: &PolicyConfig) -> Decimal;
}

/// 依配置取得策略
pub fn policy_for(kind: ReplenishmentPolicy) -> &'static dyn OrderPolicy {
    match kind {
        ReplenishmentPolicy::BatchSize => &BatchSizePolicy,
        ReplenishmentPolicy::OrderFrequency => &OrderFrequencyPolicy,
    }
}

/// 批量調整策略：固定下單節奏，調整每張訂單的數量
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSizePolicy;

impl OrderPolicy for BatchSizePolicy {
    fn kind(&self) -> ReplenishmentPolicy {
        ReplenishmentPolicy::BatchSize
    }

    fn plan_period(&self, step: &PlanningStep, config: &PolicyConfig) -> PeriodDecision {
        let expected = step.expected_stock();

        if expected < step.next_demand {
            let shortage = (step.next_demand - step.stock) + config.buffer_stock;
            let wanted = step.order + shortage;
            if wanted > config.max_stock_held {
                return PeriodDecision::new(config.max_stock_held, PlanAction::CappedAtMax);
            }
            return PeriodDecision::new(wanted, PlanAction::Raised);
        }

        let ceiling = step.next_demand + config.buffer_stock;
        if expected > ceiling {
            let excess = expected - ceiling;
            let reduced = (step.order - excess).max(config.min_order_size);
            return PeriodDecision::new(reduced, PlanAction::Reduced);
        }

        PeriodDecision::new(step.order, PlanAction::Unchanged)
    }

    fn react(&self, signal: &SalesSignal, _config: &PolicyConfig) -> Decimal {
        if signal.above_trend() {
            signal.order + signal.deviation()
        } else {
            signal.order - signal.deviation()
        }
    }

    fn constrain_adjusted(&self, quantity: Decimal, config: &PolicyConfig) -> Decimal {
        clamp_to_bounds(quantity, config.min_order_size, config.max_stock_held)
    }

    fn constrain_final(&self, quantity: Decimal, config: &PolicyConfig) -> Decimal {
        clamp_to_bounds(quantity, config.min_order_size, config.max_stock_held)
    }
}

/// 頻率調整策略：每張訂單固定為 `order_size`，調整下單張數
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFrequencyPolicy;

impl OrderPolicy for OrderFrequencyPolicy {
    fn kind(&self) -> ReplenishmentPolicy {
        ReplenishmentPolicy::OrderFrequency
    }

    fn plan_period(&self, step: &PlanningStep, config: &PolicyConfig) -> PeriodDecision {
        let unit = config.order_size;
        let mut order = step.order;
        let mut expected = step.expected_stock();
        let mut action = PlanAction::Unchanged;

        let extra = batches_to_cover(step.next_demand - expected, unit) * unit;
        if extra > Decimal::ZERO {
            order += extra;
            expected += extra;
            action = PlanAction::Raised;
        }

        let ceiling = step.next_demand + config.buffer_stock;
        let surplus = whole_batches_in(expected - ceiling, unit) * unit;
        if surplus > Decimal::ZERO {
            order = (order - surplus).max(Decimal::ZERO);
            action = PlanAction::Reduced;
        }

        PeriodDecision::new(order, action)
    }

    fn react(&self, signal: &SalesSignal, config: &PolicyConfig) -> Decimal {
        let unit = config.order_size;
        let expected = signal.stock + signal.order - signal.observed;

        if signal.above_trend() {
            signal.order + batches_to_cover(signal.historical - expected, unit) * unit
        } else {
            let cut = batches_to_cover(expected - signal.historical, unit) * unit;
            (signal.order - cut).max(Decimal::ZERO)
        }
    }

    fn constrain_adjusted(&self, quantity: Decimal, config: &PolicyConfig) -> Decimal {
        round_to_multiple(quantity, config.order_size)
    }

    fn constrain_final(&self, quantity: Decimal, config: &PolicyConfig) -> Decimal {
        clamp_to_multiples(
            quantity,
            config.order_size,
            config.min_order_size,
            config.max_stock_held,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn config() -> PolicyConfig {
        PolicyConfig::new(d(20))
            .with_min_order_size(d(5))
            .with_max_stock_held(d(70))
            .with_buffer_stock(d(5))
    }

    fn step(stock: i64, order: i64, demand: i64, next_demand: i64) -> PlanningStep {
        PlanningStep {
            stock: d(stock),
            order: d(order),
            demand: d(demand),
            next_demand: d(next_demand),
        }
    }

    #[test]
    fn test_policy_for() {
        assert_eq!(
            policy_for(ReplenishmentPolicy::BatchSize).kind(),
            ReplenishmentPolicy::BatchSize
        );
        assert_eq!(
            policy_for(ReplenishmentPolicy::OrderFrequency).kind(),
            ReplenishmentPolicy::OrderFrequency
        );
    }

    #[test]
    fn test_batch_size_shortage() {
        // 預計庫存 5 + 20 - 10 = 15 < 30，缺口 = (30 - 5) + 5 = 30
        let decision = BatchSizePolicy.plan_period(&step(5, 20, 10, 30), &config());

        assert_eq!(decision, PeriodDecision::new(d(50), PlanAction::Raised));
    }

    #[test]
    fn test_batch_size_shortage_capped() {
        let decision = BatchSizePolicy.plan_period(&step(0, 20, 10, 80), &config());

        assert_eq!(decision, PeriodDecision::new(d(70), PlanAction::CappedAtMax));
    }

    #[test]
    fn test_batch_size_excess() {
        // 預計庫存 20 + 20 - 10 = 30 > 15，過剩 15
        let decision = BatchSizePolicy.plan_period(&step(20, 20, 10, 10), &config());

        assert_eq!(decision, PeriodDecision::new(d(5), PlanAction::Reduced));
    }

    #[test]
    fn test_batch_size_within_buffer() {
        let decision = BatchSizePolicy.plan_period(&step(15, 20, 10, 20), &config());

        assert_eq!(decision, PeriodDecision::new(d(20), PlanAction::Unchanged));
    }

    #[test]
    fn test_order_frequency_shortage() {
        // 預計庫存 0 + 20 - 10 = 10，需要補足到 45 → 2 批
        let decision = OrderFrequencyPolicy.plan_period(&step(0, 20, 10, 45), &config());

        assert_eq!(decision, PeriodDecision::new(d(60), PlanAction::Raised));
    }

    #[test]
    fn test_order_frequency_excess() {
        // 預計庫存 40 + 20 - 20 = 40 > 15，可扣 1 批
        let decision = OrderFrequencyPolicy.plan_period(&step(40, 20, 20, 10), &config());

        assert_eq!(decision, PeriodDecision::new(d(0), PlanAction::Reduced));
    }

    #[test]
    fn test_order_frequency_excess_floored_at_zero() {
        let decision = OrderFrequencyPolicy.plan_period(&step(200, 20, 0, 0), &config());

        assert_eq!(decision.quantity, Decimal::ZERO);
    }

    #[test]
    fn test_batch_size_react() {
        let mut signal = SalesSignal {
            historical: d(10),
            observed: d(60),
            order: d(20),
            stock: d(0),
        };
        assert_eq!(BatchSizePolicy.react(&signal, &config()), d(70));

        signal.observed = d(2);
        assert_eq!(BatchSizePolicy.react(&signal, &config()), d(12));
    }

    #[test]
    fn test_order_frequency_react() {
        let config = config();

        // 預計庫存 10 + 20 - 60 = -30，需補到 10 → 2 批
        let above = SalesSignal {
            historical: d(10),
            observed: d(60),
            order: d(20),
            stock: d(10),
        };
        assert_eq!(OrderFrequencyPolicy.react(&above, &config), d(60));

        // 預計庫存 50 + 40 - 0 = 90，需降到 10 → 4 批，下限 0
        let below = SalesSignal {
            historical: d(10),
            observed: d(0),
            order: d(40),
            stock: d(50),
        };
        assert_eq!(OrderFrequencyPolicy.react(&below, &config), d(0));
    }

    #[test]
    fn test_constraints() {
        let config = config();

        assert_eq!(BatchSizePolicy.constrain_adjusted(d(90), &config), d(70));
        assert_eq!(BatchSizePolicy.constrain_final(d(0), &config), d(5));

        // 動態調整只取整，不套用上下限
        assert_eq!(OrderFrequencyPolicy.constrain_adjusted(d(90), &config), d(80));
        assert_eq!(OrderFrequencyPolicy.constrain_final(d(0), &config), d(20));
        assert_eq!(OrderFrequencyPolicy.constrain_final(d(90), &config), d(60));
    }
}
