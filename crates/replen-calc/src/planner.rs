//! 靜態補貨規劃

use replen_core::{DemandSeries, OrderPlan, PolicyConfig, ReplenError, StockTrajectory};
use rust_decimal::Decimal;

use crate::policy::{policy_for, PlanAction, PlanningStep};
use crate::{PlanOutcome, PlanWarning};

/// 靜態規劃器：只依歷史需求產生基準訂購計劃
pub struct StaticPlanner;

impl StaticPlanner {
    /// 產生基準訂購計劃與其對應的庫存軌跡
    ///
    /// 每期訂購量先設為 `order_size`，再逐期（最後一期除外）以下一期需求
    /// 檢查缺貨或過剩並修正。全部期別完成後統一套用最終約束，
    /// 庫存軌跡依最終計劃重新推算。
    pub fn plan(
        demand: &DemandSeries,
        initial_stock: Decimal,
        config: &PolicyConfig,
    ) -> replen_core::Result<PlanOutcome> {
        config.validate()?;

        let periods = demand.len();
        if periods < 2 {
            // 至少需要兩期才有「下一期」可供前瞻
            return Err(ReplenError::IndexOutOfRange {
                index: 2,
                len: periods,
            });
        }

        tracing::info!(
            "開始靜態規劃：{} 期，期初庫存 {}，策略 {:?}",
            periods,
            initial_stock,
            config.policy
        );

        let policy = policy_for(config.policy);
        let demand_values = demand.as_slice();
        let mut orders = vec![config.order_size; periods];
        let mut stock = StockTrajectory::starting_at(initial_stock)?;
        let mut warnings = Vec::new();

        for idx in 0..periods - 1 {
            let step = PlanningStep {
                stock: stock.current(),
                order: orders[idx],
                demand: demand_values[idx],
                next_demand: demand_values[idx + 1],
            };

            let decision = policy.plan_period(&step, config);
            let period = idx + 1;

            tracing::debug!(
                "第 {} 期: 庫存 {}, 需求 {}, 下期需求 {}, 訂購 {} → {} ({:?})",
                period,
                step.stock,
                step.demand,
                step.next_demand,
                step.order,
                decision.quantity,
                decision.action
            );

            if decision.action == PlanAction::CappedAtMax {
                tracing::warn!(
                    "第 {} 期缺貨無法完全補足：訂購量受限於最大持有庫存 {}",
                    period,
                    config.max_stock_held
                );
                warnings.push(PlanWarning::warning(
                    period,
                    format!("訂購量受限於最大持有庫存 {}", config.max_stock_held),
                ));
            }

            orders[idx] = decision.quantity;
            stock.advance(orders[idx], demand_values[idx]);
        }

        let mut plan = OrderPlan::new(orders);
        plan.map_in_place(|period, quantity| {
            let constrained = policy.constrain_final(quantity, config);
            if constrained != quantity {
                warnings.push(PlanWarning::info(
                    period,
                    format!("最終約束調整訂購量 {} → {}", quantity, constrained),
                ));
            }
            constrained
        });

        let stock = StockTrajectory::project(initial_stock, plan.as_slice(), demand_values)?;

        tracing::info!(
            "靜態規劃完成：總訂購量 {}，最低庫存 {}，警告 {} 筆",
            plan.total(),
            stock.min_level(),
            warnings.len()
        );

        Ok(PlanOutcome {
            orders: plan,
            stock,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replen_core::ReplenishmentPolicy;
    use rstest::rstest;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn units(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(Decimal::from).collect()
    }

    fn config(policy: ReplenishmentPolicy) -> PolicyConfig {
        PolicyConfig::new(d(20))
            .with_min_order_size(d(5))
            .with_max_stock_held(d(70))
            .with_buffer_stock(d(5))
            .with_policy(policy)
    }

    #[test]
    fn test_batch_size_raises_ahead_of_spike() {
        let demand = DemandSeries::from_units([10, 10, 20, 10]).unwrap();
        let outcome =
            StaticPlanner::plan(&demand, d(20), &config(ReplenishmentPolicy::BatchSize)).unwrap();

        // 第 1 期過剩減量，第 2 期維持以迎接第 3 期的需求高峰
        assert_eq!(outcome.orders.as_slice(), units(&[5, 20, 10, 20]).as_slice());
        assert!(outcome.orders.get(2).unwrap() > outcome.orders.get(1).unwrap());
        assert!(outcome.orders.get(2).unwrap() > outcome.orders.get(3).unwrap());
        assert_eq!(outcome.stock.as_slice(), units(&[20, 15, 25, 15]).as_slice());
        assert!(outcome.warnings.is_empty());
        assert!(!outcome.has_warnings());
    }

    #[test]
    fn test_order_frequency_multiples() {
        let demand = DemandSeries::from_units([10, 10, 20, 10]).unwrap();
        let outcome =
            StaticPlanner::plan(&demand, d(20), &config(ReplenishmentPolicy::OrderFrequency))
                .unwrap();

        // 第 3 期原本減為 0，最終約束提升到區間內最小的倍數 20
        assert_eq!(outcome.orders.as_slice(), units(&[20, 20, 20, 20]).as_slice());
        assert!(outcome
            .orders
            .iter()
            .all(|q| (*q % d(20)).is_zero() && *q >= Decimal::ZERO));
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].period, 3);
        // 最終約束只產生提示訊息
        assert!(!outcome.has_warnings());
    }

    #[test]
    fn test_shortage_capped_warning() {
        let demand = DemandSeries::from_units([10, 100, 10]).unwrap();
        let outcome =
            StaticPlanner::plan(&demand, d(0), &config(ReplenishmentPolicy::BatchSize)).unwrap();

        assert_eq!(outcome.orders.get(1).unwrap(), d(70));
        assert!(outcome.has_warnings());
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.period == 1 && w.severity == crate::WarningSeverity::Warning));
    }

    #[test]
    fn test_last_period_keeps_order_size() {
        let demand = DemandSeries::from_units([0, 0, 0]).unwrap();
        let outcome = StaticPlanner::plan(
            &demand,
            d(100),
            &config(ReplenishmentPolicy::BatchSize),
        )
        .unwrap();

        assert_eq!(outcome.orders.get(3).unwrap(), d(20));
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![10])]
    fn test_series_too_short(#[case] values: Vec<i64>) {
        let demand = DemandSeries::from_units(values).unwrap();
        let result = StaticPlanner::plan(&demand, d(20), &config(ReplenishmentPolicy::BatchSize));

        assert!(matches!(result, Err(ReplenError::IndexOutOfRange { .. })));
    }

    #[rstest]
    #[case(ReplenishmentPolicy::BatchSize)]
    #[case(ReplenishmentPolicy::OrderFrequency)]
    fn test_invalid_configuration(#[case] policy: ReplenishmentPolicy) {
        let demand = DemandSeries::from_units([10, 10]).unwrap();
        let bad = PolicyConfig {
            order_size: Decimal::ZERO,
            ..config(policy)
        };

        assert!(matches!(
            StaticPlanner::plan(&demand, d(20), &bad),
            Err(ReplenError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_negative_initial_stock() {
        let demand = DemandSeries::from_units([10, 10]).unwrap();
        let result = StaticPlanner::plan(&demand, d(-1), &config(ReplenishmentPolicy::BatchSize));

        assert!(matches!(result, Err(ReplenError::InvalidQuantity(_))));
    }

    mod property_tests {
        use super::*;
        use crate::constraint::is_non_negative_multiple;
        use proptest::prelude::*;

        fn scenario() -> impl Strategy<Value = (Vec<i64>, i64, i64, i64, i64, i64)> {
            (
                prop::collection::vec(0i64..120, 2..16),
                0i64..100, // 期初庫存
                1i64..30,  // order_size
                0i64..25,  // min_order_size
                0i64..150, // max 額外區間
                0i64..20,  // buffer
            )
        }

        fn build(
            order_size: i64,
            min: i64,
            extra: i64,
            buffer: i64,
            policy: ReplenishmentPolicy,
        ) -> PolicyConfig {
            // 區間長度至少一個 order_size，保證區間內有倍數
            PolicyConfig::new(d(order_size))
                .with_min_order_size(d(min))
                .with_max_stock_held(d(min + order_size + extra))
                .with_buffer_stock(d(buffer))
                .with_policy(policy)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn test_batch_size_orders_within_bounds(
                (values, initial, order_size, min, extra, buffer) in scenario()
            ) {
                let config = build(order_size, min, extra, buffer, ReplenishmentPolicy::BatchSize);
                let demand = DemandSeries::from_units(values).unwrap();
                let outcome = StaticPlanner::plan(&demand, d(initial), &config).unwrap();

                prop_assert_eq!(outcome.orders.len(), demand.len());
                for q in outcome.orders.iter() {
                    prop_assert!(*q >= config.min_order_size && *q <= config.max_stock_held);
                }
                prop_assert!(outcome.stock.min_level() >= Decimal::ZERO);
            }

            #[test]
            fn test_order_frequency_orders_are_multiples(
                (values, initial, order_size, min, extra, buffer) in scenario()
            ) {
                let config = build(order_size, min, extra, buffer, ReplenishmentPolicy::OrderFrequency);
                let demand = DemandSeries::from_units(values).unwrap();
                let outcome = StaticPlanner::plan(&demand, d(initial), &config).unwrap();

                for q in outcome.orders.iter() {
                    prop_assert!(is_non_negative_multiple(*q, config.order_size));
                    prop_assert!(*q >= config.min_order_size && *q <= config.max_stock_held);
                }
                prop_assert!(outcome.stock.min_level() >= Decimal::ZERO);
            }
        }
    }
}
