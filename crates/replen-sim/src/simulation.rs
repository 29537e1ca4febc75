//! 逐期模擬

use replen_calc::{Adjustment, DynamicAdjuster, PlanOutcome, StaticPlanner};
use replen_core::{
    DemandSeries, OrderPlan, PolicyConfig, ReplenError, Result, StockTrajectory,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::scenario::Scenario;

/// 單期模擬記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationStep {
    /// 期別（1 起算）
    pub period: usize,
    /// 期初庫存
    pub opening_stock: Decimal,
    /// 動態調整記錄
    pub adjustment: Adjustment,
    /// 期末庫存（下一期期初）
    pub closing_stock: Decimal,
}

/// 模擬狀態：計劃、實際庫存軌跡與目前期別
///
/// 每次 [`Simulation::step`] 只推進一期，期別嚴格遞增，
/// 動態調整一律使用該期在實際軌跡上的庫存。
#[derive(Debug, Clone)]
pub struct Simulation {
    demand: DemandSeries,
    sales: DemandSeries,
    config: PolicyConfig,
    baseline: PlanOutcome,
    plan: OrderPlan,
    stock: StockTrajectory,
    period: usize,
    history: Vec<SimulationStep>,
}

impl Simulation {
    /// 建立模擬並以靜態規劃產生基準計劃
    pub fn new(
        demand: DemandSeries,
        sales: DemandSeries,
        initial_stock: Decimal,
        config: PolicyConfig,
    ) -> Result<Self> {
        if sales.len() > demand.len() {
            return Err(ReplenError::LengthMismatch {
                expected: demand.len(),
                actual: sales.len(),
            });
        }

        let baseline = StaticPlanner::plan(&demand, initial_stock, &config)?;
        let stock = StockTrajectory::starting_at(initial_stock)?;

        tracing::info!(
            "建立模擬：{} 期歷史需求，{} 期實際銷售",
            demand.len(),
            sales.len()
        );

        Ok(Self {
            plan: baseline.orders.clone(),
            demand,
            sales,
            config,
            baseline,
            stock,
            period: 1,
            history: Vec::new(),
        })
    }

    /// 由情境建立
    pub fn from_scenario(scenario: Scenario) -> Result<Self> {
        Self::new(
            scenario.demand,
            scenario.sales,
            scenario.initial_stock,
            scenario.config,
        )
    }

    /// 下一個待處理的期別（1 起算）
    pub fn period(&self) -> usize {
        self.period
    }

    /// 實際銷售是否已全部處理
    pub fn is_finished(&self) -> bool {
        self.period > self.sales.len()
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn baseline(&self) -> &PlanOutcome {
        &self.baseline
    }

    /// 目前的訂購計劃
    pub fn plan(&self) -> &OrderPlan {
        &self.plan
    }

    /// 實際庫存軌跡
    pub fn stock(&self) -> &StockTrajectory {
        &self.stock
    }

    pub fn history(&self) -> &[SimulationStep] {
        &self.history
    }

    /// 推進一期；實際銷售用完時回傳 `None`
    pub fn step(&mut self) -> Result<Option<&SimulationStep>> {
        if self.is_finished() {
            return Ok(None);
        }

        let period = self.period;
        let observed = self.sales.get(period)?;
        let opening_stock = self.stock.current();

        let (plan, adjustment) = DynamicAdjuster::adjust_with_report(
            &self.demand,
            observed,
            &self.plan,
            opening_stock,
            &self.config,
            period,
        )?;

        let closing_stock = StockTrajectory::next_level(opening_stock, adjustment.after, observed);
        if period < self.demand.len() {
            self.stock.advance(adjustment.after, observed);
        }

        if adjustment.triggered {
            tracing::info!(
                "第 {} 期偏差 {} 觸發調整：訂購 {} → {}",
                period,
                adjustment.deviation,
                adjustment.before,
                adjustment.after
            );
        }

        self.plan = plan;
        self.period += 1;
        self.history.push(SimulationStep {
            period,
            opening_stock,
            adjustment,
            closing_stock,
        });

        Ok(self.history.last())
    }

    /// 執行到實際銷售用完為止
    pub fn run(mut self) -> Result<SimulationReport> {
        while self.step()?.is_some() {}

        let report = SimulationReport {
            config: self.config,
            baseline: self.baseline.orders,
            warnings: self.baseline.warnings,
            revised: self.plan,
            stock: self.stock,
            history: self.history,
        };

        tracing::info!(
            "模擬完成：調整 {} 期，缺貨 {} 期",
            report.adjusted_periods().len(),
            report.stockout_periods().len()
        );

        Ok(report)
    }
}

/// 模擬結果
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub config: PolicyConfig,

    /// 基準訂購計劃
    pub baseline: OrderPlan,

    /// 靜態規劃警告
    pub warnings: Vec<replen_calc::PlanWarning>,

    /// 修正後訂購計劃
    pub revised: OrderPlan,

    /// 實際庫存軌跡
    pub stock: StockTrajectory,

    /// 逐期記錄
    pub history: Vec<SimulationStep>,
}

impl SimulationReport {
    /// 訂購量與基準不同的期別
    pub fn adjusted_periods(&self) -> Vec<usize> {
        self.baseline.diff_periods(&self.revised)
    }

    /// 實際銷售超過可用庫存（期初庫存加本期訂購）的期別
    ///
    /// 期末庫存剛好歸零但銷售已全數滿足的期別不算缺貨。
    pub fn stockout_periods(&self) -> Vec<usize> {
        self.history
            .iter()
            .filter(|step| {
                step.opening_stock + step.adjustment.after < step.adjustment.observed
            })
            .map(|step| step.period)
            .collect()
    }

    /// 序列化為 JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReplenError::Scenario(e.to_string()))
    }
}
