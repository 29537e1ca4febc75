//! 季節性需求補貨模擬示例
//!
//! 以同一組歷史需求與實際銷售，比較批量調整與頻率調整兩種策略。
//! 日誌等級可用 `RUST_LOG` 控制，例如 `RUST_LOG=debug`。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use replenish::{
    Decimal, DemandSeries, PolicyConfig, ReplenishmentPolicy, Simulation, SimulationReport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("=== 季節性需求補貨模擬 ===\n");

    // 十二個月的歷史需求（年中旺季）
    let history: Vec<i64> = vec![40, 42, 45, 60, 85, 110, 120, 105, 70, 50, 45, 48];
    let demand = DemandSeries::from_units(history.iter().copied())?;

    // 實際銷售：歷史需求加上固定種子的隨機擾動
    let mut rng = StdRng::seed_from_u64(2024);
    let sales = DemandSeries::from_units(
        history
            .iter()
            .map(|value| (value + rng.gen_range(-20..=20)).max(0)),
    )?;

    for policy in [
        ReplenishmentPolicy::BatchSize,
        ReplenishmentPolicy::OrderFrequency,
    ] {
        let config = PolicyConfig::new(Decimal::from(50))
            .with_min_order_size(Decimal::from(10))
            .with_max_stock_held(Decimal::from(200))
            .with_buffer_stock(Decimal::from(10))
            .with_max_error(Decimal::from(8))
            .with_policy(policy);

        let report =
            Simulation::new(demand.clone(), sales.clone(), Decimal::from(60), config)?.run()?;

        print_report(policy, &demand, &sales, &report);
    }

    Ok(())
}

fn print_report(
    policy: ReplenishmentPolicy,
    demand: &DemandSeries,
    sales: &DemandSeries,
    report: &SimulationReport,
) {
    println!("策略: {:?}", policy);
    println!(
        "{:>4} {:>8} {:>8} {:>8} {:>8} {:>8} {:>6}",
        "期別", "歷史", "實際", "基準", "修正", "期初庫存", "觸發"
    );

    for step in &report.history {
        let period = step.period;
        println!(
            "{:>4} {:>8} {:>8} {:>8} {:>8} {:>8} {:>6}",
            period,
            demand.as_slice()[period - 1],
            sales.as_slice()[period - 1],
            report.baseline.as_slice()[period - 1],
            report.revised.as_slice()[period - 1],
            step.opening_stock,
            if step.adjustment.triggered { "是" } else { "" }
        );
    }

    for warning in &report.warnings {
        println!("  [{:?}] 第 {} 期: {}", warning.severity, warning.period, warning.message);
    }

    println!(
        "總訂購量: 基準 {}，修正後 {}；缺貨期別: {:?}\n",
        report.baseline.total(),
        report.revised.total(),
        report.stockout_periods()
    );
}
