//! 訂購量約束

use rust_decimal::{Decimal, RoundingStrategy};

/// 夾在 `[min, max]` 之間
pub fn clamp_to_bounds(quantity: Decimal, min: Decimal, max: Decimal) -> Decimal {
    quantity.max(min).min(max)
}

/// 四捨五入到最接近的 `unit` 倍數（中點取偶數倍）
///
/// 比值超出 `Decimal` 範圍時原值返回。
pub fn round_to_multiple(quantity: Decimal, unit: Decimal) -> Decimal {
    quantity
        .checked_div(unit)
        .and_then(|ratio| {
            ratio
                .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
                .checked_mul(unit)
        })
        .unwrap_or(quantity)
}

/// 補足 `gap` 所需的最少批數（無缺口時為 0）
pub fn batches_to_cover(gap: Decimal, unit: Decimal) -> Decimal {
    if gap <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (gap / unit).ceil()
}

/// `surplus` 內可完整扣除的批數（無剩餘時為 0）
pub fn whole_batches_in(surplus: Decimal, unit: Decimal) -> Decimal {
    if surplus <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (surplus / unit).floor()
}

/// `[min, max]` 之內最小與最大的 `unit` 倍數
///
/// 配置驗證保證此區間非空；倍數計算溢位時退回原下限或原上限。
pub fn multiple_bounds(unit: Decimal, min: Decimal, max: Decimal) -> (Decimal, Decimal) {
    let lowest = min
        .checked_div(unit)
        .and_then(|ratio| ratio.ceil().checked_mul(unit))
        .unwrap_or(min);
    let highest = max
        .checked_div(unit)
        .and_then(|ratio| ratio.floor().checked_mul(unit))
        .unwrap_or(max);
    (lowest, highest)
}

/// 先取整到倍數，再夾在區間內的倍數之間
pub fn clamp_to_multiples(quantity: Decimal, unit: Decimal, min: Decimal, max: Decimal) -> Decimal {
    let (lowest, highest) = multiple_bounds(unit, min, max);
    round_to_multiple(quantity, unit).max(lowest).min(highest)
}

/// 是否為 `unit` 的非負整數倍
pub fn is_non_negative_multiple(quantity: Decimal, unit: Decimal) -> bool {
    quantity >= Decimal::ZERO && (quantity % unit).is_zero()
}
