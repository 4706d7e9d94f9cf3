//! 수익률 / 평가금액 계산
//!
//! Every calculation returns `None` when an input it guards on is missing,
//! zero or NaN. Callers decide how to display the gap.

use crate::models::watchlist::DisplayStock;
use crate::utils::format::js_round;

/// A guarded input: absent, zero and NaN all count as missing.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// 수익률 (%)
pub fn compute_return_pct(stock: &DisplayStock) -> Option<f64> {
    let purchase = present(stock.purchase_price)?;
    let current = present(stock.current_price)?;
    Some(js_round((current - purchase) / purchase * 100.0))
}

/// 총 평가금액. `purchase_price` is not part of the formula but is still
/// required, as it always has been.
pub fn compute_total_value(stock: &DisplayStock) -> Option<f64> {
    let _purchase = present(stock.purchase_price)?;
    let current = present(stock.current_price)?;
    let quantity = present(stock.purchase_quantity)?;
    Some(js_round(current * quantity))
}

/// 총 수익률 (%)
pub fn compute_total_return_pct(stock: &DisplayStock) -> Option<f64> {
    let purchase = present(stock.purchase_price)?;
    let current = present(stock.current_price)?;
    let quantity = present(stock.purchase_quantity)?;
    let total_purchase = purchase * quantity;
    let total_current = current * quantity;
    Some(js_round((total_current - total_purchase) / total_purchase * 100.0))
}
