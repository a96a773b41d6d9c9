use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

use super::fuzzyerror::FuzzyError;
use super::universe::Universe;

// ─────────────────────────────────────────────────────────────────────────────
// interp_membership
// ─────────────────────────────────────────────────────────────────────────────
//
// 在任意 crisp 值 x 上求隸屬度：
//   - x 恰為樣本點：直接回傳該樣本的隸屬度（無內插誤差）
//   - x 位於兩樣本之間：以兩端點線性內插
//   - x 超出論域：夾取最近邊界的隸屬度，不外插
//   - x 為 NaN：回傳 0.0

/// `degrees` 與論域長度不同時回傳 `UniverseMismatchError`。
pub fn interp_membership(universe: &Universe, degrees: &[f64], x: f64) -> Result<f64, FuzzyError> {
    if degrees.len() != universe.len() {
        return Err(FuzzyError::UniverseMismatchError);
    }
    Ok(interpolate(universe, degrees, x))
}

// 呼叫方保證 degrees.len() == universe.len()
pub(crate) fn interpolate(universe: &Universe, degrees: &[f64], x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    let n = degrees.len();
    if x <= universe.lower_bound() {
        return degrees[0];
    }
    if x >= universe.upper_bound() {
        return degrees[n - 1];
    }

    // lower_bound < x < upper_bound，因此 1 <= i <= n - 1
    let i = universe.partition_point(x);
    let samples = universe.samples();
    if samples[i - 1] == x {
        return degrees[i - 1];
    }
    let lhs_pt = Point2D::new(samples[i - 1], degrees[i - 1]);
    let rhs_pt = Point2D::new(samples[i], degrees[i]);
    let y = lhs_pt.y() + Point2D::slope(&lhs_pt, &rhs_pt) * (x - lhs_pt.x());
    y.clamp(0.0, 1.0)
}
