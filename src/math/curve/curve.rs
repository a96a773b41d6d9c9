/// 可在任意實數點取值的曲線。
///
/// 隸屬函數、規則激活曲線與聚合集合皆實作此 trait，
/// 取值一律透過線性內插（論域外夾取邊界值）。
pub trait Curve {
    fn value(&self, x: f64) -> f64;
}
