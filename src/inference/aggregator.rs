use crate::fuzzy::fuzzyerror::FuzzyError;
use crate::fuzzy::fuzzyset::FuzzySet;

/// 逐點取 max 聚合所有規則的激活曲線。
///
/// 所有曲線必須定義在同一個取樣網格上，否則回傳 `UniverseMismatchError`。
/// max 具交換律與結合律，輸入順序不影響結果。
pub fn aggregate<'a, I>(curves: I) -> Result<FuzzySet, FuzzyError>
where
    I: IntoIterator<Item = &'a FuzzySet>,
{
    let mut iter = curves.into_iter();
    let first = iter.next().ok_or(FuzzyError::EmptyAggregation)?;
    let mut degrees = first.degrees().clone();
    for curve in iter {
        if !curve.shares_universe(first) {
            return Err(FuzzyError::UniverseMismatchError);
        }
        degrees.zip_apply(curve.degrees(), |acc, d| *acc = acc.max(d));
    }
    Ok(FuzzySet::from_parts(first.universe().clone(), degrees))
}
