use std::sync::Arc;

use nalgebra::DVector;

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

use super::fuzzifier::interpolate;
use super::fuzzyerror::FuzzyError;
use super::universe::Universe;

/// 論域上的離散模糊集合：每個樣本點對應一個 [0, 1] 內的隸屬度。
///
/// 隸屬函數、規則的激活曲線與聚合結果都以此型別表示。
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet {
    universe: Arc<Universe>,
    degrees: DVector<f64>,
}

impl FuzzySet {
    pub fn new(universe: Arc<Universe>, degrees: DVector<f64>) -> Result<FuzzySet, FuzzyError> {
        if degrees.len() != universe.len() {
            return Err(FuzzyError::UniverseMismatchError);
        }
        if let Some(d) = degrees.iter().find(|d| !(0.0..=1.0).contains(*d)) {
            return Err(FuzzyError::InvalidShapeError(format!("membership degree {} outside [0, 1]", d)));
        }
        Ok(FuzzySet { universe, degrees })
    }

    pub fn zeros(universe: Arc<Universe>) -> FuzzySet {
        let degrees = DVector::zeros(universe.len());
        FuzzySet { universe, degrees }
    }

    // 呼叫方保證長度與值域
    pub(crate) fn from_parts(universe: Arc<Universe>, degrees: DVector<f64>) -> FuzzySet {
        debug_assert_eq!(universe.len(), degrees.len());
        FuzzySet { universe, degrees }
    }

    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    pub fn degrees(&self) -> &DVector<f64> {
        &self.degrees
    }

    pub fn membership(&self, x: f64) -> f64 {
        interpolate(&self.universe, self.degrees.as_slice(), x)
    }

    pub fn height(&self) -> f64 {
        self.degrees.iter().copied().fold(0.0, f64::max)
    }

    pub fn is_empty_set(&self) -> bool {
        self.degrees.iter().all(|&d| d == 0.0)
    }

    /// 兩集合是否定義在相同的取樣網格上。
    pub fn shares_universe(&self, other: &FuzzySet) -> bool {
        Arc::ptr_eq(&self.universe, &other.universe) || self.universe == other.universe
    }

    /// Mamdani implication：`min(strength, μ(x))`。
    pub fn clip(&self, strength: f64) -> FuzzySet {
        let strength = strength.clamp(0.0, 1.0);
        let degrees = self.degrees.map(|d| d.min(strength));
        FuzzySet::from_parts(self.universe.clone(), degrees)
    }
}

impl Curve for FuzzySet {
    fn value(&self, x: f64) -> f64 {
        self.membership(x)
    }
}

impl NonparametricCurve for FuzzySet {
    fn points(&self) -> Vec<Point2D> {
        self.universe
            .samples()
            .iter()
            .zip(self.degrees.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }

    fn min_x(&self) -> f64 {
        self.universe.lower_bound()
    }

    fn max_x(&self) -> f64 {
        self.universe.upper_bound()
    }
}
