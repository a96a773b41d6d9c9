use std::sync::Arc;

use nalgebra::DVector;
use serde::Deserialize;

use crate::math::curve::curve::Curve;

use super::fuzzyerror::FuzzyError;
use super::fuzzyset::FuzzySet;
use super::universe::Universe;

// ─────────────────────────────────────────────────────────────────────────────
// MembershipShape
// ─────────────────────────────────────────────────────────────────────────────
//
// 梯形 (a, b, c, d)：
//   x < a 或 x > d      → 0
//   a <= x < b          → (x - a) / (b - a)，a == b 時為 1
//   b <= x <= c         → 1
//   c < x <= d          → (d - x) / (d - c)，c == d 時為 1
// 三角形 (a, b, c) 即 b == c 的梯形。

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "shape_type", content = "points")]
pub enum MembershipShape {
    Triangular([f64; 3]),
    Trapezoidal([f64; 4]),
}

impl MembershipShape {
    fn corners(&self) -> [f64; 4] {
        match *self {
            MembershipShape::Triangular([a, b, c]) => [a, b, b, c],
            MembershipShape::Trapezoidal(points) => points,
        }
    }

    fn control_points(&self) -> &[f64] {
        match self {
            MembershipShape::Triangular(points) => points.as_slice(),
            MembershipShape::Trapezoidal(points) => points.as_slice(),
        }
    }

    pub fn validate(&self) -> Result<(), FuzzyError> {
        let points = self.control_points();
        let finite = points.iter().all(|p| p.is_finite());
        let ordered = points.windows(2).all(|w| w[0] <= w[1]);
        if finite && ordered {
            Ok(())
        } else {
            Err(FuzzyError::invalid_shape(points))
        }
    }

    /// 解析形狀在 x 的隸屬度（不經論域離散化）。
    pub fn degree(&self, x: f64) -> f64 {
        let [a, b, c, d] = self.corners();
        if x < a || x > d {
            0.0
        } else if x < b {
            if b > a { (x - a) / (b - a) } else { 1.0 }
        } else if x <= c {
            1.0
        } else if d > c {
            (d - x) / (d - c)
        } else {
            1.0
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MembershipFunction
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct MembershipFunction {
    shape: MembershipShape,
    set: FuzzySet,
}

impl MembershipFunction {
    pub fn new(universe: Arc<Universe>, shape: MembershipShape) -> Result<MembershipFunction, FuzzyError> {
        shape.validate()?;
        let degrees = universe.samples().map(|x| shape.degree(x));
        let set = FuzzySet::from_parts(universe, degrees);
        Ok(MembershipFunction { shape, set })
    }

    pub fn triangular(universe: Arc<Universe>, a: f64, b: f64, c: f64) -> Result<MembershipFunction, FuzzyError> {
        Self::new(universe, MembershipShape::Triangular([a, b, c]))
    }

    pub fn trapezoidal(universe: Arc<Universe>, a: f64, b: f64, c: f64, d: f64) -> Result<MembershipFunction, FuzzyError> {
        Self::new(universe, MembershipShape::Trapezoidal([a, b, c, d]))
    }

    pub fn shape(&self) -> MembershipShape {
        self.shape
    }

    pub fn set(&self) -> &FuzzySet {
        &self.set
    }

    pub fn universe(&self) -> &Arc<Universe> {
        self.set.universe()
    }

    pub fn degrees(&self) -> &DVector<f64> {
        self.set.degrees()
    }

    /// 以論域樣本線性內插的隸屬度（fuzzification）。
    pub fn fuzzify(&self, x: f64) -> f64 {
        self.set.membership(x)
    }
}

impl Curve for MembershipFunction {
    fn value(&self, x: f64) -> f64 {
        self.fuzzify(x)
    }
}
