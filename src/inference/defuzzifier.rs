use serde::{
    Deserialize,
    Serialize
};

use crate::fuzzy::fuzzyerror::FuzzyError;
use crate::fuzzy::fuzzyset::FuzzySet;

/// 一次推論的最終輸出：crisp 值與其在聚合集合中的隸屬度。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceResult {
    crisp_value: f64,
    activation_degree: f64,
}

impl InferenceResult {
    pub fn new(crisp_value: f64, activation_degree: f64) -> InferenceResult {
        InferenceResult { crisp_value, activation_degree }
    }

    pub fn crisp_value(&self) -> f64 {
        self.crisp_value
    }

    pub fn activation_degree(&self) -> f64 {
        self.activation_degree
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DefuzzificationMethod {
    /// Σ x_i·μ_i / Σ μ_i
    #[default]
    Centroid,
    /// 累積隸屬度首次達到總和一半的樣本
    Bisector,
    MeanOfMaximum,
    SmallestOfMaximum,
    LargestOfMaximum,
}

impl DefuzzificationMethod {
    fn crisp_value(&self, aggregated: &FuzzySet) -> Result<f64, FuzzyError> {
        let samples = aggregated.universe().samples();
        let degrees = aggregated.degrees();
        let total = degrees.sum();
        if total <= 0.0 {
            return Err(FuzzyError::NoActivationError);
        }
        let crisp_value = match self {
            DefuzzificationMethod::Centroid => samples.dot(degrees) / total,
            DefuzzificationMethod::Bisector => {
                let half = total / 2.0;
                let mut cumulative = 0.0;
                let mut bisector = aggregated.universe().upper_bound();
                for (x, d) in samples.iter().zip(degrees.iter()) {
                    cumulative += d;
                    if cumulative >= half {
                        bisector = *x;
                        break;
                    }
                }
                bisector
            }
            _ => {
                let height = aggregated.height();
                let maxima: Vec<f64> = samples
                    .iter()
                    .zip(degrees.iter())
                    .filter(|(_, d)| **d == height)
                    .map(|(x, _)| *x)
                    .collect();
                match self {
                    DefuzzificationMethod::SmallestOfMaximum => maxima[0],
                    DefuzzificationMethod::LargestOfMaximum => maxima[maxima.len() - 1],
                    _ => maxima.iter().sum::<f64>() / maxima.len() as f64,
                }
            }
        };
        Ok(crisp_value)
    }
}

/// 以指定方法解模糊，並以內插重新取得 crisp 值在聚合集合中的隸屬度。
///
/// 聚合集合全為零時回傳 `NoActivationError`，不做除以零或預設值。
pub fn defuzzify_with(aggregated: &FuzzySet, method: DefuzzificationMethod) -> Result<InferenceResult, FuzzyError> {
    let crisp_value = method.crisp_value(aggregated)?;
    let activation_degree = aggregated.membership(crisp_value);
    Ok(InferenceResult::new(crisp_value, activation_degree))
}

/// 重心法（centroid）解模糊。
pub fn defuzzify(aggregated: &FuzzySet) -> Result<InferenceResult, FuzzyError> {
    defuzzify_with(aggregated, DefuzzificationMethod::Centroid)
}
