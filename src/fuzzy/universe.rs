use nalgebra::DVector;

use super::fuzzyerror::FuzzyError;

// 以 (stop - start) / step 計算樣本數時容許的浮點誤差，
// 使 build(0.0, 1.0, 0.1) 仍包含 1.0。
const SAMPLE_COUNT_TOLERANCE: f64 = 1e-9;

/// `build` 可產生的最大樣本數。
pub const MAX_SAMPLES: usize = 10_000_000;

/// 離散化的論域（universe of discourse）。
///
/// 樣本點嚴格遞增且皆為有限值。`build` 採 inclusive stop：
/// `Universe::build(0.0, 10.0, 1.0)` 產生 0, 1, ..., 10 共 11 個點。
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    samples: DVector<f64>,
}

impl Universe {
    pub fn build(start: f64, stop: f64, step: f64) -> Result<Universe, FuzzyError> {
        let valid = start.is_finite() && stop.is_finite() && step.is_finite() && step > 0.0 && stop >= start;
        if !valid {
            return Err(FuzzyError::InvalidRangeError { start, stop, step });
        }
        let intervals = ((stop - start) / step + SAMPLE_COUNT_TOLERANCE).floor();
        if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
            return Err(FuzzyError::InvalidRangeError { start, stop, step });
        }
        let n = intervals as usize + 1;
        let samples = DVector::from_fn(n, |i, _| start + i as f64 * step);
        // step 小於 start 的浮點解析度時，相鄰樣本會捨入成同一值
        if samples.as_slice().windows(2).any(|w| w[1] <= w[0]) {
            return Err(FuzzyError::InvalidRangeError { start, stop, step });
        }
        Ok(Universe { samples })
    }

    /// 任意間距的論域；樣本需非空、有限且嚴格遞增。
    pub fn from_samples(samples: Vec<f64>) -> Result<Universe, FuzzyError> {
        if samples.is_empty() {
            return Err(FuzzyError::InvalidSamplesError("no samples given".to_owned()));
        }
        if let Some(x) = samples.iter().find(|x| !x.is_finite()) {
            return Err(FuzzyError::InvalidSamplesError(format!("sample {} is not finite", x)));
        }
        if let Some(i) = (1..samples.len()).find(|&i| samples[i] <= samples[i - 1]) {
            return Err(FuzzyError::InvalidSamplesError(format!(
                "samples must be strictly increasing ({} followed by {})",
                samples[i - 1],
                samples[i]
            )));
        }
        Ok(Universe { samples: DVector::from_vec(samples) })
    }

    pub fn samples(&self) -> &DVector<f64> {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn lower_bound(&self) -> f64 {
        self.samples[0]
    }

    pub fn upper_bound(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }

    /// 回傳第一個大於 x 的樣本索引。
    pub(crate) fn partition_point(&self, x: f64) -> usize {
        self.samples.as_slice().partition_point(|&s| s <= x)
    }
}
