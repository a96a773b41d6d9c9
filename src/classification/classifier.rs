use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::inference::defuzzifier::InferenceResult;

// ─────────────────────────────────────────────────────────────────────────────
// ClassificationPredicate
// ─────────────────────────────────────────────────────────────────────────────

pub trait ClassificationPredicate: Send + Sync {
    fn matches(&self, result: &InferenceResult) -> bool;
}

impl<F> ClassificationPredicate for F
where
    F: Fn(&InferenceResult) -> bool + Send + Sync,
{
    fn matches(&self, result: &InferenceResult) -> bool {
        self(result)
    }
}

/// 可由設定檔描述的門檻條件。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ThresholdPredicate {
    ActivationBelow(f64),
    ActivationAtLeast(f64),
    ActivationAbove(f64),
    CrispAtMost(f64),
    CrispAbove(f64),
    All(Vec<ThresholdPredicate>),
    Any(Vec<ThresholdPredicate>),
}

impl ClassificationPredicate for ThresholdPredicate {
    fn matches(&self, result: &InferenceResult) -> bool {
        let activation = result.activation_degree();
        let crisp = result.crisp_value();
        match self {
            ThresholdPredicate::ActivationBelow(t) => activation < *t,
            ThresholdPredicate::ActivationAtLeast(t) => activation >= *t,
            ThresholdPredicate::ActivationAbove(t) => activation > *t,
            ThresholdPredicate::CrispAtMost(t) => crisp <= *t,
            ThresholdPredicate::CrispAbove(t) => crisp > *t,
            ThresholdPredicate::All(predicates) => predicates.iter().all(|p| p.matches(result)),
            ThresholdPredicate::Any(predicates) => predicates.iter().any(|p| p.matches(result)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classifier
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ClassificationRule {
    predicate: Arc<dyn ClassificationPredicate>,
    label: String,
}

impl ClassificationRule {
    pub fn new(predicate: Arc<dyn ClassificationPredicate>, label: impl Into<String>) -> ClassificationRule {
        ClassificationRule { predicate, label: label.into() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule").field("label", &self.label).finish_non_exhaustive()
    }
}

/// 將 (crisp 值, activation) 映射為離散標籤。
///
/// 依加入順序檢查，第一個成立的條件決定標籤；全部不成立時回傳 `None`。
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
}

impl Classifier {
    pub fn new() -> Classifier {
        Classifier { rules: Vec::new() }
    }

    pub fn with_rule<P>(mut self, predicate: P, label: impl Into<String>) -> Classifier
    where
        P: ClassificationPredicate + 'static,
    {
        self.rules.push(ClassificationRule::new(Arc::new(predicate), label));
        self
    }

    pub fn push(&mut self, rule: ClassificationRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn classify(&self, result: &InferenceResult) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(result))
            .map(|rule| rule.label())
    }
}
