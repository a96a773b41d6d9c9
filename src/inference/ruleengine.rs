use tracing::trace;

use crate::fuzzy::fuzzyerror::FuzzyError;
use crate::fuzzy::fuzzyset::FuzzySet;
use crate::fuzzy::membershipfunction::MembershipFunction;

use super::expression::TermRef;
use super::rule::Rule;

/// 單一規則在一次推論中的結果：激發強度與經 min-implication 截斷的後件曲線。
#[derive(Debug, Clone, PartialEq)]
pub struct RuleActivation {
    rule_name: Option<String>,
    consequent: TermRef,
    fire_strength: f64,
    curve: FuzzySet,
}

impl RuleActivation {
    pub fn rule_name(&self) -> Option<&str> {
        self.rule_name.as_deref()
    }

    pub fn consequent(&self) -> &TermRef {
        &self.consequent
    }

    pub fn fire_strength(&self) -> f64 {
        self.fire_strength
    }

    pub fn curve(&self) -> &FuzzySet {
        &self.curve
    }
}

/// `clipped(x) = min(fire_strength, consequent(x))`
pub fn implicate(fire_strength: f64, consequent: &MembershipFunction) -> FuzzySet {
    consequent.set().clip(fire_strength)
}

/// 規則前件的激發強度。
pub fn fire_strength<F>(rule: &Rule, degree_of: &F) -> Result<f64, FuzzyError>
where
    F: Fn(&TermRef) -> Result<f64, FuzzyError>,
{
    rule.antecedent().evaluate(degree_of)
}

/// 逐條求值；規則之間互不影響。強度為 0 的規則仍回傳全零曲線。
///
/// `consequent_of` 將規則後件解析為對應的隸屬函數。
pub fn evaluate_rules<'a, F, C>(
    rules: &[Rule],
    degree_of: &F,
    consequent_of: C,
) -> Result<Vec<RuleActivation>, FuzzyError>
where
    F: Fn(&TermRef) -> Result<f64, FuzzyError>,
    C: Fn(&TermRef) -> Result<&'a MembershipFunction, FuzzyError>,
{
    rules
        .iter()
        .map(|rule| {
            let strength = fire_strength(rule, degree_of)?;
            trace!(rule = %rule, strength, "rule fired");
            let consequent_mf = consequent_of(rule.consequent())?;
            Ok(RuleActivation {
                rule_name: rule.name().map(str::to_owned),
                consequent: rule.consequent().clone(),
                fire_strength: strength,
                curve: implicate(strength, consequent_mf),
            })
        })
        .collect()
}
