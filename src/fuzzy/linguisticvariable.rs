use std::collections::BTreeMap;
use std::sync::Arc;

use super::fuzzyerror::FuzzyError;
use super::membershipfunction::{
    MembershipFunction,
    MembershipShape
};
use super::universe::Universe;

/// 語意變數：一個論域加上若干以名稱索引的隸屬函數（terms）。
///
/// 所有 term 共用同一個 `Arc<Universe>`；以 `BTreeMap` 保存使顯示順序固定。
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    universe: Arc<Universe>,
    terms: BTreeMap<String, MembershipFunction>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, universe: Universe) -> LinguisticVariable {
        LinguisticVariable {
            name: name.into(),
            universe: Arc::new(universe),
            terms: BTreeMap::new(),
        }
    }

    pub fn with_term(mut self, term: impl Into<String>, shape: MembershipShape) -> Result<LinguisticVariable, FuzzyError> {
        self.add_term(term, shape)?;
        Ok(self)
    }

    pub fn add_term(&mut self, term: impl Into<String>, shape: MembershipShape) -> Result<(), FuzzyError> {
        let term = term.into();
        if self.terms.contains_key(&term) {
            return Err(FuzzyError::DuplicateTerm { variable: self.name.clone(), term });
        }
        let membership_function = MembershipFunction::new(self.universe.clone(), shape)?;
        self.terms.insert(term, membership_function);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    pub fn terms(&self) -> &BTreeMap<String, MembershipFunction> {
        &self.terms
    }

    pub fn term(&self, term: &str) -> Result<&MembershipFunction, FuzzyError> {
        self.terms.get(term).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: term.to_owned(),
        })
    }

    /// x 對每個 term 的隸屬度。
    pub fn fuzzify(&self, x: f64) -> BTreeMap<&str, f64> {
        self.terms
            .iter()
            .map(|(term, mf)| (term.as_str(), mf.fuzzify(x)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart_rate() -> LinguisticVariable {
        LinguisticVariable::new("heart_rate", Universe::build(0.0, 10.0, 1.0).unwrap())
            .with_term("lo", MembershipShape::Triangular([0.0, 0.0, 5.0])).unwrap()
            .with_term("md", MembershipShape::Triangular([0.0, 5.0, 10.0])).unwrap()
            .with_term("hi", MembershipShape::Triangular([5.0, 10.0, 10.0])).unwrap()
    }

    #[test]
    fn terms_share_universe() {
        let var = heart_rate();
        for mf in var.terms().values() {
            assert!(Arc::ptr_eq(mf.universe(), var.universe()));
        }
    }

    #[test]
    fn fuzzify_all_terms() {
        let hr = heart_rate();
        let degrees = hr.fuzzify(8.0);
        assert_eq!(degrees["lo"], 0.0);
        assert!((degrees["md"] - 0.4).abs() < 1e-12);
        assert!((degrees["hi"] - 0.6).abs() < 1e-12);
        assert_eq!(degrees.keys().copied().collect::<Vec<_>>(), vec!["hi", "lo", "md"]);
    }

    #[test]
    fn duplicate_and_unknown_terms() {
        let mut var = heart_rate();
        assert!(matches!(
            var.add_term("lo", MembershipShape::Triangular([0.0, 1.0, 2.0])),
            Err(FuzzyError::DuplicateTerm { .. })
        ));
        assert!(matches!(var.term("extreme"), Err(FuzzyError::UnknownTerm { .. })));
    }
}
