use std::collections::{
    BTreeMap,
    HashMap
};
use std::sync::Arc;

use tracing::{
    debug,
    warn
};

use crate::fuzzy::fuzzyerror::FuzzyError;
use crate::fuzzy::fuzzyset::FuzzySet;
use crate::fuzzy::linguisticvariable::LinguisticVariable;
use crate::fuzzy::membershipfunction::MembershipFunction;

use super::aggregator::aggregate;
use super::defuzzifier::{
    defuzzify_with,
    DefuzzificationMethod,
    InferenceResult
};
use super::expression::TermRef;
use super::rule::Rule;
use super::ruleengine::{
    evaluate_rules,
    RuleActivation
};

// ─────────────────────────────────────────────────────────────────────────────
// OutputInference / Inference
// ─────────────────────────────────────────────────────────────────────────────

/// 單一輸出變數的推論過程：各規則激活曲線、聚合集合與解模糊結果。
///
/// 曲線以純資料形式保留，供外部繪圖元件唯讀使用。
#[derive(Debug, Clone)]
pub struct OutputInference {
    activations: Vec<RuleActivation>,
    aggregated: FuzzySet,
    result: Result<InferenceResult, FuzzyError>,
}

impl OutputInference {
    pub fn activations(&self) -> &[RuleActivation] {
        &self.activations
    }

    pub fn aggregated(&self) -> &FuzzySet {
        &self.aggregated
    }

    pub fn result(&self) -> Result<InferenceResult, FuzzyError> {
        self.result.clone()
    }
}

#[derive(Debug, Clone)]
pub struct Inference {
    outputs: BTreeMap<String, OutputInference>,
}

impl Inference {
    pub fn outputs(&self) -> &BTreeMap<String, OutputInference> {
        &self.outputs
    }

    pub fn output(&self, name: &str) -> Result<&OutputInference, FuzzyError> {
        self.outputs
            .get(name)
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    pub fn result(&self, name: &str) -> Result<InferenceResult, FuzzyError> {
        self.output(name)?.result()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InferenceSystem
// ─────────────────────────────────────────────────────────────────────────────

/// Mamdani 推論系統：持有語意變數與規則，建構後不可變。
///
/// 變數以 `Arc` 共享，整個系統為 `Send + Sync`；每次 `infer` 呼叫
/// 自行配置激活與聚合集合，可由多個執行緒同時呼叫。
#[derive(Debug, Clone)]
pub struct InferenceSystem {
    variables: HashMap<String, Arc<LinguisticVariable>>,
    rules: Vec<Rule>,
    method: DefuzzificationMethod,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl InferenceSystem {
    /// 檢查變數名稱不重複，且所有規則引用的變數與 term 皆存在。
    pub fn new(
        variable_list: Vec<Arc<LinguisticVariable>>,
        rules: Vec<Rule>,
        method: DefuzzificationMethod,
    ) -> Result<InferenceSystem, FuzzyError> {
        let mut variables: HashMap<String, Arc<LinguisticVariable>> = HashMap::with_capacity(variable_list.len());
        for var in variable_list {
            let name = var.name().to_owned();
            if variables.contains_key(&name) {
                return Err(FuzzyError::DuplicateVariable(name));
            }
            variables.insert(name, var);
        }

        let mut input_names: Vec<String> = Vec::new();
        let mut output_names: Vec<String> = Vec::new();
        for rule in rules.iter() {
            for term_ref in rule.antecedent().term_refs() {
                Self::resolve_in(&variables, term_ref)?;
                if !input_names.iter().any(|n| n == term_ref.variable()) {
                    input_names.push(term_ref.variable().to_owned());
                }
            }
            Self::resolve_in(&variables, rule.consequent())?;
            if !output_names.iter().any(|n| n == rule.consequent().variable()) {
                output_names.push(rule.consequent().variable().to_owned());
            }
        }
        debug!(
            variables = variables.len(),
            rules = rules.len(),
            ?method,
            "inference system built"
        );
        Ok(InferenceSystem { variables, rules, method, input_names, output_names })
    }

    fn resolve_in<'a>(
        variables: &'a HashMap<String, Arc<LinguisticVariable>>,
        term_ref: &TermRef,
    ) -> Result<&'a MembershipFunction, FuzzyError> {
        variables
            .get(term_ref.variable())
            .ok_or_else(|| FuzzyError::UnknownVariable(term_ref.variable().to_owned()))?
            .term(term_ref.term())
    }

    pub fn variable(&self, name: &str) -> Result<&Arc<LinguisticVariable>, FuzzyError> {
        self.variables
            .get(name)
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn method(&self) -> DefuzzificationMethod {
        self.method
    }

    /// 規則前件引用的變數，依首次出現順序。
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// 規則後件引用的變數，依首次出現順序。
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn check_inputs(&self, inputs: &HashMap<String, f64>) -> Result<(), FuzzyError> {
        for name in self.input_names.iter() {
            match inputs.get(name) {
                None => return Err(FuzzyError::MissingInputError(name.clone())),
                Some(x) if !x.is_finite() => return Err(FuzzyError::NonFiniteInput(name.clone())),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// 執行完整推論：fuzzify → 規則 → 聚合 → 解模糊。
    ///
    /// 缺少輸入時回傳 `MissingInputError`。某個輸出變數完全沒有激活時，
    /// 該輸出的 `result()` 為 `NoActivationError`，其餘輸出不受影響。
    pub fn infer(&self, inputs: &HashMap<String, f64>) -> Result<Inference, FuzzyError> {
        self.check_inputs(inputs)?;

        let degree_of = |term_ref: &TermRef| -> Result<f64, FuzzyError> {
            let x = inputs
                .get(term_ref.variable())
                .copied()
                .ok_or_else(|| FuzzyError::MissingInputError(term_ref.variable().to_owned()))?;
            Ok(Self::resolve_in(&self.variables, term_ref)?.fuzzify(x))
        };
        let activations = evaluate_rules(&self.rules, &degree_of, |term_ref| {
            Self::resolve_in(&self.variables, term_ref)
        })?;

        let mut outputs = BTreeMap::new();
        for name in self.output_names.iter() {
            let output_activations: Vec<RuleActivation> = activations
                .iter()
                .filter(|activation| activation.consequent().variable() == name)
                .cloned()
                .collect();
            let aggregated = aggregate(output_activations.iter().map(|activation| activation.curve()))?;
            let result = defuzzify_with(&aggregated, self.method);
            match &result {
                Ok(r) => debug!(
                    output = %name,
                    crisp_value = r.crisp_value(),
                    activation_degree = r.activation_degree(),
                    "output defuzzified"
                ),
                Err(error) => warn!(output = %name, %error, "output has no verdict"),
            }
            outputs.insert(
                name.clone(),
                OutputInference { activations: output_activations, aggregated, result },
            );
        }
        Ok(Inference { outputs })
    }

    /// 只取單一輸出變數的結果。
    pub fn infer_output(&self, inputs: &HashMap<String, f64>, output: &str) -> Result<InferenceResult, FuzzyError> {
        self.infer(inputs)?.result(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::membershipfunction::MembershipShape;
    use crate::fuzzy::universe::Universe;
    use crate::inference::expression::Expression;

    fn single_rule_system() -> InferenceSystem {
        let input = LinguisticVariable::new("x", Universe::build(0.0, 10.0, 1.0).unwrap())
            .with_term("any", MembershipShape::Trapezoidal([0.0, 0.0, 10.0, 10.0])).unwrap()
            .with_term("none", MembershipShape::Triangular([20.0, 30.0, 40.0])).unwrap();
        let output = LinguisticVariable::new("y", Universe::build(0.0, 100.0, 1.0).unwrap())
            .with_term("md", MembershipShape::Triangular([0.0, 50.0, 100.0])).unwrap();
        let rules = vec![
            Rule::new(Expression::term("x", "any"), TermRef::new("y", "md")).with_name("always"),
        ];
        InferenceSystem::new(vec![Arc::new(input), Arc::new(output)], rules, DefuzzificationMethod::Centroid).unwrap()
    }

    fn inputs(x: f64) -> HashMap<String, f64> {
        HashMap::from([("x".to_owned(), x)])
    }

    #[test]
    fn single_rule_centroid_is_fifty() {
        let system = single_rule_system();
        let result = system.infer_output(&inputs(3.0), "y").unwrap();
        assert!((result.crisp_value() - 50.0).abs() < 1e-9);
        assert!((result.activation_degree() - 1.0).abs() < 1e-9);
        assert_eq!(system.input_names(), &["x".to_owned()]);
        assert_eq!(system.output_names(), &["y".to_owned()]);
    }

    #[test]
    fn missing_and_non_finite_inputs() {
        let system = single_rule_system();
        assert_eq!(
            system.infer(&HashMap::new()).err(),
            Some(FuzzyError::MissingInputError("x".to_owned()))
        );
        assert_eq!(
            system.infer(&inputs(f64::NAN)).err(),
            Some(FuzzyError::NonFiniteInput("x".to_owned()))
        );
    }

    #[test]
    fn no_activation_is_reported_per_output() {
        let input = LinguisticVariable::new("x", Universe::build(0.0, 10.0, 1.0).unwrap())
            .with_term("hi", MembershipShape::Triangular([5.0, 10.0, 10.0])).unwrap();
        let output = LinguisticVariable::new("y", Universe::build(0.0, 100.0, 1.0).unwrap())
            .with_term("md", MembershipShape::Triangular([0.0, 50.0, 100.0])).unwrap();
        let rules = vec![Rule::new(Expression::term("x", "hi"), TermRef::new("y", "md"))];
        let system = InferenceSystem::new(vec![Arc::new(input), Arc::new(output)], rules, DefuzzificationMethod::Centroid).unwrap();

        let inference = system.infer(&inputs(1.0)).unwrap();
        let y = inference.output("y").unwrap();
        assert!(y.aggregated().is_empty_set());
        assert_eq!(y.activations()[0].fire_strength(), 0.0);
        assert_eq!(y.result(), Err(FuzzyError::NoActivationError));
        assert_eq!(system.infer_output(&inputs(1.0), "y"), Err(FuzzyError::NoActivationError));
    }

    #[test]
    fn unknown_references_fail_at_construction() {
        let output = LinguisticVariable::new("y", Universe::build(0.0, 1.0, 0.5).unwrap())
            .with_term("md", MembershipShape::Triangular([0.0, 0.5, 1.0])).unwrap();
        let output = Arc::new(output);
        let unknown_var = vec![Rule::new(Expression::term("x", "hi"), TermRef::new("y", "md"))];
        assert_eq!(
            InferenceSystem::new(vec![output.clone()], unknown_var, DefuzzificationMethod::Centroid).err(),
            Some(FuzzyError::UnknownVariable("x".to_owned()))
        );
        let unknown_term = vec![Rule::new(Expression::term("y", "md"), TermRef::new("y", "hi"))];
        assert!(matches!(
            InferenceSystem::new(vec![output], unknown_term, DefuzzificationMethod::Centroid),
            Err(FuzzyError::UnknownTerm { .. })
        ));
    }

    #[test]
    fn duplicate_variable_names_are_rejected() {
        let first = LinguisticVariable::new("x", Universe::build(0.0, 10.0, 1.0).unwrap())
            .with_term("t", MembershipShape::Triangular([0.0, 5.0, 10.0])).unwrap();
        let second = LinguisticVariable::new("x", Universe::build(0.0, 10.0, 1.0).unwrap())
            .with_term("t", MembershipShape::Triangular([0.0, 1.0, 10.0])).unwrap();
        let output = LinguisticVariable::new("y", Universe::build(0.0, 100.0, 1.0).unwrap())
            .with_term("md", MembershipShape::Triangular([0.0, 50.0, 100.0])).unwrap();
        let rules = vec![Rule::new(Expression::term("x", "t"), TermRef::new("y", "md"))];
        assert_eq!(
            InferenceSystem::new(
                vec![Arc::new(first), Arc::new(second), Arc::new(output)],
                rules,
                DefuzzificationMethod::Centroid
            ).err(),
            Some(FuzzyError::DuplicateVariable("x".to_owned()))
        );
    }

    #[test]
    fn system_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InferenceSystem>();

        let system = Arc::new(single_rule_system());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let system = Arc::clone(&system);
                std::thread::spawn(move || system.infer_output(&inputs(i as f64), "y"))
            })
            .collect();
        for handle in handles {
            let result = handle.join().unwrap().unwrap();
            assert!((result.crisp_value() - 50.0).abs() < 1e-9);
        }
    }
}
