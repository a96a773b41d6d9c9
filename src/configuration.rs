use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::classification::classifier::{
    Classifier,
    ThresholdPredicate
};
use crate::fuzzy::linguisticvariable::LinguisticVariable;
use crate::fuzzy::linguisticvariablemanager::LinguisticVariableManager;
use crate::inference::defuzzifier::DefuzzificationMethod;
use crate::inference::expression::{
    Expression,
    TermRef
};
use crate::inference::inferencesystem::InferenceSystem;
use crate::inference::rule::Rule;
use crate::inference::ruleparser::parse_rule;
use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};


#[derive(Deserialize)]
#[serde(untagged)]
enum RuleJsonProp {
    Text {
        name: Option<String>,
        text: String
    },
    Tree {
        name: Option<String>,
        antecedent: Expression,
        consequent: TermRef
    }
}


#[derive(Deserialize)]
struct ClassificationJsonProp {
    label: String,
    predicate: ThresholdPredicate
}


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    variables: Vec<serde_json::Value>,
    rules: Vec<RuleJsonProp>,
    #[serde(default)]
    defuzzification: DefuzzificationMethod,
    #[serde(default)]
    classification: Vec<ClassificationJsonProp>
}


/// 規則庫的宣告式描述：語意變數、規則、解模糊方法與分類門檻。
pub struct Configuration {
    linguistic_variable_manager: Manager<Arc<LinguisticVariable>>,
    rules: Vec<Rule>,
    defuzzification: DefuzzificationMethod,
    classifier: Classifier
}


impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            linguistic_variable_manager: LinguisticVariableManager::new(),
            rules: Vec::new(),
            defuzzification: DefuzzificationMethod::default(),
            classifier: Classifier::new()
        }
    }

    pub fn linguistic_variable_manager(&self) -> &Manager<Arc<LinguisticVariable>> {
        &self.linguistic_variable_manager
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn defuzzification(&self) -> DefuzzificationMethod {
        self.defuzzification
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn from_reader(file_path: &str) -> Result<Configuration, ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        debug!(file_path, "configuration read");
        Self::from_json_value(json_value)
    }

    pub fn from_json_str(json_str: &str) -> Result<Configuration, ManagerError> {
        let json_value: serde_json::Value = serde_json::from_str(json_str)?;
        Self::from_json_value(json_value)
    }

    pub fn from_json_value(json_value: serde_json::Value) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        let mut config = Configuration::new();
        config.linguistic_variable_manager.insert_obj_from_json_vec(&json_prop.variables)?;
        for rule_json in json_prop.rules {
            let rule = match rule_json {
                RuleJsonProp::Text { name, text } => {
                    let rule = parse_rule(&text)?;
                    match name {
                        Some(name) => rule.with_name(name),
                        None => rule
                    }
                },
                RuleJsonProp::Tree { name, antecedent, consequent } => {
                    let rule = Rule::new(antecedent, consequent);
                    match name {
                        Some(name) => rule.with_name(name),
                        None => rule
                    }
                }
            };
            config.rules.push(rule);
        }
        config.defuzzification = json_prop.defuzzification;
        for classification in json_prop.classification {
            config.classifier = config.classifier.with_rule(classification.predicate, classification.label);
        }
        debug!(
            variables = config.linguistic_variable_manager.len(),
            rules = config.rules.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// 以目前的變數與規則建立推論系統；規則引用不存在的變數或 term 時失敗。
    pub fn inference_system(&self) -> Result<InferenceSystem, ManagerError> {
        let variables: Vec<Arc<LinguisticVariable>> = self.linguistic_variable_manager
            .values()
            .cloned()
            .collect();
        let system = InferenceSystem::new(variables, self.rules.clone(), self.defuzzification)?;
        Ok(system)
    }
}
