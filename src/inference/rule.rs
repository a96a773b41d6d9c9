use std::fmt;

use super::expression::{
    Expression,
    TermRef
};

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    name: Option<String>,
    antecedent: Expression,
    consequent: TermRef,
}

impl Rule {
    pub fn new(antecedent: Expression, consequent: TermRef) -> Rule {
        Rule { name: None, antecedent, consequent }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Rule {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn antecedent(&self) -> &Expression {
        &self.antecedent
    }

    pub fn consequent(&self) -> &TermRef {
        &self.consequent
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN {}", self.antecedent, self.consequent)
    }
}
