use std::fmt;

use serde::Deserialize;

use crate::fuzzy::fuzzyerror::FuzzyError;

/// 對某語意變數某 term 的引用，例如 `heart_rate IS hi`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct TermRef {
    variable: String,
    term: String,
}

impl TermRef {
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> TermRef {
        TermRef { variable: variable.into(), term: term.into() }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

impl fmt::Display for TermRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS {}", self.variable, self.term)
    }
}

/// 規則前件的運算式樹。AND 取 min、OR 取 max，依樹的結構由內而外求值。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Expression {
    Term(TermRef),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn term(variable: impl Into<String>, term: impl Into<String>) -> Expression {
        Expression::Term(TermRef::new(variable, term))
    }

    pub fn and(self, rhs: Expression) -> Expression {
        Expression::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Expression) -> Expression {
        Expression::Or(Box::new(self), Box::new(rhs))
    }

    /// `degree_of` 回傳單一 term 的隸屬度。
    pub fn evaluate<F>(&self, degree_of: &F) -> Result<f64, FuzzyError>
    where
        F: Fn(&TermRef) -> Result<f64, FuzzyError>,
    {
        match self {
            Expression::Term(term_ref) => degree_of(term_ref),
            Expression::And(lhs, rhs) => Ok(lhs.evaluate(degree_of)?.min(rhs.evaluate(degree_of)?)),
            Expression::Or(lhs, rhs) => Ok(lhs.evaluate(degree_of)?.max(rhs.evaluate(degree_of)?)),
        }
    }

    /// 依出現順序列出所有 term 引用。
    pub fn term_refs(&self) -> Vec<&TermRef> {
        let mut refs = Vec::new();
        self.collect_term_refs(&mut refs);
        refs
    }

    fn collect_term_refs<'a>(&'a self, refs: &mut Vec<&'a TermRef>) {
        match self {
            Expression::Term(term_ref) => refs.push(term_ref),
            Expression::And(lhs, rhs) | Expression::Or(lhs, rhs) => {
                lhs.collect_term_refs(refs);
                rhs.collect_term_refs(refs);
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Term(term_ref) => write!(f, "{}", term_ref),
            Expression::And(lhs, rhs) => write!(f, "({} AND {})", lhs, rhs),
            Expression::Or(lhs, rhs) => write!(f, "({} OR {})", lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn degrees() -> HashMap<TermRef, f64> {
        HashMap::from([
            (TermRef::new("a", "x"), 0.2),
            (TermRef::new("b", "y"), 0.7),
            (TermRef::new("c", "z"), 0.5),
        ])
    }

    fn lookup(table: &HashMap<TermRef, f64>) -> impl Fn(&TermRef) -> Result<f64, FuzzyError> + '_ {
        move |term_ref| {
            table
                .get(term_ref)
                .copied()
                .ok_or_else(|| FuzzyError::UnknownVariable(term_ref.variable().to_owned()))
        }
    }

    #[test]
    fn and_is_min_or_is_max() {
        let table = degrees();
        let degree_of = lookup(&table);
        let a = Expression::term("a", "x");
        let b = Expression::term("b", "y");
        assert_eq!(a.clone().and(b.clone()).evaluate(&degree_of), Ok(0.2));
        assert_eq!(a.or(b).evaluate(&degree_of), Ok(0.7));
    }

    #[test]
    fn grouping_follows_tree_shape() {
        let table = degrees();
        let degree_of = lookup(&table);
        // (a AND b) OR c = max(0.2, 0.5)
        let left = Expression::term("a", "x").and(Expression::term("b", "y")).or(Expression::term("c", "z"));
        assert_eq!(left.evaluate(&degree_of), Ok(0.5));
        // a AND (b OR c) = min(0.2, 0.7)
        let right = Expression::term("a", "x").and(Expression::term("b", "y").or(Expression::term("c", "z")));
        assert_eq!(right.evaluate(&degree_of), Ok(0.2));
    }

    #[test]
    fn lookup_errors_propagate() {
        let table = degrees();
        let degree_of = lookup(&table);
        let expr = Expression::term("a", "x").and(Expression::term("q", "w"));
        assert_eq!(expr.evaluate(&degree_of), Err(FuzzyError::UnknownVariable("q".to_owned())));
    }

    #[test]
    fn display_and_term_refs() {
        let expr = Expression::term("a", "x").and(Expression::term("b", "y")).or(Expression::term("c", "z"));
        assert_eq!(expr.to_string(), "((a IS x AND b IS y) OR c IS z)");
        let vars: Vec<&str> = expr.term_refs().iter().map(|t| t.variable()).collect();
        assert_eq!(vars, vec!["a", "b", "c"]);
    }
}
