use crate::fuzzy::fuzzyerror::FuzzyError;

use super::expression::{
    Expression,
    TermRef
};
use super::rule::Rule;

// ─────────────────────────────────────────────────────────────────────────────
// 文字規則語法
// ─────────────────────────────────────────────────────────────────────────────
//
//   rule     := IF cond THEN ident IS ident
//   cond     := operand ((AND | OR) operand)*
//   operand  := ident IS ident | '(' cond ')'
//
// AND / OR 沒有優先順序，一律由左而右結合：
//   a AND b OR c  →  Or(And(a, b), c)
//   a OR b AND c  →  And(Or(a, b), c)
// 需要其他分組時使用括號。關鍵字不分大小寫。

/// 括號最多可巢狀的層數。
pub const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    If,
    Then,
    Is,
    And,
    Or,
    LParen,
    RParen,
    Ident(String),
}

fn tokenize(text: &str) -> Vec<Token> {
    let spaced = text.replace('(', " ( ").replace(')', " ) ");
    spaced
        .split_whitespace()
        .map(|word| match word.to_ascii_uppercase().as_str() {
            "IF" => Token::If,
            "THEN" => Token::Then,
            "IS" => Token::Is,
            "AND" => Token::And,
            "OR" => Token::Or,
            "(" => Token::LParen,
            ")" => Token::RParen,
            _ => Token::Ident(word.to_owned()),
        })
        .collect()
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        self.position += 1;
        token
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), FuzzyError> {
        let position = self.position;
        match self.next() {
            Some(token) if token == expected => Ok(()),
            _ => Err(FuzzyError::rule_parse(position, format!("expected {}", what))),
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, FuzzyError> {
        let position = self.position;
        match self.next() {
            Some(Token::Ident(name)) => Ok(name),
            _ => Err(FuzzyError::rule_parse(position, format!("expected {}", what))),
        }
    }

    fn term_ref(&mut self) -> Result<TermRef, FuzzyError> {
        let variable = self.ident("variable name")?;
        self.expect(Token::Is, "IS")?;
        let term = self.ident("term name")?;
        Ok(TermRef::new(variable, term))
    }

    fn operand(&mut self) -> Result<Expression, FuzzyError> {
        if self.peek() == Some(&Token::LParen) {
            if self.depth == MAX_NESTING {
                return Err(FuzzyError::rule_parse(
                    self.position,
                    format!("parentheses nested deeper than {}", MAX_NESTING),
                ));
            }
            self.position += 1;
            self.depth += 1;
            let inner = self.condition()?;
            self.depth -= 1;
            self.expect(Token::RParen, "')'")?;
            Ok(inner)
        } else {
            Ok(Expression::Term(self.term_ref()?))
        }
    }

    fn condition(&mut self) -> Result<Expression, FuzzyError> {
        let mut expression = self.operand()?;
        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.position += 1;
                    expression = expression.and(self.operand()?);
                }
                Some(Token::Or) => {
                    self.position += 1;
                    expression = expression.or(self.operand()?);
                }
                _ => return Ok(expression),
            }
        }
    }

    fn rule(&mut self) -> Result<Rule, FuzzyError> {
        self.expect(Token::If, "IF")?;
        let antecedent = self.condition()?;
        self.expect(Token::Then, "THEN")?;
        let consequent = self.term_ref()?;
        if self.position < self.tokens.len() {
            return Err(FuzzyError::rule_parse(self.position, "unexpected trailing tokens"));
        }
        Ok(Rule::new(antecedent, consequent))
    }
}

/// 解析 `IF ... THEN variable IS term` 形式的規則。
pub fn parse_rule(text: &str) -> Result<Rule, FuzzyError> {
    let mut parser = Parser { tokens: tokenize(text), position: 0, depth: 0 };
    parser.rule()
}
