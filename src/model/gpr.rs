//! Gene-reaction rules.
//!
//! Rules are boolean expressions over gene ids, e.g.
//! `(b0001 and b0002) or b0003`. `and` binds tighter than `or`.

use crate::error::{BenchError, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(|\)|[^\s()]+").expect("valid token pattern"))
}

/// Parsed gene-reaction rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gpr {
    Gene(String),
    And(Vec<Gpr>),
    Or(Vec<Gpr>),
}

impl Gpr {
    /// Parse a rule, mapping every gene id through `rename`.
    ///
    /// Returns `None` for an empty rule (reaction not gene-associated).
    pub fn parse_with<F>(rule: &str, rename: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> String,
    {
        let tokens: Vec<&str> = token_pattern()
            .find_iter(rule)
            .map(|m| m.as_str())
            .collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            rule,
            rename: &rename,
        };
        let expr = parser.or_expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("unexpected trailing tokens"));
        }
        Ok(Some(expr))
    }

    /// Parse a rule keeping gene ids as written.
    pub fn parse(rule: &str) -> Result<Option<Self>> {
        Self::parse_with(rule, |g| g.to_string())
    }

    /// Evaluate the rule given which genes are functional.
    pub fn is_active<F>(&self, functional: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Gpr::Gene(g) => functional(g),
            Gpr::And(terms) => terms.iter().all(|t| t.is_active(functional)),
            Gpr::Or(terms) => terms.iter().any(|t| t.is_active(functional)),
        }
    }

    /// Collect the gene ids mentioned in the rule.
    pub fn genes(&self, out: &mut BTreeSet<String>) {
        match self {
            Gpr::Gene(g) => {
                out.insert(g.clone());
            }
            Gpr::And(terms) | Gpr::Or(terms) => terms.iter().for_each(|t| t.genes(out)),
        }
    }
}

struct Parser<'a, F> {
    tokens: Vec<&'a str>,
    pos: usize,
    rule: &'a str,
    rename: &'a F,
}

impl<'a, F: Fn(&str) -> String> Parser<'a, F> {
    fn error(&self, reason: &str) -> BenchError {
        BenchError::Model(format!("invalid gene rule '{}': {}", self.rule, reason))
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|t| t.eq_ignore_ascii_case(keyword))
    }

    fn or_expr(&mut self) -> Result<Gpr> {
        let mut terms = vec![self.and_expr()?];
        while self.peek_keyword("or") {
            self.pos += 1;
            terms.push(self.and_expr()?);
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Gpr::Or(terms)
        })
    }

    fn and_expr(&mut self) -> Result<Gpr> {
        let mut terms = vec![self.atom()?];
        while self.peek_keyword("and") {
            self.pos += 1;
            terms.push(self.atom()?);
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Gpr::And(terms)
        })
    }

    fn atom(&mut self) -> Result<Gpr> {
        let token = *self
            .tokens
            .get(self.pos)
            .ok_or_else(|| self.error("unexpected end of rule"))?;
        self.pos += 1;
        match token {
            "(" => {
                let inner = self.or_expr()?;
                if self.tokens.get(self.pos) != Some(&")") {
                    return Err(self.error("unbalanced parentheses"));
                }
                self.pos += 1;
                Ok(inner)
            }
            ")" => Err(self.error("unexpected ')'")),
            t if t.eq_ignore_ascii_case("and") || t.eq_ignore_ascii_case("or") => {
                Err(self.error("operator without operand"))
            }
            gene => Ok(Gpr::Gene((self.rename)(gene))),
        }
    }
}
