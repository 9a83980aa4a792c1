//! The search language: boolean queries over tags and tag values.
//!
//! ```text
//! search     := ws? expr1? ws?                  (empty input => no query)
//! expr1      := expr2 ( ws? ('+' | '-') ws? expr2 )*
//! expr2      := expr3 ( ws? '^' ws? expr3 )*
//! expr3      := '(' ws? expr1 ws? ')' | lookup
//! lookup     := '*' | tagName (':' qualifier)?
//! qualifier  := '=' valueUnit | '^' valueUnit | '~' valueUnit | tagValue
//! ```
//!
//! `^` binds tighter than `+` and `-`, which share a precedence level;
//! chains at one level associate left. The same character doubles as
//! the all-values qualifier when it directly follows `tagName:`, so
//! `a:^b ^ c:^d` is an intersection of two all-values lookups.

use crate::error::{Result, SnapzError};
use crate::lang::scan::Scanner;

/// Parenthesis nesting ceiling; deeper input is rejected rather than
/// risking stack exhaustion.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchExpr {
    /// `*` — every document in the store.
    SelectAll,
    /// `name` — documents carrying the tag, straight from the primary
    /// index (stale entries included).
    HasTag(String),
    /// `name:value` or `name:~unit` — the tag shares at least one of
    /// the values.
    HasAnyValue { name: String, values: Vec<String> },
    /// `name:^unit` — the tag holds every one of the values.
    HasAllValues { name: String, values: Vec<String> },
    /// `name:=unit` — the tag holds exactly these values.
    HasExactValues { name: String, values: Vec<String> },
    Intersection(Box<SearchExpr>, Box<SearchExpr>),
    Union(Box<SearchExpr>, Box<SearchExpr>),
    Difference(Box<SearchExpr>, Box<SearchExpr>),
}

/// Parses a search query. Empty or whitespace-only input is a valid
/// non-query and yields `None`.
pub fn parse_search(input: &str) -> Result<Option<SearchExpr>> {
    SearchParser {
        scanner: Scanner::new(input),
        depth: 0,
    }
    .parse()
}

struct SearchParser<'a> {
    scanner: Scanner<'a>,
    depth: usize,
}

impl SearchParser<'_> {
    fn parse(mut self) -> Result<Option<SearchExpr>> {
        self.scanner.skip_ws();
        if self.scanner.is_eof() {
            return Ok(None);
        }

        let expr = self.parse_union_level()?;
        self.scanner.skip_ws();
        if !self.scanner.is_eof() {
            return Err(self.scanner.error("an operator or end of input"));
        }
        Ok(Some(expr))
    }

    /// `+` and `-` share the loosest precedence level.
    fn parse_union_level(&mut self) -> Result<SearchExpr> {
        let mut left = self.parse_intersection_level()?;
        loop {
            let save = self.scanner.pos();
            self.scanner.skip_ws();
            let operator = match self.scanner.peek() {
                Some(op @ ('+' | '-')) => op,
                _ => {
                    self.scanner.set_pos(save);
                    return Ok(left);
                }
            };
            self.scanner.advance();
            self.scanner.skip_ws();

            let right = self.parse_intersection_level()?;
            left = match operator {
                '+' => SearchExpr::Union(Box::new(left), Box::new(right)),
                _ => SearchExpr::Difference(Box::new(left), Box::new(right)),
            };
        }
    }

    /// `^` between subexpressions is intersection.
    fn parse_intersection_level(&mut self) -> Result<SearchExpr> {
        let mut left = self.parse_atom()?;
        loop {
            let save = self.scanner.pos();
            self.scanner.skip_ws();
            if self.scanner.peek() != Some('^') {
                self.scanner.set_pos(save);
                return Ok(left);
            }
            self.scanner.advance();
            self.scanner.skip_ws();

            let right = self.parse_atom()?;
            left = SearchExpr::Intersection(Box::new(left), Box::new(right));
        }
    }

    fn parse_atom(&mut self) -> Result<SearchExpr> {
        if self.scanner.eat('(') {
            self.depth += 1;
            if self.depth > MAX_DEPTH {
                return Err(SnapzError::Parse {
                    position: self.scanner.pos(),
                    message: "expression nests too deeply".to_string(),
                });
            }

            self.scanner.skip_ws();
            let expr = self.parse_union_level()?;
            self.scanner.skip_ws();
            if !self.scanner.eat(')') {
                return Err(self.scanner.error("\")\""));
            }
            self.depth -= 1;
            return Ok(expr);
        }

        self.parse_lookup()
    }

    fn parse_lookup(&mut self) -> Result<SearchExpr> {
        if self.scanner.eat('*') {
            return Ok(SearchExpr::SelectAll);
        }

        let name = self.scanner.kebab("a tag name, \"*\", or \"(\"")?;
        if !self.scanner.eat(':') {
            return Ok(SearchExpr::HasTag(name));
        }

        if self.scanner.eat('=') {
            let values = self.scanner.value_unit()?;
            return Ok(SearchExpr::HasExactValues { name, values });
        }
        if self.scanner.eat('^') {
            let values = self.scanner.value_unit()?;
            return Ok(SearchExpr::HasAllValues { name, values });
        }
        if self.scanner.eat('~') {
            let values = self.scanner.value_unit()?;
            return Ok(SearchExpr::HasAnyValue { name, values });
        }

        // Bare form: a single value, shorthand for `name:~value`.
        let value = self.scanner.kebab("a tag value")?;
        Ok(SearchExpr::HasAnyValue {
            name,
            values: vec![value],
        })
    }
}
