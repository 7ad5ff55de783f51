// src/expression.rs
use std::borrow::Cow;

use crate::context::Context;
use crate::errors::{QueryError, QueryResult};
use crate::parser::Parser;
use crate::value::{Nodelist, Value};

/// Pending binary operation, applied when the next numeric term arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Plus,
    Minus,
    Mul,
    Div,
}

impl Operator {
    fn from_byte(c: u8) -> Option<Self> {
        match c {
            b'+' => Some(Operator::Plus),
            b'-' => Some(Operator::Minus),
            b'*' => Some(Operator::Mul),
            b'/' => Some(Operator::Div),
            _ => None,
        }
    }
}

/// Recursive-descent evaluator for one query against one document.
///
/// The grammar rules live next to what they evaluate: selectors and paths in
/// `jsonpath`, calls in `functions`, terms and operators here.
pub(crate) struct QueryParser<'q, 'a> {
    pub(crate) parser: Parser<'q>,
    root: &'a Value,
    ctx: Context,
    depth: usize,
}

impl<'q, 'a> QueryParser<'q, 'a> {
    pub(crate) fn new(query: &'q str, root: &'a Value, ctx: Context) -> Self {
        Self {
            parser: Parser::new(query),
            root,
            ctx,
            depth: 0,
        }
    }

    /// Evaluates the whole query. An empty query selects the root.
    pub(crate) fn parse(mut self) -> QueryResult<Nodelist<'a>> {
        self.parser.skip_ws();
        if self.parser.eof() {
            return Ok(self.root_nodelist());
        }
        let nodes = self.parse_expression()?;
        if !self.parser.eof() {
            return Err(self.parser.syntax_error("expected end of expression"));
        }
        Ok(nodes)
    }

    pub(crate) fn root_nodelist(&self) -> Nodelist<'a> {
        vec![Cow::Borrowed(self.root)]
    }

    /// Evaluates terms joined by `+ - * /`, folding left to right.
    ///
    /// A term that is not a single number is only allowed on its own; it then
    /// becomes the result unchanged.
    pub(crate) fn parse_expression(&mut self) -> QueryResult<Nodelist<'a>> {
        if self.depth >= self.ctx.max_depth {
            return Err(self.parser.syntax_error("expression nested too deeply"));
        }
        self.depth += 1;
        let nodes = self.fold_terms();
        self.depth -= 1;
        nodes
    }

    fn fold_terms(&mut self) -> QueryResult<Nodelist<'a>> {
        let mut expecting_term = true;
        let mut pending: Option<Operator> = None;
        let mut acc = 0.0;
        let mut non_numeric: Option<Nodelist<'a>> = None;

        loop {
            self.parser.skip_ws();
            if self.parser.eof() {
                break;
            }

            let start = self.parser.pos();
            if let Some(number) = self.parser.match_number()? {
                if expecting_term {
                    acc = self.apply(acc, pending, number)?;
                    expecting_term = false;
                } else if number.is_sign_negative() {
                    // `x-1` reads as `x - 1`
                    if non_numeric.is_some() {
                        return Err(self.left_operand_error(start));
                    }
                    acc = self.apply(acc, Some(Operator::Minus), -number)?;
                } else {
                    return Err(self.parser.syntax_error(
                        "expecting end of expression or binary operator, got number",
                    ));
                }
                continue;
            }

            if let Some(op) = self.parser.peek().and_then(Operator::from_byte) {
                if expecting_term {
                    return Err(self.parser.syntax_error("expected value, got operator"));
                }
                if non_numeric.is_some() {
                    return Err(self.left_operand_error(self.parser.pos()));
                }
                pending = Some(op);
                expecting_term = true;
                self.parser.advance();
                continue;
            }

            if !expecting_term {
                break;
            }

            let term = self.parse_term()?;
            match single_number(&term) {
                Some(n) => acc = self.apply(acc, pending, n)?,
                None if pending.is_none() => non_numeric = Some(term),
                None => {
                    return Err(self.parser.value_error(
                        "expression to the right of binary operator doesn't resolve to [number]",
                    ))
                }
            }
            expecting_term = false;
        }

        if expecting_term {
            return Err(self.parser.syntax_error("expected value"));
        }
        Ok(non_numeric.unwrap_or_else(|| vec![Cow::Owned(Value::Number(acc))]))
    }

    /// A parenthesized group, or a path or function call.
    fn parse_term(&mut self) -> QueryResult<Nodelist<'a>> {
        if !self.parser.consume_char(b'(') {
            return self.parse_path_or_function();
        }
        let nodes = self.parse_expression()?;
        if !self.parser.consume_char(b')') {
            return Err(self
                .parser
                .syntax_error("unterminated parenthesized expression, expected )"));
        }
        Ok(nodes)
    }

    fn apply(&self, acc: f64, op: Option<Operator>, rhs: f64) -> QueryResult<f64> {
        Ok(match op {
            None => rhs,
            Some(Operator::Plus) => acc + rhs,
            Some(Operator::Minus) => acc - rhs,
            Some(Operator::Mul) => acc * rhs,
            Some(Operator::Div) if rhs == 0.0 => {
                return Err(self.parser.value_error("division by zero"))
            }
            Some(Operator::Div) => acc / rhs,
        })
    }

    fn left_operand_error(&self, operator_at: usize) -> QueryError {
        self.parser.value_error_at(
            operator_at,
            "expression to the left of binary operator doesn't resolve to [number]",
        )
    }
}

fn single_number(nodes: &Nodelist<'_>) -> Option<f64> {
    match nodes.as_slice() {
        [only] => only.as_f64(),
        _ => None,
    }
}
