use std::borrow::Cow;

use tracing::trace;

use crate::errors::QueryResult;
use crate::expression::QueryParser;
use crate::render::render_nodelist;
use crate::value::{Nodelist, Value};

/// Functions a query may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Smallest numeric argument, or smallest element of a single array argument.
    Min,
    /// Largest numeric argument, or largest element of a single array argument.
    Max,
    /// Element count of an array, member count of an object, length of a string.
    Size,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(Builtin::Min),
            "max" => Some(Builtin::Max),
            "size" => Some(Builtin::Size),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::Size => "size",
        }
    }
}

impl<'q, 'a> QueryParser<'q, 'a> {
    /// `func(arg, ...)` where each argument is an expression yielding one value.
    pub(crate) fn parse_function_call(&mut self, func: Builtin) -> QueryResult<Nodelist<'a>> {
        self.parser.advance();
        let mut args: Vec<Cow<'a, Value>> = Vec::new();
        loop {
            let mut arg = self.parse_expression()?;
            match arg.len() {
                0 => {
                    return Err(self
                        .parser
                        .value_error("function argument cannot evaluate to nothing"))
                }
                1 => args.extend(arg.pop()),
                _ => {
                    return Err(self.parser.value_error(format!(
                        "function argument must evaluate to one value, evaluates to:\n{}",
                        render_nodelist(&arg)
                    )))
                }
            }
            self.parser.skip_ws();
            if !self.parser.consume_char(b',') {
                break;
            }
        }
        if !self.parser.consume_char(b')') {
            return Err(self
                .parser
                .syntax_error("function call unterminated, expected )"));
        }

        trace!(function = func.name(), args = args.len(), "calling builtin");
        let result = match func {
            Builtin::Min => self.fold_numbers(func, &args, f64::INFINITY, f64::min)?,
            Builtin::Max => self.fold_numbers(func, &args, f64::NEG_INFINITY, f64::max)?,
            Builtin::Size => self.size(&args)?,
        };
        Ok(vec![Cow::Owned(Value::Number(result))])
    }

    /// Folds numeric arguments; a lone array argument supplies its elements instead.
    fn fold_numbers(
        &mut self,
        func: Builtin,
        args: &[Cow<'a, Value>],
        seed: f64,
        pick: fn(f64, f64) -> f64,
    ) -> QueryResult<f64> {
        let operands: Vec<&Value> = match args {
            [only] => match &**only {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            },
            _ => args.iter().map(|arg| &**arg).collect(),
        };

        let mut acc = seed;
        for (index, operand) in operands.iter().enumerate() {
            let Some(n) = operand.as_f64() else {
                self.parser.rewind();
                return Err(self.parser.value_error(format!(
                    "function {}() only accepts numerical arguments but argument {index} is:\n{}",
                    func.name(),
                    operand.to_pretty_string()
                )));
            };
            acc = pick(acc, n);
        }
        Ok(acc)
    }

    fn size(&self, args: &[Cow<'a, Value>]) -> QueryResult<f64> {
        let [arg] = args else {
            return Err(self
                .parser
                .syntax_error("function size() only accepts one argument"));
        };
        let size = match &**arg {
            Value::Array(items) => items.len(),
            Value::Object(members) => members.len(),
            Value::String(s) => s.chars().count(),
            _ => {
                return Err(self.parser.value_error(
                    "function size() is only valid for Json arrays, objects and strings",
                ))
            }
        };
        Ok(size as f64)
    }
}
