use std::borrow::Cow;

use tracing::trace;

use crate::errors::QueryResult;
use crate::expression::QueryParser;
use crate::functions::Builtin;
use crate::parser::{is_name_char, is_name_first};
use crate::render::render_nodelist;
use crate::value::{Nodelist, Value};

impl<'q, 'a> QueryParser<'q, 'a> {
    /// A path starting at `$`, at a bare member name or at `[`, or a call.
    ///
    /// A bare name is shorthand for `$.name`. Whitespace may separate it from
    /// a following `(`, `.` or `[`.
    pub(crate) fn parse_path_or_function(&mut self) -> QueryResult<Nodelist<'a>> {
        let nodes = self.root_nodelist();

        if self.parser.consume_char(b'$') {
            self.parser.skip_ws();
            return match self.parser.peek() {
                Some(b'.' | b'[') => self.parse_path(nodes, None),
                _ => Ok(nodes),
            };
        }
        if self.parser.peek() == Some(b'[') {
            return self.parse_path(nodes, None);
        }

        let start = self.parser.pos();
        if !self.parser.peek().is_some_and(is_name_first) {
            return Err(self.parser.syntax_error(
                "invalid first character in dot-notation name selector or function name",
            ));
        }
        self.parser.eat_while(is_name_char);
        let name = self.parser.lexeme(start);
        self.parser.skip_ws();

        match self.parser.peek() {
            Some(b'(') => {
                let func = Builtin::from_name(&name).ok_or_else(|| {
                    self.parser.syntax_error(format!("unknown function {name}()"))
                })?;
                self.parse_function_call(func)
            }
            Some(b'.' | b'[') => self.parse_path(nodes, Some(&*name)),
            _ => Ok(filter_by_name(nodes, &name)),
        }
    }

    /// Applies `leading` as a member name, then every selector that follows.
    fn parse_path(
        &mut self,
        nodes: Nodelist<'a>,
        leading: Option<&str>,
    ) -> QueryResult<Nodelist<'a>> {
        let mut nodes = match leading {
            Some(name) => filter_by_name(nodes, name),
            None => nodes,
        };
        loop {
            self.parser.skip_ws();
            nodes = match self.parser.peek() {
                Some(b'.') => self.parse_dotted_selector(nodes)?,
                Some(b'[') => match self.parser.peek_next() {
                    Some(quote @ (b'\'' | b'"')) => self.parse_quoted_selector(nodes, quote)?,
                    _ => self.parse_index_selector(nodes)?,
                },
                _ => return Ok(nodes),
            };
        }
    }

    /// `.name`
    fn parse_dotted_selector(&mut self, nodes: Nodelist<'a>) -> QueryResult<Nodelist<'a>> {
        self.parser.advance();
        let start = self.parser.pos();
        if !self.parser.peek().is_some_and(is_name_first) {
            return Err(self
                .parser
                .syntax_error("invalid first character for dot-notation name selector"));
        }
        self.parser.eat_while(is_name_char);
        Ok(filter_by_name(nodes, &self.parser.lexeme(start)))
    }

    /// `['name']` or `["name"]`. The name is taken verbatim, without escapes.
    fn parse_quoted_selector(
        &mut self,
        nodes: Nodelist<'a>,
        quote: u8,
    ) -> QueryResult<Nodelist<'a>> {
        self.parser.advance();
        self.parser.advance();
        let start = self.parser.pos();
        self.parser.eat_while(|c| c != quote);
        if self.parser.eof() {
            return Err(self
                .parser
                .syntax_error("query ended early: unterminated name selector"));
        }
        let name = self.parser.lexeme(start);
        self.parser.advance();
        if !self.parser.consume_char(b']') {
            return Err(self
                .parser
                .syntax_error("unterminated name selector, expected ]"));
        }
        Ok(filter_by_name(nodes, &name))
    }

    /// `[expr]`: a string result selects a member, an integer an element.
    fn parse_index_selector(&mut self, nodes: Nodelist<'a>) -> QueryResult<Nodelist<'a>> {
        self.parser.advance();
        let selector = self.parse_expression()?;
        if !self.parser.consume_char(b']') {
            return Err(self.parser.syntax_error("expected ]"));
        }

        let [key] = selector.as_slice() else {
            self.parser.rewind();
            return Err(self.parser.value_error(format!(
                "expression inside [...] must evaluate to one value, evaluates to:\n{}",
                render_nodelist(&selector)
            )));
        };
        match &**key {
            Value::String(name) => Ok(filter_by_name(nodes, name)),
            Value::Number(n) if n.floor() == *n => Ok(select_index(nodes, *n as i64)),
            Value::Number(n) => {
                self.parser.rewind();
                Err(self.parser.value_error(format!(
                    "expression inside [...] must evaluate to an integer index, evaluates to: {n}"
                )))
            }
            _ => {
                self.parser.rewind();
                Err(self.parser.value_error(format!(
                    "expression inside [...] must evaluate to [string] or [number], evaluates to:\n{}",
                    render_nodelist(&selector)
                )))
            }
        }
    }
}

/// Member `name` of every object in `nodes`; other nodes drop out.
pub(crate) fn filter_by_name<'a>(nodes: Nodelist<'a>, name: &str) -> Nodelist<'a> {
    trace!(name, nodes = nodes.len(), "name selector");
    nodes
        .into_iter()
        .filter_map(|node| match node {
            Cow::Borrowed(v) => v.get(name).map(Cow::Borrowed),
            Cow::Owned(v) => v.get(name).cloned().map(Cow::Owned),
        })
        .collect()
}

/// Element `index` of every array in `nodes`; other nodes drop out.
pub(crate) fn select_index<'a>(nodes: Nodelist<'a>, index: i64) -> Nodelist<'a> {
    trace!(index, nodes = nodes.len(), "index selector");
    nodes
        .into_iter()
        .filter_map(|node| match node {
            Cow::Borrowed(v) => v.get_index(index).map(Cow::Borrowed),
            Cow::Owned(v) => v.get_index(index).cloned().map(Cow::Owned),
        })
        .collect()
}
