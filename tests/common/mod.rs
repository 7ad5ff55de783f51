#![allow(dead_code)]

use json_path_like_eval::{evaluate, loader, Diagnostic, QueryError, Value};

pub fn doc() -> Value {
    loader::from_str(include_str!("../data/a.json")).unwrap()
}

pub fn eval(doc: &Value, query: &str) -> Vec<Value> {
    evaluate(doc, query).unwrap_or_else(|e| panic!("{query} failed:\n{e}"))
}

pub fn number(doc: &Value, query: &str) -> f64 {
    match eval(doc, query).as_slice() {
        [Value::Number(n)] => *n,
        other => panic!("{query} gave {other:?}"),
    }
}

pub fn syntax_error(doc: &Value, query: &str) -> Diagnostic {
    match evaluate(doc, query) {
        Err(QueryError::Syntax(d)) => d,
        other => panic!("{query}: expected a syntax error, got {other:?}"),
    }
}

pub fn value_error(doc: &Value, query: &str) -> Diagnostic {
    match evaluate(doc, query) {
        Err(QueryError::Value(d)) => d,
        other => panic!("{query}: expected a value error, got {other:?}"),
    }
}
