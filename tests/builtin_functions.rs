mod common;

use common::{doc, number, syntax_error, value_error};
use json_path_like_eval::{evaluate, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_builtin_size() {
    let doc = doc();
    assert_eq!(number(&doc, "size($)"), 4.0);
    assert_eq!(number(&doc, "size(mm)"), 6.0);
    assert_eq!(number(&doc, "size(mm.arr)"), 8.0);
    assert_eq!(number(&doc, "size(mm.arr[2])"), 0.0);
    assert_eq!(number(&doc, "size(mm.obj)"), 1.0);
    assert_eq!(number(&doc, "size(⭐)"), 2.0);
    assert_eq!(number(&doc, "size(mm[b]) - 1"), 7.0);
}

#[test]
fn test_builtin_min_max() {
    let doc = doc();
    assert_eq!(number(&doc, "min(3, n, mm['4'])"), 3.0);
    assert_eq!(number(&doc, "max(3, n, mm['4'])"), 7.0);
    assert_eq!(number(&doc, "min(mm.list)"), 1.0);
    assert_eq!(number(&doc, "max(mm.list)"), 2.0);
    assert_eq!(number(&doc, "max(1 + 1, 10 / 4)"), 2.5);
    assert_eq!(number(&doc, "min(-1, -2.5)"), -2.5);
    assert_eq!(number(&doc, "max(min(4, 9), size(mm))"), 6.0);
}

#[test]
fn test_single_argument_is_its_own_extreme() {
    let doc = doc();
    assert_eq!(number(&doc, "min(n)"), 7.0);
    assert_eq!(number(&doc, "max(n)"), 7.0);
}

#[test]
fn test_min_max_reject_non_numbers() {
    let doc = doc();
    for func in ["min", "max"] {
        let d = value_error(&doc, &format!("{func}(4, 5, b, 7)"));
        assert_eq!(d.position, 14);
        assert_eq!(
            d.message,
            format!("function {func}() only accepts numerical arguments but argument 2 is:\n\"arr\"")
        );
    }

    let d = value_error(&doc, "min(1, mm.list)");
    assert_eq!(d.position, 14);
    assert_eq!(
        d.message,
        "function min() only accepts numerical arguments but argument 1 is:\n[\n  1,\n  2\n]"
    );

    let d = value_error(&doc, "max(mm.arr)");
    assert_eq!(d.position, 10);
    assert_eq!(
        d.message,
        "function max() only accepts numerical arguments but argument 0 is:\n\"a\""
    );
}

#[test]
fn test_size_rejects_scalars() {
    let doc = doc();
    let message = "function size() is only valid for Json arrays, objects and strings";
    assert_eq!(value_error(&doc, "size(4)").position, 7);
    assert_eq!(value_error(&doc, "size(mm['4'])").position, 13);
    let d = value_error(&doc, "size(mm.key.a)");
    assert_eq!((d.position, d.message.as_str()), (14, message));

    let d = value_error(&Value::from(json!({"a": 1})), "size(a)");
    assert_eq!(d.message, message);
}

#[test]
fn test_size_takes_exactly_one_argument() {
    let d = syntax_error(&doc(), "size(mm, mm, mm)");
    assert_eq!(d.position, 16);
    assert_eq!(d.message, "function size() only accepts one argument");
}

#[test]
fn test_unknown_function() {
    let d = syntax_error(&doc(), "nchildren(mm)");
    assert_eq!(d.message, "unknown function nchildren()");
    assert_eq!(d.position, 9);
}

#[test]
fn test_function_result_is_one_owned_number() {
    let out = evaluate(&doc(), "size(mm.arr)").unwrap();
    assert_eq!(out, vec![Value::Number(8.0)]);
}
