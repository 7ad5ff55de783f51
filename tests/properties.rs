use json_path_like_eval::{evaluate, Value};
use proptest::prelude::*;

fn numbers(items: &[i32]) -> Value {
    Value::Array(items.iter().map(|&n| Value::Number(f64::from(n))).collect())
}

fn name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn bare_name_is_shorthand_for_root_member(key in name(), n in -1000i32..1000) {
        let doc = Value::Object([(key.clone(), Value::Number(f64::from(n)))].into_iter().collect());
        let short = evaluate(&doc, &key).unwrap();
        prop_assert_eq!(&short, &evaluate(&doc, &format!("$.{key}")).unwrap());
        prop_assert_eq!(&short, &evaluate(&doc, &format!("['{key}']")).unwrap());
        prop_assert_eq!(short, vec![Value::Number(f64::from(n))]);
    }

    #[test]
    fn index_resolves_from_either_end(items in prop::collection::vec(-50i32..50, 0..12), i in -20i64..20) {
        let doc = numbers(&items);
        let len = items.len() as i64;
        let resolved = if i < 0 { i + len } else { i };
        let expected: Vec<Value> = if (0..len).contains(&resolved) {
            vec![Value::Number(f64::from(items[resolved as usize]))]
        } else {
            Vec::new()
        };
        prop_assert_eq!(evaluate(&doc, &format!("$[{i}]")).unwrap(), expected);
    }

    #[test]
    fn root_is_identity(items in prop::collection::vec(-50i32..50, 0..8)) {
        let doc = numbers(&items);
        prop_assert_eq!(evaluate(&doc, "$").unwrap(), vec![doc.clone()]);
        prop_assert_eq!(evaluate(&doc, "").unwrap(), vec![doc]);
    }

    #[test]
    fn min_max_of_an_array_match_spread_arguments(items in prop::collection::vec(-500i32..500, 1..8)) {
        let doc = numbers(&items);
        let spread = items.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        for func in ["min", "max"] {
            prop_assert_eq!(
                evaluate(&doc, &format!("{func}($)")).unwrap(),
                evaluate(&doc, &format!("{func}({spread})")).unwrap()
            );
        }
        let lowest = items.iter().copied().min().map(f64::from);
        prop_assert_eq!(
            evaluate(&doc, "min($)").unwrap(),
            vec![Value::Number(lowest.unwrap_or_default())]
        );
    }

    #[test]
    fn arithmetic_folds_left_to_right(a in -100i32..100, b in -100i32..100, c in -100i32..100) {
        let query = format!("{a} + {b} * {c}");
        let expected = (f64::from(a) + f64::from(b)) * f64::from(c);
        prop_assert_eq!(evaluate(&Value::Null, &query).unwrap(), vec![Value::Number(expected)]);
    }
}
