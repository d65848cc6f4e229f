//! The builtin actions every spider starts with: `split`, `replace`,
//! `remove`.

use regex::Regex;
use serde_json::Value;

use crate::actions::registry::ActionDescriptor;
use crate::error::{ActionError, ActionResult};
use crate::types::RawValue;

/// The default action set seeded into every registry.
pub fn builtin_actions<C>() -> Vec<ActionDescriptor<C>> {
    vec![
        // Fans the single raw text of one node out into many values.
        ActionDescriptor::group("split", |values, _context, params| {
            let splitter = string_param("split", params, 0)?;
            if splitter.is_empty() {
                return Err(bad_arguments("split", "splitter must be a non-empty string"));
            }
            let raw = values.first().ok_or_else(|| {
                bad_arguments("split", "expects the single raw text of one node")
            })?;
            Ok(RawValue::Group(
                raw.split(splitter).map(str::to_owned).collect(),
            ))
        }),
        // Global regex substitution.
        ActionDescriptor::single("replace", |value, _context, params| {
            let from = string_param("replace", params, 0)?;
            if from.is_empty() {
                return Err(bad_arguments(
                    "replace",
                    "search pattern must be a non-empty string",
                ));
            }
            let to = scalar_param("replace", params, 1)?;
            let pattern = compile("replace", from)?;
            Ok(pattern.replace_all(value, to.as_str()).into_owned())
        }),
        // Global regex removal.
        ActionDescriptor::single("remove", |value, _context, params| {
            let target = string_param("remove", params, 0)?;
            if target.is_empty() {
                return Err(bad_arguments(
                    "remove",
                    "target pattern must be a non-empty string",
                ));
            }
            let pattern = compile("remove", target)?;
            Ok(pattern.replace_all(value, "").into_owned())
        }),
    ]
}

fn string_param<'p>(name: &str, params: &'p [Value], index: usize) -> ActionResult<&'p str> {
    params
        .get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| bad_arguments(name, &format!("parameter {index} must be a string")))
}

/// Like [`string_param`], but also accepts numbers and booleans, rendered
/// as their plain string forms. Replacement text is not required to be a
/// string, only to be present.
fn scalar_param(name: &str, params: &[Value], index: usize) -> ActionResult<String> {
    let value = params
        .get(index)
        .ok_or_else(|| bad_arguments(name, &format!("parameter {index} is required")))?;
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(bad_arguments(
            name,
            &format!("parameter {index} must be a string, number, or boolean"),
        )),
    }
}

fn compile(name: &str, raw: &str) -> ActionResult<Regex> {
    Regex::new(raw).map_err(|err| bad_arguments(name, &format!("invalid pattern `{raw}`: {err}")))
}

fn bad_arguments(name: &str, reason: &str) -> ActionError {
    ActionError::BadArguments {
        name: name.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::registry::ActionRegistry;
    use proptest::prelude::*;
    use serde_json::json;

    fn invoke(name: &str, value: RawValue, params: &[Value]) -> ActionResult<RawValue> {
        ActionRegistry::<()>::with_builtins().invoke(name, value, &(), params)
    }

    #[test]
    fn test_split_fans_out_one_raw_text() {
        let result = invoke(
            "split",
            RawValue::Group(vec!["a,b,c".to_string()]),
            &[json!(",")],
        )
        .unwrap();
        assert_eq!(
            result,
            RawValue::Group(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_split_requires_a_splitter() {
        let value = RawValue::Group(vec!["a,b".to_string()]);
        assert!(matches!(
            invoke("split", value.clone(), &[]),
            Err(ActionError::BadArguments { .. })
        ));
        assert!(matches!(
            invoke("split", value, &[json!("")]),
            Err(ActionError::BadArguments { .. })
        ));
    }

    #[test]
    fn test_split_requires_a_raw_value() {
        let error = invoke("split", RawValue::Group(vec![]), &[json!(",")]).unwrap_err();
        assert!(matches!(error, ActionError::BadArguments { .. }));
    }

    #[test]
    fn test_replace_substitutes_globally() {
        let result = invoke(
            "replace",
            RawValue::from("banana"),
            &[json!("a"), json!("b")],
        )
        .unwrap();
        assert_eq!(result, RawValue::from("bbnbnb"));
    }

    #[test]
    fn test_replace_allows_empty_replacement() {
        let result = invoke(
            "replace",
            RawValue::from("a-b"),
            &[json!("-"), json!("")],
        )
        .unwrap();
        assert_eq!(result, RawValue::from("ab"));
    }

    #[test]
    fn test_replace_accepts_scalar_replacement() {
        let result = invoke(
            "replace",
            RawValue::from("banana"),
            &[json!("a"), json!(0)],
        )
        .unwrap();
        assert_eq!(result, RawValue::from("b0n0n0"));
    }

    #[test]
    fn test_replace_rejects_non_scalar_replacement() {
        let error = invoke(
            "replace",
            RawValue::from("banana"),
            &[json!("a"), json!(["b"])],
        )
        .unwrap_err();
        assert!(matches!(error, ActionError::BadArguments { .. }));
    }

    #[test]
    fn test_replace_rejects_missing_params() {
        let error = invoke("replace", RawValue::from("x"), &[json!(""), json!("y")]);
        assert!(matches!(error, Err(ActionError::BadArguments { .. })));

        let error = invoke("replace", RawValue::from("x"), &[json!("a")]);
        assert!(matches!(error, Err(ActionError::BadArguments { .. })));
    }

    #[test]
    fn test_remove_strips_pattern() {
        let result = invoke("remove", RawValue::from("$12.50"), &[json!("\\$")]).unwrap();
        assert_eq!(result, RawValue::from("12.50"));
    }

    #[test]
    fn test_remove_rejects_empty_target() {
        let error = invoke("remove", RawValue::from("x"), &[json!("")]).unwrap_err();
        assert!(matches!(error, ActionError::BadArguments { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_an_argument_error() {
        let error = invoke("remove", RawValue::from("x"), &[json!("(")]).unwrap_err();
        assert!(matches!(error, ActionError::BadArguments { .. }));
    }

    proptest! {
        #[test]
        fn prop_remove_leaves_no_occurrences(input in "[a-z ]{0,40}") {
            let result = invoke("remove", RawValue::from(input.as_str()), &[json!("a")]).unwrap();
            let output = result.as_single().unwrap().to_owned();
            prop_assert!(!output.contains('a'));
        }

        #[test]
        fn prop_replace_preserves_other_characters(input in "[a-z]{0,40}") {
            let result = invoke(
                "replace",
                RawValue::from(input.as_str()),
                &[json!("a"), json!("b")],
            )
            .unwrap();
            let output = result.as_single().unwrap().to_owned();
            prop_assert_eq!(output.len(), input.len());
            prop_assert!(!output.contains('a'));
        }
    }
}
