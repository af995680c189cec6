use qilan::*;
use serde_json::json;

use crate::engine;

#[mockable]
#[allow(dead_code)]
trait Calculator {
    fn add(&self, a: f64, b: f64) -> f64;
    fn describe(&self, input: &str) -> String;
}

#[test]
fn exact_beats_any_wildcard() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("add", args![1, 2]))?.returns("exact")?;
    qilan.when(|| calc.call("add", args![1, anything()]))?.returns("positional")?;
    qilan.when(|| calc.call("add", args![any_args()]))?.returns("any args")?;

    assert_eq!(calc.call("add", args![1, 2]), Value::from("exact"));
    assert_eq!(calc.call("add", args![1, 5]), Value::from("any args"));
    assert_eq!(calc.call("add", args![2, 2]), Value::from("any args"));
    assert_eq!(calc.call("add", args![]), Value::from("any args"));
    Ok(())
}

#[test]
fn precedence_does_not_depend_on_registration_order() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("add", args![1, 2]))?.returns("exact")?;
    qilan.when(|| calc.call("add", args![1, anything()]))?.returns("positional")?;
    qilan.when(|| calc.call("add", args![any_args()]))?.returns("any args")?;
    qilan.when(|| calc.call("add", args![anything(), anything()]))?.returns("two wildcards")?;

    assert_eq!(calc.call("add", args![1, 2]), Value::from("exact"));
    assert_eq!(calc.call("add", args![1, 5]), Value::from("two wildcards"));
    assert_eq!(calc.call("add", args![3]), Value::from("any args"));
    Ok(())
}

#[test]
fn later_any_args_overrides_earlier_positional_wildcards() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("add", args![anything(), anything()]))?.returns("pair")?;
    qilan.when(|| calc.call("add", args![any_args()]))?.returns("any args")?;

    assert_eq!(calc.call("add", args![1, 2]), Value::from("any args"));

    qilan.when(|| calc.call("add", args![anything(), anything()]))?.returns("pair again")?;

    assert_eq!(calc.call("add", args![1, 2]), Value::from("pair again"));
    assert_eq!(calc.call("add", args![1]), Value::from("any args"));
    Ok(())
}

#[test]
fn most_recent_registration_wins_among_equals() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("describe", args![anything()]))?.returns("anything")?;
    qilan.when(|| calc.call("describe", args![any(ValueKind::String)]))?.returns("string")?;
    qilan.when(|| calc.call("describe", args![any(ValueKind::Number)]))?.returns("number")?;

    assert_eq!(calc.call("describe", args!["a"]), Value::from("string"));
    assert_eq!(calc.call("describe", args![1]), Value::from("number"));
    assert_eq!(calc.call("describe", args![true]), Value::from("anything"));

    qilan.when(|| calc.call("describe", args![anything()]))?.returns("anything again")?;
    assert_eq!(calc.call("describe", args!["a"]), Value::from("anything again"));
    Ok(())
}

#[test]
fn restubbing_an_exact_call_replaces_its_answer() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("add", args![1, 1]))?.returns(2)?;
    assert_eq!(calc.call("add", args![1, 1]), Value::from(2));

    qilan.when(|| calc.call("add", args![1, 1]))?.returns(3)?;
    assert_eq!(calc.call("add", args![1, 1]), Value::from(3));
    Ok(())
}

#[test]
fn typed_wildcards_check_the_kind() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("describe", args![any(ValueKind::Array)]))?.returns("array")?;
    qilan.when(|| calc.call("describe", args![any(ValueKind::Object)]))?.returns("object")?;
    qilan.when(|| calc.call("describe", args![any(ValueKind::Bool)]))?.returns("bool")?;
    qilan.when(|| calc.call("describe", args![any(ValueKind::Null)]))?.returns("null")?;

    assert_eq!(calc.call("describe", args![vec![1, 2]]), Value::from("array"));
    assert_eq!(calc.call("describe", args![json!({ "a": 1 })]), Value::from("object"));
    assert_eq!(calc.call("describe", args![false]), Value::from("bool"));
    assert_eq!(calc.call("describe", args![Value::Null]), Value::from("null"));
    assert_eq!(calc.call("describe", args!["text"]), Value::Undefined);
    Ok(())
}

#[test]
fn undefined_and_null_are_different_arguments() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("describe", args![None::<&str>]))?.returns("null")?;
    qilan.when(|| calc.call("describe", args![()]))?.returns("undefined")?;

    assert_eq!(calc.call("describe", args![Value::Null]), Value::from("null"));
    assert_eq!(calc.call("describe", args![Value::Undefined]), Value::from("undefined"));
    assert_eq!(calc.call("describe", args![]), Value::Undefined);
    Ok(())
}

#[test]
fn untyped_wildcard_matches_undefined_and_null() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("describe", args![any(None)]))?.returns("matched")?;

    assert_eq!(calc.call("describe", args![()]), Value::from("matched"));
    assert_eq!(calc.call("describe", args![Value::Null]), Value::from("matched"));
    assert_eq!(calc.call("describe", args![]), Value::Undefined);
    Ok(())
}

#[test]
fn undefined_null_and_wildcard_on_one_member() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("describe", args![anything()]))?.returns("wildcard")?;
    qilan.when(|| calc.call("describe", args![()]))?.returns("undefined")?;
    qilan.when(|| calc.call("describe", args![Value::Null]))?.returns("null")?;

    assert_eq!(calc.call("describe", args![()]), Value::from("undefined"));
    assert_eq!(calc.call("describe", args![Value::Null]), Value::from("null"));
    assert_eq!(calc.call("describe", args![1]), Value::from("wildcard"));
    assert_eq!(calc.call("describe", args!["text"]), Value::from("wildcard"));
    Ok(())
}

#[test]
fn literal_arguments_compare_structurally() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan
        .when(|| calc.call("describe", args![json!({ "toys": ["ball", "stick"] })]))?
        .returns("toys")?;

    let argument = Value::object([("toys", Value::array(["ball", "stick"]))]);
    assert_eq!(calc.call("describe", args![argument]), Value::from("toys"));
    assert_eq!(calc.call("describe", args![json!({ "toys": [] })]), Value::Undefined);
    Ok(())
}

#[test]
fn arity_is_part_of_the_match() -> Result<(), UsageError> {
    let qilan = engine();
    let calc = qilan.mock(&Calculator)?;

    qilan.when(|| calc.call("add", args![1, anything()]))?.returns("two args")?;

    assert_eq!(calc.call("add", args![1]), Value::Undefined);
    assert_eq!(calc.call("add", args![1, 2, 3]), Value::Undefined);
    assert_eq!(calc.call("add", args![1, 2]), Value::from("two args"));
    Ok(())
}
