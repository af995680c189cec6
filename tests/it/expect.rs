use qilan::*;
use serde_json::json;

use crate::engine;

#[mockable]
#[allow(dead_code)]
trait Logger {
    fn log(&self, level: &str, message: &str);
    fn flush(&self);
}

#[test]
fn call_counts_are_scoped_by_matchers() -> Result<(), UsageError> {
    let qilan = engine();
    let logger = qilan.mock(&Logger)?;

    logger.call("log", args!["info", "started"]);
    logger.call("log", args!["info", "running"]);
    logger.call("log", args!["error", "stopped"]);

    let expect = qilan.expect();
    expect.called_times(|| logger.call("log", args![any_args()]), 3)?;
    expect.called_times(|| logger.call("log", args!["info", anything()]), 2)?;
    expect.called_once(|| logger.call("log", args!["error", any(ValueKind::String)]))?;
    expect.called(|| logger.call("log", args!["info", "started"]))?;
    expect.not_called(|| logger.call("log", args!["debug", anything()]))?;
    expect.not_called(|| logger.call("flush", args![any_args()]))?;
    Ok(())
}

#[test]
fn expectations_do_not_record_calls() -> Result<(), UsageError> {
    let qilan = engine();
    let logger = qilan.mock(&Logger)?;

    qilan.expect().not_called(|| logger.call("flush", args![]))?;
    qilan.expect().not_called(|| logger.call("flush", args![]))?;

    logger.call("flush", args![]);
    qilan.expect().called_once(|| logger.call("flush", args![]))?;
    Ok(())
}

#[test]
#[should_panic(
    expected = "Verification failed: Expected Logger.flush() to match exactly 1 call, but it actually matched 2 calls."
)]
fn called_once_fails_for_two_calls() {
    let qilan = engine();
    let logger = qilan.mock(&Logger).unwrap();

    logger.call("flush", args![]);
    logger.call("flush", args![]);

    let _ = qilan.expect().called_once(|| logger.call("flush", args![]));
}

#[test]
#[should_panic(
    expected = "Verification failed: Expected Logger.log(..) to match at least 1 call, but it actually matched no calls.\nNo calls were recorded for Logger.log."
)]
fn called_fails_without_calls() {
    let qilan = engine();
    let logger = qilan.mock(&Logger).unwrap();

    let _ = qilan.expect().called(|| logger.call("log", args![any_args()]));
}

#[test]
#[should_panic(expected = "Recorded calls:\n  #0 Logger.log(\"info\", \"started\")")]
fn failure_lists_recorded_calls() {
    let qilan = engine();
    let logger = qilan.mock(&Logger).unwrap();

    logger.call("log", args!["info", "started"]);

    let _ = qilan
        .expect()
        .called(|| logger.call("log", args!["error", anything()]));
}

#[test]
#[should_panic(
    expected = "Verification failed: Expected spy(7) not to be called, but it matched 1 call."
)]
fn not_called_fails_when_called() {
    let qilan = engine();
    let spy = qilan.spy().unwrap();

    spy.invoke(args![7]);
    spy.invoke(args![8]);

    let _ = qilan.expect().not_called(|| spy.invoke(args![7]));
}

#[test]
#[should_panic(
    expected = "Verification failed: Expected spy(..) to match exactly 3 calls, but it actually matched 2 calls."
)]
fn called_times_fails_for_wrong_count() {
    let qilan = engine();
    let spy = qilan.spy().unwrap();

    spy.invoke(args![]);
    spy.invoke(args![1]);

    let _ = qilan.expect().called_times(|| spy.invoke(args![any_args()]), 3);
}

#[test]
fn same_and_equal_pass() {
    let qilan = engine();
    let array = Value::array([1, 2, 3]);

    qilan.expect().same(array.clone(), array.clone());
    qilan.expect().same(f64::NAN, f64::NAN);
    qilan.expect().same("a", "a");
    qilan.expect().equal(array, json!([1, 2, 3]));
    qilan.expect().equal(json!({ "a": [true, null] }), json!({ "a": [true, null] }));
}

#[test]
#[should_panic(
    expected = "Verification failed: Expected [1, 2] to be the same value as [1, 2], but they are only equal."
)]
fn same_fails_for_equal_arrays() {
    let qilan = engine();

    qilan.expect().same(vec![1, 2], vec![1, 2]);
}

#[test]
#[should_panic(expected = "Verification failed: Expected 0 to be the same value as -0.")]
fn same_distinguishes_signed_zero() {
    let qilan = engine();

    qilan.expect().same(0.0, -0.0);
}

#[test]
#[should_panic(expected = "Verification failed: Values are not equal (actual / expected):")]
fn equal_distinguishes_signed_zero() {
    let qilan = engine();

    qilan.expect().equal(0.0, -0.0);
}

#[test]
#[should_panic(expected = "Verification failed: Values are not equal (actual / expected):")]
fn equal_fails_for_different_values() {
    let qilan = engine();

    qilan.expect().equal(json!({ "a": 1 }), json!({ "a": 2 }));
}
