use qilan::*;

use crate::engine;

#[test]
fn spy_records_invocations() -> Result<(), UsageError> {
    let qilan = engine();
    let spy = qilan.spy()?;

    assert_eq!(spy.invoke(args![1, "x", vec![true]]), Value::Undefined);

    qilan
        .expect()
        .called_once(|| spy.invoke(args![1, "x", vec![true]]))?;
    qilan.expect().called(|| spy.invoke(args![any_args()]))?;
    qilan.expect().not_called(|| spy.invoke(args![2, "x", vec![true]]))?;
    Ok(())
}

#[test]
fn spy_can_be_stubbed() -> Result<(), UsageError> {
    let qilan = engine();
    let callback = qilan.spy_named("callback")?;

    qilan
        .when(|| callback.invoke(args![any(ValueKind::String)]))?
        .answers(|args| args[0].as_str().map(str::len))?;

    assert_eq!(callback.invoke(args!["four"]), Value::from(4));
    assert_eq!(callback.invoke(args![4]), Value::Undefined);
    assert_eq!(callback.kind(), ProxyKind::Spy);
    assert_eq!(callback.name(), "callback");
    Ok(())
}

#[test]
fn spy_created_inside_when_is_the_captured_call() -> Result<(), UsageError> {
    let qilan = engine();

    let spy = qilan.when(|| qilan.spy())?.returns(42)?;

    assert_eq!(spy.kind(), ProxyKind::Spy);
    assert_eq!(spy.invoke(args![]), Value::from(42));
    assert_eq!(spy.invoke(args![1]), Value::Undefined);
    Ok(())
}

#[test]
fn spies_are_independent() -> Result<(), UsageError> {
    let qilan = engine();
    let first = qilan.spy()?;
    let second = qilan.spy()?;

    first.invoke(args![]);

    assert_ne!(first, second);
    qilan.expect().called_once(|| first.invoke(args![]))?;
    qilan.expect().not_called(|| second.invoke(args![any_args()]))?;
    Ok(())
}

#[test]
#[should_panic(
    expected = "Verification failed: Expected spy(2) to match exactly 1 call, but it actually matched no calls."
)]
fn called_once_fails_for_other_arguments() {
    let qilan = engine();
    let spy = qilan.spy().unwrap();

    spy.invoke(args![1]);

    let _ = qilan.expect().called_once(|| spy.invoke(args![2]));
}
