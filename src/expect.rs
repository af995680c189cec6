use std::sync::Arc;

use crate::error::QilanResult;
use crate::state::{ResolvedCall, SharedState};
use crate::value::Value;

/// Assertions on values and on the call history of proxies.
///
/// Verification failures panic with a message starting with
/// `Verification failed`. Misuse of the DSL is returned as a
/// [UsageError](crate::UsageError).
pub struct Expect<'q> {
    shared: &'q Arc<SharedState>,
}

impl<'q> Expect<'q> {
    pub(crate) fn new(shared: &'q Arc<SharedState>) -> Self {
        Self { shared }
    }

    /// Assert that `actual` is the very same value as `expected`.
    ///
    /// Arrays and objects are only the same when they share storage.
    pub fn same(&self, actual: impl Into<Value>, expected: impl Into<Value>) {
        self.shared
            .backend
            .values_are_identical(&actual.into(), &expected.into());
    }

    /// Assert that `actual` is structurally equal to `expected`.
    pub fn equal(&self, actual: impl Into<Value>, expected: impl Into<Value>) {
        self.shared
            .backend
            .values_are_equivalent(&actual.into(), &expected.into());
    }

    /// Assert that the call made by `f` matched at least one recorded call.
    pub fn called<R>(&self, f: impl FnOnce() -> R) -> QilanResult<()> {
        let call = self.capture(f)?;
        let matchers = call.matchers()?;
        self.shared
            .backend
            .assert_called(call.object, call.member(), &matchers)?;
        Ok(())
    }

    /// Assert that the call made by `f` matched exactly one recorded call.
    pub fn called_once<R>(&self, f: impl FnOnce() -> R) -> QilanResult<()> {
        let call = self.capture(f)?;
        let matchers = call.matchers()?;
        self.shared
            .backend
            .assert_called_once(call.object, call.member(), &matchers)?;
        Ok(())
    }

    /// Assert that the call made by `f` matched exactly `times` recorded calls.
    pub fn called_times<R>(&self, f: impl FnOnce() -> R, times: usize) -> QilanResult<()> {
        let call = self.capture(f)?;
        let matchers = call.matchers()?;
        self.shared
            .backend
            .assert_called_times(call.object, call.member(), &matchers, times)?;
        Ok(())
    }

    /// Assert that the call made by `f` matched no recorded call.
    pub fn not_called<R>(&self, f: impl FnOnce() -> R) -> QilanResult<()> {
        let call = self.capture(f)?;
        let matchers = call.matchers()?;
        self.shared
            .backend
            .assert_not_called(call.object, call.member(), &matchers)?;
        Ok(())
    }

    fn capture<R>(&self, f: impl FnOnce() -> R) -> QilanResult<ResolvedCall> {
        let call = self.shared.capture_one(f)?;
        ResolvedCall::resolve(self.shared, call)
    }
}
