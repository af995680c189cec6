use std::sync::Arc;

use crate::backend::{AnswerFn, Behavior};
use crate::error::QilanResult;
use crate::proxy::Proxy;
use crate::state::{ResolvedCall, SharedState};
use crate::value::Value;

/// Builder for the response to a call captured by [Qilan::when](crate::Qilan::when).
///
/// Each argument of the captured call becomes a literal matcher, unless it
/// already is a matcher from [any](crate::any) or [any_args](crate::any_args).
#[must_use = "a captured call is only stubbed once `returns` or `answers` is called"]
pub struct When {
    shared: Arc<SharedState>,
    call: ResolvedCall,
}

impl When {
    pub(crate) fn new(shared: Arc<SharedState>, call: ResolvedCall) -> Self {
        Self { shared, call }
    }

    /// Respond to matching calls with a clone of `value`.
    ///
    /// Returns the proxy the call was made on.
    pub fn returns(self, value: impl Into<Value>) -> QilanResult<Proxy> {
        self.respond(Behavior::Return(value.into()))
    }

    /// Respond to matching calls by invoking `func` with the call's arguments.
    ///
    /// Returns the proxy the call was made on.
    pub fn answers<F, R>(self, func: F) -> QilanResult<Proxy>
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        let answer: AnswerFn = Arc::new(move |args: &[Value]| -> Value { func(args).into() });
        self.respond(Behavior::Answer(answer))
    }

    fn respond(self, behavior: Behavior) -> QilanResult<Proxy> {
        let matchers = self.call.matchers()?;

        tracing::debug!(
            proxy = %self.call.proxy.id(),
            member = ?self.call.member(),
            %matchers,
            ?behavior,
            "stubbing call"
        );

        self.shared.backend.register_behavior(
            self.call.object,
            self.call.member(),
            matchers,
            behavior,
        )?;

        Ok(self.call.proxy)
    }
}
