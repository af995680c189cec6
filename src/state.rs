use std::sync::Arc;

use spin::Mutex;

use crate::backend::{Backend, ObjectKey};
use crate::capture::{self, Call, TrackingGuard};
use crate::debug;
use crate::error::{QilanResult, UsageError};
use crate::matcher::{Arg, Matchers};
use crate::proxy::Proxy;
use crate::registry::{ProxyEntry, ProxyId, ProxyKind, ProxyRegistry};
use crate::value::Value;

/// Everything one qilan engine shares with the proxies it hands out.
pub(crate) struct SharedState {
    pub backend: Arc<dyn Backend>,
    registry: Mutex<ProxyRegistry>,
}

impl SharedState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            registry: Mutex::new(ProxyRegistry::default()),
        }
    }

    pub fn register(&self, id: ProxyId, entry: ProxyEntry) -> QilanResult<()> {
        self.registry.lock().register(id, entry)
    }

    pub fn resolve(&self, id: ProxyId) -> QilanResult<ProxyEntry> {
        self.registry.lock().resolve(id).cloned()
    }

    /// Record `call` only if this thread is tracking. Returns whether it was recorded.
    pub fn record_if_tracking(&self, call: Call) -> bool {
        capture::record(call).is_ok()
    }

    /// Record `call` when this thread is tracking, otherwise forward it to the backend.
    ///
    /// Tracking is per thread rather than per engine, so a call on another
    /// engine's proxy inside a capture closure is recorded, never dispatched.
    pub fn intercept(&self, call: Call) -> QilanResult<Value> {
        let call = match capture::record(call) {
            Ok(()) => {
                tracing::trace!("captured call");
                return Ok(Value::Undefined);
            }
            Err(call) => call,
        };

        let entry = self.resolve(call.proxy)?;
        let Call { member, args, .. } = call;

        let values = match args
            .iter()
            .cloned()
            .map(Arg::into_value)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(values) => values,
            Err(_) => {
                let call = debug::FnActualCall {
                    target: debug::Target {
                        object: &entry.name,
                        member: member.as_deref(),
                    },
                    args: &args,
                };
                return Err(UsageError::MatcherOutsideCapture {
                    call: call.to_string(),
                });
            }
        };

        Ok(self
            .backend
            .dispatch(entry.object, member.as_deref(), values)?)
    }

    /// Run `f` in tracking mode and return the single call it made.
    pub fn capture_one<R>(&self, f: impl FnOnce() -> R) -> QilanResult<Call> {
        let guard = TrackingGuard::begin()?;
        let _ = f();
        let mut calls = guard.finish()?;

        if calls.len() != 1 {
            tracing::debug!(count = calls.len(), "invalid capture");
            return Err(UsageError::InvalidCallCount(calls.len()));
        }

        calls.pop().ok_or(UsageError::InvalidCallCount(0))
    }
}

/// A captured call resolved against the registry.
pub(crate) struct ResolvedCall {
    pub proxy: Proxy,
    pub object: ObjectKey,
    pub member: Option<String>,
    pub args: Vec<Arg>,
}

impl ResolvedCall {
    pub fn resolve(shared: &Arc<SharedState>, call: Call) -> QilanResult<Self> {
        let entry = shared.resolve(call.proxy)?;

        match (entry.kind, &call.member) {
            (ProxyKind::Mock, Some(_)) | (ProxyKind::Spy, None) => {}
            (ProxyKind::Mock, None) | (ProxyKind::Spy, Some(_)) => {
                let debug_call = debug::FnActualCall {
                    target: debug::Target {
                        object: &entry.name,
                        member: call.member.as_deref(),
                    },
                    args: &call.args,
                };
                return Err(UsageError::InvalidCallKind {
                    call: debug_call.to_string(),
                });
            }
        }

        Ok(Self {
            proxy: Proxy::new(call.proxy, entry.kind, entry.name, shared.clone()),
            object: entry.object,
            member: call.member,
            args: call.args,
        })
    }

    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// The call's arguments as a matcher list.
    pub fn matchers(&self) -> QilanResult<Matchers> {
        Matchers::new(self.args.iter().cloned().map(Arg::into_matcher).collect())
    }
}
