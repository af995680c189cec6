use std::cell::RefCell;

use crate::error::{QilanResult, UsageError};
use crate::matcher::Arg;
use crate::registry::ProxyId;

/// One intercepted proxy invocation.
#[derive(Clone, Debug)]
pub(crate) struct Call {
    pub proxy: ProxyId,
    /// `None` for spy invocations.
    pub member: Option<String>,
    pub args: Vec<Arg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Idle,
    Tracking,
}

// Shared by every engine on the thread, so a capture closure records calls
// on any proxy instead of dispatching them.
thread_local! {
    static CAPTURE: RefCell<CaptureState> = const { RefCell::new(CaptureState::new()) };
}

/// The tracking flag and the calls captured while it is set.
pub(crate) struct CaptureState {
    mode: Mode,
    calls: Vec<Call>,
    nested_attempt: bool,
}

impl CaptureState {
    const fn new() -> Self {
        Self {
            mode: Mode::Idle,
            calls: Vec::new(),
            nested_attempt: false,
        }
    }

    fn begin(&mut self) -> QilanResult<()> {
        if self.mode == Mode::Tracking {
            self.nested_attempt = true;
            return Err(UsageError::AlreadyTracking);
        }

        self.mode = Mode::Tracking;
        self.calls.clear();
        self.nested_attempt = false;
        Ok(())
    }

    fn record(&mut self, call: Call) -> Result<(), Call> {
        match self.mode {
            Mode::Tracking => {
                self.calls.push(call);
                Ok(())
            }
            Mode::Idle => Err(call),
        }
    }

    fn finish(&mut self) -> QilanResult<Vec<Call>> {
        let calls = std::mem::take(&mut self.calls);
        let nested_attempt = self.nested_attempt;
        self.reset();

        if nested_attempt {
            return Err(UsageError::AlreadyTracking);
        }
        Ok(calls)
    }

    fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.calls.clear();
        self.nested_attempt = false;
    }
}

fn with_capture<T>(f: impl FnOnce(&mut CaptureState) -> T) -> T {
    CAPTURE.with(|capture| f(&mut capture.borrow_mut()))
}

#[cfg(test)]
pub(crate) fn mode() -> Mode {
    with_capture(|capture| capture.mode)
}

/// Append `call` while this thread is tracking. Hands the call back when idle.
pub(crate) fn record(call: Call) -> Result<(), Call> {
    with_capture(|capture| capture.record(call))
}

/// Keeps the thread tracking until [TrackingGuard::finish] or drop.
///
/// Dropping an unfinished guard (e.g. while unwinding out of a panicking
/// capture closure) returns the thread to idle.
pub(crate) struct TrackingGuard {
    active: bool,
}

impl TrackingGuard {
    pub fn begin() -> QilanResult<Self> {
        with_capture(CaptureState::begin)?;
        Ok(Self { active: true })
    }

    pub fn finish(mut self) -> QilanResult<Vec<Call>> {
        self.active = false;
        with_capture(CaptureState::finish)
    }
}

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        if self.active {
            with_capture(CaptureState::reset);
        }
    }
}
