//! The default backend, keeping all mock state in memory.

use std::collections::BTreeMap;

use spin::Mutex;

use crate::backend::{Backend, Behavior, ObjectKey};
use crate::counter::CountExpectation;
use crate::debug;
use crate::error::MockError;
use crate::fn_mocker::FnMocker;
use crate::matcher::Matchers;
use crate::mismatch::Diff;
use crate::value::Value;

const DEFAULT_SPY_NAME: &str = "spy";

/// Prefix of every verification failure message.
pub const VERIFICATION_FAILED: &str = "Verification failed";

/// Configuration of an [InProcessBackend].
#[derive(Clone, Debug, Default)]
pub struct InProcessConfig {
    /// Returned by calls that match no stub registration.
    pub default_return: Value,
}

/// Backend storing mocks, spies, stub registrations and call history in memory.
#[derive(Default)]
pub struct InProcessBackend {
    config: InProcessConfig,
    objects: Mutex<Vec<MockObject>>,
}

struct MockObject {
    name: String,
    callables: Callables,
}

enum Callables {
    Mock(BTreeMap<String, FnMocker>),
    Spy(FnMocker),
}

impl MockObject {
    fn fn_mocker(&self, member: Option<&str>) -> Result<&FnMocker, MockError> {
        match (&self.callables, member) {
            (Callables::Mock(members), Some(member)) => {
                members.get(member).ok_or_else(|| self.unknown_member(member))
            }
            (Callables::Spy(fn_mocker), None) => Ok(fn_mocker),
            (Callables::Mock(_), None) => Err(MockError::MissingMember {
                object: self.name.clone(),
            }),
            (Callables::Spy(_), Some(member)) => Err(self.member_on_spy(member)),
        }
    }

    fn fn_mocker_mut(&mut self, member: Option<&str>) -> Result<&mut FnMocker, MockError> {
        let name = &self.name;
        match (&mut self.callables, member) {
            (Callables::Mock(members), Some(member)) => {
                members
                    .get_mut(member)
                    .ok_or_else(|| MockError::UnknownMember {
                        object: name.clone(),
                        member: member.to_string(),
                    })
            }
            (Callables::Spy(fn_mocker), None) => Ok(fn_mocker),
            (Callables::Mock(_), None) => Err(MockError::MissingMember {
                object: name.clone(),
            }),
            (Callables::Spy(_), Some(member)) => Err(MockError::MemberOnSpy {
                spy: name.clone(),
                member: member.to_string(),
            }),
        }
    }

    fn unknown_member(&self, member: &str) -> MockError {
        MockError::UnknownMember {
            object: self.name.clone(),
            member: member.to_string(),
        }
    }

    fn member_on_spy(&self, member: &str) -> MockError {
        MockError::MemberOnSpy {
            spy: self.name.clone(),
            member: member.to_string(),
        }
    }
}

impl InProcessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InProcessConfig) -> Self {
        Self {
            config,
            objects: Mutex::new(vec![]),
        }
    }

    /// Argument lists of every recorded call to `member` of `object`, oldest first.
    pub fn calls(
        &self,
        object: ObjectKey,
        member: Option<&str>,
    ) -> Result<Vec<Vec<Value>>, MockError> {
        let objects = self.objects.lock();
        let mock_object = lookup(&objects, object)?;
        Ok(mock_object.fn_mocker(member)?.calls.clone())
    }

    fn insert(&self, name: String, callables: Callables) -> ObjectKey {
        let mut objects = self.objects.lock();
        objects.push(MockObject { name, callables });
        ObjectKey::new(objects.len() - 1)
    }

    fn verify_count(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
        expectation: CountExpectation,
    ) -> Result<(), MockError> {
        let failure = {
            let objects = self.objects.lock();
            let mock_object = lookup(&objects, object)?;
            let target = debug::Target {
                object: &mock_object.name,
                member,
            };
            let failure = mock_object
                .fn_mocker(member)?
                .verify(target, matchers, expectation);
            failure
        };

        if let Some(msg) = failure {
            tracing::debug!(%object, "verification failed");
            panic!("{VERIFICATION_FAILED}: {msg}");
        }

        Ok(())
    }
}

fn lookup(objects: &[MockObject], object: ObjectKey) -> Result<&MockObject, MockError> {
    objects
        .get(object.index())
        .ok_or(MockError::UnknownObject(object))
}

impl Backend for InProcessBackend {
    fn create_mock(&self, name: &str, members: &[String]) -> ObjectKey {
        let members = members
            .iter()
            .map(|member| (member.clone(), FnMocker::default()))
            .collect();
        self.insert(name.to_string(), Callables::Mock(members))
    }

    fn create_spy(&self, name: Option<&str>) -> ObjectKey {
        self.insert(
            name.unwrap_or(DEFAULT_SPY_NAME).to_string(),
            Callables::Spy(FnMocker::default()),
        )
    }

    fn register_behavior(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: Matchers,
        behavior: Behavior,
    ) -> Result<(), MockError> {
        let mut objects = self.objects.lock();
        let mock_object = objects
            .get_mut(object.index())
            .ok_or(MockError::UnknownObject(object))?;
        let pat_index = mock_object
            .fn_mocker_mut(member)?
            .register(matchers, behavior);

        tracing::trace!(%object, ?member, %pat_index, "registered call pattern");
        Ok(())
    }

    fn dispatch(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        args: Vec<Value>,
    ) -> Result<Value, MockError> {
        // The lock is released before responding: answer functions may call other proxies.
        let selected = {
            let mut objects = self.objects.lock();
            let mock_object = objects
                .get_mut(object.index())
                .ok_or(MockError::UnknownObject(object))?;
            let selected = mock_object.fn_mocker_mut(member)?.record(&args);
            selected
        };

        match selected {
            Some((pat_index, behavior)) => {
                tracing::trace!(%object, ?member, %pat_index, "call matched");
                Ok(behavior.respond(&args))
            }
            None => {
                tracing::trace!(%object, ?member, "no call pattern matched, returning default");
                Ok(self.config.default_return.clone())
            }
        }
    }

    fn assert_called(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
    ) -> Result<(), MockError> {
        self.verify_count(object, member, matchers, CountExpectation::AtLeast(1))
    }

    fn assert_called_once(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
    ) -> Result<(), MockError> {
        self.verify_count(object, member, matchers, CountExpectation::Exactly(1))
    }

    fn assert_called_times(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
        times: usize,
    ) -> Result<(), MockError> {
        self.verify_count(object, member, matchers, CountExpectation::Exactly(times))
    }

    fn assert_not_called(
        &self,
        object: ObjectKey,
        member: Option<&str>,
        matchers: &Matchers,
    ) -> Result<(), MockError> {
        self.verify_count(object, member, matchers, CountExpectation::Exactly(0))
    }

    fn values_are_identical(&self, actual: &Value, expected: &Value) {
        if !actual.is_identical(expected) {
            if actual == expected {
                panic!("{VERIFICATION_FAILED}: Expected {actual} to be the same value as {expected}, but they are only equal.");
            }
            panic!("{VERIFICATION_FAILED}: Expected {actual} to be the same value as {expected}.");
        }
    }

    fn values_are_equivalent(&self, actual: &Value, expected: &Value) {
        if actual != expected {
            let actual = actual.to_string();
            let expected = expected.to_string();
            panic!(
                "{VERIFICATION_FAILED}: Values are not equal (actual / expected):\n{}",
                Diff::new(&actual, &expected)
            );
        }
    }
}
