use std::sync::Arc;

use crate::capture::Call;
use crate::matcher::Arg;
use crate::registry::{ProxyId, ProxyKind};
use crate::state::SharedState;
use crate::value::Value;

/// The stand-in handed out by [Qilan::mock](crate::Qilan::mock) and
/// [Qilan::spy](crate::Qilan::spy).
///
/// Every invocation first checks whether the engine is tracking. Inside a
/// capture closure the call is only recorded and `Value::Undefined` is
/// returned. Outside, it is dispatched to the backend.
///
/// Two proxies are equal only if they are the same handle.
#[derive(Clone)]
pub struct Proxy {
    id: ProxyId,
    kind: ProxyKind,
    name: Arc<str>,
    shared: Arc<SharedState>,
}

impl Proxy {
    pub(crate) fn new(id: ProxyId, kind: ProxyKind, name: Arc<str>, shared: Arc<SharedState>) -> Self {
        Self {
            id,
            kind,
            name,
            shared,
        }
    }

    pub fn id(&self) -> ProxyId {
        self.id
    }

    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call `member` of a mock.
    ///
    /// # Panics
    /// Outside a capture closure, panics on misuse: unknown members, member
    /// calls on a spy or matchers passed as arguments.
    pub fn call(&self, member: &str, args: Vec<Arg>) -> Value {
        self.intercept(Some(member.to_string()), args)
    }

    /// Invoke a spy.
    ///
    /// # Panics
    /// Outside a capture closure, panics when invoked on a mock or with
    /// matchers as arguments.
    pub fn invoke(&self, args: Vec<Arg>) -> Value {
        self.intercept(None, args)
    }

    fn intercept(&self, member: Option<String>, args: Vec<Arg>) -> Value {
        let call = Call {
            proxy: self.id,
            member,
            args,
        };

        match self.shared.intercept(call) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Proxy {}

impl std::hash::Hash for Proxy {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish()
    }
}
