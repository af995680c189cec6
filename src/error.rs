use crate::backend::ObjectKey;
use crate::registry::ProxyId;

pub type QilanResult<T> = Result<T, UsageError>;

/// Misuse of the qilan DSL.
///
/// Usage errors are reported at the call site that caused them and are
/// distinct from verification failures, which panic from inside the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// A capture closure performed zero or more than one proxy call.
    InvalidCallCount(usize),
    /// A capture closure tried to open another capture.
    AlreadyTracking,
    /// The captured call does not fit its proxy, e.g. a member call on a spy.
    InvalidCallKind { call: String },
    /// The handle is not known to this engine.
    UnknownHandle(ProxyId),
    /// The handle was already registered.
    DuplicateHandle(ProxyId),
    /// `any_args()` was combined with other arguments.
    MisplacedAnyArgs,
    /// A matcher was passed as a real argument outside of a capture closure.
    MatcherOutsideCapture { call: String },
    Backend(MockError),
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCallCount(count) => {
                write!(
                    f,
                    "Invalid call count: {count}. A capture closure must call exactly one proxy."
                )
            }
            Self::AlreadyTracking => {
                write!(
                    f,
                    "Already tracking calls. Capture closures cannot be nested."
                )
            }
            Self::InvalidCallKind { call } => write!(f, "Invalid call: {call}"),
            Self::UnknownHandle(id) => write!(f, "Unknown proxy handle {id}."),
            Self::DuplicateHandle(id) => write!(f, "Proxy handle {id} is already registered."),
            Self::MisplacedAnyArgs => {
                write!(f, "any_args() must be the only argument of a call.")
            }
            Self::MatcherOutsideCapture { call } => {
                write!(
                    f,
                    "{call}: Matchers can only be used inside a capture closure."
                )
            }
            Self::Backend(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for UsageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(error) => Some(error),
            _ => None,
        }
    }
}

impl From<MockError> for UsageError {
    fn from(error: MockError) -> Self {
        Self::Backend(error)
    }
}

/// Errors produced by a [Backend](crate::backend::Backend).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockError {
    UnknownObject(ObjectKey),
    UnknownMember { object: String, member: String },
    MemberOnSpy { spy: String, member: String },
    MissingMember { object: String },
}

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownObject(key) => write!(f, "No backend object found for {key}."),
            Self::UnknownMember { object, member } => {
                write!(f, "{object} has no member named `{member}`.")
            }
            Self::MemberOnSpy { spy, member } => {
                write!(f, "{spy} is a spy and has no member named `{member}`.")
            }
            Self::MissingMember { object } => {
                write!(f, "{object} is a mock and can only be called through a member.")
            }
        }
    }
}

impl std::error::Error for MockError {}
