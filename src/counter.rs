use std::fmt::Display;

/// The number of matching calls an assertion requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CountExpectation {
    AtLeast(usize),
    Exactly(usize),
}

impl CountExpectation {
    pub fn is_satisfied_by(&self, actual: usize) -> bool {
        match *self {
            Self::AtLeast(target) => actual >= target,
            Self::Exactly(target) => actual == target,
        }
    }

    /// Describe a failed expectation, or `None` if `actual` satisfies it.
    pub fn verify(&self, pattern: &dyn Display, actual: usize) -> Option<String> {
        if self.is_satisfied_by(actual) {
            return None;
        }

        let actual_calls = NCalls(actual);
        Some(match *self {
            Self::Exactly(0) => {
                format!("Expected {pattern} not to be called, but it matched {actual_calls}.")
            }
            Self::Exactly(target) => {
                let target_calls = NCalls(target);
                format!("Expected {pattern} to match exactly {target_calls}, but it actually matched {actual_calls}.")
            }
            Self::AtLeast(target) => {
                let target_calls = NCalls(target);
                format!("Expected {pattern} to match at least {target_calls}, but it actually matched {actual_calls}.")
            }
        })
    }
}

struct NCalls(usize);

impl Display for NCalls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "no calls"),
            1 => write!(f, "1 call"),
            _ => write!(f, "{} calls", self.0),
        }
    }
}
