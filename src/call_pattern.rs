use crate::backend::Behavior;
use crate::matcher::{Matchers, Specificity};
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PatIndex(pub usize);

impl std::fmt::Display for PatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One stub registration: a matcher list and the behavior it triggers.
pub(crate) struct CallPattern {
    pub matchers: Matchers,
    pub behavior: Behavior,
}

impl CallPattern {
    fn specificity(&self) -> Specificity {
        self.matchers.specificity()
    }
}

/// Pick the pattern that responds to `args`.
///
/// The most specific matching pattern wins. Among equally specific patterns
/// the one registered last wins.
pub(crate) fn select_call_pattern<'p>(
    patterns: &'p [CallPattern],
    args: &[Value],
) -> Option<(PatIndex, &'p CallPattern)> {
    patterns
        .iter()
        .enumerate()
        .filter(|(_, pattern)| pattern.matchers.matches(args))
        .max_by_key(|(pat_index, pattern)| (pattern.specificity(), *pat_index))
        .map(|(pat_index, pattern)| (PatIndex(pat_index), pattern))
}
