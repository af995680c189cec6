use std::fmt::Display;

use crate::matcher::{Matcher, Matchers};
use crate::value::Value;

#[derive(Clone, Copy)]
pub(crate) struct CallIndex(pub usize);

#[derive(Clone, Copy)]
pub(crate) struct InputIndex(pub usize);

/// Why recorded calls did not match an assertion's matcher list.
pub(crate) struct Mismatches {
    mismatches: Vec<(CallIndex, Mismatch)>,
}

impl Mismatches {
    /// Explain every recorded call that `matchers` rejects.
    pub fn collect(matchers: &Matchers, calls: &[Vec<Value>]) -> Self {
        let mut mismatches = vec![];

        if matchers.is_any_args() {
            return Self { mismatches };
        }

        for (call_index, args) in calls.iter().enumerate() {
            if let Some(mismatch) = Mismatch::find(matchers.tokens(), args) {
                mismatches.push((CallIndex(call_index), mismatch));
            }
        }

        Self { mismatches }
    }

    pub fn is_empty(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl Display for Mismatches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (call_index, mismatch) in &self.mismatches {
            writeln!(f)?;
            match mismatch {
                Mismatch::Arity { actual, expected } => {
                    write!(
                        f,
                        "Arity mismatch for call #{}: called with {actual} argument(s), expected {expected}.",
                        call_index.0
                    )?;
                }
                Mismatch::Input {
                    input_index,
                    kind,
                    actual,
                    expected,
                } => {
                    let initial_msg = match kind {
                        MismatchKind::Eq => "Equality mismatch for ",
                        MismatchKind::Kind => "Type mismatch for ",
                    };
                    writeln!(
                        f,
                        "{initial_msg}call #{}, input #{} (actual / expected):",
                        call_index.0, input_index.0
                    )?;
                    Diff::new(actual, expected).fmt(f)?;
                }
            }
        }

        Ok(())
    }
}

pub(crate) enum Mismatch {
    Arity {
        actual: usize,
        expected: usize,
    },
    Input {
        input_index: InputIndex,
        kind: MismatchKind,
        actual: String,
        expected: String,
    },
}

impl Mismatch {
    fn find(tokens: &[Matcher], args: &[Value]) -> Option<Self> {
        if tokens.len() != args.len() {
            return Some(Self::Arity {
                actual: args.len(),
                expected: tokens.len(),
            });
        }

        tokens
            .iter()
            .zip(args)
            .enumerate()
            .find(|(_, (matcher, actual))| !matcher.matches(actual))
            .map(|(input_index, (matcher, actual))| {
                let (kind, actual) = match matcher {
                    Matcher::Any(_) => (MismatchKind::Kind, actual.kind().to_string()),
                    _ => (MismatchKind::Eq, actual.to_string()),
                };
                Self::Input {
                    input_index: InputIndex(input_index),
                    kind,
                    actual,
                    expected: matcher.to_string(),
                }
            })
    }
}

#[derive(Clone, Copy)]
pub(crate) enum MismatchKind {
    Eq,
    Kind,
}

/// Actual/expected rendering, coloured when `pretty-print` is enabled.
pub(crate) struct Diff<'s> {
    actual: &'s str,
    expected: &'s str,
}

impl<'s> Diff<'s> {
    pub fn new(actual: &'s impl AsRef<str>, expected: &'s impl AsRef<str>) -> Self {
        Self {
            actual: actual.as_ref(),
            expected: expected.as_ref(),
        }
    }
}

impl<'s> Display for Diff<'s> {
    #[cfg(feature = "pretty-print")]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let comparison = pretty_assertions::StrComparison::new(self.actual, self.expected);
        write!(f, "{comparison}")
    }

    #[cfg(not(feature = "pretty-print"))]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  actual: {}", self.actual)?;
        write!(f, "expected: {}", self.expected)
    }
}
