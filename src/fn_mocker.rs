use crate::backend::Behavior;
use crate::call_pattern::{self, CallPattern, PatIndex};
use crate::counter::CountExpectation;
use crate::debug;
use crate::matcher::Matchers;
use crate::mismatch::Mismatches;
use crate::value::Value;

/// All the state for one mocked callable: a mock member or a spy.
#[derive(Default)]
pub(crate) struct FnMocker {
    pub call_patterns: Vec<CallPattern>,
    pub calls: Vec<Vec<Value>>,
}

impl FnMocker {
    pub fn register(&mut self, matchers: Matchers, behavior: Behavior) -> PatIndex {
        self.call_patterns.push(CallPattern { matchers, behavior });
        PatIndex(self.call_patterns.len() - 1)
    }

    /// Record the call, then look up the behavior that should answer it.
    pub fn record(&mut self, args: &[Value]) -> Option<(PatIndex, Behavior)> {
        self.calls.push(args.to_vec());

        call_pattern::select_call_pattern(&self.call_patterns, args)
            .map(|(pat_index, pattern)| (pat_index, pattern.behavior.clone()))
    }

    pub fn count_matching(&self, matchers: &Matchers) -> usize {
        self.calls
            .iter()
            .filter(|args| matchers.matches(args))
            .count()
    }

    /// Build the failure message for an unmet count expectation.
    pub fn verify(
        &self,
        target: debug::Target<'_>,
        matchers: &Matchers,
        expectation: CountExpectation,
    ) -> Option<String> {
        let pattern = debug::CallPatternDebug {
            target,
            matchers,
        };
        let msg = expectation.verify(&pattern, self.count_matching(matchers))?;

        let recorded = debug::RecordedCalls {
            target,
            calls: &self.calls,
        };
        let mismatches = match expectation {
            CountExpectation::Exactly(0) => None,
            _ => Some(Mismatches::collect(matchers, &self.calls)),
        };

        Some(match mismatches {
            Some(mismatches) if !mismatches.is_empty() => {
                format!("{msg}\n{recorded}{mismatches}")
            }
            _ => format!("{msg}\n{recorded}"),
        })
    }
}
