use color_eyre::eyre::Result;

use crate::matcher::ScoredCandidate;
use crate::models::Candidate;

/// What the operator decided on a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationDecision {
    Select(Candidate),
    GoBack,
    Skip,
    Confirm,
    Cancel,
}

/// Port trait for showing choices to the operator and waiting for a decision.
///
/// Calls block until the operator acts. Implementations live in `selection_tui`
/// (terminal) or test mocks.
#[cfg_attr(test, mockall::automock)]
pub trait Presenter {
    /// Let the operator pick one of the ranked candidates, skip the song or go back.
    fn present_choices(
        &mut self,
        prompt: &str,
        choices: &[ScoredCandidate],
    ) -> Result<NavigationDecision>;

    /// Ask for confirmation. Answers with `Confirm`, `Skip`, `GoBack` or `Cancel`.
    fn present_confirm(&mut self, prompt: &str) -> Result<NavigationDecision>;

    /// Show a failure. `Confirm` retries the failed step.
    fn present_error(&mut self, message: &str) -> Result<NavigationDecision>;
}
