//! The selection flow: walks the playlist one entry at a time, lets the operator
//! pick the songbook page for every song and opens it.

use std::future::Future;

use tokio::sync::watch;

use crate::matcher::{ScoredCandidate, rank};
use crate::models::{Candidate, PlaylistEntry, Song};
use crate::ports::catalogue::{CatalogueClient, ClientError};
use crate::ports::presenter::{NavigationDecision, Presenter};

const BREAK_PROMPT: &str = "Break time?";

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Failed to open the songbook at session start: {0}")]
    Announcement(#[source] ClientError),
    #[error("Failed to open the home page at session end: {0}")]
    HomePage(#[source] ClientError),
    #[error("Presentation failed: {0}")]
    Presentation(color_eyre::Report),
}

// =============================================================================
// Cancellation
// =============================================================================

/// Create a connected cancel handle and signal.
pub fn cancel_channel() -> (CancelHandle, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle { sender }, CancelSignal { receiver })
}

/// Requests cancellation of a running flow, e.g. from a Ctrl-C handler.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

/// Observed by the flow at every suspension point.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    receiver: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires
    #[cfg(test)]
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once cancellation was requested.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            // Handle dropped without cancelling
            std::future::pending::<()>().await;
        }
    }
}

/// Run a request, abandoning it as soon as cancellation is requested.
///
/// The request is not started at all once the signal fired.
async fn until_cancelled<F, S>(cancel: &CancelSignal, start: S) -> Option<F::Output>
where
    F: Future,
    S: FnOnce() -> F,
{
    if cancel.is_cancelled() {
        return None;
    }
    let future = start();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        output = future => Some(output),
    }
}

/// Start a side effect unless cancellation was requested first.
///
/// A started side effect is never abandoned, so a page that opened always gets
/// recorded.
async fn unless_cancelled<F, S>(cancel: &CancelSignal, start: S) -> Option<F::Output>
where
    F: Future,
    S: FnOnce() -> F,
{
    if cancel.is_cancelled() {
        return None;
    }
    Some(start().await)
}

// =============================================================================
// Flow state
// =============================================================================

/// Position in the playlist. Never moves before the first entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCursor {
    index: usize,
    len: usize,
}

impl SessionCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.len
    }

    pub fn advance(&mut self) {
        if self.index < self.len {
            self.index += 1;
        }
    }

    /// Step back one entry. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    AwaitingEntry,
    PresentingSongChoices(Vec<ScoredCandidate>),
    PresentingBreakConfirm,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Every entry was handled and the home page opened
    Finished,
    /// The operator cancelled
    Cancelled,
}

/// How an entry was last handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Opened(Candidate),
    Break,
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowSummary {
    pub outcome: FlowOutcome,
    /// Latest resolution per playlist entry, `None` for entries never resolved
    pub resolutions: Vec<Option<Resolution>>,
    /// Cursor position when the flow stopped
    pub position: usize,
}

impl FlowSummary {
    pub fn opened_songs(&self) -> usize {
        self.resolutions
            .iter()
            .filter(|resolution| matches!(resolution, Some(Resolution::Opened(_))))
            .count()
    }
}

enum Step {
    Next(FlowState),
    Stop(FlowOutcome),
}

// =============================================================================
// Controller
// =============================================================================

pub struct SelectionFlow<'a, C, P> {
    playlist: &'a [PlaylistEntry],
    client: &'a C,
    presenter: &'a mut P,
    cancel: CancelSignal,
    cursor: SessionCursor,
    state: FlowState,
    resolutions: Vec<Option<Resolution>>,
}

impl<'a, C: CatalogueClient, P: Presenter> SelectionFlow<'a, C, P> {
    pub fn new(
        playlist: &'a [PlaylistEntry],
        client: &'a C,
        presenter: &'a mut P,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            playlist,
            client,
            presenter,
            cancel,
            cursor: SessionCursor::new(playlist.len()),
            state: FlowState::AwaitingEntry,
            resolutions: vec![None; playlist.len()],
        }
    }

    /// Drive the playlist to completion or until the operator cancels.
    ///
    /// Only failures of the opening and closing side effects are returned as
    /// errors; failures on single entries are shown to the operator instead.
    pub async fn run(mut self) -> Result<FlowSummary, FlowError> {
        log::info!("Starting selection flow with {} entries", self.playlist.len());

        let announcement =
            unless_cancelled(&self.cancel, || self.client.open_entry_announcement()).await;
        match announcement {
            None => return Ok(self.into_summary(FlowOutcome::Cancelled)),
            Some(result) => result.map_err(FlowError::Announcement)?,
        }

        loop {
            if self.cancel.is_cancelled() {
                log::info!("Selection flow cancelled at entry {}", self.cursor.index());
                return Ok(self.into_summary(FlowOutcome::Cancelled));
            }

            let state = std::mem::replace(&mut self.state, FlowState::AwaitingEntry);
            let step = match state {
                FlowState::AwaitingEntry => self.await_entry().await?,
                FlowState::PresentingSongChoices(choices) => {
                    self.present_song_choices(choices).await?
                }
                FlowState::PresentingBreakConfirm => self.present_break_confirm().await?,
                FlowState::Finished => return self.finish().await,
            };

            match step {
                Step::Next(next) => self.state = next,
                Step::Stop(outcome) => {
                    log::info!("Selection flow stopped at entry {}", self.cursor.index());
                    return Ok(self.into_summary(outcome));
                }
            }
        }
    }

    async fn await_entry(&mut self) -> Result<Step, FlowError> {
        if self.cursor.is_finished() {
            return Ok(Step::Next(FlowState::Finished));
        }

        let playlist = self.playlist;
        let song = match &playlist[self.cursor.index()] {
            PlaylistEntry::Break => return Ok(Step::Next(FlowState::PresentingBreakConfirm)),
            PlaylistEntry::Song(song) => song,
        };

        let query = song.query();
        log::debug!("Fetching candidates for '{}'", query);
        let fetched =
            until_cancelled(&self.cancel, || self.client.fetch_candidates(&query)).await;

        match fetched {
            None => Ok(Step::Stop(FlowOutcome::Cancelled)),
            Some(Ok(candidates)) => {
                let ranked = rank(song, candidates);
                log::debug!("Ranked {} candidates for '{}'", ranked.len(), query);
                if let Some(best) = ranked.first() {
                    log::debug!(
                        "Best match '{}': title {:.2}, artist {:.2}, score {:.2}",
                        best.candidate.display_name(),
                        best.title_similarity,
                        best.artist_similarity,
                        best.score
                    );
                }
                Ok(Step::Next(FlowState::PresentingSongChoices(ranked)))
            }
            Some(Err(error)) => self.recover(error, FlowState::AwaitingEntry),
        }
    }

    async fn present_song_choices(
        &mut self,
        choices: Vec<ScoredCandidate>,
    ) -> Result<Step, FlowError> {
        let playlist = self.playlist;
        let Some(song) = playlist
            .get(self.cursor.index())
            .and_then(PlaylistEntry::as_song)
        else {
            return Ok(Step::Next(FlowState::AwaitingEntry));
        };

        let decision = self
            .presenter
            .present_choices(&song_prompt(song), &choices)
            .map_err(FlowError::Presentation)?;
        if self.cancel.is_cancelled() {
            return Ok(Step::Stop(FlowOutcome::Cancelled));
        }

        match decision {
            NavigationDecision::Select(candidate) => {
                let opened =
                    unless_cancelled(&self.cancel, || self.client.open_candidate_page(&candidate))
                        .await;
                match opened {
                    None => Ok(Step::Stop(FlowOutcome::Cancelled)),
                    Some(Ok(())) => {
                        log::info!(
                            "Opened '{}' (songbook #{}) for '{}', GEMA {}",
                            candidate.display_name(),
                            candidate.position + 1,
                            song.query(),
                            song.gema_number
                        );
                        self.resolve(Resolution::Opened(candidate));
                        Ok(Step::Next(FlowState::AwaitingEntry))
                    }
                    Some(Err(error)) => {
                        self.recover(error, FlowState::PresentingSongChoices(choices))
                    }
                }
            }
            NavigationDecision::Skip => {
                log::info!("Skipped '{}'", song.query());
                self.resolve(Resolution::Skipped);
                Ok(Step::Next(FlowState::AwaitingEntry))
            }
            NavigationDecision::GoBack => {
                self.go_back();
                Ok(Step::Next(FlowState::AwaitingEntry))
            }
            NavigationDecision::Cancel => Ok(Step::Stop(FlowOutcome::Cancelled)),
            NavigationDecision::Confirm => {
                log::warn!("Ignoring confirm on song choices");
                Ok(Step::Next(FlowState::PresentingSongChoices(choices)))
            }
        }
    }

    async fn present_break_confirm(&mut self) -> Result<Step, FlowError> {
        let decision = self
            .presenter
            .present_confirm(BREAK_PROMPT)
            .map_err(FlowError::Presentation)?;
        if self.cancel.is_cancelled() {
            return Ok(Step::Stop(FlowOutcome::Cancelled));
        }

        match decision {
            NavigationDecision::Confirm => {
                let opened = unless_cancelled(&self.cancel, || self.client.open_break_page()).await;
                match opened {
                    None => Ok(Step::Stop(FlowOutcome::Cancelled)),
                    Some(Ok(())) => {
                        log::info!("Opened break page");
                        self.resolve(Resolution::Break);
                        Ok(Step::Next(FlowState::AwaitingEntry))
                    }
                    Some(Err(error)) => self.recover(error, FlowState::PresentingBreakConfirm),
                }
            }
            NavigationDecision::Skip => {
                log::info!("Skipped break");
                self.resolve(Resolution::Skipped);
                Ok(Step::Next(FlowState::AwaitingEntry))
            }
            NavigationDecision::GoBack => {
                self.go_back();
                Ok(Step::Next(FlowState::AwaitingEntry))
            }
            NavigationDecision::Cancel => Ok(Step::Stop(FlowOutcome::Cancelled)),
            NavigationDecision::Select(_) => {
                log::warn!("Ignoring song selection on break prompt");
                Ok(Step::Next(FlowState::PresentingBreakConfirm))
            }
        }
    }

    async fn finish(self) -> Result<FlowSummary, FlowError> {
        let opened = unless_cancelled(&self.cancel, || self.client.open_home_page()).await;
        match opened {
            None => Ok(self.into_summary(FlowOutcome::Cancelled)),
            Some(Ok(())) => {
                log::info!("Selection flow finished");
                Ok(self.into_summary(FlowOutcome::Finished))
            }
            Some(Err(error)) => Err(FlowError::HomePage(error)),
        }
    }

    /// Show a failed request and let the operator retry, skip or go back.
    ///
    /// `retry` is the state to return to when the operator retries.
    fn recover(&mut self, error: ClientError, retry: FlowState) -> Result<Step, FlowError> {
        log::warn!("Songbook request failed: {}", error);

        let decision = self
            .presenter
            .present_error(&error.to_string())
            .map_err(FlowError::Presentation)?;
        if self.cancel.is_cancelled() {
            return Ok(Step::Stop(FlowOutcome::Cancelled));
        }

        let step = match decision {
            NavigationDecision::Confirm | NavigationDecision::Select(_) => Step::Next(retry),
            NavigationDecision::Skip => {
                self.resolve(Resolution::Skipped);
                Step::Next(FlowState::AwaitingEntry)
            }
            NavigationDecision::GoBack => {
                self.go_back();
                Step::Next(FlowState::AwaitingEntry)
            }
            NavigationDecision::Cancel => Step::Stop(FlowOutcome::Cancelled),
        };
        Ok(step)
    }

    fn resolve(&mut self, resolution: Resolution) {
        if let Some(slot) = self.resolutions.get_mut(self.cursor.index()) {
            *slot = Some(resolution);
        }
        self.cursor.advance();
    }

    fn go_back(&mut self) {
        if !self.cursor.back() {
            log::debug!("Already at the first entry, staying");
        }
    }

    fn into_summary(self, outcome: FlowOutcome) -> FlowSummary {
        FlowSummary {
            outcome,
            position: self.cursor.index(),
            resolutions: self.resolutions,
        }
    }
}

fn song_prompt(song: &Song) -> String {
    let mut prompt = String::new();
    if !song.leader.is_empty() {
        prompt.push_str(&format!(
            "{} - you're up next, with {}\n",
            song.leader, song.title
        ));
    }
    prompt.push_str(&format!("Trying to match: {}", song.query()));
    prompt
}
