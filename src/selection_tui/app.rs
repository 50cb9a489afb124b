use crate::matcher::{MatchConfidence, ScoredCandidate, is_degenerate};
use crate::ports::presenter::NavigationDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Pick a songbook match
    Choices,
    /// Yes/no style confirmation
    Confirm,
    /// A failed request
    Error,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    /// Match quality, for candidate entries
    pub score: Option<(u8, MatchConfidence)>,
    pub decision: NavigationDecision,
}

impl MenuItem {
    fn action(label: &str, decision: NavigationDecision) -> Self {
        Self {
            label: label.to_string(),
            score: None,
            decision,
        }
    }

    fn candidate(choice: &ScoredCandidate) -> Self {
        Self {
            label: choice.candidate.display_name(),
            score: Some((choice.percent(), choice.confidence)),
            decision: NavigationDecision::Select(choice.candidate.clone()),
        }
    }
}

/// One screen waiting for an operator decision
#[derive(Debug, Clone)]
pub struct Menu {
    pub kind: MenuKind,
    pub title: String,
    pub prompt: String,
    /// Shown above the items when set, e.g. when nothing matched well
    pub hint: Option<String>,
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Menu {
    /// Ranked candidates followed by "No match / skip" and "Go back"
    pub fn choices(prompt: &str, choices: &[ScoredCandidate]) -> Self {
        let mut items: Vec<MenuItem> = choices.iter().map(MenuItem::candidate).collect();
        items.push(MenuItem::action("No match / skip", NavigationDecision::Skip));
        items.push(MenuItem::action("Go back", NavigationDecision::GoBack));

        let hint = if choices.is_empty() {
            Some("No songs found in the songbook".to_string())
        } else if is_degenerate(choices) {
            Some("No good match found".to_string())
        } else {
            None
        };

        Self {
            kind: MenuKind::Choices,
            title: "Select song".to_string(),
            prompt: prompt.to_string(),
            hint,
            items,
            selected: 0,
        }
    }

    pub fn confirm(prompt: &str) -> Self {
        Self {
            kind: MenuKind::Confirm,
            title: "Break".to_string(),
            prompt: prompt.to_string(),
            hint: None,
            items: vec![
                MenuItem::action("Take a break", NavigationDecision::Confirm),
                MenuItem::action("Skip break", NavigationDecision::Skip),
                MenuItem::action("Go back", NavigationDecision::GoBack),
            ],
            selected: 0,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: MenuKind::Error,
            title: "Error".to_string(),
            prompt: message.to_string(),
            hint: None,
            items: vec![
                MenuItem::action("Retry", NavigationDecision::Confirm),
                MenuItem::action("Skip", NavigationDecision::Skip),
                MenuItem::action("Go back", NavigationDecision::GoBack),
            ],
            selected: 0,
        }
    }

    /// Move the selection, wrapping around at both ends
    pub fn select_previous(&mut self) {
        let len = self.items.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.items.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move up by a page, stopping at the first item
    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page);
    }

    /// Move down by a page, stopping at the last item
    pub fn page_down(&mut self, page: usize) {
        let max_idx = self.items.len().saturating_sub(1);
        self.selected = (self.selected + page).min(max_idx);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn current_decision(&self) -> Option<NavigationDecision> {
        self.items.get(self.selected).map(|item| item.decision.clone())
    }

    pub fn offers(&self, decision: &NavigationDecision) -> bool {
        self.items.iter().any(|item| &item.decision == decision)
    }
}
