//! Section navigator: keeps at most one section open and mirrors that choice
//! into element markers, the page theme, the history stack and the scroll
//! position.
//!
//! ```text
//!               toggle(a) / next / previous
//!   Default ──────────────────────────────► Active(a)
//!      ▲                                      │  │
//!      │   toggle(a) / reset / previous@first │  │ toggle(b) / next / previous
//!      └──────────────────────────────────────┘  ▼
//!                                             Active(b)
//! ```
//!
//! Transitions started by the user record a history entry. Transitions that
//! replay an existing entry (back/forward, initial load) never do, otherwise
//! every popped entry would push a fresh one and history would loop.

use crate::fragment::parse_fragment;
use crate::sections::{SectionId, SectionTable};

/// Whether a transition should record a new history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replay,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryEntry {
    Section(SectionId),
    Cleared,
}

/// Side effects of the navigator. Implementations swallow missing elements.
pub trait NavigatorView {
    fn activate_section(&mut self, id: &SectionId);
    fn deactivate_section(&mut self, id: &SectionId);
    fn apply_theme(&mut self, theme: &str, active: Option<&SectionId>);
    fn push_history(&mut self, entry: HistoryEntry);
    fn scroll_to_section(&mut self, id: &SectionId);
    fn scroll_to_top(&mut self);
}

pub struct SectionNavigator<V> {
    sections: SectionTable,
    active: Option<SectionId>,
    view: V,
}

impl<V: NavigatorView> SectionNavigator<V> {
    pub fn new(sections: SectionTable, view: V) -> Self {
        Self {
            sections,
            active: None,
            view,
        }
    }

    pub fn active(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn toggle(&mut self, raw_id: &str, mode: HistoryMode) {
        let Some(id) = self.sections.resolve(raw_id).cloned() else {
            tracing::debug!("navigator: ignoring unknown section {raw_id:?}");
            return;
        };
        if self.active.as_ref() == Some(&id) {
            self.close(id, mode);
        } else {
            self.open(id, mode);
        }
    }

    pub fn reset(&mut self, mode: HistoryMode) {
        if let Some(previous) = self.active.take() {
            self.view.deactivate_section(&previous);
        }
        self.view.apply_theme(self.sections.default_theme(), None);
        if mode == HistoryMode::Push {
            self.view.push_history(HistoryEntry::Cleared);
        }
        self.view.scroll_to_top();
        tracing::debug!("navigator: reset");
    }

    pub fn navigate_next(&mut self) {
        let target = match &self.active {
            None => self.sections.first(),
            Some(current) => self.sections.next_after(current),
        };
        if let Some(target) = target.cloned() {
            self.open(target, HistoryMode::Push);
        }
    }

    pub fn navigate_previous(&mut self) {
        let Some(current) = self.active.clone() else {
            if let Some(last) = self.sections.last().cloned() {
                self.open(last, HistoryMode::Push);
            }
            return;
        };
        match self.sections.previous_before(&current).cloned() {
            Some(previous) => self.open(previous, HistoryMode::Push),
            None => self.reset(HistoryMode::Push),
        }
    }

    /// Follows a back/forward navigation without recording a new entry.
    pub fn sync_fragment(&mut self, hash: &str) {
        match parse_fragment(hash) {
            Some(raw) => {
                let Some(id) = self.sections.resolve(&raw).cloned() else {
                    tracing::debug!("navigator: fragment {raw:?} names no section");
                    return;
                };
                if self.active.as_ref() != Some(&id) {
                    self.open(id, HistoryMode::Replay);
                }
            }
            None => {
                if self.active.is_some() {
                    self.reset(HistoryMode::Replay);
                }
            }
        }
    }

    /// Seeds the state from the fragment the page was loaded with.
    pub fn restore_fragment(&mut self, hash: &str) {
        let Some(id) = parse_fragment(hash).and_then(|raw| self.sections.resolve(&raw).cloned())
        else {
            return;
        };
        self.open(id, HistoryMode::Replay);
    }

    fn open(&mut self, id: SectionId, mode: HistoryMode) {
        if let Some(previous) = self.active.take() {
            if previous != id {
                self.view.deactivate_section(&previous);
            }
        }
        self.view.activate_section(&id);
        let theme = self
            .sections
            .theme_of(&id)
            .unwrap_or_else(|| self.sections.default_theme())
            .to_string();
        self.view.apply_theme(&theme, Some(&id));
        if mode == HistoryMode::Push {
            self.view.push_history(HistoryEntry::Section(id.clone()));
        }
        self.view.scroll_to_section(&id);
        tracing::debug!("navigator: open {id} ({theme})");
        self.active = Some(id);
    }

    fn close(&mut self, id: SectionId, mode: HistoryMode) {
        self.view.deactivate_section(&id);
        self.view.apply_theme(self.sections.default_theme(), None);
        if mode == HistoryMode::Push {
            self.view.push_history(HistoryEntry::Cleared);
        }
        self.active = None;
        tracing::debug!("navigator: close {id}");
    }
}
