use std::collections::BTreeMap;

/// Where the preview image is drawn. Hiding an already hidden preview is fine.
pub trait PreviewView {
    fn show(&mut self, src: &str, label: &str);
    fn hide(&mut self);
}

/// A pending existence check for one hover session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeTicket {
    session: u64,
    pub path: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    Loaded,
    Failed,
}

pub struct GamePreview<V> {
    images: BTreeMap<String, String>,
    session: u64,
    visible: bool,
    view: V,
}

impl<V: PreviewView> GamePreview<V> {
    pub fn new(images: BTreeMap<String, String>, view: V) -> Self {
        Self {
            images,
            session: 0,
            visible: false,
            view,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Starts a hover session. Returns the probe to run, or `None` when the
    /// game has no preview image.
    pub fn hover_enter(&mut self, game_id: &str, label: &str) -> Option<ProbeTicket> {
        self.session += 1;
        let Some(path) = self.images.get(game_id) else {
            tracing::debug!("preview: no image for {game_id:?}");
            return None;
        };
        Some(ProbeTicket {
            session: self.session,
            path: path.clone(),
            label: label.to_string(),
        })
    }

    pub fn hover_leave(&mut self) {
        self.session += 1;
        self.visible = false;
        self.view.hide();
    }

    pub fn finish_probe(&mut self, ticket: &ProbeTicket, outcome: ProbeOutcome) {
        if ticket.session != self.session {
            tracing::debug!("preview: dropping stale probe for {}", ticket.path);
            return;
        }
        match outcome {
            ProbeOutcome::Loaded => {
                self.visible = true;
                self.view.show(&ticket.path, &ticket.label);
            }
            ProbeOutcome::Failed => {
                tracing::debug!("preview: {} failed to load", ticket.path);
                self.visible = false;
                self.view.hide();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct FakePreview {
        shown: Option<(String, String)>,
        visible: bool,
        hides: usize,
    }

    impl PreviewView for FakePreview {
        fn show(&mut self, src: &str, label: &str) {
            self.shown = Some((src.to_string(), label.to_string()));
            self.visible = true;
        }

        fn hide(&mut self) {
            self.visible = false;
            self.hides += 1;
        }
    }

    fn preview() -> GamePreview<FakePreview> {
        GamePreview::new(SiteConfig::default().games, FakePreview::default())
    }

    #[test]
    fn loaded_probe_shows_image_with_label() {
        let mut preview = preview();
        let ticket = preview.hover_enter("bloom", "Bloom").unwrap();
        assert_eq!(ticket.path, "assets/images/bloom.png");
        preview.finish_probe(&ticket, ProbeOutcome::Loaded);
        assert!(preview.is_visible());
        assert_eq!(
            preview.view().shown,
            Some(("assets/images/bloom.png".to_string(), "Bloom".to_string()))
        );
    }

    #[test]
    fn unmapped_game_never_shows() {
        let mut preview = preview();
        assert_eq!(preview.hover_enter("pong", "Pong"), None);
        assert!(!preview.is_visible());
        assert!(!preview.view().visible);
        assert_eq!(preview.view().shown, None);
    }

    #[test]
    fn failed_probe_ends_hidden() {
        let mut preview = preview();
        let ticket = preview.hover_enter("vasa-ship", "Vasa Ship").unwrap();
        preview.finish_probe(&ticket, ProbeOutcome::Failed);
        assert!(!preview.is_visible());
        assert!(!preview.view().visible);
        assert_eq!(preview.view().hides, 1);
    }

    #[test]
    fn leave_hides_visible_preview() {
        let mut preview = preview();
        let ticket = preview.hover_enter("bloom", "Bloom").unwrap();
        preview.finish_probe(&ticket, ProbeOutcome::Loaded);
        preview.hover_leave();
        assert!(!preview.is_visible());
        assert!(!preview.view().visible);
    }

    #[test]
    fn probe_finishing_after_leave_is_dropped() {
        let mut preview = preview();
        let ticket = preview.hover_enter("bloom", "Bloom").unwrap();
        preview.hover_leave();
        preview.finish_probe(&ticket, ProbeOutcome::Loaded);
        assert!(!preview.is_visible());
        assert_eq!(preview.view().shown, None);
    }

    #[test]
    fn superseded_probe_cannot_replace_newer_hover() {
        let mut preview = preview();
        let slow = preview.hover_enter("bloom", "Bloom").unwrap();
        preview.hover_leave();
        let fast = preview.hover_enter("vasa-ship", "Vasa Ship").unwrap();
        preview.finish_probe(&fast, ProbeOutcome::Loaded);
        preview.finish_probe(&slow, ProbeOutcome::Loaded);
        assert_eq!(
            preview.view().shown,
            Some(("assets/images/vasa-ship.png".to_string(), "Vasa Ship".to_string()))
        );

        let stale_failure = preview.hover_enter("bloom", "Bloom").unwrap();
        let current = preview.hover_enter("finding-stubby", "Finding Stubby").unwrap();
        preview.finish_probe(&current, ProbeOutcome::Loaded);
        preview.finish_probe(&stale_failure, ProbeOutcome::Failed);
        assert!(preview.is_visible());
        assert!(preview.view().visible);
    }

    #[test]
    fn hover_on_unmapped_row_invalidates_pending_probe() {
        let mut preview = preview();
        let pending = preview.hover_enter("bloom", "Bloom").unwrap();
        assert_eq!(preview.hover_enter("pong", "Pong"), None);
        preview.finish_probe(&pending, ProbeOutcome::Loaded);
        assert!(!preview.is_visible());
    }
}
