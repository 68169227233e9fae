use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlImageElement, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::config::SiteConfig;
use crate::keyboard::dispatch_key;
use crate::navigator::{HistoryEntry, HistoryMode, NavigatorView, SectionNavigator};
use crate::preview::{GamePreview, ProbeOutcome, PreviewView};
use crate::sections::{SectionId, SectionTable};

const ACTIVE_CLASS: &str = "active";
const VISIBLE_CLASS: &str = "visible";
const SECTION_SELECTOR: &str = ".section";
const SECTION_TRIGGERS: [&str; 2] = [".section-number", ".header-btn"];
const GAME_ROW_SELECTOR: &str = ".game-row";
const GAME_NAME_SELECTOR: &str = ".game-name";
const LOGO_SELECTOR: &str = ".logo";
const PREVIEW_ID: &str = "gamePreview";
const PREVIEW_IMAGE_ID: &str = "gamePreviewImg";

pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn section_element(&self, id: &SectionId) -> Option<Element> {
        let selector = format!("[data-section=\"{id}\"]");
        self.document.query_selector(&selector).ok().flatten()
    }
}

impl NavigatorView for DomView {
    fn activate_section(&mut self, id: &SectionId) {
        if let Some(element) = self.section_element(id) {
            let _ = element.class_list().add_1(ACTIVE_CLASS);
        }
    }

    fn deactivate_section(&mut self, id: &SectionId) {
        if let Some(element) = self.section_element(id) {
            let _ = element.class_list().remove_1(ACTIVE_CLASS);
        }
    }

    fn apply_theme(&mut self, theme: &str, active: Option<&SectionId>) {
        let Some(body) = self.document.body() else {
            return;
        };
        let _ = body.set_attribute("data-theme", theme);
        match active {
            Some(id) => {
                let _ = body.set_attribute("data-active-section", id.as_str());
            }
            None => {
                let _ = body.remove_attribute("data-active-section");
            }
        }
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        let url = match entry {
            HistoryEntry::Section(id) => format!("#{id}"),
            HistoryEntry::Cleared => match self.window.location().pathname() {
                Ok(path) => path,
                Err(_) => return,
            },
        };
        let Ok(history) = self.window.history() else {
            return;
        };
        if history
            .push_state_with_url(&JsValue::NULL, "", Some(url.as_str()))
            .is_err()
        {
            tracing::debug!("history push failed for {url}");
        }
    }

    fn scroll_to_section(&mut self, id: &SectionId) {
        let Some(element) = self.section_element(id) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn scroll_to_top(&mut self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

pub struct DomPreview {
    container: Element,
    image: HtmlImageElement,
}

impl DomPreview {
    pub fn find(document: &Document) -> Option<Self> {
        let container = document.get_element_by_id(PREVIEW_ID)?;
        let image = document
            .get_element_by_id(PREVIEW_IMAGE_ID)?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        Some(Self { container, image })
    }
}

impl PreviewView for DomPreview {
    fn show(&mut self, src: &str, label: &str) {
        self.image.set_src(src);
        self.image.set_alt(label);
        let _ = self.container.class_list().add_1(VISIBLE_CLASS);
    }

    fn hide(&mut self) {
        let _ = self.container.class_list().remove_1(VISIBLE_CLASS);
    }
}

/// Resolves once `path` has loaded and decoded in a detached image element.
pub async fn probe_image(path: &str) -> Result<(), String> {
    let image = HtmlImageElement::new().map_err(|_| "Image element unavailable")?;
    image.set_src(path);
    wasm_bindgen_futures::JsFuture::from(image.decode())
        .await
        .map_err(|_| format!("{path} failed to load"))?;
    Ok(())
}

struct Binding {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Event listeners attached to the host page, removed again on drop.
#[derive(Default)]
pub struct ListenerSet {
    bindings: Vec<Binding>,
}

impl ListenerSet {
    fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::debug!("failed to attach {event} listener");
            return;
        }
        self.bindings.push(Binding {
            target: target.clone(),
            event,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        for binding in self.bindings.drain(..) {
            let _ = binding.target.remove_event_listener_with_callback(
                binding.event,
                binding.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

type SharedNavigator = Rc<RefCell<SectionNavigator<DomView>>>;
type SharedPreview = Rc<RefCell<GamePreview<DomPreview>>>;

/// Wires the navigator and preview into the existing page markup and replays
/// the fragment the page was opened with.
pub fn bind_page(config: &SiteConfig) -> Result<ListenerSet, String> {
    let window = web_sys::window().ok_or("Window unavailable")?;
    let document = window.document().ok_or("Document unavailable")?;

    let table = SectionTable::from_config(config);
    let navigator: SharedNavigator = Rc::new(RefCell::new(SectionNavigator::new(
        table,
        DomView::new(window.clone(), document.clone()),
    )));

    let mut listeners = ListenerSet::default();
    bind_sections(&document, &navigator, &mut listeners)?;
    bind_logo(&document, &navigator, &mut listeners);
    bind_keyboard(&document, &navigator, &mut listeners);
    bind_history(&window, &navigator, &mut listeners);

    match DomPreview::find(&document) {
        Some(view) => {
            let preview = Rc::new(RefCell::new(GamePreview::new(config.games.clone(), view)));
            bind_game_rows(&document, &preview, &mut listeners)?;
        }
        None => tracing::debug!("page has no game preview container"),
    }

    let initial = window.location().hash().unwrap_or_default();
    navigator.borrow_mut().restore_fragment(&initial);
    tracing::debug!("bound {} page listeners", listeners.len());
    Ok(listeners)
}

fn with_navigator(navigator: &SharedNavigator, action: impl FnOnce(&mut SectionNavigator<DomView>)) {
    match navigator.try_borrow_mut() {
        Ok(mut navigator) => action(&mut navigator),
        Err(_) => tracing::debug!("navigator busy, dropping event"),
    }
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, String> {
    let list = document
        .query_selector_all(selector)
        .map_err(|_| format!("Invalid selector {selector}"))?;
    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn bind_sections(
    document: &Document,
    navigator: &SharedNavigator,
    listeners: &mut ListenerSet,
) -> Result<(), String> {
    for section in elements(document, SECTION_SELECTOR)? {
        let Some(section_id) = section.get_attribute("data-section") else {
            continue;
        };
        for selector in SECTION_TRIGGERS {
            let Ok(Some(trigger)) = section.query_selector(selector) else {
                continue;
            };
            let navigator = navigator.clone();
            let section_id = section_id.clone();
            listeners.listen(&trigger, "click", move |event: Event| {
                event.prevent_default();
                with_navigator(&navigator, |nav| nav.toggle(&section_id, HistoryMode::Push));
            });
        }
    }
    Ok(())
}

fn bind_logo(document: &Document, navigator: &SharedNavigator, listeners: &mut ListenerSet) {
    let Ok(Some(logo)) = document.query_selector(LOGO_SELECTOR) else {
        return;
    };
    let navigator = navigator.clone();
    listeners.listen(&logo, "click", move |event: Event| {
        event.prevent_default();
        with_navigator(&navigator, |nav| nav.reset(HistoryMode::Push));
    });
}

fn bind_keyboard(document: &Document, navigator: &SharedNavigator, listeners: &mut ListenerSet) {
    let navigator = navigator.clone();
    listeners.listen(document, "keydown", move |event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = event.key();
        let mut handled = false;
        with_navigator(&navigator, |nav| handled = dispatch_key(&key, nav));
        if handled {
            event.prevent_default();
        }
    });
}

fn bind_history(window: &Window, navigator: &SharedNavigator, listeners: &mut ListenerSet) {
    let navigator = navigator.clone();
    let location = window.location();
    listeners.listen(window, "hashchange", move |_event: Event| {
        let hash = location.hash().unwrap_or_default();
        with_navigator(&navigator, |nav| nav.sync_fragment(&hash));
    });
}

fn bind_game_rows(
    document: &Document,
    preview: &SharedPreview,
    listeners: &mut ListenerSet,
) -> Result<(), String> {
    for row in elements(document, GAME_ROW_SELECTOR)? {
        let Some(game_id) = row.get_attribute("data-game") else {
            continue;
        };
        let label = row
            .query_selector(GAME_NAME_SELECTOR)
            .ok()
            .flatten()
            .and_then(|name| name.text_content())
            .unwrap_or_default();

        let on_enter = preview.clone();
        listeners.listen(&row, "mouseenter", move |_event: Event| {
            let ticket = match on_enter.try_borrow_mut() {
                Ok(mut preview) => preview.hover_enter(&game_id, &label),
                Err(_) => None,
            };
            let Some(ticket) = ticket else {
                return;
            };
            let preview = on_enter.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match probe_image(&ticket.path).await {
                    Ok(()) => ProbeOutcome::Loaded,
                    Err(message) => {
                        tracing::debug!("{message}");
                        ProbeOutcome::Failed
                    }
                };
                if let Ok(mut preview) = preview.try_borrow_mut() {
                    preview.finish_probe(&ticket, outcome);
                }
            });
        });

        let on_leave = preview.clone();
        listeners.listen(&row, "mouseleave", move |_event: Event| {
            if let Ok(mut preview) = on_leave.try_borrow_mut() {
                preview.hover_leave();
            }
        });
    }
    Ok(())
}
