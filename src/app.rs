use dioxus::prelude::*;

use crate::config::{use_site_config, SiteConfig};

#[component]
pub fn App() -> Element {
    let config_resource = use_site_config();
    let Some(config) = config_resource() else {
        return rsx! {};
    };

    rsx! {
        PageInteractions { config }
    }
}

/// Drives the server-rendered landing page markup. Renders nothing itself.
#[component]
fn PageInteractions(config: SiteConfig) -> Element {
    #[cfg(target_arch = "wasm32")]
    let mut listeners = use_signal(|| None::<crate::dom::ListenerSet>);
    #[cfg(not(target_arch = "wasm32"))]
    let _listeners = ();

    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            if listeners.peek().is_some() {
                return;
            }
            match crate::dom::bind_page(&config) {
                Ok(bound) => listeners.set(Some(bound)),
                Err(message) => tracing::debug!("page binding skipped: {message}"),
            }
        });

        use_drop(move || {
            if listeners.write().take().is_some() {
                tracing::debug!("page listeners detached");
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(
            "page interactions need a browser; {} sections configured",
            config.sections.len()
        );
    }

    rsx! {}
}
