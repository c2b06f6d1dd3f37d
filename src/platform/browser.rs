//! `web-sys` platform for hydrated builds.
//!
//! TRADE-OFFS
//! ==========
//! Every browser call is fallible (`JsValue` errors, missing `window` in
//! workers, storage blocked by privacy settings). Failures are converted to
//! [`PlatformError`] and left to the caller to log; none of them are fatal.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MediaQueryList, MediaQueryListEvent, Storage, StorageEvent, Window};

use crate::mode::Mode;
use crate::subscription::Subscription;

use super::{Platform, PlatformError, StorageChange, StorageListener, SystemModeListener};

/// Media query whose match means the OS prefers light.
pub const LIGHT_SCHEME_QUERY: &str = "(prefers-color-scheme: light)";

const NO_TRANSITIONS_CSS: &str = "*,*::before,*::after{-webkit-transition:none!important;-moz-transition:none!important;-o-transition:none!important;-ms-transition:none!important;transition:none!important}";

/// Delay before the transition-suppression stylesheet is removed.
const RESTORE_TRANSITIONS_MS: u32 = 1;

fn js_err(e: &JsValue) -> String {
    format!("{e:?}")
}

fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::DocumentUnavailable)
}

fn document() -> Result<Document, PlatformError> {
    window()?.document().ok_or(PlatformError::DocumentUnavailable)
}

fn root() -> Result<Element, PlatformError> {
    document()?.document_element().ok_or(PlatformError::DocumentUnavailable)
}

fn local_storage() -> Result<Storage, PlatformError> {
    let Ok(window) = window() else {
        return Err(PlatformError::StorageUnavailable);
    };
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(PlatformError::StorageUnavailable),
        Err(e) => Err(PlatformError::Storage(js_err(&e))),
    }
}

fn light_scheme_query() -> Option<MediaQueryList> {
    let window = web_sys::window()?;
    match window.match_media(LIGHT_SCHEME_QUERY) {
        Ok(mql) => mql,
        Err(e) => {
            log::debug!("matchMedia unavailable: {}", js_err(&e));
            None
        }
    }
}

fn scheme_from_light_match(matches: bool) -> Mode {
    if matches { Mode::Light } else { Mode::Dark }
}

/// Browser `window`, `localStorage` and `document.documentElement`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPlatform;

impl BrowserPlatform {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Platform for BrowserPlatform {
    fn is_browser(&self) -> bool {
        web_sys::window().is_some()
    }

    fn storage_get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        local_storage()?.get_item(key).map_err(|e| PlatformError::Storage(js_err(&e)))
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        local_storage()?.set_item(key, value).map_err(|e| PlatformError::Storage(js_err(&e)))
    }

    fn watch_storage(&self, listener: StorageListener) -> Option<Subscription> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
            listener(&StorageChange { key: event.key(), new_value: event.new_value() });
        });
        if let Err(e) = window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref()) {
            log::warn!("failed to listen for storage events: {}", js_err(&e));
            return None;
        }
        Some(Subscription::new(move || {
            if let Err(e) = window.remove_event_listener_with_callback("storage", closure.as_ref().unchecked_ref()) {
                log::warn!("failed to remove storage listener: {}", js_err(&e));
            }
        }))
    }

    fn system_mode(&self) -> Option<Mode> {
        light_scheme_query().map(|mql| scheme_from_light_match(mql.matches()))
    }

    fn watch_system_mode(&self, listener: SystemModeListener) -> Option<Subscription> {
        let mql = light_scheme_query()?;
        let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
            listener(scheme_from_light_match(event.matches()));
        });
        if let Err(e) = mql.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
            log::warn!("failed to listen for color scheme changes: {}", js_err(&e));
            return None;
        }
        Some(Subscription::new(move || {
            if let Err(e) = mql.remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
                log::warn!("failed to remove color scheme listener: {}", js_err(&e));
            }
        }))
    }

    fn add_root_classes(&self, classes: &[String]) -> Result<(), PlatformError> {
        let list = root()?.class_list();
        for class in classes {
            list.add_1(class).map_err(|e| PlatformError::Dom(js_err(&e)))?;
        }
        Ok(())
    }

    fn remove_root_classes(&self, classes: &[String]) -> Result<(), PlatformError> {
        let list = root()?.class_list();
        for class in classes {
            list.remove_1(class).map_err(|e| PlatformError::Dom(js_err(&e)))?;
        }
        Ok(())
    }

    fn set_color_scheme(&self, mode: Mode) -> Result<(), PlatformError> {
        let Ok(root) = root()?.dyn_into::<HtmlElement>() else {
            return Err(PlatformError::Dom("document root is not an HTML element".into()));
        };
        root.style()
            .set_property("color-scheme", mode.as_str())
            .map_err(|e| PlatformError::Dom(js_err(&e)))
    }

    fn set_theme_color(&self, color: &str) -> Result<(), PlatformError> {
        let meta = document()?
            .query_selector("meta[name=\"theme-color\"]")
            .map_err(|e| PlatformError::Dom(js_err(&e)))?;
        match meta {
            Some(meta) => meta.set_attribute("content", color).map_err(|e| PlatformError::Dom(js_err(&e))),
            None => Ok(()),
        }
    }

    fn without_transitions(&self, action: &mut dyn FnMut()) {
        let style = match install_no_transitions_style() {
            Ok(style) => Some(style),
            Err(e) => {
                log::debug!("transition suppression skipped: {e}");
                None
            }
        };

        action();

        if let Some(style) = style {
            force_restyle();
            gloo_timers::callback::Timeout::new(RESTORE_TRANSITIONS_MS, move || style.remove()).forget();
        }
    }
}

fn install_no_transitions_style() -> Result<Element, PlatformError> {
    let document = document()?;
    let head = document.head().ok_or(PlatformError::DocumentUnavailable)?;
    let style = document.create_element("style").map_err(|e| PlatformError::Dom(js_err(&e)))?;
    style.set_text_content(Some(NO_TRANSITIONS_CSS));
    head.append_child(&style).map_err(|e| PlatformError::Dom(js_err(&e)))?;
    Ok(style)
}

/// Read computed style so the browser commits the new state before the
/// suppression stylesheet goes away.
fn force_restyle() {
    let (Ok(window), Ok(document)) = (window(), document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    match window.get_computed_style(&body) {
        Ok(Some(computed)) => {
            if let Err(e) = computed.get_property_value("opacity") {
                log::debug!("computed style read failed: {}", js_err(&e));
            }
        }
        Ok(None) => {}
        Err(e) => log::debug!("getComputedStyle failed: {}", js_err(&e)),
    }
}
