//! Lantern Web
//!
//! Browser backend: implements every `lantern_core` host capability with
//! `web-sys` and starts the page from the wasm start function.
//!
//! # Building
//!
//! ```bash
//! wasm-pack build crates/lantern_web --target web
//! ```
//!
//! The page loads the generated module; configuration comes from an
//! optional `<script type="application/toml" id="lantern-config">` element.
//!
//! Only [`logging`] and [`page_config`] build on native targets, where
//! their tests run.

pub mod logging;
pub mod page_config;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod dropdown;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
pub use dom::{WebDocument, WebElement};
#[cfg(target_arch = "wasm32")]
pub use dropdown::DropdownRebinder;
#[cfg(target_arch = "wasm32")]
pub use fetch::FetchContactEndpoint;
#[cfg(target_arch = "wasm32")]
pub use platform::{
    BrowserResizeObserver, LocalSpawner, LocalStorage, MediaQueryScheme, TimeoutScheduler,
};

#[cfg(target_arch = "wasm32")]
pub use entry::start;

/// Readable text for a thrown JS value
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use lantern_app::{Page, PageHost};
    use lantern_layout::LayoutSettledHook;
    use tracing::{error, Level};
    use wasm_bindgen::prelude::*;
    use web_sys::console;

    use crate::dom::WebDocument;
    use crate::dropdown::DropdownRebinder;
    use crate::fetch::FetchContactEndpoint;
    use crate::platform::{
        BrowserResizeObserver, LocalSpawner, LocalStorage, MediaQueryScheme, TimeoutScheduler,
    };
    use crate::{logging, page_config};

    thread_local! {
        static PAGE: RefCell<Option<Page<FetchContactEndpoint>>> = const { RefCell::new(None) };
    }

    fn console_sink(level: Level, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            _ => console::debug_1(&line),
        }
    }

    /// Start the page once the module is instantiated
    #[wasm_bindgen(start)]
    pub fn start() {
        let document = match WebDocument::current() {
            Ok(document) => document,
            Err(err) => {
                console::error_1(&JsValue::from_str(&format!("lantern: {err}")));
                return;
            }
        };

        let (config, config_error) =
            page_config::resolve(document.text_of(page_config::CONFIG_ELEMENT_ID).as_deref());
        logging::init(config.log_level, console_sink);
        if let Some(err) = config_error {
            error!("ignoring #{}: {}", page_config::CONFIG_ELEMENT_ID, err);
        }

        let host = PageHost {
            document: document.clone(),
            store: LocalStorage::new(),
            color_scheme: MediaQueryScheme::new(),
            resize_observer: BrowserResizeObserver::new(),
            scheduler: TimeoutScheduler::new(),
            spawner: LocalSpawner::new(),
        };
        let dropdown: Rc<dyn LayoutSettledHook> = Rc::new(DropdownRebinder::new(
            document,
            config.theme.switcher_selector.clone(),
        ));
        let endpoint = FetchContactEndpoint::new(config.contact.endpoint_url.clone());

        let page = Page::start(&host, &config, endpoint, vec![dropdown]);
        PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    }
}
