//! Thread id round-tripped through the page URL.
//!
//! `history.replaceState` keeps the parameter in sync without a
//! navigation, so a reload or a shared link resumes the same session.
//! The id format is the backend's concern; nothing is validated here.

use wasm_bindgen::JsValue;

use research_core::ports::ThreadParamPort;

pub struct UrlThreadParam {
    key: String,
}

impl UrlThreadParam {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ThreadParamPort for UrlThreadParam {
    fn get(&self) -> Option<String> {
        let window = web_sys::window()?;
        let search = window.location().search().ok()?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        params.get(&self.key).filter(|id| !id.is_empty())
    }

    fn set(&self, id: Option<&str>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let (Ok(search), Ok(pathname)) = (location.search(), location.pathname()) else {
            return;
        };
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            return;
        };

        match id {
            Some(id) => params.set(&self.key, id),
            None => params.delete(&self.key),
        }

        let query = String::from(params.to_string());
        let url = if query.is_empty() {
            pathname
        } else {
            format!("{}?{}", pathname, query)
        };

        let Ok(history) = window.history() else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("Failed to sync thread parameter: {:?}", e);
        }
    }
}
