//! Browser-only helpers: scroll into view and full-page redirects.
//!
//! `scroll_into_view` exists only under the `hydrate` feature; `hard_redirect`
//! is a no-op on the server.

/// Smoothly scroll `element` so its top edge sits at the top of the viewport.
#[cfg(feature = "hydrate")]
pub fn scroll_into_view(element: &web_sys::Element) {
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Navigate the whole window, leaving the SPA router.
pub fn hard_redirect(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                log::warn!("redirect to {path} failed: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}
