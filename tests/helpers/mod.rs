//! Shared fixtures for the button integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use link_button::{Button, ButtonContext, Language, Languages, Page, PageTree};

pub const DEFAULT_LANG: u64 = 1010;
pub const GERMAN: u64 = 1011;
pub const FRENCH: u64 = 1012;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("link_button=debug")
        .with_test_writer()
        .try_init();
}

/// Small site: home, an about page with a German path, and a contact page.
pub fn site() -> PageTree {
    PageTree::new()
        .with_page(Page::new(1, "/").with_host("https://example.com"))
        .with_page(
            Page::new(42, "/about/")
                .with_host("https://example.com")
                .with_localized_path(GERMAN, "/de/ueber-uns/")
                .with_field("title", "About us")
                .with_field("summary", "Who we are"),
        )
        .with_page(Page::new(1020, "/about/contact/").with_host("https://example.com"))
}

pub fn languages(viewer: u64, page_names: bool) -> Arc<Languages> {
    Arc::new(
        Languages::new(vec![
            Language::new(DEFAULT_LANG, "default", ""),
            Language::new(GERMAN, "german", "de"),
            Language::new(FRENCH, "french", "fr"),
        ])
        .expect("non-empty language list")
        .with_viewer(viewer)
        .with_page_names(page_names),
    )
}

pub fn context() -> ButtonContext {
    init_tracing();
    ButtonContext::new(Arc::new(site()))
}

pub fn localized_context(viewer: u64, page_names: bool) -> ButtonContext {
    context().with_languages(languages(viewer, page_names))
}

pub fn button() -> Button {
    Button::new(context())
}
