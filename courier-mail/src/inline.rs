//! CSS inlining.

use css_inline::CSSInliner;

use crate::Result;

/// Rewrites stylesheet rules into per-element `style` attributes.
pub trait StyleInliner: Send + Sync {
    /// Inline `css` into `html`.
    fn inline(&self, html: &str, css: &str) -> Result<String>;
}

/// [`StyleInliner`] backed by `css-inline`.
///
/// The HTML is treated as a fragment, so a body without `<html>` or
/// `<body>` comes back in the same shape. Remote stylesheets referenced by
/// `<link>` tags are never fetched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssInliner;

impl StyleInliner for CssInliner {
    fn inline(&self, html: &str, css: &str) -> Result<String> {
        let inliner = CSSInliner::options()
            .load_remote_stylesheets(false)
            .build();

        Ok(inliner.inline_fragment(html, css)?)
    }
}
