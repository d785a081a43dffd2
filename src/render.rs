//! Render pipeline
//!
//! Rendering is split in two stages: the button's core renderer fills the
//! template, then each [`PostProcessor`] transforms the markup in order.
//! Post-processors only see the button by shared reference, so they cannot
//! change its properties.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::button::Button;

pub trait PostProcessor: Send + Sync {
    /// Name used in trace output.
    fn name(&self) -> &str {
        "post-processor"
    }

    fn process(&self, html: String, button: &Button) -> String;
}

impl<F> PostProcessor for F
where
    F: Fn(String, &Button) -> String + Send + Sync,
{
    fn process(&self, html: String, button: &Button) -> String {
        self(html, button)
    }
}

/// Ordered list of post-processors.
#[derive(Clone, Default)]
pub struct RenderPipeline {
    processors: Vec<Arc<dyn PostProcessor>>,
}

impl fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.processors.iter().map(|p| p.name()))
            .finish()
    }
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a post-processor; it runs after those already registered.
    pub fn push(&mut self, processor: impl PostProcessor + 'static) {
        self.processors.push(Arc::new(processor));
    }

    pub fn with(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.push(processor);
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Feed `html` through every post-processor.
    pub fn run(&self, html: String, button: &Button) -> String {
        self.processors.iter().fold(html, |html, processor| {
            trace!(processor = processor.name(), "running render post-processor");
            processor.process(html, button)
        })
    }
}

/// Wraps the rendered markup in a fixed prefix and suffix.
#[derive(Debug, Clone)]
pub struct Wrap {
    pub before: String,
    pub after: String,
}

impl Wrap {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

impl PostProcessor for Wrap {
    fn name(&self) -> &str {
        "wrap"
    }

    fn process(&self, html: String, _button: &Button) -> String {
        format!("{}{}{}", self.before, html, self.after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonContext;
    use crate::content::PageTree;

    fn button() -> Button {
        let mut button = Button::new(ButtonContext::new(Arc::new(PageTree::new())));
        button.set_label("Go");
        button
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = RenderPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.run("<a>".into(), &button()), "<a>");
    }

    #[test]
    fn test_processors_run_in_order() {
        let pipeline = RenderPipeline::new()
            .with(|html: String, _: &Button| format!("{}1", html))
            .with(|html: String, _: &Button| format!("{}2", html));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.run("x".into(), &button()), "x12");
    }

    #[test]
    fn test_processor_reads_button() {
        let pipeline = RenderPipeline::new()
            .with(|html: String, b: &Button| format!("{} ({})", html, b.label()));
        assert_eq!(pipeline.run("x".into(), &button()), "x (Go)");
    }

    #[test]
    fn test_wrap() {
        let pipeline = RenderPipeline::new().with(Wrap::new("<li>", "</li>"));
        assert_eq!(pipeline.run("<a></a>".into(), &button()), "<li><a></a></li>");
        assert_eq!(format!("{:?}", pipeline), r#"["wrap"]"#);
    }
}
