//! Markdown rendering for outlines.

use crate::model::{Outline, Section};

/// Render an outline as Markdown.
pub fn to_markdown(outline: &Outline) -> String {
    MarkdownRenderer::new().render(outline)
}

/// Markdown renderer.
///
/// The title becomes `#`, and h1/h2/h3 sections become `##`/`###`/`####`.
/// Synthetic sections (empty headings) contribute their content without a
/// heading line.
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    output: String,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render an outline to Markdown.
    pub fn render(mut self, outline: &Outline) -> String {
        if !outline.title.is_empty() {
            self.heading(1, &outline.title);
        }

        for h1 in &outline.h1 {
            self.section(2, h1);
            for h2 in &h1.h2 {
                self.section(3, h2);
                for h3 in &h2.h3 {
                    self.section(4, h3);
                }
            }
        }

        let trimmed_len = self.output.trim_end().len();
        self.output.truncate(trimmed_len);
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output
    }

    fn heading(&mut self, level: usize, text: &str) {
        self.output.push_str(&"#".repeat(level));
        self.output.push(' ');
        self.output.push_str(text);
        self.output.push_str("\n\n");
    }

    fn section<S: Section>(&mut self, level: usize, section: &S) {
        if !section.heading().is_empty() {
            self.heading(level, section.heading());
        }

        let body = section.body().trim();
        if !body.is_empty() {
            self.output.push_str(body);
            self.output.push_str("\n\n");
        }

        if !section.bullets().is_empty() {
            for bullet in section.bullets() {
                self.output.push_str(bullet);
                self.output.push('\n');
            }
            self.output.push('\n');
        }
    }
}
