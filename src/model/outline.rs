//! The nested outline tree produced by the structure builder.
//!
//! Field names and nesting are part of the persisted format: the root has
//! `title` and `h1`, every section has `heading`, `body` and `bullets`, and
//! the next level down lives under `h2` (in h1 sections) or `h3` (in h2
//! sections).

use serde::{Deserialize, Serialize};

/// Root of a document outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Text of the first title-sized run, or empty
    pub title: String,
    /// Top-level sections in reading order
    pub h1: Vec<H1Section>,
}

/// A top-level section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H1Section {
    pub heading: String,
    /// Free text, each run followed by one space
    pub body: String,
    pub bullets: Vec<String>,
    pub h2: Vec<H2Section>,
}

/// A second-level section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2Section {
    pub heading: String,
    pub body: String,
    pub bullets: Vec<String>,
    pub h3: Vec<H3Section>,
}

/// A third-level section. Deeper headings are not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H3Section {
    pub heading: String,
    pub body: String,
    pub bullets: Vec<String>,
}

/// Common access to the content every section level carries.
pub trait Section {
    /// The heading text.
    fn heading(&self) -> &str;

    /// Accumulated body text.
    fn body(&self) -> &str;

    /// Bullet items in reading order.
    fn bullets(&self) -> &[String];

    /// Append one body fragment followed by a separator space.
    fn push_body(&mut self, text: &str);

    /// Append one bullet item verbatim.
    fn push_bullet(&mut self, text: &str);
}

macro_rules! impl_section {
    ($ty:ty) => {
        impl $ty {
            /// Create an empty section with the given heading.
            pub fn new(heading: impl Into<String>) -> Self {
                Self {
                    heading: heading.into(),
                    ..Default::default()
                }
            }
        }

        impl Section for $ty {
            fn heading(&self) -> &str {
                &self.heading
            }

            fn body(&self) -> &str {
                &self.body
            }

            fn bullets(&self) -> &[String] {
                &self.bullets
            }

            fn push_body(&mut self, text: &str) {
                self.body.push_str(text);
                self.body.push(' ');
            }

            fn push_bullet(&mut self, text: &str) {
                self.bullets.push(text.to_string());
            }
        }
    };
}

impl_section!(H1Section);
impl_section!(H2Section);
impl_section!(H3Section);

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no title and no sections were found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.h1.is_empty()
    }

    /// Number of sections at each level: `[h1, h2, h3]`.
    pub fn section_counts(&self) -> [usize; 3] {
        let mut counts = [self.h1.len(), 0, 0];
        for h1 in &self.h1 {
            counts[1] += h1.h2.len();
            counts[2] += h1.h2.iter().map(|h2| h2.h3.len()).sum::<usize>();
        }
        counts
    }

    /// Total number of bullet items across all sections.
    pub fn bullet_count(&self) -> usize {
        self.h1
            .iter()
            .map(|h1| {
                h1.bullets.len()
                    + h1.h2
                        .iter()
                        .map(|h2| {
                            h2.bullets.len() + h2.h3.iter().map(|h3| h3.bullets.len()).sum::<usize>()
                        })
                        .sum::<usize>()
            })
            .sum()
    }
}
