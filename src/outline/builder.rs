//! Single-pass structure builder.
//!
//! Runs are consumed strictly in reading order. The builder tracks how deep
//! the currently open heading context is (none, h1, h2 or h3); the open
//! section at each level is always the last one appended at that level, so
//! the context is fully described by that depth.
//!
//! Per run, the first matching rule wins:
//!
//! 1. a title-sized run sets the title if it is still empty;
//! 2. an h1-sized run opens a new top-level section and closes deeper ones;
//! 3. an h2-sized run opens a subsection under the open h1;
//! 4. an h3-sized run opens a sub-subsection under the open h2;
//! 5. a bullet-shaped run goes to the innermost open section's bullets;
//! 6. a body-sized run is appended to the innermost open section's body;
//! 7. anything else is dropped.

use crate::model::{H1Section, H2Section, H3Section, Outline, Section, TextRun};

use super::bullet::BulletDetector;
use super::classify::{Rank, SizeRankMap};
use super::options::{OrphanPolicy, OutlineOptions};

/// Depth of the innermost open heading context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Depth {
    Root,
    H1,
    H2,
    H3,
}

/// Where a run ended up in the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Became the document title
    Title,
    /// Opened a new section at this rank
    Heading(Rank),
    /// Appended to the bullets of the innermost section
    Bullet,
    /// Appended to the body of the innermost section
    Body,
    /// Had no home and was discarded
    Dropped,
}

/// Incremental outline builder.
///
/// # Example
///
/// ```
/// use pdfoutline::outline::{OutlineBuilder, Rank};
/// use pdfoutline::TextRun;
///
/// let mut builder = OutlineBuilder::new();
/// builder.push(&TextRun::new("Report", "F1", 20.0, 1), Rank::Title);
/// builder.push(&TextRun::new("Intro", "F1", 16.0, 1), Rank::H1);
/// builder.push(&TextRun::new("Hello", "F1", 11.0, 1), Rank::Body);
///
/// let outline = builder.finish();
/// assert_eq!(outline.title, "Report");
/// assert_eq!(outline.h1[0].body, "Hello ");
/// ```
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    outline: Outline,
    depth: Depth,
    options: OutlineOptions,
    bullets: BulletDetector,
}

impl OutlineBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::with_options(OutlineOptions::default())
    }

    /// Create a builder with custom options.
    pub fn with_options(options: OutlineOptions) -> Self {
        Self {
            outline: Outline::new(),
            depth: Depth::Root,
            options,
            bullets: BulletDetector::new(),
        }
    }

    /// Feed the next run in reading order, already classified.
    pub fn push(&mut self, run: &TextRun, rank: Rank) -> Placement {
        let text = run.text.as_str();
        let attach = self.options.orphan_policy == OrphanPolicy::Attach;

        match rank {
            Rank::Title if self.outline.title.is_empty() => {
                self.outline.title = text.to_string();
                return Placement::Title;
            }
            Rank::H1 => {
                self.open_h1(text);
                return Placement::Heading(Rank::H1);
            }
            Rank::H2 if self.depth >= Depth::H1 || attach => {
                self.open_h2(text);
                return Placement::Heading(Rank::H2);
            }
            Rank::H3 if self.depth >= Depth::H2 || attach => {
                self.open_h3(text);
                return Placement::Heading(Rank::H3);
            }
            _ => {}
        }

        let placement = if self.bullets.is_bullet(text) {
            self.innermost(attach).map(|section| {
                section.push_bullet(text);
                Placement::Bullet
            })
        } else if rank == Rank::Body {
            self.innermost(attach).map(|section| {
                section.push_body(text);
                Placement::Body
            })
        } else {
            None
        };

        placement.unwrap_or_else(|| {
            log::trace!(
                "dropped {} run on page {} with no open context: {:?}",
                rank,
                run.page,
                text
            );
            Placement::Dropped
        })
    }

    /// Finish the pass and hand over the outline.
    pub fn finish(self) -> Outline {
        self.outline
    }

    fn open_h1(&mut self, heading: &str) {
        self.outline.h1.push(H1Section::new(heading));
        self.depth = Depth::H1;
    }

    fn open_h2(&mut self, heading: &str) {
        if self.depth == Depth::Root {
            self.open_h1("");
        }
        if let Some(h1) = self.outline.h1.last_mut() {
            h1.h2.push(H2Section::new(heading));
            self.depth = Depth::H2;
        }
    }

    fn open_h3(&mut self, heading: &str) {
        if self.depth < Depth::H2 {
            self.open_h2("");
        }
        if let Some(h2) = self.outline.h1.last_mut().and_then(|h1| h1.h2.last_mut()) {
            h2.h3.push(H3Section::new(heading));
            self.depth = Depth::H3;
        }
    }

    /// The innermost open section, opening a synthetic h1 if `attach` is set
    /// and nothing is open.
    fn innermost(&mut self, attach: bool) -> Option<&mut dyn Section> {
        if self.depth == Depth::Root && attach {
            self.open_h1("");
        }

        let h1 = self.outline.h1.last_mut();
        match self.depth {
            Depth::Root => None,
            Depth::H1 => h1.map(|s| s as &mut dyn Section),
            Depth::H2 => h1
                .and_then(|h1| h1.h2.last_mut())
                .map(|s| s as &mut dyn Section),
            Depth::H3 => h1
                .and_then(|h1| h1.h2.last_mut())
                .and_then(|h2| h2.h3.last_mut())
                .map(|s| s as &mut dyn Section),
        }
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an outline from runs and their document-wide size ranking.
pub fn build_outline(runs: &[TextRun], ranks: &SizeRankMap) -> Outline {
    build_outline_with_options(runs, ranks, &OutlineOptions::default())
}

/// Build an outline with custom options.
pub fn build_outline_with_options(
    runs: &[TextRun],
    ranks: &SizeRankMap,
    options: &OutlineOptions,
) -> Outline {
    let mut builder = OutlineBuilder::with_options(options.clone());
    let mut dropped = 0usize;
    for run in runs {
        if builder.push(run, ranks.rank_of(run)) == Placement::Dropped {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::debug!("{} of {} runs had no place in the outline", dropped, runs.len());
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::classify_sizes;

    fn run(text: &str, size: f32) -> TextRun {
        TextRun::new(text, "Helvetica", size, 1)
    }

    #[test]
    fn test_body_lands_under_latest_h1() {
        let runs = vec![
            run("Title", 20.0),
            run("Section A", 16.0),
            run("Section B", 16.0),
            run("hello", 12.0),
        ];
        let ranks = SizeRankMap::from_sizes([20.0, 16.0]);
        let outline = build_outline(&runs, &ranks);

        assert_eq!(outline.title, "Title");
        assert_eq!(outline.h1.len(), 2);
        assert_eq!(outline.h1[0].heading, "Section A");
        assert_eq!(outline.h1[0].body, "");
        assert_eq!(outline.h1[1].heading, "Section B");
        assert_eq!(outline.h1[1].body, "hello ");
    }

    #[test]
    fn test_full_hierarchy() {
        let runs = vec![
            run("Guide", 24.0),
            run("Chapter", 18.0),
            run("chapter intro", 10.0),
            run("Part", 14.0),
            run("- a point", 10.0),
            run("Detail", 12.0),
            run("detail text", 10.0),
            run("more detail", 10.0),
        ];
        let outline = build_outline(&runs, &classify_sizes(&runs));

        let chapter = &outline.h1[0];
        assert_eq!(chapter.body, "chapter intro ");
        let part = &chapter.h2[0];
        assert_eq!(part.heading, "Part");
        assert_eq!(part.bullets, vec!["- a point".to_string()]);
        let detail = &part.h3[0];
        assert_eq!(detail.heading, "Detail");
        assert_eq!(detail.body, "detail text more detail ");
    }

    #[test]
    fn test_new_h1_closes_deeper_contexts() {
        let mut builder = OutlineBuilder::new();
        builder.push(&run("A", 18.0), Rank::H1);
        builder.push(&run("A.1", 14.0), Rank::H2);
        builder.push(&run("A.1.a", 12.0), Rank::H3);
        builder.push(&run("B", 18.0), Rank::H1);
        builder.push(&run("text", 10.0), Rank::Body);
        // An h3 right after a new h1 has no h2 to live under.
        assert_eq!(builder.push(&run("orphan", 12.0), Rank::H3), Placement::Dropped);

        let outline = builder.finish();
        assert_eq!(outline.h1[1].body, "text ");
        assert!(outline.h1[1].h2.is_empty());
        assert_eq!(outline.h1[0].h2[0].h3.len(), 1);
    }

    #[test]
    fn test_new_h2_closes_h3() {
        let mut builder = OutlineBuilder::new();
        builder.push(&run("A", 18.0), Rank::H1);
        builder.push(&run("A.1", 14.0), Rank::H2);
        builder.push(&run("A.1.a", 12.0), Rank::H3);
        builder.push(&run("A.2", 14.0), Rank::H2);
        builder.push(&run("text", 10.0), Rank::Body);

        let outline = builder.finish();
        assert_eq!(outline.h1[0].h2[1].body, "text ");
        assert_eq!(outline.h1[0].h2[0].h3[0].body, "");
    }

    #[test]
    fn test_only_first_title_is_kept() {
        let mut builder = OutlineBuilder::new();
        assert_eq!(builder.push(&run("First", 20.0), Rank::Title), Placement::Title);
        assert_eq!(builder.push(&run("Second", 20.0), Rank::Title), Placement::Dropped);
        assert_eq!(builder.finish().title, "First");
    }

    #[test]
    fn test_late_title_sized_bullet_falls_through() {
        let mut builder = OutlineBuilder::new();
        builder.push(&run("Doc", 20.0), Rank::Title);
        builder.push(&run("Sec", 16.0), Rank::H1);
        assert_eq!(builder.push(&run("- big", 20.0), Rank::Title), Placement::Bullet);
        assert_eq!(builder.finish().h1[0].bullets, vec!["- big".to_string()]);
    }

    #[test]
    fn test_orphans_dropped_by_default() {
        let mut builder = OutlineBuilder::new();
        assert_eq!(builder.push(&run("- early", 10.0), Rank::Body), Placement::Dropped);
        assert_eq!(builder.push(&run("early text", 10.0), Rank::Body), Placement::Dropped);
        assert_eq!(builder.push(&run("Sub", 14.0), Rank::H2), Placement::Dropped);
        assert_eq!(builder.push(&run("SubSub", 12.0), Rank::H3), Placement::Dropped);

        let outline = builder.finish();
        assert!(outline.is_empty());
    }

    #[test]
    fn test_h3_sized_bullet_under_h1_goes_to_h1() {
        let mut builder = OutlineBuilder::new();
        builder.push(&run("Sec", 16.0), Rank::H1);
        assert_eq!(builder.push(&run("1. step", 12.0), Rank::H3), Placement::Bullet);
        assert_eq!(builder.finish().h1[0].bullets, vec!["1. step".to_string()]);
    }

    #[test]
    fn test_non_body_non_bullet_is_dropped() {
        let mut builder = OutlineBuilder::new();
        builder.push(&run("Sec", 16.0), Rank::H1);
        assert_eq!(builder.push(&run("Lonely", 12.0), Rank::H3), Placement::Dropped);
        let outline = builder.finish();
        assert_eq!(outline.h1[0].body, "");
    }

    #[test]
    fn test_bullets_prefer_deepest_context() {
        let mut builder = OutlineBuilder::new();
        builder.push(&run("A", 18.0), Rank::H1);
        builder.push(&run("- one", 10.0), Rank::Body);
        builder.push(&run("A.1", 14.0), Rank::H2);
        builder.push(&run("- two", 10.0), Rank::Body);
        builder.push(&run("A.1.a", 12.0), Rank::H3);
        builder.push(&run("• three", 10.0), Rank::Body);

        let outline = builder.finish();
        let h1 = &outline.h1[0];
        assert_eq!(h1.bullets, vec!["- one".to_string()]);
        assert_eq!(h1.h2[0].bullets, vec!["- two".to_string()]);
        assert_eq!(h1.h2[0].h3[0].bullets, vec!["• three".to_string()]);
    }

    #[test]
    fn test_attach_policy_synthesizes_contexts() {
        let options = OutlineOptions::new().attach_orphans();
        let mut builder = OutlineBuilder::with_options(options);
        assert_eq!(builder.push(&run("preface", 10.0), Rank::Body), Placement::Body);
        assert_eq!(builder.push(&run("- note", 10.0), Rank::Body), Placement::Bullet);
        assert_eq!(builder.push(&run("Sub", 12.0), Rank::H3), Placement::Heading(Rank::H3));

        let outline = builder.finish();
        assert_eq!(outline.h1.len(), 1);
        let h1 = &outline.h1[0];
        assert_eq!(h1.heading, "");
        assert_eq!(h1.body, "preface ");
        assert_eq!(h1.bullets, vec!["- note".to_string()]);
        assert_eq!(h1.h2[0].heading, "");
        assert_eq!(h1.h2[0].h3[0].heading, "Sub");
    }

    #[test]
    fn test_attach_policy_h2_without_h1() {
        let options = OutlineOptions::new().attach_orphans();
        let mut builder = OutlineBuilder::with_options(options);
        builder.push(&run("Sub", 14.0), Rank::H2);
        builder.push(&run("text", 10.0), Rank::Body);

        let outline = builder.finish();
        assert_eq!(outline.h1.len(), 1);
        assert_eq!(outline.h1[0].h2[0].heading, "Sub");
        assert_eq!(outline.h1[0].h2[0].body, "text ");
    }

    #[test]
    fn test_single_size_document() {
        let runs = vec![run("Only", 11.0), run("all", 11.0), run("- same", 11.0)];
        let outline = build_outline(&runs, &classify_sizes(&runs));
        assert_eq!(outline.title, "Only");
        assert!(outline.h1.is_empty());
    }
}
