//! Integration tests for classification and structuring over run sequences.

use pdfoutline::outline::{build_outline, classify_sizes, is_bullet};
use pdfoutline::render::{from_json, to_json, to_markdown};
use pdfoutline::{
    outline_from_runs, JsonFormat, OrphanPolicy, Outline, OutlineOptions, Outliner, Rank,
    SizeRankMap, TextRun,
};

fn run(text: &str, size: f32) -> TextRun {
    TextRun::new(text, "Helvetica", size, 1)
}

fn runs_with_sizes(sizes: &[f32]) -> Vec<TextRun> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| run(&format!("run {}", i), size))
        .collect()
}

/// A small technical document with every kind of content.
fn manual() -> Vec<TextRun> {
    vec![
        run("User Manual", 26.0),
        run("Getting Started", 20.0),
        run("Welcome to the product.", 11.0),
        run("Installation", 15.0),
        run("Download the installer.", 11.0),
        run("1. Run setup", 11.0),
        run("2. Restart", 11.0),
        run("Linux", 13.0),
        run("Use the package manager.", 11.0),
        run("• apt install tool", 11.0),
        run("Configuration", 15.0),
        run("Edit the config file.", 11.0),
        run("Troubleshooting", 20.0),
        run("Common errors are listed below.", 11.0),
        run("- timeout", 11.0),
        run("page 3", 8.0),
    ]
}

#[test]
fn test_ranks_cover_top_four_sizes() {
    let cases: &[&[f32]] = &[
        &[],
        &[12.0],
        &[12.0, 18.0],
        &[10.0, 12.0, 14.0],
        &[9.0, 10.0, 11.0, 12.0, 14.0, 18.0, 24.0],
        &[12.0, 12.0, 24.0, 24.0, 8.0, 8.0, 16.0],
        &[11.96, 12.04, 12.0, 30.0],
    ];

    for sizes in cases {
        let runs = runs_with_sizes(sizes);
        let ranks = classify_sizes(&runs);

        let mut distinct: Vec<i32> = runs.iter().map(|r| r.size_key()).collect();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();

        let expected = distinct.len().min(4);
        assert_eq!(ranks.len(), expected, "sizes {:?}", sizes);

        for (i, rank) in Rank::HEADINGS.iter().enumerate() {
            let expected = distinct.get(i).map(|&key| key as f32 / 10.0);
            assert_eq!(ranks.size_for(*rank), expected);
        }

        for key in distinct.iter().skip(4) {
            assert_eq!(ranks.get(*key as f32 / 10.0), Rank::Body);
        }
    }
}

#[test]
fn test_single_size_document() {
    let runs = vec![run("First", 12.0), run("Second", 12.0), run("- item", 12.0)];
    let ranks = classify_sizes(&runs);
    assert_eq!(ranks.len(), 1);
    assert_eq!(ranks.get(12.0), Rank::Title);

    let outline = build_outline(&runs, &ranks);
    assert_eq!(outline.title, "First");
    assert!(outline.h1.is_empty());
}

#[test]
fn test_bullet_shapes() {
    for text in ["- item", "• item", "3. item", "12) item", "* note", "a) choice"] {
        assert!(is_bullet(text), "{:?} should be a bullet", text);
    }
    for text in ["item", "-item", "", "3.item", "2024 was a good year"] {
        assert!(!is_bullet(text), "{:?} should not be a bullet", text);
    }
}

#[test]
fn test_body_lands_in_latest_section() {
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
fn test_bullet_before_any_section_is_dropped() {
    let runs = vec![
        run("Title", 20.0),
        run("- early", 10.0),
        run("Intro", 16.0),
        run("text", 10.0),
    ];
    let ranks = SizeRankMap::from_sizes([20.0, 16.0]);
    let outline = build_outline(&runs, &ranks);

    let json = to_json(&outline, JsonFormat::Compact).unwrap();
    assert!(!json.contains("early"));
    assert_eq!(outline.bullet_count(), 0);
    assert_eq!(outline.h1[0].body, "text ");
}

#[test]
fn test_classification_is_idempotent() {
    let runs = manual();
    let first = classify_sizes(&runs);
    let second = classify_sizes(&runs);
    assert_eq!(first, second);
    assert_eq!(outline_from_runs(&runs), outline_from_runs(&runs));
}

#[test]
fn test_manual_structure() {
    let outline = outline_from_runs(&manual());

    assert_eq!(outline.title, "User Manual");
    assert_eq!(outline.section_counts(), [2, 2, 1]);

    let start = &outline.h1[0];
    assert_eq!(start.heading, "Getting Started");
    assert_eq!(start.body, "Welcome to the product. ");

    let install = &start.h2[0];
    assert_eq!(install.heading, "Installation");
    assert_eq!(install.body, "Download the installer. ");
    assert_eq!(install.bullets, vec!["1. Run setup", "2. Restart"]);

    let linux = &install.h3[0];
    assert_eq!(linux.heading, "Linux");
    assert_eq!(linux.body, "Use the package manager. ");
    assert_eq!(linux.bullets, vec!["• apt install tool"]);

    assert_eq!(start.h2[1].heading, "Configuration");
    assert!(start.h2[1].h3.is_empty());

    let trouble = &outline.h1[1];
    assert_eq!(trouble.heading, "Troubleshooting");
    assert!(trouble.h2.is_empty());
    assert_eq!(trouble.bullets, vec!["- timeout"]);
    // 8pt is below the four ranked sizes, so it is body text.
    assert_eq!(trouble.body, "Common errors are listed below. page 3 ");
}

#[test]
fn test_json_round_trip() {
    let outline = outline_from_runs(&manual());
    for format in [JsonFormat::Pretty, JsonFormat::Compact] {
        let json = to_json(&outline, format).unwrap();
        assert_eq!(from_json(&json).unwrap(), outline);
    }
}

#[test]
fn test_json_shape() {
    let outline = outline_from_runs(&manual());
    let json = to_json(&outline, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "User Manual");
    let h2 = &value["h1"][0]["h2"][0];
    assert_eq!(h2["heading"], "Installation");
    assert_eq!(h2["bullets"][1], "2. Restart");
    assert_eq!(h2["h3"][0]["heading"], "Linux");
    assert!(h2["h3"][0].get("h4").is_none());
    assert!(json.contains("• apt install tool"));
}

#[test]
fn test_markdown_rendering() {
    let markdown = to_markdown(&outline_from_runs(&manual()));
    assert!(markdown.starts_with("# User Manual\n\n## Getting Started\n"));
    assert!(markdown.contains("### Installation\n"));
    assert!(markdown.contains("#### Linux\n"));
    assert!(markdown.contains("1. Run setup\n2. Restart\n"));
}

#[test]
fn test_orphans_attached_on_request() {
    let runs = vec![
        run("Doc", 24.0),
        run("Preamble", 10.0),
        run("Sub", 14.0),
        run("Deep", 12.0),
        run("Main", 18.0),
    ];

    let dropped = outline_from_runs(&runs);
    assert_eq!(dropped.h1.len(), 1);
    assert_eq!(dropped.h1[0].heading, "Main");

    let options = OutlineOptions::new().with_orphan_policy(OrphanPolicy::Attach);
    let kept = Outliner::new()
        .with_outline_options(options)
        .outline_runs(&runs);
    assert_eq!(kept.h1.len(), 2);

    let synthetic = &kept.h1[0];
    assert_eq!(synthetic.heading, "");
    assert_eq!(synthetic.body, "Preamble ");
    assert_eq!(synthetic.h2[0].heading, "Sub");
    assert_eq!(synthetic.h2[0].h3[0].heading, "Deep");
    assert_eq!(kept.h1[1].heading, "Main");
}

#[test]
fn test_empty_input() {
    let outline = outline_from_runs(&[]);
    assert_eq!(outline, Outline::new());
    assert!(outline.is_empty());
    assert_eq!(
        to_json(&outline, JsonFormat::Pretty).unwrap(),
        "{\n    \"title\": \"\",\n    \"h1\": []\n}"
    );
}
