//! Size classification: mapping rounded font sizes to heading ranks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{size_key, TextRun};

/// The heading level a run's size is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Title,
    H1,
    H2,
    H3,
    /// Any size outside the four largest
    Body,
}

impl Rank {
    /// Heading ranks in the order they are assigned, largest size first.
    pub const HEADINGS: [Rank; 4] = [Rank::Title, Rank::H1, Rank::H2, Rank::H3];

    /// Lowercase label, as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Title => "title",
            Rank::H1 => "h1",
            Rank::H2 => "h2",
            Rank::H3 => "h3",
            Rank::Body => "body",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Document-wide mapping from rounded size to heading rank.
///
/// Only the four largest distinct sizes are present; every other size
/// classifies as [`Rank::Body`] at lookup time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeRankMap {
    /// Keyed by size in tenths of a point
    ranks: BTreeMap<i32, Rank>,
}

impl SizeRankMap {
    /// Rank the distinct sizes present in `runs`.
    pub fn from_runs(runs: &[TextRun]) -> Self {
        Self::from_keys(runs.iter().map(TextRun::size_key))
    }

    /// Rank a set of sizes given in points.
    pub fn from_sizes<I: IntoIterator<Item = f32>>(sizes: I) -> Self {
        Self::from_keys(sizes.into_iter().map(size_key))
    }

    fn from_keys<I: IntoIterator<Item = i32>>(keys: I) -> Self {
        let mut distinct: Vec<i32> = keys.into_iter().collect();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();

        let ranks = distinct
            .into_iter()
            .zip(Rank::HEADINGS)
            .collect::<BTreeMap<_, _>>();
        Self { ranks }
    }

    /// Look up the rank for a size in points.
    pub fn get(&self, size: f32) -> Rank {
        self.ranks
            .get(&size_key(size))
            .copied()
            .unwrap_or(Rank::Body)
    }

    /// Look up the rank for a run.
    pub fn rank_of(&self, run: &TextRun) -> Rank {
        self.ranks
            .get(&run.size_key())
            .copied()
            .unwrap_or(Rank::Body)
    }

    /// The size assigned to a heading rank, if any.
    pub fn size_for(&self, rank: Rank) -> Option<f32> {
        self.ranks
            .iter()
            .find(|(_, r)| **r == rank)
            .map(|(key, _)| *key as f32 / 10.0)
    }

    /// Ranked sizes, largest first.
    pub fn iter(&self) -> impl Iterator<Item = (f32, Rank)> + '_ {
        self.ranks
            .iter()
            .rev()
            .map(|(key, rank)| (*key as f32 / 10.0, *rank))
    }

    /// Number of ranked sizes (at most four).
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Derive the size-to-rank mapping for a whole document.
pub fn classify_sizes(runs: &[TextRun]) -> SizeRankMap {
    SizeRankMap::from_runs(runs)
}

/// How often each rounded size occurs in a document.
///
/// Diagnostic only: ranking is by size value and ignores these counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeStatistics {
    histogram: BTreeMap<i32, usize>,
}

impl SizeStatistics {
    /// Count sizes over a run sequence.
    pub fn from_runs(runs: &[TextRun]) -> Self {
        let mut stats = Self::default();
        for run in runs {
            stats.add(run);
        }
        stats
    }

    /// Record one run.
    pub fn add(&mut self, run: &TextRun) {
        *self.histogram.entry(run.size_key()).or_insert(0) += 1;
    }

    /// Occurrences of a size in points.
    pub fn count(&self, size: f32) -> usize {
        self.histogram.get(&size_key(size)).copied().unwrap_or(0)
    }

    /// The most frequent size (the larger one on ties).
    pub fn most_common(&self) -> Option<f32> {
        self.histogram
            .iter()
            .max_by_key(|(key, count)| (**count, **key))
            .map(|(key, _)| *key as f32 / 10.0)
    }

    /// `(size, count)` pairs, largest size first.
    pub fn iter(&self) -> impl Iterator<Item = (f32, usize)> + '_ {
        self.histogram
            .iter()
            .rev()
            .map(|(key, count)| (*key as f32 / 10.0, *count))
    }

    /// Number of distinct sizes.
    pub fn distinct_sizes(&self) -> usize {
        self.histogram.len()
    }
}
