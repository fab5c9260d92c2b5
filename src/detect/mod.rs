//! Weighted multi-signal format detection.
//!
//! One [`Validation::run`] scores a single candidate file against a single
//! [`FormatDefinition`] using three independently weighted probes:
//!
//! ```text
//! combined = tags · 0.75 + content · 0.50 + name · 0.25
//! decision = combined >= 50
//! ```
//!
//! Tag metadata (usually assigned by a container that already classified the
//! entry) is the most trustworthy signal; raw content inspection is a
//! medium-trust structural probe; the filename is the weakest and most easily
//! spoofed. A lone `ShouldBe` tag (52.5) accepts, a lone `Sure` content probe
//! (50.0) just barely accepts, and a lone `Sure` name match (25.0) never does.
//!
//! # Probe failure policy
//! Probes return [`ValidationScore::Invalid`] as the explicit "found nothing"
//! signal and reserve `Err` for input corruption (e.g. a malformed stream).
//! Such errors propagate verbatim out of [`Validation::run`] — no wrapping,
//! no retry, no partial verdict.

use std::collections::HashMap;
use std::io::{self, Cursor};

use serde::{Deserialize, Serialize};

pub mod winpal;

/// Weight of the tag probe — the dominant signal.
pub const TAG_WEIGHT: f64 = 0.75;
/// Weight of the content probe.
pub const CONTENT_WEIGHT: f64 = 0.50;
/// Weight of the name probe. Below the acceptance threshold even at `Sure`:
/// a filename alone must never classify a format.
pub const NAME_WEIGHT: f64 = 0.25;
/// Combined score needed to accept (boundary inclusive).
pub const ACCEPT_THRESHOLD: f64 = 50.0;

/// Ordinal confidence reported by a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScore {
    Invalid,
    CouldBe,
    ShouldBe,
    Sure,
}

impl ValidationScore {
    /// Weight fed into the combination formula. Purely ordinal.
    pub fn weight(self) -> u32 {
        match self {
            ValidationScore::Invalid => 0,
            ValidationScore::CouldBe => 40,
            ValidationScore::ShouldBe => 70,
            ValidationScore::Sure => 100,
        }
    }
}

/// The file under test: externally-known metadata tags, content bytes and the
/// path/filename pair.
pub struct FileCandidate<'a> {
    /// Metadata assigned by whoever extracted the file (container type hints
    /// and the like). Key unique, insertion order irrelevant.
    pub tags: HashMap<String, String>,
    pub path: String,
    pub name: String,
    data: &'a [u8],
}

impl<'a> FileCandidate<'a> {
    pub fn new(path: impl Into<String>, name: impl Into<String>, data: &'a [u8]) -> Self {
        Self {
            tags: HashMap::new(),
            path: path.into(),
            name: name.into(),
            data,
        }
    }

    /// Fresh, independent read cursor over the content bytes. Every probe
    /// gets its own; no shared position is ever advanced, so any number of
    /// validations may evaluate the same candidate.
    pub fn content(&self) -> Cursor<&'a [u8]> {
        Cursor::new(self.data)
    }
}

/// Per-format detection behavior. One implementation per concrete format;
/// the combination and threshold logic lives in [`Validation::run`] and is
/// not overridable.
pub trait FormatDefinition {
    /// Short format name for diagnostics and reports.
    fn name(&self) -> &'static str;

    /// Inspect externally-known metadata tags.
    fn score_by_tags(&self, tags: &HashMap<String, String>) -> io::Result<ValidationScore>;

    /// Inspect raw bytes: magic numbers, structural probes.
    fn score_by_content(&self, stream: &mut Cursor<&[u8]>) -> io::Result<ValidationScore>;

    /// Pattern-match the path and filename (extension, naming convention).
    fn score_by_name(&self, path: &str, filename: &str) -> io::Result<ValidationScore>;

    /// Enumerate other files this format instance requires. Invoked only
    /// after acceptance.
    fn infer_dependencies(&self, candidate: &FileCandidate) -> io::Result<Vec<String>> {
        let _ = candidate;
        Ok(Vec::new())
    }
}

/// Immutable verdict of one candidate against one format definition.
///
/// Produced in full by [`Validation::run`]; there is no pre-decision state
/// and no re-evaluation — a new candidate or format needs a new run.
#[derive(Debug, Clone)]
pub struct Validation {
    format: &'static str,
    decision: bool,
    combined: f64,
    dependencies: Vec<String>,
}

impl Validation {
    /// Run the three probes exactly once and combine their scores.
    ///
    /// Dependencies are inferred only on acceptance; on rejection the list is
    /// always empty regardless of what the format would report.
    pub fn run(
        format: &dyn FormatDefinition,
        candidate: &FileCandidate,
    ) -> io::Result<Self> {
        let tag_score = format.score_by_tags(&candidate.tags)?;
        let content_score = format.score_by_content(&mut candidate.content())?;
        let name_score = format.score_by_name(&candidate.path, &candidate.name)?;

        let combined = f64::from(tag_score.weight()) * TAG_WEIGHT
            + f64::from(content_score.weight()) * CONTENT_WEIGHT
            + f64::from(name_score.weight()) * NAME_WEIGHT;
        let decision = combined >= ACCEPT_THRESHOLD;

        let dependencies = if decision {
            format.infer_dependencies(candidate)?
        } else {
            Vec::new()
        };

        Ok(Self {
            format: format.name(),
            decision,
            combined,
            dependencies,
        })
    }

    pub fn format(&self) -> &'static str {
        self.format
    }

    pub fn decision(&self) -> bool {
        self.decision
    }

    pub fn combined_score(&self) -> f64 {
        self.combined
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

/// Owned, serializable snapshot of a validation run, for pipeline output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub format: String,
    pub decision: bool,
    pub combined: f64,
    pub dependencies: Vec<String>,
}

impl DetectionReport {
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl From<&Validation> for DetectionReport {
    fn from(v: &Validation) -> Self {
        Self {
            format: v.format.to_string(),
            decision: v.decision,
            combined: v.combined,
            dependencies: v.dependencies.clone(),
        }
    }
}
