//! Character-level text diff.
//!
//! [`diff_chars`] runs Myers' algorithm from `similar` over the characters of both texts. Within a
//! changed hunk deletions come before insertions. Adjacent operations of the same kind are merged
//! into one span.

use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag};

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Equal,
    Insert,
    Delete,
}

/// One contiguous span of the edit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOp {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffOp {
    fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Edit sequence turning an old text into a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDiff {
    ops: Vec<DiffOp>,
}

impl TextDiff {
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    /// True when at least one span is an insertion or a deletion.
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(|op| op.kind != DiffKind::Equal)
    }

    /// Reassembles the old text (equal + deleted spans).
    pub fn old_text(&self) -> String {
        self.ops
            .iter()
            .filter(|op| op.kind != DiffKind::Insert)
            .map(|op| op.text.as_str())
            .collect()
    }

    /// Reassembles the new text (equal + inserted spans).
    pub fn new_text(&self) -> String {
        self.ops
            .iter()
            .filter(|op| op.kind != DiffKind::Delete)
            .map(|op| op.text.as_str())
            .collect()
    }

    /// Unchanged spans plain, inserted and deleted spans marked per `style`.
    pub fn render(&self, style: DiffStyle) -> String {
        let mut out = String::new();
        for op in &self.ops {
            match op.kind {
                DiffKind::Equal => out.push_str(&op.text),
                DiffKind::Insert => out.push_str(&style.inserted(&op.text)),
                DiffKind::Delete => out.push_str(&style.deleted(&op.text)),
            }
        }
        out
    }

    fn push_str(&mut self, kind: DiffKind, s: &str) {
        if s.is_empty() {
            return;
        }
        match self.ops.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(s),
            _ => self.ops.push(DiffOp::new(kind, s)),
        }
    }
}

/// How inserted and deleted spans are marked in a rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStyle {
    /// `[-deleted-]` and `{+inserted+}`; safe for log files.
    #[default]
    Markers,
    /// Red deletions and green insertions using ANSI escape codes.
    Ansi,
}

impl DiffStyle {
    pub fn inserted(&self, text: &str) -> String {
        match self {
            DiffStyle::Markers => format!("{{+{}+}}", text),
            DiffStyle::Ansi => format!("{}{}{}", ANSI_GREEN, text, ANSI_RESET),
        }
    }

    pub fn deleted(&self, text: &str) -> String {
        match self {
            DiffStyle::Markers => format!("[-{}-]", text),
            DiffStyle::Ansi => format!("{}{}{}", ANSI_RED, text, ANSI_RESET),
        }
    }
}

/// Computes a minimal character-level edit sequence from `old` to `new`.
pub fn diff_chars(old: &str, new: &str) -> TextDiff {
    let changes = similar::TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(old, new);

    let mut diff = TextDiff::default();
    for change in changes.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => DiffKind::Equal,
            ChangeTag::Delete => DiffKind::Delete,
            ChangeTag::Insert => DiffKind::Insert,
        };
        diff.push_str(kind, change.value());
    }
    diff
}
