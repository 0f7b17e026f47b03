use crate::error::Result;
use crate::lines::{line_count, line_count_bytes};
use crate::request::{EditMode, EditRequest, Replacement};
use crate::threshold::ThresholdTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Which branch of the decision rule produced a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The extension has no threshold; the gate does not apply.
    NoThreshold,
    /// The file is already over its limit and the edit makes it smaller.
    ShrinkingOversized,
    ExceedsThreshold,
    WithinLimit,
}

impl Verdict {
    pub fn allows(self) -> bool {
        !matches!(self, Verdict::ExceedsThreshold)
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allow: bool,
    pub verdict: Verdict,
    pub proposed_line_count: usize,
    pub current_line_count: usize,
    pub threshold: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Apply the decision rule to already-computed counts.
///
/// 1. current over limit and proposed strictly smaller than current: allow.
/// 2. proposed over limit: reject.
/// 3. otherwise: allow.
pub fn decide(current: usize, proposed: usize, threshold: usize) -> Verdict {
    if current > threshold && proposed < current {
        Verdict::ShrinkingOversized
    } else if proposed > threshold {
        Verdict::ExceedsThreshold
    } else {
        Verdict::WithinLimit
    }
}

/// Line count the file would have after `mode` is applied to `current`.
///
/// Partial edits are modelled as `current - lines(old) + lines(new)` per
/// replacement, summed in signed arithmetic and clamped at zero. A
/// `replace_all` replacement counts once per occurrence in `current`.
/// Occurrences are counted in the original content, not in the text left
/// behind by earlier replacements in the same list.
pub fn proposed_line_count(mode: &EditMode, current: &[u8]) -> usize {
    let current_lines = line_count_bytes(current);
    match mode {
        EditMode::Full { content } => line_count(content),
        EditMode::Untouched => current_lines,
        EditMode::Partial { replacements } => {
            let text = String::from_utf8_lossy(current);
            let delta: i64 = replacements
                .iter()
                .map(|r| replacement_delta(r, &text))
                .sum();
            let proposed = current_lines as i64 + delta;
            proposed.max(0) as usize
        }
    }
}

fn replacement_delta(r: &Replacement, current: &str) -> i64 {
    let per_occurrence = line_count(&r.new) as i64 - line_count(&r.old) as i64;
    let occurrences = if r.replace_all && !r.old.is_empty() {
        current.matches(r.old.as_str()).count().max(1)
    } else {
        1
    };
    per_occurrence * occurrences as i64
}

/// Evaluate `request` against `current`, the file's present content.
///
/// Pure: no I/O. An empty slice stands for a file that does not exist yet.
pub fn evaluate(request: &EditRequest, current: &[u8], table: &ThresholdTable) -> Decision {
    let current_line_count = line_count_bytes(current);
    let proposed_line_count = proposed_line_count(&request.mode, current);

    let Some((extension, limit)) = table.lookup(&request.target_path) else {
        return Decision {
            allow: true,
            verdict: Verdict::NoThreshold,
            proposed_line_count,
            current_line_count,
            threshold: None,
            extension: None,
        };
    };

    let verdict = decide(current_line_count, proposed_line_count, limit);
    Decision {
        allow: verdict.allows(),
        verdict,
        proposed_line_count,
        current_line_count,
        threshold: Some(limit),
        extension: Some(extension),
    }
}

/// Read the target's current content, treating a missing file as empty.
pub fn read_current(path: &Path) -> Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Read the target from disk and evaluate `request` against it.
pub fn check(request: &EditRequest, table: &ThresholdTable) -> Result<Decision> {
    let current = read_current(&request.target_path)?;
    Ok(evaluate(request, &current, table))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
