use crate::gate::Decision;
use crate::threshold::ThresholdTable;
use std::fmt::Write as _;
use std::path::Path;

/// Human-readable explanation for a blocked edit, written to stderr.
///
/// Includes the path, proposed and current counts, the violated threshold,
/// the full effective table and the two ways forward.
pub fn render_rejection(path: &Path, decision: &Decision, table: &ThresholdTable) -> String {
    let mut out = String::new();
    let ext = decision.extension.as_deref().unwrap_or("?");
    let limit = decision
        .threshold
        .map(|l| l.to_string())
        .unwrap_or_else(|| "none".to_string());

    let _ = writeln!(out, "BLOCKED: file would exceed its line limit");
    let _ = writeln!(out);
    let _ = writeln!(out, "  File:      {}", path.display());
    let _ = writeln!(
        out,
        "  Proposed:  {} lines (currently {})",
        decision.proposed_line_count, decision.current_line_count
    );
    let _ = writeln!(out, "  Threshold: {limit} lines for .{ext} files");
    let _ = writeln!(out);
    let _ = writeln!(out, "Line limits by extension:");
    for (limit, exts) in group_by_limit(table) {
        let _ = writeln!(out, "  {:>6}  {}", limit, exts.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "To proceed, either:");
    let _ = writeln!(
        out,
        "  1. Record why {} must exceed {limit} lines in the project's tracking document, \
         then raise the .{ext} limit in .claude/linegate.yaml.",
        path.display()
    );
    let _ = writeln!(
        out,
        "  2. Refactor: split the file into smaller modules so each stays within {limit} lines."
    );
    out
}

/// Extensions grouped under their shared limit, ascending by limit.
fn group_by_limit(table: &ThresholdTable) -> Vec<(usize, Vec<String>)> {
    let mut groups: Vec<(usize, Vec<String>)> = Vec::new();
    let mut entries = table.entries();
    entries.sort_by(|a, b| a.limit.cmp(&b.limit).then(a.extension.cmp(&b.extension)));
    for entry in entries {
        let ext = format!(".{}", entry.extension);
        match groups.last_mut() {
            Some((limit, exts)) if *limit == entry.limit => exts.push(ext),
            _ => groups.push((entry.limit, vec![ext])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::evaluate;
    use crate::request::EditRequest;

    #[test]
    fn rejection_names_everything_needed() {
        let content = "x\n".repeat(1025);
        let req = EditRequest::full("site/index.html", content);
        let table = ThresholdTable::builtin();
        let d = evaluate(&req, &[], table);
        let msg = render_rejection(&req.target_path, &d, table);

        assert!(msg.contains("site/index.html"));
        assert!(msg.contains("1025"));
        assert!(msg.contains("1024"));
        assert!(msg.contains(".html"));
        assert!(msg.contains("tracking document"));
        assert!(msg.contains("Refactor"));
        // table rows
        assert!(msg.contains(".css, .el, .js, .jsx, .py, .sh, .src, .ts, .tsx"));
        assert!(msg.contains(".htm, .html"));
    }

    #[test]
    fn groups_are_ordered_by_limit() {
        let groups = group_by_limit(ThresholdTable::builtin());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 512);
        assert_eq!(groups[1].0, 1024);
    }
}
