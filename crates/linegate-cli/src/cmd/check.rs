use crate::output::print_json;
use crate::root::resolve_root;
use anyhow::Context;
use linegate_core::config::Config;
use linegate_core::diagnostic::render_rejection;
use linegate_core::gate::{self, Decision};
use linegate_core::request::{EditRequest, HookInput};
use linegate_core::threshold::ThresholdTable;
use linegate_core::GateError;
use std::io::Read;
use std::path::Path;

/// Let the tool call proceed.
pub const EXIT_ALLOW: i32 = 0;
/// Block the tool call; the harness shows stderr to the model.
pub const EXIT_BLOCK: i32 = 2;

enum Evaluation {
    /// The gate does not apply to this input.
    Skipped(&'static str),
    Decided {
        request: EditRequest,
        decision: Decision,
        table: ThresholdTable,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Read one hook payload from stdin and return the process exit code.
///
/// Only a decided rejection yields [`EXIT_BLOCK`]. Every error on this path
/// is logged and treated as "allow".
pub fn run(explicit_root: Option<&Path>, json: bool) -> i32 {
    let mut raw = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut raw) {
        tracing::warn!(error = %e, "could not read hook input; allowing");
        return EXIT_ALLOW;
    }

    match evaluate(&raw, explicit_root) {
        Ok(Evaluation::Skipped(reason)) => {
            tracing::debug!(reason, "gate not applicable");
            if json {
                emit_json(&serde_json::json!({ "allow": true, "skipped": reason }));
            }
            EXIT_ALLOW
        }
        Ok(Evaluation::Decided {
            request,
            decision,
            table,
        }) => {
            tracing::debug!(
                path = %request.target_path.display(),
                verdict = ?decision.verdict,
                proposed = decision.proposed_line_count,
                current = decision.current_line_count,
                threshold = ?decision.threshold,
                "gate decision"
            );
            if json {
                emit_json(&decision);
            }
            if decision.allow {
                EXIT_ALLOW
            } else {
                eprint!(
                    "{}",
                    render_rejection(&request.target_path, &decision, &table)
                );
                EXIT_BLOCK
            }
        }
        Err(e) => {
            tracing::warn!("edit-size gate failed open: {e:#}");
            if json {
                emit_json(&serde_json::json!({ "allow": true, "error": format!("{e:#}") }));
            }
            EXIT_ALLOW
        }
    }
}

fn emit_json<T: serde::Serialize>(value: &T) {
    if let Err(e) = print_json(value) {
        tracing::warn!("failed to write decision: {e:#}");
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

fn evaluate(raw: &str, explicit_root: Option<&Path>) -> anyhow::Result<Evaluation> {
    // Fail open before interpreting anything else.
    let Ok(input) = HookInput::parse(raw) else {
        return Ok(Evaluation::Skipped("unparseable input"));
    };

    let start = input.cwd.clone();
    let request = match input.into_request() {
        Ok(r) => r,
        Err(GateError::MissingTargetPath) => {
            return Ok(Evaluation::Skipped("no target path"));
        }
        Err(e) => return Err(e.into()),
    };

    let root = resolve_root(explicit_root, start.as_deref());
    let (config, source) = Config::load_effective(&root).context("failed to load config")?;
    tracing::debug!(root = %root.display(), ?source, "loaded config");
    if !config.enabled {
        return Ok(Evaluation::Skipped("gate disabled"));
    }

    let table = config.threshold_table();
    if table.lookup(&request.target_path).is_none() {
        return Ok(Evaluation::Skipped("no threshold for extension"));
    }
    let decision = gate::check(&request, &table).with_context(|| {
        format!("failed to read {}", request.target_path.display())
    })?;

    Ok(Evaluation::Decided {
        request,
        decision,
        table,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
