//! Editing scripts: a JSON array of editor events replayed into a session.
//!
//! Besides plain `EditorEvent`s a script may contain `{"image_file": "path"}`
//! steps. The CLI plays the file reader for those: it reads the file
//! (relative to the script's directory), encodes it as a data URI and
//! delivers `ImageReady`.

use anyhow::{Context, Result};
use cx_editor::events::{EditorEvent, EventOutcome};
use cx_editor::image::{data_uri, mime_for_path};
use cx_editor::session::Session;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    ImageFile { image_file: PathBuf },
    Event(EditorEvent),
}

/// Counts of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub ignored: usize,
}

/// Parse a script from JSON text.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    serde_json::from_str(text).context("Failed to parse script JSON")
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("In script {}", path.display()))
}

/// Turn a script step into the event the session should see.
fn resolve_step(step: ScriptStep, base_dir: &Path) -> Result<EditorEvent> {
    match step {
        ScriptStep::Event(event) => Ok(event),
        ScriptStep::ImageFile { image_file } => {
            let path = base_dir.join(&image_file);
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            Ok(EditorEvent::ImageReady {
                data_uri: data_uri(&bytes, mime_for_path(&path)),
            })
        }
    }
}

/// Replay `steps` into `session`. Export requests inside the script are
/// ignored here; the caller exports once at the end.
pub fn replay(session: &mut Session, steps: Vec<ScriptStep>, base_dir: &Path) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    for (i, step) in steps.into_iter().enumerate() {
        let event = resolve_step(step, base_dir).with_context(|| format!("Step {i}"))?;
        if event == EditorEvent::RequestExport {
            log::debug!("step {i}: export request skipped during replay");
            continue;
        }
        match session.handle(event) {
            EventOutcome::Ignored(reason) => {
                log::warn!("step {i} ignored: {reason:?}");
                summary.ignored += 1;
            }
            outcome => {
                log::trace!("step {i}: {outcome:?}");
                summary.applied += 1;
            }
        }
    }
    Ok(summary)
}
