//! Headless host: runs an action script against a session and exports the
//! resulting canvas.

use anyhow::{Context, Result, bail};
use rasterpad_core::{Action, ActionOutcome, EngineConfig, EngineError, RasterSurface, Session};
use rasterpad_render::{ExportFormat, ExportJob, PixmapSurface};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A recorded input session: optional engine config plus the actions to apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: EngineConfig,
    pub actions: Vec<Action>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(json).context("malformed action script")?;
        script.config.validate().context("invalid engine config in script")?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to load script {}", path.display()))
    }
}

/// Summary of a script run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: usize,
    pub exports: usize,
    pub committed_items: usize,
    pub undo_depth: usize,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} actions applied, {} rejected, {} exports, {} committed items, undo depth {}",
            self.applied, self.rejected, self.exports, self.committed_items, self.undo_depth
        )
    }
}

/// Apply `actions` in order. Actions rejected as invalid input are logged
/// and skipped. Returns the report and the last exported snapshot.
pub fn replay<R: RasterSurface>(
    session: &mut Session<R>,
    actions: Vec<Action>,
) -> Result<(ReplayReport, Option<R::Snapshot>)> {
    let mut report = ReplayReport::default();
    let mut exported = None;

    for (index, action) in actions.into_iter().enumerate() {
        let name = action.name();
        match session.apply(action) {
            Ok(ActionOutcome::Applied) => report.applied += 1,
            Ok(ActionOutcome::Export(snapshot)) => {
                report.applied += 1;
                report.exports += 1;
                exported = Some(snapshot);
            }
            Err(EngineError::InvalidInput(reason)) => {
                log::warn!("Skipping action #{index} ({name}): {reason}");
                report.rejected += 1;
            }
            Err(err) => return Err(err).with_context(|| format!("action #{index} ({name}) failed")),
        }
    }

    report.committed_items = session.drawing().len();
    report.undo_depth = session.undo_depth();
    Ok((report, exported))
}

/// Command line configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub script: PathBuf,
    pub output: PathBuf,
}

impl AppConfig {
    pub const USAGE: &'static str = "usage: rasterpad <script.json> <output.(png|jpg|jpeg)>";

    /// Parse arguments (without the program name).
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let (Some(script), Some(output), None) = (args.next(), args.next(), args.next()) else {
            bail!(Self::USAGE);
        };
        Ok(Self {
            script: script.into(),
            output: output.into(),
        })
    }
}

/// The application.
pub struct App;

impl App {
    /// Run the script, encode the last export (or the final canvas) and
    /// write it to the output path.
    pub fn run(config: &AppConfig) -> Result<ReplayReport> {
        let format = ExportFormat::from_path(&config.output)?;
        let script = Script::load(&config.script)?;
        log::info!(
            "Replaying {} actions on a {}x{} canvas",
            script.actions.len(),
            script.config.width,
            script.config.height
        );

        let surface = PixmapSurface::new(script.config.width, script.config.height)?;
        let mut session = Session::new(script.config, surface)?;
        let (report, exported) = replay(&mut session, script.actions)?;

        let snapshot = match exported {
            Some(snapshot) => snapshot,
            None => session.export(),
        };
        let bytes = ExportJob::spawn(snapshot, format).wait()?;
        std::fs::write(&config.output, &bytes)
            .with_context(|| format!("failed to write {}", config.output.display()))?;
        log::info!("Wrote {} ({} bytes)", config.output.display(), bytes.len());

        Ok(report)
    }
}
