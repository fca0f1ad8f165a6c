//! The build pipeline.
//!
//! A [`Builder`] performs exactly one pass over a workspace:
//!
//! 1. **Init**: load the global config, create its output directory, run the
//!    pre-build hooks.
//! 2. **Walking**: depth-first over `src/`, directories before their contents,
//!    siblings in file-name order. Directories register their `.slv/silvera.conf`
//!    override and are mirrored; `.md` documents are rendered, templated and
//!    written as `.html` between the pre- and post-document hooks; other files
//!    are copied verbatim. Dotfiles are skipped.
//! 3. **Done**: run the post-build hooks.
//!
//! Failure policy: config and hook errors abort the build. Entries that cannot
//! be enumerated are skipped with a warning, and a document that fails to render
//! or write is recorded in the [`BuildReport`] while the walk carries on.

mod entry;
mod index;


use crate::config::Config;
use crate::context::{CONFIG_FILE_NAME, HIDDEN_DIR, WorkspaceContext};
use crate::error::{Result, SilveraError};
use crate::fs::{atomic_write, copy_file, ensure_dir};
use crate::hooks::{AddonHook, HookPhase};
use crate::render::{MarkupEngine, PageRecord, TemplateEngine, extract_title};
use std::cell::RefCell;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

pub use entry::{BuildEntry, EntryKind, is_hidden};
pub use index::ConfigIndex;

/// What a build did.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub documents: usize,
    pub copied: usize,
    pub directories: usize,
    pub local_configs: usize,
    pub skipped: usize,
    /// Per-entry failures that did not stop the build.
    pub failures: Vec<SilveraError>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} document(s) built, {} file(s) copied, {} director(ies) mirrored",
            self.documents, self.copied, self.directories
        )?;
        if self.local_configs > 0 {
            write!(f, ", {} local config(s)", self.local_configs)?;
        }
        if self.skipped > 0 {
            write!(f, ", {} entr(ies) skipped", self.skipped)?;
        }
        if !self.failures.is_empty() {
            write!(f, ", {} failure(s)", self.failures.len())?;
        }
        Ok(())
    }
}

/// One build of one workspace, wired to its engines and hook runner.
pub struct Builder<'a> {
    ctx: &'a WorkspaceContext,
    hooks: &'a dyn AddonHook,
    markup: &'a dyn MarkupEngine,
    templates: &'a dyn TemplateEngine,
}

impl<'a> Builder<'a> {
    pub fn new(
        ctx: &'a WorkspaceContext,
        hooks: &'a dyn AddonHook,
        markup: &'a dyn MarkupEngine,
        templates: &'a dyn TemplateEngine,
    ) -> Self {
        Self {
            ctx,
            hooks,
            markup,
            templates,
        }
    }

    /// Run the whole pipeline. Consumes the builder: one builder, one pass.
    pub fn run(self) -> Result<BuildReport> {
        let global = Config::load_with_parent(self.ctx.config_path(), &Config::default())?;

        let outdir = global.output_dir(&self.ctx.root);
        ensure_dir(&outdir).map_err(|e| {
            SilveraError::FileSystem(format!(
                "failed to create output directory '{}': {}",
                outdir.display(),
                e
            ))
        })?;

        self.run_hooks(&global, HookPhase::PreBuild, &[])?;

        let mut index = ConfigIndex::new(self.ctx.source_dir.clone(), global);
        let mut report = BuildReport::default();
        self.walk(&mut index, &outdir, &mut report)?;

        self.run_hooks(index.global(), HookPhase::PostBuild, &[])?;

        Ok(report)
    }

    fn walk(&self, index: &mut ConfigIndex, outdir: &Path, report: &mut BuildReport) -> Result<()> {
        // Output trees nested in the source tree must not feed themselves. Local
        // outdirs join the list as their overrides are registered.
        let nested_outputs = RefCell::new(Vec::new());
        self.track_output(&nested_outputs, outdir);

        let walker = WalkDir::new(&self.ctx.source_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !(is_hidden(e.file_name())
                        || nested_outputs
                            .borrow()
                            .iter()
                            .any(|out: &PathBuf| e.path().starts_with(out)))
            });

        for next in walker {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) => {
                    let skipped = SilveraError::Enumeration {
                        path: err
                            .path()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| self.ctx.source_dir.clone()),
                        message: err.to_string(),
                    };
                    warn!("skipping: {}", skipped);
                    report.skipped += 1;
                    continue;
                }
            };

            let path = entry.path();
            let is_dir = entry.file_type().is_dir();

            if is_dir && let Some(local) = self.register_local_config(path, index, report)? {
                self.track_output(&nested_outputs, &local.output_dir(&self.ctx.root));
            }

            let build_entry = BuildEntry::resolve(path, is_dir, index, &self.ctx.root);
            match build_entry.kind {
                EntryKind::Directory => self.mirror_directory(&build_entry, report),
                EntryKind::Document => self.build_document(&build_entry, report)?,
                EntryKind::Opaque => self.copy_opaque(&build_entry, report),
            }
        }

        Ok(())
    }

    fn track_output(&self, nested_outputs: &RefCell<Vec<PathBuf>>, outdir: &Path) {
        let source_dir = &self.ctx.source_dir;
        if outdir != source_dir && outdir.starts_with(source_dir) {
            let mut outputs = nested_outputs.borrow_mut();
            if !outputs.iter().any(|known| known == outdir) {
                outputs.push(outdir.to_path_buf());
            }
        }
    }

    fn run_hooks(&self, config: &Config, phase: HookPhase, args: &[&OsStr]) -> Result<()> {
        for output in self.hooks.run_phase(config, phase, args)? {
            debug!(
                addon = %output.addon,
                script = %output.script.display(),
                elapsed_ms = output.duration.as_millis() as u64,
                output = %output.stdout.trim_end(),
                "{} hook finished",
                phase
            );
        }
        Ok(())
    }

    /// Register `dir/.slv/silvera.conf`, overlaid on the global config, if present.
    ///
    /// Returns the config that was registered.
    fn register_local_config<'i>(
        &self,
        dir: &Path,
        index: &'i mut ConfigIndex,
        report: &mut BuildReport,
    ) -> Result<Option<&'i Config>> {
        let conf_path = dir.join(HIDDEN_DIR).join(CONFIG_FILE_NAME);
        if !conf_path.is_file() {
            return Ok(None);
        }

        if dir == index.source_root() {
            warn!(
                path = %conf_path.display(),
                "ignoring override at the source root; edit the workspace {} instead",
                CONFIG_FILE_NAME
            );
            return Ok(None);
        }

        let config = Config::load_with_parent(&conf_path, index.global())?;
        info!(dir = %dir.display(), "using local config");
        index.register(dir.to_path_buf(), config);
        report.local_configs = index.len();
        Ok(Some(index.resolve_dir(dir)))
    }

    fn mirror_directory(&self, entry: &BuildEntry<'_>, report: &mut BuildReport) {
        match ensure_dir(&entry.output) {
            Ok(()) => report.directories += 1,
            Err(e) => record_failure(
                report,
                SilveraError::document(
                    &entry.source,
                    format!("failed to create '{}': {}", entry.output.display(), e),
                ),
            ),
        }
    }

    fn copy_opaque(&self, entry: &BuildEntry<'_>, report: &mut BuildReport) {
        match copy_file(&entry.source, &entry.output) {
            Ok(()) => {
                info!("clone: {} -> {}", entry.display_path(), entry.output.display());
                report.copied += 1;
            }
            Err(e) => record_failure(
                report,
                SilveraError::document(
                    &entry.source,
                    format!("failed to copy to '{}': {}", entry.output.display(), e),
                ),
            ),
        }
    }

    /// Hooks around a document are fatal; the document itself is not.
    fn build_document(&self, entry: &BuildEntry<'_>, report: &mut BuildReport) -> Result<()> {
        self.run_hooks(entry.config, HookPhase::PreDocument, &[entry.source.as_os_str()])?;

        if let Err(err) = self.render_document(entry) {
            record_failure(report, err);
            return Ok(());
        }

        info!("built: {} -> {}", entry.display_path(), entry.output.display());
        report.documents += 1;

        self.run_hooks(entry.config, HookPhase::PostDocument, &[entry.output.as_os_str()])?;
        Ok(())
    }

    fn render_document(&self, entry: &BuildEntry<'_>) -> Result<()> {
        let raw = std::fs::read(&entry.source)
            .map_err(|e| SilveraError::document(&entry.source, format!("failed to read: {}", e)))?;
        // Non-UTF-8 sources still render; invalid sequences become U+FFFD.
        let source = String::from_utf8_lossy(&raw);

        let body = self
            .markup
            .render(&source, &entry.config.capabilities())
            .map_err(|e| SilveraError::document(&entry.source, e.to_string()))?;

        let page = PageRecord {
            title: extract_title(&body),
            body,
            path: entry.display_path(),
        };

        let template = entry.config.template_path(&self.ctx.root);
        let bytes = self
            .templates
            .render(&template, &page)
            .map_err(|e| SilveraError::document(&entry.source, e.to_string()))?;

        atomic_write(&entry.output, &bytes).map_err(|e| {
            SilveraError::document(
                &entry.source,
                format!("failed to write '{}': {}", entry.output.display(), e),
            )
        })
    }
}

fn record_failure(report: &mut BuildReport, err: SilveraError) {
    error!("{}", err);
    report.failures.push(err);
}
