use crate::context::{CONFIG_FILE_NAME, HIDDEN_DIR, WorkspaceContext};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Minimal template used by build tests: easy to assert against.
pub(crate) const TEST_TEMPLATE: &str = "<title>{{ Title }}</title>\n<main data-path=\"{{ Path }}\">\n{{ Body }}</main>\n";

/// An empty workspace layout: `src/`, `addons/`, and a test template, no config.
pub(crate) fn create_test_workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let ctx = WorkspaceContext::resolve_from(temp_dir.path());

    std::fs::create_dir_all(&ctx.source_dir).unwrap();
    std::fs::create_dir_all(&ctx.addon_dir).unwrap();
    std::fs::write(ctx.default_template_path(), TEST_TEMPLATE).unwrap();

    temp_dir
}

/// A workspace with a root `silvera.conf` holding `config_yaml`.
pub(crate) fn create_configured_workspace(config_yaml: &str) -> TempDir {
    let temp_dir = create_test_workspace();
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_yaml).unwrap();
    temp_dir
}

/// Write a file below the source tree, creating parent directories.
pub(crate) fn write_source(ctx: &WorkspaceContext, relative: &str, content: &str) -> PathBuf {
    write_file(&ctx.source_dir.join(relative), content)
}

/// Write `.slv/silvera.conf` for a source subdirectory.
pub(crate) fn write_local_config(ctx: &WorkspaceContext, relative_dir: &str, yaml: &str) -> PathBuf {
    let path = ctx
        .source_dir
        .join(relative_dir)
        .join(HIDDEN_DIR)
        .join(CONFIG_FILE_NAME);
    write_file(&path, yaml)
}

/// Write a script into an addon directory.
pub(crate) fn write_addon_script(
    ctx: &WorkspaceContext,
    addon: &str,
    name: &str,
    body: &str,
) -> PathBuf {
    write_file(&ctx.addon_path(addon).join(name), body)
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
    path.to_path_buf()
}

/// Every file below `root`, as sorted `/`-separated relative paths.
pub(crate) fn list_tree(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap();
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            if e.file_type().is_dir() {
                format!("{}/", rel)
            } else {
                rel
            }
        })
        .collect();
    files.sort();
    files
}
