//! Directory -> local configuration index.
//!
//! The index is filled while the source tree is walked: a directory's override is
//! registered when the directory itself is visited, before any of its children,
//! so every lookup made during the walk already sees it.

use crate::config::Config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Local overrides keyed by the directory they apply to, plus the global config.
#[derive(Debug, Clone)]
pub struct ConfigIndex {
    source_root: PathBuf,
    global: Config,
    locals: HashMap<PathBuf, Config>,
}

impl ConfigIndex {
    pub fn new(source_root: PathBuf, global: Config) -> Self {
        Self {
            source_root,
            global,
            locals: HashMap::new(),
        }
    }

    pub fn global(&self) -> &Config {
        &self.global
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn len(&self) -> usize {
        self.locals.len()
    }

    /// Register the override for `dir`, replacing any earlier one.
    pub fn register(&mut self, dir: PathBuf, config: Config) {
        self.locals.insert(dir, config);
    }

    /// Effective config for a filesystem path; files use their parent directory.
    pub fn resolve(&self, path: &Path) -> &Config {
        if path.is_dir() {
            self.resolve_dir(path)
        } else {
            path.parent()
                .map(|dir| self.resolve_dir(dir))
                .unwrap_or(&self.global)
        }
    }

    /// Effective config for a directory: its nearest registered ancestor-or-self,
    /// or the global config once the climb reaches the source root.
    pub fn resolve_dir(&self, dir: &Path) -> &Config {
        let mut current = Some(dir);

        while let Some(dir) = current {
            if dir == self.source_root || !dir.starts_with(&self.source_root) {
                break;
            }
            if let Some(config) = self.locals.get(dir) {
                return config;
            }
            current = dir.parent();
        }

        &self.global
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_outdir(outdir: &str) -> Config {
        Config {
            outdir: outdir.to_string(),
            ..Config::default()
        }
    }

    fn index() -> ConfigIndex {
        ConfigIndex::new(PathBuf::from("/site/src"), config_with_outdir("global"))
    }

    #[test]
    fn test_no_override_returns_global() {
        let index = index();
        assert_eq!(index.resolve_dir(Path::new("/site/src/a/b")).outdir, "global");
        assert_eq!(index.resolve_dir(Path::new("/site/src")).outdir, "global");
    }

    #[test]
    fn test_override_applies_to_self_and_descendants() {
        let mut index = index();
        index.register(PathBuf::from("/site/src/a"), config_with_outdir("a"));

        assert_eq!(index.resolve_dir(Path::new("/site/src/a")).outdir, "a");
        assert_eq!(index.resolve_dir(Path::new("/site/src/a/b/c")).outdir, "a");
        assert_eq!(index.resolve_dir(Path::new("/site/src/ab")).outdir, "global");
        assert_eq!(index.resolve_dir(Path::new("/site/src/z")).outdir, "global");
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let mut index = index();
        index.register(PathBuf::from("/site/src/a"), config_with_outdir("a"));
        index.register(PathBuf::from("/site/src/a/b"), config_with_outdir("b"));

        assert_eq!(index.resolve_dir(Path::new("/site/src/a/b/c")).outdir, "b");
        assert_eq!(index.resolve_dir(Path::new("/site/src/a/x")).outdir, "a");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_source_root_is_never_a_key() {
        let mut index = index();
        index.register(PathBuf::from("/site/src"), config_with_outdir("root"));

        assert_eq!(index.resolve_dir(Path::new("/site/src/a")).outdir, "global");
    }

    #[test]
    fn test_paths_outside_source_root_get_global() {
        let mut index = index();
        index.register(PathBuf::from("/site/src/a"), config_with_outdir("a"));

        assert_eq!(index.resolve_dir(Path::new("/elsewhere/a")).outdir, "global");
    }

    #[test]
    fn test_resolve_uses_parent_of_files() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        std::fs::create_dir_all(src.join("docs")).unwrap();
        std::fs::write(src.join("docs").join("page.md"), "# Page").unwrap();

        let mut index = ConfigIndex::new(src.clone(), config_with_outdir("global"));
        index.register(src.join("docs"), config_with_outdir("docs"));

        assert_eq!(index.resolve(&src.join("docs").join("page.md")).outdir, "docs");
        assert_eq!(index.resolve(&src.join("docs")).outdir, "docs");
        assert_eq!(index.resolve(&src.join("top.md")).outdir, "global");
    }
}
