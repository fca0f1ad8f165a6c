//! Tests for config functionality.

use super::model::DEFAULT_HOOK_TIMEOUT_SECS;
use crate::config::Config;
use std::path::Path;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.outdir, "build");
    assert_eq!(config.template, "template.html");
    assert!(!config.extensions.tables);
    assert!(!config.parser_options.auto_heading_id);
    assert!(!config.renderer_options.unsafe_rendering);
    assert!(config.addons.is_empty());
    assert_eq!(config.hook_timeout_secs, DEFAULT_HOOK_TIMEOUT_SECS);
}

#[test]
fn test_starter_config() {
    let config = Config::starter();

    assert!(config.extensions.tables);
    assert!(config.extensions.strikethrough);
    assert!(config.extensions.autolinks);
    assert!(config.extensions.wikilink);
    assert!(!config.extensions.footnotes);
    assert!(config.parser_options.custom_heading_attrs);
    assert!(config.renderer_options.xhtml);
    assert!(!config.renderer_options.unsafe_rendering);
}

#[test]
fn test_parse_empty_yaml_inherits_everything() {
    let parent = Config::starter();
    let config = Config::from_yaml_with_parent("", &parent).unwrap();
    assert_eq!(config, parent);
}

#[test]
fn test_overlay_single_toggle_keeps_parent_fields() {
    let mut parent = Config::starter();
    parent.outdir = "public".to_string();
    parent.addons = vec!["sitemap".to_string()];
    parent.extensions.footnotes = true;

    let yaml = r#"
extensions:
  tables: false
"#;
    let config = Config::from_yaml_with_parent(yaml, &parent).unwrap();

    assert!(!config.extensions.tables);

    // Everything else comes from the parent, not from Config::default()
    assert_eq!(config.outdir, "public");
    assert_eq!(config.addons, vec!["sitemap"]);
    assert!(config.extensions.footnotes);
    assert!(config.extensions.strikethrough);
    assert!(config.parser_options.custom_heading_attrs);
    assert!(config.renderer_options.xhtml);
}

#[test]
fn test_overlay_adopts_every_set_field() {
    let parent = Config::default();
    let yaml = r#"
outdir: out
template: layouts/page.html
extensions:
  tables: true
  strikethrough: true
  autolinks: true
  task_list: true
  definition_list: true
  footnotes: true
  typographer: true
  wikilink: true
  mathjax: true
  table_of_contents: true
parser_options:
  custom_heading_attrs: true
  auto_heading_id: true
renderer_options:
  hard_wraps: true
  xhtml: true
  unsafe_rendering: true
addons:
  - first
  - second
hook_timeout_secs: 5
"#;
    let config = Config::from_yaml_with_parent(yaml, &parent).unwrap();

    assert_eq!(config.outdir, "out");
    assert_eq!(config.template, "layouts/page.html");
    let e = config.extensions;
    assert!(e.tables && e.strikethrough && e.autolinks && e.task_list && e.definition_list);
    assert!(e.footnotes && e.typographer && e.wikilink && e.mathjax && e.table_of_contents);
    assert!(config.parser_options.custom_heading_attrs);
    assert!(config.parser_options.auto_heading_id);
    assert!(config.renderer_options.hard_wraps);
    assert!(config.renderer_options.xhtml);
    assert!(config.renderer_options.unsafe_rendering);
    assert_eq!(config.addons, vec!["first", "second"]);
    assert_eq!(config.hook_timeout_secs, 5);
}

#[test]
fn test_overlay_empty_addon_list_clears_parent_list() {
    let mut parent = Config::default();
    parent.addons = vec!["a".to_string()];

    let config = Config::from_yaml_with_parent("addons: []", &parent).unwrap();
    assert!(config.addons.is_empty());
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    let yaml = r#"
outdir: site
future_feature: enabled
extensions:
  emoji: true
"#;
    let config = Config::from_yaml_with_parent(yaml, &Config::default()).unwrap();
    assert_eq!(config.outdir, "site");
}

#[test]
fn test_malformed_yaml_is_rejected() {
    let result = Config::from_yaml_with_parent("extensions: [tables", &Config::default());
    assert!(result.unwrap_err().contains("failed to parse config YAML"));

    let result = Config::from_yaml_with_parent("extensions:\n  tables: maybe", &Config::default());
    assert!(result.is_err());
}

#[test]
fn test_validate_empty_outdir() {
    let result = Config::from_yaml_with_parent("outdir: \"\"", &Config::default());
    assert!(result.unwrap_err().contains("outdir"));
}

#[test]
fn test_validate_addon_names() {
    let result = Config::from_yaml_with_parent("addons: [\"../escape\"]", &Config::default());
    assert!(result.unwrap_err().contains("../escape"));

    let result = Config::from_yaml_with_parent("addons: [\"\"]", &Config::default());
    assert!(result.unwrap_err().contains("non-empty"));
}

#[test]
fn test_to_yaml_round_trips_through_overlay() {
    let config = Config::starter();
    let yaml = config.to_yaml().unwrap();

    // A fully written config overrides every field of any parent
    let mut parent = Config::default();
    parent.addons = vec!["stale".to_string()];
    parent.outdir = "elsewhere".to_string();
    let parsed = Config::from_yaml_with_parent(&yaml, &parent).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_load_with_parent_from_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "renderer_options:").unwrap();
    writeln!(file, "  hard_wraps: true").unwrap();

    let parent = Config::starter();
    let config = Config::load_with_parent(file.path(), &parent).unwrap();
    assert!(config.renderer_options.hard_wraps);
    assert!(config.renderer_options.xhtml);
}

#[test]
fn test_load_missing_file_names_path() {
    let err = Config::load_with_parent("/nonexistent/silvera.conf", &Config::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("/nonexistent/silvera.conf"));
    assert!(message.contains("failed to read config file"));
}

#[test]
fn test_relative_paths_resolve_against_root() {
    let config = Config::default();
    let root = Path::new("/work/site");
    assert_eq!(config.output_dir(root), root.join("build"));
    assert_eq!(config.template_path(root), root.join("template.html"));

    let mut absolute = Config::default();
    absolute.outdir = "/srv/www".to_string();
    assert_eq!(absolute.output_dir(root), Path::new("/srv/www"));
}

#[test]
fn test_capabilities_mirror_config() {
    let config = Config::starter();
    let caps = config.capabilities();
    assert_eq!(caps.extensions, config.extensions);
    assert_eq!(caps.parser, config.parser_options);
    assert_eq!(caps.renderer, config.renderer_options);
}
