//! Batch conversion entry point.
//!
//! Phases:
//! - **Config** - locate and load `svgres.toml` (plus local overlay)
//! - **Select** - resolve project names, or list them and stop
//! - **Plan** - per project: manifest, change detection, fan-out, cache
//! - **Drain** - convert the shared queue once and print the summary

use anyhow::{Result, anyhow};

use crate::{
    cli::Cli,
    config::{Config, Project, find_config_file},
    image::svg::rasterizer_for,
    log,
    pipeline::{BatchOptions, BatchSummary, process_projects},
    queue::WorkQueue,
};

/// Run a conversion batch as described by `cli`.
///
/// Returns `Ok(None)` when no projects were selected and the configured
/// names were listed instead.
pub fn run(cli: &Cli) -> Result<Option<BatchSummary>> {
    let config = load_config(cli)?;

    if !cli.has_selection() {
        list_projects(&config);
        return Ok(None);
    }

    let projects = select_projects(&config, cli);
    let options = BatchOptions {
        force: cli.force || config.force,
        jobs: cli.jobs.unwrap_or(config.convert.jobs),
    };

    let rasterizer = rasterizer_for(config.convert.backend)?;
    let mut queue = WorkQueue::new();
    process_projects(&projects, &mut queue, rasterizer.as_ref(), options).map(Some)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = find_config_file(&cli.config)
        .ok_or_else(|| anyhow!("config file `{}` not found", cli.config.display()))?;
    let config = Config::load(&path)?;
    crate::debug!("config"; "loaded {}", config.config_path.display());
    Ok(config)
}

fn list_projects(config: &Config) {
    if config.projects.is_empty() {
        log!("project"; "no projects configured");
        return;
    }
    log!("project"; "available projects (pass names or --all):");
    for project in &config.projects {
        log!("project"; "  {} [{}]", project.name, project.platform);
    }
}

/// Projects named on the command line, or all of them with `--all`.
///
/// Unknown names are reported and skipped.
fn select_projects<'a>(config: &'a Config, cli: &Cli) -> Vec<&'a Project> {
    if cli.all {
        return config.projects.iter().collect();
    }

    cli.projects
        .iter()
        .filter_map(|name| {
            let project = config.project(name);
            if project.is_none() {
                log!("error"; "unknown project `{}`", name);
            }
            project
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[[projects]]
name = "ios"
source_dir = "svg"
target_dir = "ios"
platform = "iOS"

[[projects]]
name = "droid"
source_dir = "svg"
target_dir = "android"
platform = "Android"
"#;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("svgres.toml"), CONFIG).unwrap();
        fs::create_dir_all(dir.path().join("svg")).unwrap();
        dir
    }

    fn cli(dir: &TempDir, args: &[&str]) -> Cli {
        let config = dir.path().join("svgres.toml");
        let mut argv = vec!["svgres", "-C", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_select_named_and_unknown() {
        let dir = setup();
        let cli = cli(&dir, &["droid", "missing"]);
        let config = load_config(&cli).unwrap();

        let names: Vec<_> = select_projects(&config, &cli)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["droid"]);
    }

    #[test]
    fn test_select_all() {
        let dir = setup();
        let cli = cli(&dir, &["--all"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(select_projects(&config, &cli).len(), 2);
    }

    #[test]
    fn test_no_selection_lists_projects() {
        let dir = setup();
        assert!(run(&cli(&dir, &[])).unwrap().is_none());
    }

    #[test]
    fn test_missing_config_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(run(&cli(&dir, &["--all"])).is_err());
    }

    #[test]
    fn test_run_without_manifests() {
        let dir = setup();
        let summary = run(&cli(&dir, &["--all", "-j", "2"])).unwrap().unwrap();
        assert_eq!(summary.descriptors, 0);
        assert_eq!(summary.stats.completed, 0);
    }
}
