use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

pub const CONFIG_FILE: &str = "fdkeys.config.yaml";

/// A dependency file with its path and content.
pub struct FdFile {
    pub path: String,
    pub content: String,
}

/// Project configuration from fdkeys.config.yaml.
#[derive(Debug, Default, Deserialize)]
pub struct FdConfig {
    pub name: Option<String>,
    pub sources: Option<Vec<String>>,
    pub trim: Option<bool>,
    pub compact: Option<bool>,
}

/// Read dependency files from a path (file or directory).
pub fn read_fd_files(input_path: &Path) -> Result<Vec<FdFile>> {
    if !input_path.exists() {
        bail!("Path does not exist: {}", input_path.display());
    }

    if input_path.is_file() {
        return Ok(vec![read_file(input_path)?]);
    }

    if input_path.is_dir() {
        let config_path = input_path.join(CONFIG_FILE);
        if config_path.exists() {
            return read_from_config(&config_path, input_path);
        }
        return scan_directory(input_path);
    }

    bail!(
        "Path is neither a file nor a directory: {}",
        input_path.display()
    )
}

/// Read project config from fdkeys.config.yaml if it exists.
pub fn read_project_config(dir_path: &Path) -> Result<Option<FdConfig>> {
    let config_path = dir_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid YAML config {}", config_path.display()))?;
    Ok(Some(config))
}

fn read_file(path: &Path) -> Result<FdFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(FdFile {
        path: path.to_string_lossy().to_string(),
        content,
    })
}

fn scan_directory(dir_path: &Path) -> Result<Vec<FdFile>> {
    let pattern = dir_path.join("**/*.fd");
    let pattern_str = pattern.to_string_lossy().replace('\\', "/");
    let mut paths = glob_paths(&pattern_str)?;
    paths.sort();
    debug!(dir = %dir_path.display(), files = paths.len(), "scanned directory");
    paths.iter().map(|p| read_file(p)).collect()
}

fn read_from_config(config_path: &Path, base_dir: &Path) -> Result<Vec<FdFile>> {
    let config = read_project_config(base_dir)?.unwrap_or_default();

    let source_patterns = match config.sources {
        Some(ref s) if !s.is_empty() => s.clone(),
        _ => return scan_directory(base_dir),
    };
    debug!(config = %config_path.display(), patterns = source_patterns.len(), "using project sources");

    let mut files: Vec<FdFile> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pattern in &source_patterns {
        let full_pattern = base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy().replace('\\', "/");
        let mut matched: Vec<PathBuf> = glob_paths(&pattern_str)
            .with_context(|| format!("Invalid source pattern '{pattern}'"))?
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        matched.sort();

        for path in matched {
            files.push(read_file(&path)?);
        }
    }

    Ok(files)
}

fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern).context("Invalid glob pattern")? {
        let path = entry.context("Glob error")?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}
