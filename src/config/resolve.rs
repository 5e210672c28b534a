use std::path::{Path, PathBuf};

/// Walk up the directory tree from `start`, checking for `filename` at each
/// level. Returns the full path to the file if found, or None if the root is
/// reached without finding it.
pub fn find_config(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the config file path. If `cli_file` is provided, verify it exists
/// and return it. Otherwise, search from the current working directory upward
/// for "blogrig.toml".
pub fn resolve_config(cli_file: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_file {
        if path.is_file() {
            return Ok(path.canonicalize()?);
        }
        anyhow::bail!("Config file not found: {}", path.display());
    }

    let cwd = std::env::current_dir()?;
    find_config(&cwd, "blogrig.toml").ok_or_else(|| {
        anyhow::anyhow!(
            "No blogrig.toml found in {} or any parent directory (run `blogrig init` to create a workspace)",
            cwd.display()
        )
    })
}
