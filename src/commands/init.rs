use anyhow::{bail, Context, Result};
use rust_embed::Embed;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::site::scaffold;

/// Starter workspace bundled into the binary: config, scaffold templates, a
/// hello-world post, and a placeholder public tree so `serve` works right
/// away.
#[derive(Embed)]
#[folder = "assets/scaffold"]
struct StarterAssets;

pub fn run(dir: Option<PathBuf>) -> Result<()> {
    let target = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let config_path = target.join("blogrig.toml");
    if config_path.exists() {
        bail!("blogrig.toml already exists in {}", target.display());
    }

    let site_title = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "my-blog".to_string());

    let mut vars = HashMap::new();
    vars.insert("title".to_string(), site_title.clone());

    for rel in StarterAssets::iter() {
        let Some(file) = StarterAssets::get(&rel) else {
            continue;
        };
        let dest = target.join(rel.as_ref());
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        // Only the config carries placeholders; scaffold templates and the
        // starter content are written verbatim.
        if rel.as_ref() == "blogrig.toml" {
            let template = std::str::from_utf8(&file.data)
                .context("bundled blogrig.toml is not UTF-8")?;
            let rendered = scaffold::render(template, &vars, "blogrig.toml")
                .map_err(|errors| {
                    anyhow::anyhow!(
                        "{}",
                        errors
                            .iter()
                            .map(|e| e.to_string())
                            .collect::<Vec<_>>()
                            .join("; ")
                    )
                })?;
            std::fs::write(&dest, rendered)
                .with_context(|| format!("writing {}", dest.display()))?;
        } else {
            std::fs::write(&dest, &file.data)
                .with_context(|| format!("writing {}", dest.display()))?;
        }
    }

    println!("Created a blogrig workspace in {}", target.display());
    println!();
    println!("  Site:  {}", site_title);
    println!("  Posts: source/_posts");
    println!();
    println!("Run `blogrig serve` to preview it, `blogrig post new <title>` to write.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scaffolds_a_complete_workspace() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("my-site");
        std::fs::create_dir(&target).unwrap();

        run(Some(target.clone())).unwrap();

        assert!(target.join("blogrig.toml").is_file());
        assert!(target.join("scaffolds/post.md").is_file());
        assert!(target.join("scaffolds/draft.md").is_file());
        assert!(target.join("source/_posts/hello-world.md").is_file());
        assert!(target.join("public/index.html").is_file());

        let config = std::fs::read_to_string(target.join("blogrig.toml")).unwrap();
        assert!(config.contains("title = \"my-site\""), "got: {}", config);
        assert!(!config.contains("{{"), "placeholders left behind: {}", config);
    }

    #[test]
    fn refuses_an_existing_workspace() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("blogrig.toml"), "").unwrap();

        let result = run(Some(tmp.path().to_path_buf()));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("blogrig.toml already exists"));
    }
}
