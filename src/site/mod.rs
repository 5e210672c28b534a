pub mod scaffold;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::info;

use crate::config::model::SiteConfig;

/// A created or published post: where it landed and what was written.
#[derive(Debug)]
pub struct Post {
    pub path: PathBuf,
    pub content: String,
}

/// Narrow handle over a blog workspace directory.
///
/// Exposes only the operations blogrig needs: scaffold listing, post
/// creation, draft publishing, and the preview URL. Site generation itself
/// happens elsewhere; this type never looks inside `public/`.
#[derive(Debug)]
pub struct SiteWorkspace {
    root: PathBuf,
    config: SiteConfig,
}

impl SiteWorkspace {
    /// Open a workspace rooted at `root`.
    ///
    /// Fails when the source tree is missing, which catches both a wrong
    /// directory and a half-extracted workspace.
    pub fn open(root: &Path, config: SiteConfig) -> Result<Self> {
        let workspace = Self {
            root: root.to_path_buf(),
            config,
        };
        if !workspace.source_dir().is_dir() {
            bail!(
                "{} is not a blogrig workspace (missing `{}` directory)",
                root.display(),
                workspace.config.source_dir
            );
        }
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.config.source_dir)
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.source_dir().join("_posts")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.source_dir().join("_drafts")
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.config.public_dir)
    }

    pub fn scaffold_dir(&self) -> PathBuf {
        self.root.join(&self.config.scaffold_dir)
    }

    /// Scaffold names available in this workspace (`*.md` basenames).
    pub fn layouts(&self) -> Result<Vec<String>> {
        let dir = self.scaffold_dir();
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("reading scaffold directory {}", dir.display()))?;
        let mut layouts: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                name.strip_suffix(".md").map(String::from)
            })
            .collect();
        layouts.sort();
        Ok(layouts)
    }

    fn load_scaffold(&self, layout: &str) -> Result<String> {
        let path = self.scaffold_dir().join(format!("{}.md", layout));
        if !path.is_file() {
            let layouts = self.layouts().unwrap_or_default();
            let advice = closest(layout, &layouts)
                .map(|c| format!(" (did you mean `{}`?)", c))
                .unwrap_or_else(|| {
                    if layouts.is_empty() {
                        String::new()
                    } else {
                        format!(" (available: {})", layouts.join(", "))
                    }
                });
            bail!("no scaffold for layout `{}`{}", layout, advice);
        }
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    /// Create a post (or draft) from the named layout's scaffold.
    ///
    /// Layout `draft` lands in `_drafts/`, everything else in `_posts/`.
    /// Refuses to overwrite an existing file with the same slug.
    pub fn create_post(&self, title: &str, layout: &str) -> Result<Post> {
        let slug = scaffold::slugify(title);
        if slug.is_empty() {
            bail!("title `{}` does not produce a usable slug", title);
        }

        let template = self.load_scaffold(layout)?;
        let vars = front_matter_vars(title, layout);
        let content = scaffold::render(&template, &vars, layout)
            .map_err(|errors| anyhow::anyhow!("{}", join_errors(&errors)))?;

        let dir = if layout == "draft" {
            self.drafts_dir()
        } else {
            self.posts_dir()
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating {}", dir.display()))?;

        let path = dir.join(format!("{}.md", slug));
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        std::fs::write(&path, &content)
            .with_context(|| format!("writing {}", path.display()))?;

        info!(path = %path.display(), "post created");
        Ok(Post { path, content })
    }

    /// Move a draft into `_posts/`, re-stamping its date (and layout, when
    /// one is given).
    pub fn publish_draft(&self, slug: &str, layout: Option<&str>) -> Result<Post> {
        let src = self.drafts_dir().join(format!("{}.md", slug));
        if !src.is_file() {
            let drafts = self.draft_slugs().unwrap_or_default();
            let advice = closest(slug, &drafts)
                .map(|c| format!(" (did you mean `{}`?)", c))
                .unwrap_or_default();
            bail!("no draft named `{}`{}", slug, advice);
        }

        let original = std::fs::read_to_string(&src)
            .with_context(|| format!("reading {}", src.display()))?;
        let content = restamp_front_matter(&original, layout);

        let dir = self.posts_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        let dest = dir.join(format!("{}.md", slug));
        if dest.exists() {
            bail!("{} already exists", dest.display());
        }

        std::fs::write(&dest, &content)
            .with_context(|| format!("writing {}", dest.display()))?;
        std::fs::remove_file(&src)
            .with_context(|| format!("removing {}", src.display()))?;

        info!(path = %dest.display(), "draft published");
        Ok(Post {
            path: dest,
            content,
        })
    }

    fn draft_slugs(&self) -> Result<Vec<String>> {
        let dir = self.drafts_dir();
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("reading {}", dir.display()))?;
        Ok(entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                name.strip_suffix(".md").map(String::from)
            })
            .collect())
    }

    /// Preview URL for this site on the given port: protocol from the
    /// configured site url, host pinned to loopback, path from the site root.
    pub fn local_url(&self, port: u16) -> String {
        let url = &self.config.url;
        let protocol = url.split(':').next().unwrap_or("http");
        format!("{}://127.0.0.1:{}{}", protocol, port, self.config.root)
    }
}

fn front_matter_vars(title: &str, layout: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("title".to_string(), title.to_string());
    vars.insert("layout".to_string(), layout.to_string());
    vars.insert("date".to_string(), now_stamp());
    vars
}

fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Rewrite the `date:` line (and optionally the `layout:` line) of a post's
/// front matter. Lines outside the leading front matter block are untouched.
fn restamp_front_matter(content: &str, layout: Option<&str>) -> String {
    let mut in_front_matter = false;
    let mut fences_seen = 0;
    let mut out = Vec::new();

    for line in content.lines() {
        if line.trim() == "---" && fences_seen < 2 {
            fences_seen += 1;
            in_front_matter = fences_seen == 1;
            out.push(line.to_string());
            continue;
        }
        if in_front_matter {
            if line.trim_start().starts_with("date:") {
                out.push(format!("date: {}", now_stamp()));
                continue;
            }
            if let Some(layout) = layout {
                if line.trim_start().starts_with("layout:") {
                    out.push(format!("layout: {}", layout));
                    continue;
                }
            }
        }
        out.push(line.to_string());
    }

    let mut result = out.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    result
}

fn closest<'a>(name: &str, candidates: &'a [String]) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = strsim::jaro_winkler(name, candidate);
        if score >= 0.8 && best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate.as_str(), score));
        }
    }
    best.map(|(name, _)| name)
}

fn join_errors(errors: &[scaffold::ScaffoldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_workspace() -> (TempDir, SiteWorkspace) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("source/_posts")).unwrap();
        std::fs::create_dir_all(root.join("scaffolds")).unwrap();
        std::fs::write(
            root.join("scaffolds/post.md"),
            "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n",
        )
        .unwrap();
        std::fs::write(
            root.join("scaffolds/draft.md"),
            "---\ntitle: {{ title }}\nlayout: draft\ndate: {{ date }}\n---\n",
        )
        .unwrap();

        let config: SiteConfig = toml::from_str(
            "title = \"Test Blog\"\nurl = \"https://example.com\"\nroot = \"/blog/\"",
        )
        .unwrap();
        let workspace = SiteWorkspace::open(root, config).unwrap();
        (tmp, workspace)
    }

    #[test]
    fn open_rejects_non_workspace() {
        let tmp = TempDir::new().unwrap();
        let config: SiteConfig = toml::from_str("title = \"t\"").unwrap();
        let result = SiteWorkspace::open(tmp.path(), config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a blogrig workspace"));
    }

    #[test]
    fn layouts_lists_scaffolds() {
        let (_tmp, ws) = test_workspace();
        assert_eq!(ws.layouts().unwrap(), vec!["draft", "post"]);
    }

    #[test]
    fn create_post_lands_in_posts() {
        let (_tmp, ws) = test_workspace();
        let post = ws.create_post("Hello World", "post").unwrap();
        assert!(post.path.ends_with("source/_posts/hello-world.md"));
        assert!(post.content.contains("title: Hello World"));
        assert!(post.path.is_file());
    }

    #[test]
    fn create_draft_lands_in_drafts() {
        let (_tmp, ws) = test_workspace();
        let post = ws.create_post("Work in Progress", "draft").unwrap();
        assert!(post.path.ends_with("source/_drafts/work-in-progress.md"));
        assert!(post.content.contains("layout: draft"));
    }

    #[test]
    fn create_post_refuses_duplicate_slug() {
        let (_tmp, ws) = test_workspace();
        ws.create_post("Hello", "post").unwrap();
        let result = ws.create_post("Hello", "post");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn create_post_with_unknown_layout_suggests() {
        let (_tmp, ws) = test_workspace();
        let err = ws.create_post("Hello", "psot").unwrap_err().to_string();
        assert!(err.contains("no scaffold for layout `psot`"));
        assert!(err.contains("did you mean `post`?"), "got: {}", err);
    }

    #[test]
    fn publish_moves_draft_to_posts() {
        let (_tmp, ws) = test_workspace();
        ws.create_post("My Draft", "draft").unwrap();

        let post = ws.publish_draft("my-draft", Some("post")).unwrap();
        assert!(post.path.ends_with("source/_posts/my-draft.md"));
        assert!(post.content.contains("layout: post"));
        assert!(!ws.drafts_dir().join("my-draft.md").exists());
    }

    #[test]
    fn publish_missing_draft_suggests() {
        let (_tmp, ws) = test_workspace();
        ws.create_post("My Draft", "draft").unwrap();
        let err = ws.publish_draft("my-darft", None).unwrap_err().to_string();
        assert!(err.contains("no draft named `my-darft`"));
        assert!(err.contains("did you mean `my-draft`?"), "got: {}", err);
    }

    #[test]
    fn local_url_uses_site_protocol_and_root() {
        let (_tmp, ws) = test_workspace();
        assert_eq!(ws.local_url(4200), "https://127.0.0.1:4200/blog/");
    }

    #[test]
    fn restamp_only_touches_front_matter() {
        let content = "---\ntitle: T\ndate: 2020-01-01 00:00:00\n---\nbody\ndate: not this one\n";
        let out = restamp_front_matter(content, None);
        assert!(!out.contains("2020-01-01"));
        assert!(out.contains("date: not this one"));
        assert!(out.ends_with('\n'));
    }
}
