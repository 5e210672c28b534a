use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::config::model::{BlogrigConfig, PORT_MAX, PORT_MIN};

/// Minimum Jaro-Winkler score to consider a layout name a close match.
const LAYOUT_SUGGESTION_THRESHOLD: f64 = 0.8;

// ---------------------------------------------------------------------------
// ConfigDiagnostic — miette-powered validation error
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigDiagnostic {
    #[error("preview port {port} is outside the allowed range 1025-32768")]
    #[diagnostic(
        code(blogrig::port_out_of_range),
        help("ports below 1025 require elevated privileges; pick one between 1025 and 32768")
    )]
    PortOutOfRange {
        #[source_code]
        src: NamedSource<String>,
        #[label("port out of range")]
        span: SourceSpan,
        port: u16,
    },

    #[error("site title is empty")]
    #[diagnostic(code(blogrig::empty_title))]
    EmptyTitle {
        #[source_code]
        src: NamedSource<String>,
        #[label("title is empty")]
        span: SourceSpan,
    },

    #[error("site url `{url}` has no protocol")]
    #[diagnostic(
        code(blogrig::invalid_site_url),
        help("the url must start with a protocol, e.g. `http://localhost`")
    )]
    InvalidSiteUrl {
        #[source_code]
        src: NamedSource<String>,
        #[label("missing `proto://` prefix")]
        span: SourceSpan,
        url: String,
    },

    #[error("site root `{root}` must start and end with `/`")]
    #[diagnostic(code(blogrig::invalid_site_root))]
    InvalidSiteRoot {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid root path")]
        span: SourceSpan,
        root: String,
    },

    #[error("default layout `{layout}` has no scaffold")]
    #[diagnostic(code(blogrig::unknown_layout))]
    UnknownLayout {
        #[source_code]
        src: NamedSource<String>,
        #[label("no `{layout}.md` in the scaffold directory")]
        span: SourceSpan,
        #[help]
        advice: String,
        layout: String,
    },
}

// ---------------------------------------------------------------------------
// Source span helpers
// ---------------------------------------------------------------------------

/// Find the byte offset of a TOML table header like `[site]` or `[preview]`.
fn find_table_span(source: &str, section: &str) -> SourceSpan {
    let pattern = format!("[{}]", section);
    if let Some(pos) = source.find(&pattern) {
        return (pos + 1, section.len()).into();
    }
    (0, 0).into()
}

/// Find the byte offset of a field's value within a TOML section.
fn find_field_span(source: &str, section: &str, field: &str) -> SourceSpan {
    let table_header = format!("[{}]", section);
    let search_start = source.find(&table_header).unwrap_or(0);
    let after_header = &source[search_start..];

    for prefix in [format!("{} =", field), format!("{}=", field)] {
        if let Some(rel_pos) = after_header.find(&prefix) {
            let abs_pos = search_start + rel_pos;
            if let Some(eq_rel) = source[abs_pos..].find('=') {
                let val_start = abs_pos + eq_rel + 1;
                let val_trimmed = source[val_start..].trim_start();
                let trim_offset = val_start + (source[val_start..].len() - val_trimmed.len());
                let val_end = val_trimmed.find('\n').unwrap_or(val_trimmed.len());
                return (trim_offset, val_end.max(1)).into();
            }
        }
    }

    find_table_span(source, section)
}

/// Find the closest scaffold name using Jaro-Winkler similarity.
fn find_closest_layout<'a>(name: &str, layouts: &'a [String]) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for candidate in layouts {
        let score = strsim::jaro_winkler(name, candidate);
        if score >= LAYOUT_SUGGESTION_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate.as_str(), score));
        }
    }
    best.map(|(name, _)| name)
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Validate a parsed config against its raw TOML source.
///
/// `layouts` is the list of scaffold names available in the workspace, or
/// `None` when the workspace cannot be opened (the layout check is skipped
/// in that case; the site module reports its own errors).
pub fn validate(
    config: &BlogrigConfig,
    source: &str,
    filename: &str,
    layouts: Option<&[String]>,
) -> Result<(), Vec<ConfigDiagnostic>> {
    let mut errors = Vec::new();
    let named = |src: &str| NamedSource::new(filename, src.to_string());

    if config.site.title.trim().is_empty() {
        errors.push(ConfigDiagnostic::EmptyTitle {
            src: named(source),
            span: find_field_span(source, "site", "title"),
        });
    }

    if !config.site.url.contains("://") {
        errors.push(ConfigDiagnostic::InvalidSiteUrl {
            src: named(source),
            span: find_field_span(source, "site", "url"),
            url: config.site.url.clone(),
        });
    }

    if !config.site.root.starts_with('/') || !config.site.root.ends_with('/') {
        errors.push(ConfigDiagnostic::InvalidSiteRoot {
            src: named(source),
            span: find_field_span(source, "site", "root"),
            root: config.site.root.clone(),
        });
    }

    if config.preview.port < PORT_MIN || config.preview.port > PORT_MAX {
        errors.push(ConfigDiagnostic::PortOutOfRange {
            src: named(source),
            span: find_field_span(source, "preview", "port"),
            port: config.preview.port,
        });
    }

    if let Some(layouts) = layouts {
        let layout = &config.preview.default_layout;
        if !layouts.iter().any(|l| l == layout) {
            let advice = match find_closest_layout(layout, layouts) {
                Some(close) => format!("did you mean `{}`?", close),
                None => format!("available scaffolds: {}", layouts.join(", ")),
            };
            errors.push(ConfigDiagnostic::UnknownLayout {
                src: named(source),
                span: find_field_span(source, "preview", "default_layout"),
                advice,
                layout: layout.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
