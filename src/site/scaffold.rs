use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Minimum Jaro-Winkler score to consider a variable name a close match.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Compiled pattern matching `{{ name }}` placeholders in scaffold files.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([\w.]+)\s*\}\}").expect("placeholder regex must compile"));

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("unresolved placeholder '{{{{{{ {name} }}}}}}' in scaffold `{scaffold}`{}", suggestion.as_ref().map(|s| format!(" (did you mean `{}`?)", s)).unwrap_or_default())]
    UnresolvedPlaceholder {
        scaffold: String,
        name: String,
        suggestion: Option<String>,
    },
}

fn find_closest_var<'a>(name: &str, vars: &'a HashMap<String, String>) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;
    for key in vars.keys() {
        let score = strsim::jaro_winkler(name, key);
        if score >= SUGGESTION_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((key.as_str(), score));
        }
    }
    best.map(|(name, _)| name)
}

/// Resolve all `{{ name }}` placeholders in `input` using `vars`.
///
/// Two-pass approach:
///   1. Validate that every referenced placeholder exists in `vars`.
///   2. Replace all references with their values.
pub fn render(
    input: &str,
    vars: &HashMap<String, String>,
    scaffold_name: &str,
) -> Result<String, Vec<ScaffoldError>> {
    let errors: Vec<ScaffoldError> = PLACEHOLDER_RE
        .captures_iter(input)
        .filter_map(|cap| {
            let name = cap[1].to_string();
            if vars.contains_key(&name) {
                None
            } else {
                let suggestion = find_closest_var(&name, vars).map(String::from);
                Some(ScaffoldError::UnresolvedPlaceholder {
                    scaffold: scaffold_name.to_string(),
                    name,
                    suggestion,
                })
            }
        })
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    let resolved = PLACEHOLDER_RE
        .replace_all(input, |cap: &regex::Captures| {
            vars.get(&cap[1]).cloned().unwrap_or_default()
        })
        .into_owned();

    Ok(resolved)
}

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug regex must compile"));

/// Turn a post title into a filename-safe slug.
pub fn slugify(title: &str) -> String {
    NON_SLUG_RE
        .replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
