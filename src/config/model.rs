use serde::Deserialize;

/// Port range the preview server is allowed to use. Ports below 1025 need
/// elevated privileges on most systems; the upper bound keeps clear of the
/// ephemeral range.
pub const PORT_MIN: u16 = 1025;
pub const PORT_MAX: u16 = 32768;

#[derive(Debug, Deserialize)]
pub struct BlogrigConfig {
    pub site: SiteConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    #[serde(default = "default_site_url")]
    pub url: String,
    #[serde(default = "default_site_root")]
    pub root: String,
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    #[serde(default = "default_scaffold_dir")]
    pub scaffold_dir: String,
}

fn default_site_url() -> String {
    "http://localhost".to_string()
}

fn default_site_root() -> String {
    "/".to_string()
}

fn default_source_dir() -> String {
    "source".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_scaffold_dir() -> String {
    "scaffolds".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_layout")]
    pub default_layout: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            lang: default_lang(),
            default_layout: default_layout(),
        }
    }
}

fn default_port() -> u16 {
    4000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_layout() -> String {
    "post".to_string()
}
