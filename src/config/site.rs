//! Site configuration (_config.yml)

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::i18n::Strings;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,

    // Content locations, relative to the base directory
    pub site_dir: String,
    pub index_file: String,
    pub pages_dir: String,
    pub post_page: String,

    // Rendering
    pub escape_html: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub comments: CommentsConfig,

    // Preferences
    pub preferences_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Nova Estudio Creative Blog".to_string(),
            language: "ko".to_string(),
            timezone: String::new(),

            site_dir: ".".to_string(),
            index_file: "posts.json".to_string(),
            pages_dir: "pages".to_string(),
            post_page: "post.html".to_string(),

            escape_html: false,
            highlight: HighlightConfig::default(),
            comments: CommentsConfig::default(),

            preferences_file: ".nova-blog/preferences.json".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// UI strings for the configured language
    pub fn strings(&self) -> Strings {
        Strings::for_language(&self.language)
    }

    /// Path of a markdown document inside the documents directory
    pub fn document_path(&self, file: &str) -> String {
        let dir = self.pages_dir.trim_end_matches('/');
        let file = file.trim_start_matches('/');
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", dir, file)
        }
    }

    /// Today's date in the configured timezone, or the local one
    pub fn today(&self) -> NaiveDate {
        if self.timezone.is_empty() {
            return Local::now().date_naive();
        }

        match self.timezone.parse::<Tz>() {
            Ok(tz) => Utc::now().with_timezone(&tz).date_naive(),
            Err(e) => {
                tracing::warn!("Unknown timezone {:?}, using local time: {}", self.timezone, e);
                Local::now().date_naive()
            }
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Comment widget (giscus) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    pub script: String,
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    pub mapping: String,
    pub reactions: bool,
    pub input_position: String,
    pub theme: String,
    pub lang: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            script: "https://giscus.app/client.js".to_string(),
            repo: String::new(),
            repo_id: String::new(),
            category: "General".to_string(),
            category_id: String::new(),
            mapping: "pathname".to_string(),
            reactions: true,
            input_position: "bottom".to_string(),
            theme: "preferred_color_scheme".to_string(),
            lang: "ko".to_string(),
        }
    }
}
