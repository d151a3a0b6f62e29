//! nova-blog: post index, front-matter and search pipeline for a static blog
//!
//! A blog is a directory holding a JSON post index and a folder of
//! markdown documents. This crate loads both, parses each document's
//! front-matter, renders markdown, filters and searches the post list and
//! produces list and detail views.

pub mod app;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod render;
pub mod search;
pub mod server;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::BlogError;

/// A blog rooted at a base directory
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post index and the documents
    pub site_dir: PathBuf,
    /// Preference file (theme choice)
    pub preferences_path: PathBuf,
}

impl Blog {
    /// Open a blog from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open a blog with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let site_dir = base_dir.join(&config.site_dir);
        let preferences_path = base_dir.join(&config.preferences_file);

        Self {
            config,
            base_dir,
            site_dir,
            preferences_path,
        }
    }

    /// Transport reading the site directory
    pub fn transport(&self) -> content::DirTransport {
        content::DirTransport::new(&self.site_dir)
    }

    /// Repository over the site directory
    pub fn repository(&self) -> content::PostRepository<content::DirTransport> {
        content::PostRepository::new(self.transport(), &self.config)
    }

    /// Front page wired over the site directory
    pub fn app(&self) -> app::BlogApp<content::DirTransport> {
        app::BlogApp::new(
            self.repository(),
            search::FilterEngine::new(),
            render::ListRenderer::new(&self.config),
            render::DetailRenderer::new(&self.config),
        )
    }

    /// Theme manager backed by the preference file
    pub fn theme_manager(&self, system: theme::Theme) -> theme::ThemeManager<theme::FilePreferences> {
        theme::ThemeManager::new(theme::FilePreferences::new(&self.preferences_path), system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.site_dir, dir.path().join("."));
        assert_eq!(
            blog.preferences_path,
            dir.path().join(".nova-blog/preferences.json")
        );
    }

    #[test]
    fn test_reads_config_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "site_dir: public\nlanguage: en\n").unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.site_dir, dir.path().join("public"));
        assert_eq!(blog.config.language, "en");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "escape_html: [not, a, bool]\n").unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }
}
