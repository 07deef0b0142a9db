// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use homedash_app::{APP_NAME, SubscriptionId, Theme, ThemeStore};
use std::fs;
use std::path::PathBuf;

/// Last theme chosen on the settings page. Takes precedence over `[ui].theme`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFile {
    path: PathBuf,
}

impl ThemeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf> {
        let data_root = dirs::data_dir()
            .ok_or_else(|| anyhow!("cannot resolve data directory for the saved theme"))?;
        Ok(data_root.join(APP_NAME).join("theme"))
    }

    pub fn load(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read saved theme {}", self.path.display()))?;
        let theme = Theme::parse(&raw);
        if theme.is_none() {
            tracing::warn!(
                path = %self.path.display(),
                "ignoring unrecognized saved theme {raw:?}"
            );
        }
        Ok(theme)
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create data directory {}", parent.display()))?;
        }
        fs::write(&self.path, format!("{}\n", theme.as_str()))
            .with_context(|| format!("write saved theme {}", self.path.display()))
    }

    /// Saves every theme change `store` publishes from now on.
    pub fn attach(self, store: &mut ThemeStore) -> SubscriptionId {
        store.subscribe(move |theme| {
            if let Err(error) = self.save(theme) {
                tracing::error!("failed to save theme: {error:#}");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ThemeFile;
    use anyhow::Result;
    use homedash_app::{Theme, ThemeStore};

    #[test]
    fn missing_file_loads_as_none() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = ThemeFile::new(temp.path().join("theme"));
        assert_eq!(file.load()?, None);
        Ok(())
    }

    #[test]
    fn attached_store_persists_changes() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested").join("theme");
        let mut store = ThemeStore::new(Theme::Light);
        ThemeFile::new(&path).attach(&mut store);

        store.set(Theme::Dark);
        assert_eq!(ThemeFile::new(&path).load()?, Some(Theme::Dark));

        store.toggle();
        assert_eq!(ThemeFile::new(&path).load()?, Some(Theme::Light));
        Ok(())
    }

    #[test]
    fn unchanged_theme_does_not_write() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("theme");
        let mut store = ThemeStore::new(Theme::Dark);
        ThemeFile::new(&path).attach(&mut store);

        store.set(Theme::Dark);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn garbage_file_is_ignored() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("theme");
        std::fs::write(&path, "solarized\n")?;
        assert_eq!(ThemeFile::new(&path).load()?, None);
        Ok(())
    }
}
