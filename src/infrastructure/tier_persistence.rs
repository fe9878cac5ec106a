use crate::domain::pricing::TierTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads and writes tier tables as TOML files
pub struct TierTablePersistence {
    file_path: PathBuf,
}

impl TierTablePersistence {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn load(&self) -> Result<TierTable> {
        let content = fs::read_to_string(&self.file_path).context(format!(
            "Failed to read tier table file: {}",
            self.file_path.display()
        ))?;
        let table = TierTable::from_toml_str(&content).context(format!(
            "Failed to parse tier table TOML: {}",
            self.file_path.display()
        ))?;

        info!(
            "Loaded {} pricing tiers from {:?}",
            table.len(),
            self.file_path
        );
        Ok(table)
    }

    pub fn save(&self, table: &TierTable) -> Result<()> {
        let content = table
            .to_toml_string()
            .context("Failed to serialize tier table")?;

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create tier table directory")?;
        }

        // Atomic write: write to temp file then rename
        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).context("Failed to write temp tier table file")?;
        fs::rename(&temp_path, &self.file_path).context("Failed to rename tier table file")?;

        info!("Saved {} pricing tiers to {:?}", table.len(), self.file_path);
        Ok(())
    }
}

/// Loads the tier table from `path`, or falls back to the built-in plans
pub fn resolve_tier_table(path: Option<&Path>) -> Result<TierTable> {
    match path {
        Some(path) => TierTablePersistence::new(path).load(),
        None => {
            info!("Using built-in pricing tiers");
            Ok(TierTable::builtin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("arkfee-{}-{}", std::process::id(), name))
            .join("tiers.toml")
    }

    #[test]
    fn test_save_then_load_builtin_table() {
        let path = temp_file("roundtrip");
        let persistence = TierTablePersistence::new(&path);

        persistence.save(&TierTable::builtin()).unwrap();
        let loaded = persistence.load().unwrap();

        assert_eq!(loaded.keys(), TierTable::builtin().keys());
        assert!(!path.with_extension("tmp").exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = temp_file("missing");
        let err = TierTablePersistence::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to read tier table file"));
    }

    #[test]
    fn test_resolve_without_path_uses_builtin() {
        let table = resolve_tier_table(None).unwrap();
        assert_eq!(table.len(), 4);
    }
}
