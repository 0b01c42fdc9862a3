use super::SubscriptionRepository;
use crate::core::subscription::Subscription;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SUBSCRIPTIONS_FILE: &str = "subscriptions.yaml";
const SESSION_FILE: &str = "session.yaml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    logged_in: bool,
}

/// Stores subscriptions and the login flag as YAML files in one directory.
/// Missing files mean nothing has been saved yet.
pub struct YamlRepository {
    dir: PathBuf,
}

impl YamlRepository {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn subscriptions_path(&self) -> PathBuf {
        self.dir.join(SUBSCRIPTIONS_FILE)
    }

    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn read_optional(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            debug!("No data file at {}", path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write data file: {}", path.display()))
    }
}

impl SubscriptionRepository for YamlRepository {
    fn load_subscriptions(&self) -> Result<Vec<Subscription>> {
        let path = self.subscriptions_path();
        let Some(content) = Self::read_optional(&path)? else {
            return Ok(Vec::new());
        };
        let subscriptions: Vec<Subscription> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
        debug!("Loaded {} subscriptions", subscriptions.len());
        Ok(subscriptions)
    }

    fn save_subscriptions(&self, subscriptions: &[Subscription]) -> Result<()> {
        let content =
            serde_yaml::to_string(subscriptions).context("Failed to serialize subscriptions")?;
        self.write(&self.subscriptions_path(), &content)?;
        debug!("Saved {} subscriptions", subscriptions.len());
        Ok(())
    }

    fn load_logged_in(&self) -> Result<bool> {
        let path = self.session_path();
        let Some(content) = Self::read_optional(&path)? else {
            return Ok(false);
        };
        let session: SessionState = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
        Ok(session.logged_in)
    }

    fn save_logged_in(&self, logged_in: bool) -> Result<()> {
        let content = serde_yaml::to_string(&SessionState { logged_in })
            .context("Failed to serialize session state")?;
        self.write(&self.session_path(), &content)
    }
}
