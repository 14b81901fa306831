use crate::models::{UserAccount, UserPreferences};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur in the local user store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),
}

/// Local user directory holding accounts and their saved preferences
///
/// Backed by a single JSON file when a path is given, otherwise kept in
/// memory only. Every write is flushed to disk before it returns.
pub struct UserStore {
    path: Option<PathBuf>,
    users: RwLock<Vec<UserAccount>>,
}

impl UserStore {
    /// Open a file-backed store, starting empty if the file does not exist yet
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let users = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No user store at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Loaded {} users from {}", users.len(), path.display());

        Ok(Self {
            path: Some(path),
            users: RwLock::new(users),
        })
    }

    /// A store that forgets everything on shutdown
    pub fn in_memory() -> Self {
        Self {
            path: None,
            users: RwLock::new(Vec::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Register a new user; emails are unique ignoring case
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserAccount, StoreError> {
        let email = email.trim();
        let mut users = self.users.write().await;

        if users.iter().any(|user| same_email(&user.email, email)) {
            return Err(StoreError::EmailTaken(email.to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let account = UserAccount {
            password_hash: hash_password(&id, password),
            id,
            email: email.to_string(),
            name: name.trim().to_string(),
            preferences: None,
            created_at: chrono::Utc::now(),
        };

        let mut updated = users.clone();
        updated.push(account.clone());
        self.persist(&updated).await?;
        *users = updated;

        tracing::info!("Registered user {}", account);
        Ok(account)
    }

    /// Check credentials and return the matching account
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount, StoreError> {
        let users = self.users.read().await;

        users
            .iter()
            .find(|user| same_email(&user.email, email.trim()))
            .filter(|user| user.password_hash == hash_password(&user.id, password))
            .cloned()
            .ok_or(StoreError::InvalidCredentials)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserAccount, StoreError> {
        let users = self.users.read().await;

        users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(user_id.to_string()))
    }

    /// Saved preferences for a user, `None` if they never saved any
    pub async fn load_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<UserPreferences>, StoreError> {
        Ok(self.get_user(user_id).await?.preferences)
    }

    /// Replace a user's preferences
    pub async fn save_preferences(
        &self,
        user_id: &str,
        preferences: UserPreferences,
    ) -> Result<UserAccount, StoreError> {
        let mut users = self.users.write().await;

        let mut updated = users.clone();
        let account = updated
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| StoreError::UserNotFound(user_id.to_string()))?;
        account.preferences = Some(preferences);
        let account = account.clone();

        self.persist(&updated).await?;
        *users = updated;

        tracing::debug!("Saved preferences for {}", user_id);
        Ok(account)
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Write the directory to disk; memory is only updated by callers once this succeeds
    async fn persist(&self, users: &[UserAccount]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so a crash never leaves a truncated store behind
        let json = serde_json::to_vec_pretty(users)?;
        let tmp = path.with_extension("json.tmp");
        let written = match tokio::fs::write(&tmp, json).await {
            Ok(()) => tokio::fs::rename(&tmp, path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            tracing::warn!("Failed to persist user store to {}: {}", path.display(), e);
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::trace!("Persisted {} users to {}", users.len(), path.display());
        Ok(())
    }
}

#[inline]
fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Salted SHA-256 of the password, hex encoded; the user id is the salt
fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
