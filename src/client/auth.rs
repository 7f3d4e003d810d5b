use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::Result;

/// Source of the bearer token attached to every backend request.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: String) -> Result<()>;
    /// Forced logout.
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set_token(&self, token: String) -> Result<()> {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
        Ok(())
    }
}

/// Token persisted in a plain file so the CLI keeps its session between runs.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl FileTokenStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = std::fs::read_to_string(&path)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.cached.read().ok().and_then(|guard| guard.clone())
    }

    fn set_token(&self, token: String) -> Result<()> {
        std::fs::write(&self.path, &token)?;
        if let Ok(mut guard) = self.cached.write() {
            *guard = Some(token);
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.cached.write() {
            *guard = None;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// A 401 only ends the session when it comes from an auth endpoint or when
/// the request carried no token at all. Unrelated 401s keep the session.
pub fn should_force_logout(path: &str, had_token: bool) -> bool {
    if !had_token {
        return true;
    }
    path.trim_start_matches('/')
        .split('/')
        .next()
        .map(|segment| segment == "auth")
        .unwrap_or(false)
}

/// `Authorization` header value for a token, tolerating an already prefixed one.
pub fn bearer_value(token: &str) -> String {
    match token.strip_prefix("Bearer ") {
        Some(raw) => format!("Bearer {}", raw.trim()),
        None => format!("Bearer {}", token.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_logout_only_for_auth_endpoints_or_missing_token() {
        assert!(should_force_logout("/auth/me", true));
        assert!(should_force_logout("auth/refresh", true));
        assert!(should_force_logout("/positions", false));
        assert!(!should_force_logout("/positions", true));
        assert!(!should_force_logout("/ai-matching/results", true));
        assert!(!should_force_logout("/users/auth-log", true));
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store = FileTokenStore::open(&path);
        assert_eq!(store.token(), None);

        store.set_token("abc".into()).unwrap();
        assert_eq!(FileTokenStore::open(&path).token().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.token(), None);
        store.clear().unwrap();
    }

    #[test]
    fn bearer_prefix_is_not_doubled() {
        assert_eq!(bearer_value("abc"), "Bearer abc");
        assert_eq!(bearer_value("Bearer abc"), "Bearer abc");
    }
}
