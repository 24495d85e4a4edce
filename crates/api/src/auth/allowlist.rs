//! Sign-in allow-list.
//!
//! The app is internal: only a fixed set of e-mail addresses may use it.
//! The set is loaded once at startup, either from a file (one address
//! per line, `#` starts a comment) or from a comma-separated env var,
//! so adding a colleague is a config change rather than a deploy.

use std::collections::HashSet;

/// Case-insensitive set of e-mail addresses permitted to sign in.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    emails: HashSet<String>,
}

impl AllowList {
    /// Build from an iterator of addresses. Entries are trimmed and
    /// lower-cased; empty entries are dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    /// Parse the file format: one address per line, `#` starts a comment
    /// running to the end of the line.
    pub fn from_file_contents(contents: &str) -> Self {
        Self::from_entries(
            contents
                .lines()
                .map(|line| line.split('#').next().unwrap_or_default()),
        )
    }

    /// Load the allow-list from the environment.
    ///
    /// | Env Var               | Format                          |
    /// |-----------------------|---------------------------------|
    /// | `ALLOWED_EMAILS_FILE` | path to an allow-list file      |
    /// | `ALLOWED_EMAILS`      | comma-separated addresses       |
    ///
    /// The file takes precedence when both are set.
    ///
    /// # Panics
    ///
    /// Panics if `ALLOWED_EMAILS_FILE` is set but unreadable, which is
    /// the desired behaviour -- we want misconfiguration to fail fast.
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var("ALLOWED_EMAILS_FILE") {
            let contents = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read ALLOWED_EMAILS_FILE '{path}': {e}"));
            return Self::from_file_contents(&contents);
        }

        let csv = std::env::var("ALLOWED_EMAILS").unwrap_or_default();
        Self::from_entries(csv.split(','))
    }

    /// Whether an address may sign in. Matching ignores case and
    /// surrounding whitespace.
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// An empty allow-list rejects every address.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}
