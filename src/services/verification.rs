use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors returned when checking a verification code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("No pending code for {0}")]
    NotFound(String),

    #[error("Code does not match, {remaining} attempts remaining")]
    Mismatch { remaining: u32 },

    #[error("Too many attempts for {0}")]
    TooManyAttempts(String),
}

#[derive(Debug)]
struct PendingCode {
    code: String,
    attempts: AtomicU32,
}

/// Pending email verification and password reset codes
///
/// Entries expire after the configured TTL and are evicted once the attempt
/// counter reaches `max_attempts`. Keys are addresses, compared trimmed and
/// lowercased.
#[derive(Clone)]
pub struct VerificationStore {
    entries: moka::future::Cache<String, Arc<PendingCode>>,
    max_attempts: u32,
}

impl VerificationStore {
    pub fn new(ttl: Duration, max_attempts: u32, capacity: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(ttl)
            .build();

        Self {
            entries,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Issue a fresh 6-digit code, replacing any pending one
    pub async fn issue(&self, key: &str) -> String {
        let code = generate_code();
        let entry = Arc::new(PendingCode {
            code: code.clone(),
            attempts: AtomicU32::new(0),
        });

        self.entries.insert(normalize_key(key), entry).await;
        tracing::debug!("Issued verification code for {}", key);
        code
    }

    /// Check a code; a correct code consumes the entry
    pub async fn verify(&self, key: &str, code: &str) -> Result<(), VerificationError> {
        let key = normalize_key(key);
        let entry = self
            .entries
            .get(&key)
            .await
            .ok_or_else(|| VerificationError::NotFound(key.clone()))?;

        if entry.code == code.trim() {
            self.entries.invalidate(&key).await;
            return Ok(());
        }

        let attempts = entry.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempts >= self.max_attempts {
            self.entries.invalidate(&key).await;
            tracing::warn!("Verification attempts exhausted for {}", key);
            return Err(VerificationError::TooManyAttempts(key));
        }

        Err(VerificationError::Mismatch {
            remaining: self.max_attempts - attempts,
        })
    }

    pub async fn revoke(&self, key: &str) {
        self.entries.invalidate(&normalize_key(key)).await;
    }

    pub async fn pending(&self, key: &str) -> bool {
        self.entries.get(&normalize_key(key)).await.is_some()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

fn generate_code() -> String {
    let n = uuid::Uuid::new_v4().as_u128() % 1_000_000;
    format!("{:06}", n)
}
