//! In-memory revocation list for session tokens
//!
//! Entries are keyed by the SHA-256 digest of the token and carry the token's
//! own expiry. Once that expiry passes the token fails validation regardless,
//! so the entry is reclaimed by whichever of these runs first:
//! - the cleanup task scheduled when the token was revoked
//! - a lookup that finds the entry already expired
//! - a [`RevocationStore::purge_expired`] sweep

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::domain::entities::token::RevocationEntry;
use crate::errors::TokenError;

use super::codec::ClaimsCodec;

/// Concurrency-safe token → expiry map.
///
/// Not persisted: a process restart forgets every revocation.
pub struct RevocationStore {
    entries: Arc<DashMap<String, DateTime<Utc>>>,
    codec: Arc<ClaimsCodec>,
    schedule_cleanup: bool,
}

impl RevocationStore {
    /// Creates a store that schedules one cleanup task per revocation
    pub fn new(codec: Arc<ClaimsCodec>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            codec,
            schedule_cleanup: true,
        }
    }

    /// Creates a store that relies only on lazy removal and sweeps
    pub fn without_scheduled_cleanup(codec: Arc<ClaimsCodec>) -> Self {
        Self {
            schedule_cleanup: false,
            ..Self::new(codec)
        }
    }

    /// Marks a token as revoked until its own expiry.
    ///
    /// The expiry is read without verifying the signature: callers revoke the
    /// session token they are currently holding. A call site that accepts a
    /// token string from a third party must validate it first, otherwise a
    /// forged `exp` lands in the store as-is.
    ///
    /// Fails only when the token cannot be parsed; such a token cannot pass
    /// validation either, so callers may treat the failure as non-fatal.
    pub fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let claims = self.codec.decode_unverified(token)?;
        let entry = RevocationEntry::new(hash_token(token), claims.expires_at());

        self.entries.insert(entry.token_hash.clone(), entry.expires_at);
        debug!(subject_id = claims.subject_id, expires_at = %entry.expires_at, "token revoked");

        if self.schedule_cleanup {
            self.schedule_removal(entry);
        }
        Ok(())
    }

    /// Whether the token is revoked and not yet expired
    pub fn is_revoked(&self, token: &str) -> bool {
        let key = hash_token(token);
        let now = Utc::now();

        let expires_at = match self.entries.get(&key) {
            Some(entry) => *entry.value(),
            None => return false,
        };

        if is_reclaimable(&expires_at, now) {
            self.entries.remove_if(&key, |_, exp| is_reclaimable(exp, now));
            trace!("lazily removed expired revocation");
            return false;
        }
        true
    }

    /// Removes every entry whose expiry has passed, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;

        self.entries.retain(|_, exp| {
            let keep = !is_reclaimable(exp, now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of entries currently held, expired or not
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Unconditionally forgets a token
    pub fn remove(&self, token: &str) {
        self.entries.remove(&hash_token(token));
    }

    /// Snapshot of the current entries
    pub fn entries(&self) -> Vec<RevocationEntry> {
        self.entries
            .iter()
            .map(|e| RevocationEntry::new(e.key().clone(), *e.value()))
            .collect()
    }

    fn schedule_removal(&self, entry: RevocationEntry) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            trace!("no async runtime, leaving revocation to lazy removal and sweeps");
            return;
        };

        // The expiry check is strict, so wake just past the expiry instant
        let delay = (entry.expires_at - Utc::now())
            .to_std()
            .unwrap_or_default()
            + std::time::Duration::from_millis(1);
        let entries = Arc::clone(&self.entries);

        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let now = Utc::now();
            if entries
                .remove_if(&entry.token_hash, |_, exp| is_reclaimable(exp, now))
                .is_some()
            {
                trace!("scheduled revocation cleanup removed entry");
            }
        });
    }
}

/// Hashes a token for use as a map key
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn is_reclaimable(expires_at: &DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > *expires_at
}
