//! Travel-time estimation between street addresses.
//!
//! A live distance-matrix capability (driving mode) is tried once; any
//! failure is absorbed by a deterministic hash-based estimator so callers
//! that need a number for scheduling always get one. The distinguished
//! "unknown" sentinel exists only for presentation paths that must say
//! "cannot calculate route time" instead of showing a made-up figure.

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::defaults::{FALLBACK_MAX_MINUTES, FALLBACK_MIN_MINUTES};
use crate::types::TravelTimeEstimate;

/// Estimated driving minutes between two addresses.
///
/// `estimate` never fails and never returns the unknown sentinel; the
/// route model, optimizer and auto-scheduler all depend on that.
#[async_trait]
pub trait TravelTimeProvider: Send + Sync {
    /// Driving minutes from `origin` to `destination`, always usable.
    async fn estimate(&self, origin: &str, destination: &str) -> i32;

    /// Like `estimate`, but surfaces `Unknown` when a configured live
    /// capability failed, instead of silently substituting the fallback.
    async fn estimate_checked(&self, origin: &str, destination: &str) -> TravelTimeEstimate;
}

/// A raw driving-duration source (the external mapping capability).
#[async_trait]
pub trait DrivingTimeSource: Send + Sync {
    /// Driving seconds from `origin` to `destination`; single attempt.
    async fn driving_seconds(&self, origin: &str, destination: &str) -> Result<u64>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Distance-matrix HTTP client configuration.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Base URL of the distance-matrix service.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8004".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl MatrixConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Distance-matrix HTTP client (driving mode only).
pub struct MatrixClient {
    client: reqwest::Client,
    config: MatrixConfig,
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    duration: Option<MatrixDuration>,
}

#[derive(Debug, Deserialize)]
struct MatrixDuration {
    /// Seconds.
    value: u64,
}

impl MatrixClient {
    pub fn new(config: MatrixConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client for distance matrix")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl DrivingTimeSource for MatrixClient {
    async fn driving_seconds(&self, origin: &str, destination: &str) -> Result<u64> {
        let url = format!(
            "{}/distancematrix?origins={}&destinations={}&mode=driving",
            self.config.base_url,
            urlencoding::encode(origin),
            urlencoding::encode(destination)
        );

        debug!("Requesting driving time {:?} -> {:?}", origin, destination);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send distance-matrix request")?;

        if !response.status().is_success() {
            anyhow::bail!("Distance matrix returned status {}", response.status());
        }

        let matrix: MatrixResponse = response
            .json()
            .await
            .context("Failed to parse distance-matrix response")?;

        let element = matrix
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .context("Distance-matrix response contained no elements")?;

        if element.status != "OK" {
            anyhow::bail!("Distance-matrix element status {}", element.status);
        }

        element
            .duration
            .as_ref()
            .map(|d| d.value)
            .context("Distance-matrix element missing duration")
    }

    fn name(&self) -> &str {
        "DistanceMatrix"
    }
}

/// Deterministic offline estimate for an address pair, in
/// [`FALLBACK_MIN_MINUTES`], [`FALLBACK_MAX_MINUTES`].
///
/// Only the determinism matters: identical inputs must yield identical
/// minutes within a session, so the UI never flickers between renders and
/// the offline path stays testable.
pub fn fallback_minutes(origin: &str, destination: &str) -> i32 {
    let mut hasher = Sha256::new();
    hasher.update(origin.as_bytes());
    hasher.update([0x1f]);
    hasher.update(destination.as_bytes());
    let digest = hasher.finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let value = u64::from_be_bytes(head);

    let span = (FALLBACK_MAX_MINUTES - FALLBACK_MIN_MINUTES + 1) as u64;
    FALLBACK_MIN_MINUTES + (value % span) as i32
}

/// Cached minutes for a pair, tagged with where they came from. Fallback
/// values satisfy `estimate` on later calls but must not masquerade as
/// live results on the checked path.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    minutes: i32,
    from_fallback: bool,
}

/// Travel-time service: optional live source, deterministic fallback, and a
/// per-session pair cache so repeated lookups are stable and cheap.
pub struct TravelTimeService {
    source: Option<Box<dyn DrivingTimeSource>>,
    cache: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl TravelTimeService {
    pub fn new(source: Option<Box<dyn DrivingTimeSource>>) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fallback-only service (no mapping capability configured).
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Build from config: live client when a matrix URL is configured,
    /// fallback-only otherwise.
    pub fn from_config(matrix: Option<MatrixConfig>) -> Result<Self> {
        match matrix {
            Some(config) => Ok(Self::new(Some(Box::new(MatrixClient::new(config)?)))),
            None => Ok(Self::offline()),
        }
    }

    async fn live_minutes(&self, origin: &str, destination: &str) -> Option<i32> {
        let source = self.source.as_deref()?;
        match source.driving_seconds(origin, destination).await {
            // Whole minutes, rounded up.
            Ok(seconds) => Some(seconds.div_ceil(60) as i32),
            Err(e) => {
                warn!(
                    "{} lookup failed for {:?} -> {:?}: {e:#}",
                    source.name(),
                    origin,
                    destination
                );
                None
            }
        }
    }

    fn cached(&self, origin: &str, destination: &str) -> Option<CacheEntry> {
        self.cache
            .lock()
            .get(&(origin.to_string(), destination.to_string()))
            .copied()
    }

    fn store(&self, origin: &str, destination: &str, minutes: i32, from_fallback: bool) {
        self.cache.lock().insert(
            (origin.to_string(), destination.to_string()),
            CacheEntry {
                minutes,
                from_fallback,
            },
        );
    }
}

#[async_trait]
impl TravelTimeProvider for TravelTimeService {
    async fn estimate(&self, origin: &str, destination: &str) -> i32 {
        if origin == destination {
            return 0;
        }
        if let Some(entry) = self.cached(origin, destination) {
            return entry.minutes;
        }

        let (minutes, from_fallback) = match self.live_minutes(origin, destination).await {
            Some(minutes) => (minutes, false),
            None => (fallback_minutes(origin, destination), true),
        };

        self.store(origin, destination, minutes, from_fallback);
        minutes
    }

    async fn estimate_checked(&self, origin: &str, destination: &str) -> TravelTimeEstimate {
        if origin == destination {
            return TravelTimeEstimate::Minutes(0);
        }
        if let Some(entry) = self.cached(origin, destination) {
            // A cached fallback never came from the live capability: while
            // one is configured, the honest answer here is still "unknown".
            if entry.from_fallback && self.source.is_some() {
                return TravelTimeEstimate::Unknown;
            }
            return TravelTimeEstimate::Minutes(entry.minutes);
        }

        match &self.source {
            Some(_) => match self.live_minutes(origin, destination).await {
                Some(minutes) => {
                    self.store(origin, destination, minutes, false);
                    TravelTimeEstimate::Minutes(minutes)
                }
                // A configured capability failed: say so rather than guess.
                None => TravelTimeEstimate::Unknown,
            },
            None => {
                let minutes = fallback_minutes(origin, destination);
                self.store(origin, destination, minutes, true);
                TravelTimeEstimate::Minutes(minutes)
            }
        }
    }
}
