//! Connection pool with health-aware endpoint selection.
//!
//! Responsibilities:
//! - Hold the endpoints of one cluster and their health state.
//! - Pick the connection for each request attempt.
//! - Record attempt outcomes (`mark_dead` / `mark_live`).
//!
//! Does NOT handle:
//! - Sending requests or classifying responses (see `client::request`).
//! - Background health checks; recovery is discovered through normal traffic.
//!
//! Invariants:
//! - Health changes only through `mark_dead` and `mark_live`.
//! - Selection and health updates happen under one lock; readers never see a half-updated slot.
//! - `get_connection` fails only when the pool is empty.
//! - Handles from a replaced connection set are ignored by `mark_*`.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// HTTP Basic credentials attached to every connection of a pool.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

#[derive(Debug)]
struct Endpoint {
    url: String,
    credentials: Option<Credentials>,
}

/// One cluster endpoint as handed out by [`ConnectionPool::get_connection`].
///
/// Cheap to clone. Health lives in the pool, so a handle stays valid after
/// the pool marks it dead or live.
#[derive(Clone)]
pub struct Connection {
    endpoint: Arc<Endpoint>,
}

impl Connection {
    fn new(url: String, credentials: Option<Credentials>) -> Self {
        Self {
            endpoint: Arc::new(Endpoint { url, credentials }),
        }
    }

    /// Endpoint URL without a trailing slash.
    pub fn url(&self) -> &str {
        &self.endpoint.url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.endpoint.credentials.as_ref()
    }

    fn same_as(&self, other: &Connection) -> bool {
        Arc::ptr_eq(&self.endpoint, &other.endpoint)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("url", &self.endpoint.url)
            .field("authenticated", &self.endpoint.credentials.is_some())
            .finish()
    }
}

/// Health states of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Live,
    Dead,
}

impl HealthStatus {
    /// Returns the string label for this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Live => "live",
            HealthStatus::Dead => "dead",
        }
    }
}

/// Snapshot of one connection's health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionHealth {
    pub status: HealthStatus,
    /// Set on the transition to dead, cleared by `mark_live`.
    pub dead_since: Option<Instant>,
    pub consecutive_failures: u32,
}

impl ConnectionHealth {
    fn live() -> Self {
        Self {
            status: HealthStatus::Live,
            dead_since: None,
            consecutive_failures: 0,
        }
    }
}

#[derive(Debug)]
struct Slot {
    connection: Connection,
    health: ConnectionHealth,
    /// Position in the retry queue used when every connection is dead.
    dead_order: u64,
}

#[derive(Debug, Default)]
struct PoolState {
    slots: Vec<Slot>,
    cursor: usize,
    next_dead_order: u64,
}

impl PoolState {
    fn slot_index(&self, conn: &Connection) -> Option<usize> {
        self.slots.iter().position(|s| s.connection.same_as(conn))
    }

    fn slot_mut(&mut self, conn: &Connection) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.connection.same_as(conn))
    }

    fn take_dead_order(&mut self) -> u64 {
        let order = self.next_dead_order;
        self.next_dead_order += 1;
        order
    }
}

/// The set of connections for one cluster.
///
/// Live connections are handed out round-robin. When none is live, the
/// connection that has waited longest since it last failed is tried, so a
/// recovered node is found again without a separate health-check loop.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    state: Mutex<PoolState>,
    metrics: Option<MetricsCollector>,
}

impl ConnectionPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pool that reports health transitions.
    pub fn with_metrics(metrics: MetricsCollector) -> Self {
        Self {
            state: Mutex::default(),
            metrics: Some(metrics),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the whole connection set. Every new connection starts live.
    ///
    /// An empty list is accepted; every following `get_connection` then fails
    /// with [`ClientError::NoConnectionsConfigured`].
    pub fn set_connections<I, S>(&self, urls: I, credentials: Option<Credentials>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots: Vec<Slot> = urls
            .into_iter()
            .map(|url| {
                let url = url.into().trim_end_matches('/').to_string();
                Slot {
                    connection: Connection::new(url, credentials.clone()),
                    health: ConnectionHealth::live(),
                    dead_order: 0,
                }
            })
            .collect();

        if slots.is_empty() {
            warn!("Connection pool configured with no endpoints");
        } else {
            info!(
                connections = slots.len(),
                authenticated = credentials.is_some(),
                "Connection pool configured"
            );
        }

        let mut state = self.lock();
        *state = PoolState {
            slots,
            cursor: 0,
            next_dead_order: 0,
        };
    }

    /// Pick the connection for the next attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoConnectionsConfigured`] if the pool is empty.
    pub fn get_connection(&self) -> Result<Connection> {
        let mut state = self.lock();
        let len = state.slots.len();
        if len == 0 {
            return Err(ClientError::NoConnectionsConfigured);
        }

        for offset in 0..len {
            let idx = (state.cursor + offset) % len;
            if state.slots[idx].health.status == HealthStatus::Live {
                state.cursor = (idx + 1) % len;
                let conn = state.slots[idx].connection.clone();
                debug!(url = conn.url(), "Selected live connection");
                return Ok(conn);
            }
        }

        // All dead: retry the one that has been waiting longest.
        let slot = state
            .slots
            .iter()
            .min_by_key(|s| s.dead_order)
            .ok_or(ClientError::NoConnectionsConfigured)?;
        debug!(
            url = slot.connection.url(),
            failures = slot.health.consecutive_failures,
            "No live connections, retrying oldest dead connection"
        );
        Ok(slot.connection.clone())
    }

    /// Record a failed attempt against `conn`.
    ///
    /// `dead_since` is set only on the transition from live. A repeated
    /// failure moves the connection to the back of the dead retry queue.
    pub fn mark_dead(&self, conn: &Connection) {
        let mut state = self.lock();
        let Some(idx) = state.slot_index(conn) else {
            debug!(url = conn.url(), "Ignoring mark_dead for a replaced connection");
            return;
        };
        let order = state.take_dead_order();
        let slot = &mut state.slots[idx];

        slot.health.consecutive_failures = slot.health.consecutive_failures.saturating_add(1);
        slot.dead_order = order;

        if slot.health.status == HealthStatus::Live {
            slot.health.status = HealthStatus::Dead;
            slot.health.dead_since = Some(Instant::now());
            warn!(url = conn.url(), "Connection marked dead");
            if let Some(ref m) = self.metrics {
                m.record_health_transition(HealthStatus::Dead);
            }
        } else {
            debug!(
                url = conn.url(),
                failures = slot.health.consecutive_failures,
                "Connection still dead"
            );
        }
    }

    /// Record a healthy answer from `conn`, clearing its failure history.
    pub fn mark_live(&self, conn: &Connection) {
        let mut state = self.lock();
        let Some(slot) = state.slot_mut(conn) else {
            debug!(url = conn.url(), "Ignoring mark_live for a replaced connection");
            return;
        };

        let was_dead = slot.health.status == HealthStatus::Dead;
        slot.health = ConnectionHealth::live();
        slot.dead_order = 0;

        if was_dead {
            info!(url = conn.url(), "Connection recovered");
            if let Some(ref m) = self.metrics {
                m.record_health_transition(HealthStatus::Live);
            }
        }
    }

    /// Health of `conn`, or `None` if it is not part of the current set.
    pub fn health(&self, conn: &Connection) -> Option<ConnectionHealth> {
        let mut state = self.lock();
        state.slot_mut(conn).map(|s| s.health)
    }

    /// URLs of the current set, in configuration order.
    pub fn urls(&self) -> Vec<String> {
        self.lock()
            .slots
            .iter()
            .map(|s| s.connection.url().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of connections currently marked live.
    pub fn live_count(&self) -> usize {
        self.lock()
            .slots
            .iter()
            .filter(|s| s.health.status == HealthStatus::Live)
            .count()
    }
}
