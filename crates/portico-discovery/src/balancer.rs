//! Load balancing across healthy discovery candidates.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::registry::ServiceRegistry;
use crate::types::ServiceInfo;

/// Errors that can occur during candidate selection.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// No healthy candidate satisfied the query.
    #[error("no healthy service available")]
    NoneAvailable,
}

/// Result type for load balancer operations.
pub type Result<T> = std::result::Result<T, BalanceError>;

/// Strategy for choosing one service among healthy candidates.
///
/// Implementations must be cheap and non-blocking; they see only the
/// already-filtered candidate set.
pub trait SelectionPolicy: Send + Sync {
    /// Selects one candidate, or `None` if the slice is empty.
    fn select<'a>(&self, candidates: &'a [ServiceInfo]) -> Option<&'a ServiceInfo>;

    /// Policy name, for logs.
    fn name(&self) -> &'static str;
}

/// Takes the first candidate in enumeration order.
///
/// This is the default policy: deterministic given a candidate set, with
/// no fairness guarantee across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstHealthy;

impl SelectionPolicy for FirstHealthy {
    fn select<'a>(&self, candidates: &'a [ServiceInfo]) -> Option<&'a ServiceInfo> {
        candidates.first()
    }

    fn name(&self) -> &'static str {
        "first_healthy"
    }
}

/// Cycles through candidates with a shared counter.
#[derive(Debug, Default)]
pub struct RoundRobin {
    counter: AtomicU64,
}

impl RoundRobin {
    /// Creates a round-robin policy starting at the first candidate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionPolicy for RoundRobin {
    fn select<'a>(&self, candidates: &'a [ServiceInfo]) -> Option<&'a ServiceInfo> {
        if candidates.is_empty() {
            return None;
        }
        let counter = self.counter.fetch_add(1, Ordering::Relaxed);
        candidates.get((counter as usize) % candidates.len())
    }

    fn name(&self) -> &'static str {
        "round_robin"
    }
}

/// Picks a uniformly random candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Random;

impl SelectionPolicy for Random {
    fn select<'a>(&self, candidates: &'a [ServiceInfo]) -> Option<&'a ServiceInfo> {
        if candidates.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..candidates.len());
        candidates.get(index)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Selects one healthy service for a type/path query.
///
/// Applies the same type and path narrowing as discovery, always restricted
/// to effectively healthy candidates, then delegates the final choice to the
/// configured [`SelectionPolicy`].
#[derive(Clone)]
pub struct LoadBalancer {
    registry: Arc<ServiceRegistry>,
    policy: Arc<dyn SelectionPolicy>,
}

impl std::fmt::Debug for LoadBalancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadBalancer")
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

impl LoadBalancer {
    /// Creates a load balancer with the default first-healthy policy.
    #[must_use]
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self {
            registry,
            policy: Arc::new(FirstHealthy),
        }
    }

    /// Creates a load balancer with an explicit policy.
    #[must_use]
    pub fn with_policy(registry: Arc<ServiceRegistry>, policy: Arc<dyn SelectionPolicy>) -> Self {
        Self { registry, policy }
    }

    /// The active policy name.
    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Picks one healthy service matching the optional type and path.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::NoneAvailable`] when no healthy candidate
    /// satisfies the query.
    pub fn pick(&self, service_type: Option<&str>, path: Option<&str>) -> Result<ServiceInfo> {
        let mut candidates = match path {
            Some(path) => self.registry.match_path(path),
            None => self.registry.list(),
        };

        if let Some(service_type) = service_type {
            candidates.retain(|s| s.service_type.eq_ignore_ascii_case(service_type));
        }

        let tracker = *self.registry.tracker();
        candidates.retain(|s| tracker.is_live(s));

        let picked = self
            .policy
            .select(&candidates)
            .cloned()
            .ok_or(BalanceError::NoneAvailable)?;

        debug!(
            service_id = %picked.service_id,
            policy = self.policy.name(),
            candidates = candidates.len(),
            "Picked service"
        );
        Ok(picked)
    }
}
