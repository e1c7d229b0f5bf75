//! Structured degraded-mode signal.
//!
//! Network and storage failures never propagate as errors to the user; they
//! flip a named resource here and the presentation layer renders a generic
//! degraded banner instead of the affected feature.

/// Resources that can degrade independently.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    MapLoader,
    SessionVault,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::MapLoader => "map-loader",
            Resource::SessionVault => "session-vault",
        }
    }
}

/// Tracks which resources are currently degraded.
#[derive(Debug, Clone, Default)]
pub struct DegradedMode {
    degraded: Vec<Resource>,
}

impl DegradedMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_degraded(&mut self, resource: Resource) {
        if !self.degraded.contains(&resource) {
            tracing::warn!(resource = resource.as_str(), "entering degraded mode");
            self.degraded.push(resource);
        }
    }

    pub fn mark_recovered(&mut self, resource: Resource) {
        if self.degraded.contains(&resource) {
            tracing::info!(resource = resource.as_str(), "recovered from degraded mode");
            self.degraded.retain(|r| *r != resource);
        }
    }

    pub fn is_degraded(&self, resource: Resource) -> bool {
        self.degraded.contains(&resource)
    }

    pub fn any_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Names of degraded resources, for generic rendering.
    pub fn summary(&self) -> Vec<&'static str> {
        self.degraded.iter().map(Resource::as_str).collect()
    }
}
