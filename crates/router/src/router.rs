//! View router: active-panel state, navigation policy, staleness tokens.

use gridwatch_core::{DomainError, DomainResult};

use crate::view::ActiveView;

/// How navigation treats a view name outside the closed set.
///
/// `Strict` is the default: the caller gets `UnknownView` and the active view
/// is untouched. `FallbackToOverview` reproduces the tolerant behavior the
/// original dashboard shipped with: anything unrecognized lands on the
/// overview panel, with a warning.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum NavigationPolicy {
    #[default]
    Strict,
    FallbackToOverview,
}

/// Proof that a panel was active when an async operation began.
///
/// Tokens go stale on every navigation and on logout. An operation that
/// captured a token before suspending must re-check it before mutating panel
/// state, so late results never land on a panel the user has left.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ViewToken {
    view: ActiveView,
    epoch: u64,
}

impl ViewToken {
    pub fn view(&self) -> ActiveView {
        self.view
    }
}

/// Owner of the single active view.
///
/// # Invariants
/// - Exactly one view is active at any time; fresh routers start at
///   `Overview`.
/// - The epoch increases monotonically with every change of view, so a
///   `ViewToken` is current iff nothing changed since it was issued.
#[derive(Debug)]
pub struct ViewRouter {
    view: ActiveView,
    policy: NavigationPolicy,
    epoch: u64,
}

impl ViewRouter {
    pub fn new(policy: NavigationPolicy) -> Self {
        Self {
            view: ActiveView::Overview,
            policy,
            epoch: 0,
        }
    }

    pub fn current_view(&self) -> ActiveView {
        self.view
    }

    /// Switch to a member of the closed view set.
    pub fn set_active_view(&mut self, view: ActiveView) {
        if view != self.view {
            tracing::debug!(from = %self.view, to = %view, "view change");
        }
        self.view = view;
        self.epoch += 1;
    }

    /// Navigate by name, applying the configured unknown-view policy.
    pub fn navigate(&mut self, name: &str) -> DomainResult<ActiveView> {
        let view = match name.parse::<ActiveView>() {
            Ok(view) => view,
            Err(DomainError::UnknownView(name)) if self.policy == NavigationPolicy::FallbackToOverview => {
                tracing::warn!(%name, "unknown view requested; falling back to overview");
                ActiveView::Overview
            }
            Err(e) => return Err(e),
        };
        self.set_active_view(view);
        Ok(view)
    }

    /// Issue a staleness token for the current view.
    pub fn token(&self) -> ViewToken {
        ViewToken {
            view: self.view,
            epoch: self.epoch,
        }
    }

    /// A token is current iff no navigation happened since it was issued.
    pub fn is_current(&self, token: &ViewToken) -> bool {
        token.epoch == self.epoch && token.view == self.view
    }

    /// Logout path: force the default view so the next login starts fresh.
    pub fn reset_on_logout(&mut self) {
        self.view = ActiveView::Overview;
        self.epoch += 1;
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new(NavigationPolicy::Strict)
    }
}
