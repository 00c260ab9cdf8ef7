//! Dashboard state management using Leptos signals and context

use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::error::FormError;
use crate::form::FormState;
use crate::types::TelemetryRecord;

/// Decides whether a finished request may still write to the dashboard.
///
/// Every load takes a ticket; only the newest ticket is applied, and nothing is
/// applied once the dashboard has been unmounted.
#[derive(Clone, Default)]
pub struct LoadGuard {
    inner: Rc<GuardState>,
}

#[derive(Default)]
struct GuardState {
    unmounted: Cell<bool>,
    latest: Cell<u64>,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new load, superseding all earlier ones.
    pub fn begin(&self) -> u64 {
        let ticket = self.inner.latest.get() + 1;
        self.inner.latest.set(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.is_mounted() && self.inner.latest.get() == ticket
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.unmounted.get()
    }

    pub fn unmount(&self) {
        self.inner.unmounted.set(true);
    }
}

/// Dashboard context containing all shared state
#[derive(Clone)]
pub struct DashboardContext {
    // Record list: `None` until the first successful load
    pub records: RwSignal<Option<Vec<TelemetryRecord>>>,
    pub load_error: RwSignal<Option<String>>,
    pub refreshing: RwSignal<bool>,

    // Submission form
    pub form: RwSignal<FormState>,
    pub form_error: RwSignal<Option<FormError>>,
    pub submitting: RwSignal<bool>,

    pub guard: LoadGuard,
}

impl DashboardContext {
    /// Create a new dashboard context with default values
    pub fn new() -> Self {
        Self {
            records: create_rw_signal(None),
            load_error: create_rw_signal(None),
            refreshing: create_rw_signal(false),

            form: create_rw_signal(FormState::default()),
            form_error: create_rw_signal(None),
            submitting: create_rw_signal(false),

            guard: LoadGuard::new(),
        }
    }
}

impl Default for DashboardContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Provide the dashboard context to child components
pub fn provide_dashboard_context() -> DashboardContext {
    let ctx = DashboardContext::new();
    provide_context(ctx.clone());
    ctx
}

/// Get the dashboard context from the component tree
pub fn use_dashboard_context() -> DashboardContext {
    expect_context::<DashboardContext>()
}
