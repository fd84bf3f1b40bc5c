//! Per-route gate declaration.

use axum::{middleware, routing::MethodRouter};

use crate::directory::SharedDirectory;
use crate::gate::{enforce_gate, Gate, GateState};

/// A route together with the gates that must pass before its handler runs.
///
/// Gates run in declaration order:
///
/// ```ignore
/// let route = gate
///     .guard(get(list_reports))
///     .authenticate(true)
///     .authorize(["admin", "auditor"])
///     .into_route();
/// ```
pub struct GuardedRoute<S = ()> {
    route: MethodRouter<S>,
    gates: Vec<Gate>,
    directory: SharedDirectory,
}

impl<S> GuardedRoute<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(route: MethodRouter<S>, directory: SharedDirectory) -> Self {
        Self {
            route,
            gates: Vec::new(),
            directory,
        }
    }

    /// Declare authentication. `false` keeps the route public.
    pub fn authenticate(self, enabled: bool) -> Self {
        self.gate(Gate::authenticate(enabled))
    }

    /// Restrict the route to accounts holding one of `roles`.
    pub fn authorize<I, R>(self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.gate(Gate::authorize(roles))
    }

    pub fn gate(mut self, gate: Gate) -> Self {
        self.gates.push(gate);
        self
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Produce the method router with every active gate layered on.
    pub fn into_route(self) -> MethodRouter<S> {
        let directory = self.directory;

        // Layers added last run first, so wrap in reverse declaration order.
        self.gates
            .into_iter()
            .rev()
            .filter(Gate::is_active)
            .fold(self.route, |route, gate| {
                route.layer(middleware::from_fn_with_state(
                    GateState {
                        gate,
                        directory: directory.clone(),
                    },
                    enforce_gate,
                ))
            })
    }
}

impl<S> From<GuardedRoute<S>> for MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn from(route: GuardedRoute<S>) -> Self {
        route.into_route()
    }
}
