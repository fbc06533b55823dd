use tracing::debug;

use crate::{ResolvedRoute, RouteError, RouteTable};

/// Browser-style history over a [`RouteTable`]. Every transition re-resolves
/// the path; the table itself holds no state.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
    history: Vec<ResolvedRoute>,
}

impl Navigator {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.history.last()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Navigates to `path`, adding a history entry unless it resolves to the
    /// current location.
    pub fn push(&mut self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let resolved = self.table.resolve(path)?;
        let duplicate = self
            .current()
            .is_some_and(|current| current.path == resolved.path);
        if duplicate {
            debug!(path = %resolved.path, "navigation to current location ignored");
        } else {
            self.history.push(resolved.clone());
        }
        Ok(resolved)
    }

    /// Navigates to `path`, overwriting the current history entry.
    pub fn replace(&mut self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let resolved = self.table.resolve(path)?;
        self.history.pop();
        self.history.push(resolved.clone());
        Ok(resolved)
    }

    /// Returns to the previous entry; the first entry is never popped.
    pub fn back(&mut self) -> Option<&ResolvedRoute> {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.current()
    }
}
