//! Navigation collaborator used by the redirect guard.

/// Current route plus history-replacing navigation.
pub trait Navigator {
    fn current_route(&self) -> String;

    /// Replace the active history entry with `path`.
    fn replace_route(&mut self, path: &str);
}

/// In-memory history stack, used by the CLI and in tests.
#[derive(Clone, Debug)]
pub struct MemoryNavigator {
    history: Vec<String>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self { history: vec![initial.into()] }
    }

    /// User navigation: adds a history entry.
    pub fn push(&mut self, path: impl Into<String>) {
        self.history.push(path.into());
    }

    /// Go back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Navigator for MemoryNavigator {
    fn current_route(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn replace_route(&mut self, path: &str) {
        match self.history.last_mut() {
            Some(last) => path.clone_into(last),
            None => self.history.push(path.to_owned()),
        }
    }
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;
