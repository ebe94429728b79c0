//! Navigation state: the current path with back/forward history.

use crate::path::RepoPath;

#[derive(Debug, Clone)]
pub struct NavigationState {
    current: RepoPath,
    history: Vec<RepoPath>,
    history_index: usize,
}

impl NavigationState {
    pub fn new(start: RepoPath) -> Self {
        Self {
            current: start.clone(),
            history: vec![start],
            history_index: 0,
        }
    }

    pub fn current(&self) -> &RepoPath {
        &self.current
    }

    /// Record a navigation. Re-visiting the current path adds no entry.
    pub fn push(&mut self, path: RepoPath) {
        if path == self.current {
            return;
        }
        // Drop forward history
        self.history.truncate(self.history_index + 1);
        self.history.push(path.clone());
        self.history_index += 1;
        self.current = path;
    }

    pub fn go_back(&mut self) -> Option<RepoPath> {
        if self.history_index > 0 {
            self.history_index -= 1;
            self.current = self.history[self.history_index].clone();
            Some(self.current.clone())
        } else {
            None
        }
    }

    pub fn go_forward(&mut self) -> Option<RepoPath> {
        if self.history_index + 1 < self.history.len() {
            self.history_index += 1;
            self.current = self.history[self.history_index].clone();
            Some(self.current.clone())
        } else {
            None
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }
}
