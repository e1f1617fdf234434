//! Cyclic selection among named views
//!
//! Views are usually the stack names plus any non-stack screens (a menu).
//! Collaborators index per-view arrays with [`ViewSelector::current_index`].

use crate::error::{Result, StackError};
use crate::stack::StackRegistry;

#[derive(Debug, Clone)]
pub struct ViewSelector {
    views: Vec<String>,
    current: String,
}

impl ViewSelector {
    /// Create a selector over distinct `views`, starting at the first.
    /// Later duplicates are dropped.
    pub fn new<I, S>(views: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for view in views {
            let view = view.into();
            if !unique.contains(&view) {
                unique.push(view);
            }
        }
        let current = unique.first().cloned().ok_or(StackError::EmptyViews)?;
        Ok(Self {
            views: unique,
            current,
        })
    }

    /// One view per registered stack (declaration order), then `extra` views
    pub fn from_registry<I, S>(registry: &StackRegistry, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let views: Vec<String> = registry
            .names()
            .map(str::to_string)
            .chain(extra.into_iter().map(Into::into))
            .collect();
        Self::new(views)
    }

    pub fn views(&self) -> &[String] {
        &self.views
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Index of the current view, or `NotFound` if it is not in the list
    pub fn current_index(&self) -> Result<usize> {
        self.views
            .iter()
            .position(|v| *v == self.current)
            .ok_or_else(|| StackError::NotFound(self.current.clone()))
    }

    /// Advance, wrapping past the last view to the first
    pub fn next(&mut self) -> &str {
        let next = match self.current_index() {
            Ok(i) if i + 1 < self.views.len() => i + 1,
            _ => 0,
        };
        self.current = self.views[next].clone();
        &self.current
    }

    /// Step back, wrapping before the first view to the last
    pub fn previous(&mut self) -> &str {
        let prev = match self.current_index() {
            Ok(i) if i > 0 => i - 1,
            _ => self.views.len() - 1,
        };
        self.current = self.views[prev].clone();
        &self.current
    }

    /// Jump to `name`; unknown names leave the selection unchanged
    pub fn go_to(&mut self, name: &str) -> Result<()> {
        if !self.views.iter().any(|v| v == name) {
            log::warn!("View {} does not exist", name);
            return Err(StackError::UnknownView(name.to_string()));
        }
        self.current = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> ViewSelector {
        ViewSelector::new(["6th", "7th", "8th", "Menu"]).unwrap()
    }

    #[test]
    fn test_next_wraps_after_full_cycle() {
        let mut views = selector();
        let start = views.current().to_string();
        for _ in 0..views.views().len() {
            views.next();
        }
        assert_eq!(views.current(), start);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut views = selector();
        assert_eq!(views.previous(), "Menu");
        assert_eq!(views.current_index().unwrap(), 3);
        assert_eq!(views.previous(), "8th");
        assert_eq!(views.next(), "Menu");
        assert_eq!(views.next(), "6th");
    }

    #[test]
    fn test_go_to_unknown_keeps_current() {
        let mut views = selector();
        views.go_to("7th").unwrap();
        assert!(matches!(
            views.go_to("nonexistent"),
            Err(StackError::UnknownView(n)) if n == "nonexistent"
        ));
        assert_eq!(views.current(), "7th");
        assert_eq!(views.current_index().unwrap(), 1);
    }

    #[test]
    fn test_duplicates_and_empty() {
        let views = ViewSelector::new(["a", "b", "a"]).unwrap();
        assert_eq!(views.views(), ["a".to_string(), "b".to_string()]);
        assert!(matches!(
            ViewSelector::new(Vec::<String>::new()),
            Err(StackError::EmptyViews)
        ));
    }
}
