//! Named stack instances, kept in declaration order

use super::builder::{BuildReport, StackBuilder};
use super::state::StackDefinition;
use crate::error::{Result, StackError};

/// Owns every [`StackDefinition`], keyed by unique name
#[derive(Debug, Clone, Default)]
pub struct StackRegistry {
    stacks: Vec<StackDefinition>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self { stacks: Vec::new() }
    }

    /// Add a stack. Names must be unique; a duplicate leaves the registry unchanged.
    pub fn register(&mut self, definition: StackDefinition) -> Result<()> {
        if self.contains(&definition.name) {
            return Err(StackError::DuplicateStack(definition.name));
        }
        log::debug!("Registered stack {}", definition.name);
        self.stacks.push(definition);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stacks.iter().any(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Result<&StackDefinition> {
        self.stacks
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| StackError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut StackDefinition> {
        self.stacks
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| StackError::NotFound(name.to_string()))
    }

    /// All stacks in declaration order
    pub fn all(&self) -> &[StackDefinition] {
        &self.stacks
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stacks.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Run the initial build of every stack that has not been built yet
    pub fn build_all(&mut self, builder: &StackBuilder) -> Result<Vec<BuildReport>> {
        let mut reports = Vec::with_capacity(self.stacks.len());
        for def in self.stacks.iter_mut().filter(|s| !s.is_built()) {
            reports.push(builder.build(def)?);
        }
        Ok(reports)
    }
}
