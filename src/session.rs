//! Timed stability test
//!
//! Each stack runs its own countdown state machine:
//!
//! ```text
//! Idle --start(n)--> CountingDown(n) --tick--> ... --tick--> Completed
//!   ^                                                            |
//!   +------------------------------reset-------------------------+
//! ```
//!
//! Ticks come from the host (one per elapsed second); the controller owns no
//! clock. When the countdown reaches zero every unit of the removed category
//! is taken out of the stack and the survivors switch to dynamic simulation.
//! Reset rebuilds the stack from its initial anchor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};
use crate::record::Category;
use crate::stack::{BuildReport, SimulationMode, StackBuilder, StackDefinition, StackRegistry};
use crate::view::ViewSelector;

/// Countdown phase of one stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    CountingDown { remaining: u32 },
    Completed,
}

impl SessionState {
    /// Seconds left, while counting down
    pub fn remaining(&self) -> Option<u32> {
        match self {
            SessionState::CountingDown { remaining } => Some(*remaining),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::CountingDown { .. })
    }
}

/// Observable session changes, for countdown displays and sound cues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started { stack: String, duration: u32 },
    /// Emitted on every decrement
    Tick { stack: String, remaining: u32 },
    /// Sequence indices of the removed units
    Completed { stack: String, removed: Vec<u32> },
    ModeChanged { stack: String, mode: SimulationMode },
    Reset { stack: String },
}

/// Drives sessions for every stack in a registry.
///
/// Every operation takes `&mut self`, so one controller is one unit of
/// exclusion: a host sharing it across threads needs a single lock around the
/// whole controller, even for different stack names. Hosts that want stacks
/// to run concurrently give each stack its own controller (a registry holding
/// that one stack) and lock those independently.
#[derive(Debug, Clone)]
pub struct SessionController {
    registry: StackRegistry,
    builder: StackBuilder,
    sessions: BTreeMap<String, SessionState>,
}

impl SessionController {
    pub fn new(registry: StackRegistry, builder: StackBuilder) -> Self {
        let sessions = registry
            .names()
            .map(|name| (name.to_string(), SessionState::Idle))
            .collect();
        Self {
            registry,
            builder,
            sessions,
        }
    }

    pub fn registry(&self) -> &StackRegistry {
        &self.registry
    }

    pub fn builder(&self) -> &StackBuilder {
        &self.builder
    }

    pub fn removed_category(&self) -> Category {
        self.builder.settings().removed_category
    }

    /// Initial build of every stack not yet built
    pub fn build_all(&mut self) -> Result<Vec<BuildReport>> {
        self.registry.build_all(&self.builder)
    }

    pub fn state(&self, name: &str) -> Result<SessionState> {
        self.sessions
            .get(name)
            .copied()
            .ok_or_else(|| StackError::NotFound(name.to_string()))
    }

    pub fn stack(&self, name: &str) -> Result<&StackDefinition> {
        self.registry.get(name)
    }

    /// The stack shown by the selector's current view
    pub fn current_stack(&self, views: &ViewSelector) -> Result<&StackDefinition> {
        self.registry.get(views.current())
    }

    /// Begin a countdown of `duration` ticks. A zero duration completes at once.
    pub fn start(&mut self, name: &str, duration: u32) -> Result<Vec<SessionEvent>> {
        let def = self.registry.get(name)?;
        if !def.is_built() {
            return Err(StackError::NotReady(name.to_string()));
        }
        match self.state(name)? {
            SessionState::CountingDown { .. } => {
                return Err(StackError::SessionAlreadyRunning(name.to_string()));
            }
            SessionState::Completed => {
                return Err(StackError::SessionNotReset(name.to_string()));
            }
            SessionState::Idle => {}
        }

        log::info!("Stack {}: starting {}s test", name, duration);
        let mut events = vec![SessionEvent::Started {
            stack: name.to_string(),
            duration,
        }];

        if duration == 0 {
            events.extend(self.complete(name)?);
        } else {
            self.set_state(name, SessionState::CountingDown { remaining: duration });
        }
        Ok(events)
    }

    /// Deliver one elapsed time unit. Stacks that are not counting down ignore it.
    pub fn tick(&mut self, name: &str) -> Result<Vec<SessionEvent>> {
        let remaining = match self.state(name)? {
            SessionState::CountingDown { remaining } => remaining.saturating_sub(1),
            _ => return Ok(Vec::new()),
        };

        log::debug!("Stack {}: {} remaining", name, remaining);
        let mut events = vec![SessionEvent::Tick {
            stack: name.to_string(),
            remaining,
        }];

        if remaining == 0 {
            events.extend(self.complete(name)?);
        } else {
            self.set_state(name, SessionState::CountingDown { remaining });
        }
        Ok(events)
    }

    /// Tick every running session, in registry order
    pub fn tick_all(&mut self) -> Result<Vec<SessionEvent>> {
        let running: Vec<String> = self
            .registry
            .names()
            .filter(|name| self.sessions.get(*name).is_some_and(SessionState::is_running))
            .map(str::to_string)
            .collect();

        let mut events = Vec::new();
        for name in running {
            events.extend(self.tick(&name)?);
        }
        Ok(events)
    }

    /// Cancel any countdown, rebuild the stack from its initial anchor and go Idle
    pub fn reset(&mut self, name: &str) -> Result<Vec<SessionEvent>> {
        let def = self.registry.get_mut(name)?;
        if !def.is_built() {
            return Err(StackError::NotReady(name.to_string()));
        }

        let report = self.builder.rebuild(def)?;
        self.set_state(name, SessionState::Idle);

        log::info!("Stack {}: reset, {} units rebuilt", name, report.units);
        Ok(vec![SessionEvent::Reset {
            stack: name.to_string(),
        }])
    }

    /// Flip the whole stack between fixed and dynamic simulation
    pub fn toggle_simulation_mode(&mut self, name: &str) -> Result<Vec<SessionEvent>> {
        let def = self.registry.get_mut(name)?;
        if !def.is_built() {
            return Err(StackError::NotReady(name.to_string()));
        }

        let mode = def.simulation_mode().toggled();
        def.set_simulation_mode(mode);
        log::debug!("Stack {}: simulation mode {:?}", name, mode);
        Ok(vec![SessionEvent::ModeChanged {
            stack: name.to_string(),
            mode,
        }])
    }

    fn complete(&mut self, name: &str) -> Result<Vec<SessionEvent>> {
        let category = self.removed_category();
        let def = self.registry.get_mut(name)?;

        let removed = def.remove_category(category);
        def.set_simulation_mode(SimulationMode::Dynamic);
        self.set_state(name, SessionState::Completed);

        log::info!(
            "Stack {}: test complete, removed {} {} units",
            name,
            removed.len(),
            category.tag()
        );
        Ok(vec![
            SessionEvent::Completed {
                stack: name.to_string(),
                removed,
            },
            SessionEvent::ModeChanged {
                stack: name.to_string(),
                mode: SimulationMode::Dynamic,
            },
        ])
    }

    fn set_state(&mut self, name: &str, state: SessionState) {
        self.sessions.insert(name.to_string(), state);
    }
}
