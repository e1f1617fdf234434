//! Stack instances and the units placed in them

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::Transform;
use crate::record::{Category, Record};

/// Whether units are held in place or handed to free dynamics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationMode {
    #[default]
    Fixed,
    Dynamic,
}

impl SimulationMode {
    pub fn toggled(self) -> Self {
        match self {
            SimulationMode::Fixed => SimulationMode::Dynamic,
            SimulationMode::Dynamic => SimulationMode::Fixed,
        }
    }
}

/// A placed block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// 1-based, contiguous at build time; gaps appear once units are removed
    pub sequence_index: u32,
    /// 1-based
    pub layer_index: u32,
    /// Slot within the layer, left to right
    pub position_in_layer: u32,
    /// `None` when the record's mastery level was out of range
    pub category: Option<Category>,
    pub transform: Transform,
    pub simulation_mode: SimulationMode,
    record: Arc<Record>,
}

impl Unit {
    pub(crate) fn new(
        sequence_index: u32,
        layer_index: u32,
        position_in_layer: u32,
        category: Option<Category>,
        transform: Transform,
        record: Arc<Record>,
    ) -> Self {
        Self {
            sequence_index,
            layer_index,
            position_in_layer,
            category,
            transform,
            simulation_mode: SimulationMode::Fixed,
            record,
        }
    }

    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.transform.translation
    }

    /// The record this unit was built from
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn is(&self, category: Category) -> bool {
        self.category == Some(category)
    }
}

/// One named stack: its anchor, dataset and placed units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackDefinition {
    pub name: String,
    /// Moves up one layer at a time while building
    pub anchor: Transform,
    initial_anchor: Transform,
    records: Vec<Arc<Record>>,
    pub(crate) units: Vec<Unit>,
    pub(crate) placed_count: u32,
    pub(crate) built: bool,
    simulation_mode: SimulationMode,
}

impl StackDefinition {
    /// Create an unbuilt stack; the anchor is captured as the rebuild origin
    pub fn new(name: impl Into<String>, anchor: Transform, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            anchor,
            initial_anchor: anchor,
            records: records.into_iter().map(Arc::new).collect(),
            units: Vec::new(),
            placed_count: 0,
            built: false,
            simulation_mode: SimulationMode::Fixed,
        }
    }

    pub fn initial_anchor(&self) -> &Transform {
        &self.initial_anchor
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn placed_count(&self) -> u32 {
        self.placed_count
    }

    /// True once the builder has run to completion at least once
    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn simulation_mode(&self) -> SimulationMode {
        self.simulation_mode
    }

    /// Set the mode of the whole stack (every unit follows the aggregate)
    pub fn set_simulation_mode(&mut self, mode: SimulationMode) {
        self.simulation_mode = mode;
        for unit in &mut self.units {
            unit.simulation_mode = mode;
        }
    }

    pub fn unit(&self, sequence_index: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.sequence_index == sequence_index)
    }

    pub fn units_of(&self, category: Category) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.is(category))
    }

    /// Number of distinct layers among the current units
    pub fn layer_count(&self) -> usize {
        self.layers().len()
    }

    /// Current units grouped by layer, bottom first
    pub fn layers(&self) -> Vec<&[Unit]> {
        self.units
            .chunk_by(|a, b| a.layer_index == b.layer_index)
            .collect()
    }

    /// Remove every unit of `category`, returning the removed sequence indices.
    /// Survivors keep their indices.
    pub(crate) fn remove_category(&mut self, category: Category) -> Vec<u32> {
        let mut removed = Vec::new();
        self.units.retain(|u| {
            if u.is(category) {
                removed.push(u.sequence_index);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Put the anchor back at its captured origin and drop all units
    pub(crate) fn clear(&mut self) {
        self.anchor = self.initial_anchor;
        self.units.clear();
        self.placed_count = 0;
        self.simulation_mode = SimulationMode::Fixed;
    }
}
