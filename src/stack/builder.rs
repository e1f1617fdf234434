//! Stack construction
//!
//! Units are laid out layer by layer on top of the stack's anchor. Each layer
//! holds up to `layer_capacity` blocks side by side; after a layer is placed
//! the anchor rises by one block height plus spacing, and every even layer is
//! turned a quarter about the raised anchor so consecutive layers cross.
//!
//! Building is deterministic: the same dataset and initial anchor always give
//! the same unit sequence, down to the bit.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::partition::partition;
use super::state::{StackDefinition, Unit};
use super::transform::Transform;
use crate::error::{Result, StackError};
use crate::settings::{CategoryPolicy, Settings};

/// Summary of one build run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub layers: usize,
    pub units: usize,
    /// Units placed without a category (skip-tag policy only)
    pub untagged: usize,
}

/// Lays out units for a [`StackDefinition`] from its records
#[derive(Debug, Clone, Default)]
pub struct StackBuilder {
    settings: Settings,
}

impl StackBuilder {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Place every record of `def` as a unit, moving its anchor up as layers
    /// complete. The definition must be empty (fresh, or cleared by
    /// [`StackBuilder::rebuild`]).
    pub fn build(&self, def: &mut StackDefinition) -> Result<BuildReport> {
        if def.placed_count != 0 || !def.units.is_empty() {
            return Err(StackError::AlreadyBuilt(def.name.clone()));
        }
        self.check_categories(def)?;

        let capacity = self.settings.layer_capacity;
        let records = def.records().to_vec();
        let layers = partition(&records, capacity)?;

        let stride = self.settings.slot_stride();
        let rise = self.settings.layer_rise();
        let mut report = BuildReport::default();

        for (i, layer) in layers.iter().enumerate() {
            let layer_index = i as u32 + 1;
            let first = def.units.len();

            for record in layer.iter() {
                def.placed_count += 1;
                let sequence_index = def.placed_count;
                let position_in_layer = (sequence_index - 1) % capacity as u32;

                let category = record.category();
                if category.is_none() {
                    log::warn!(
                        "Stack {}: record {} has mastery level {} with no category, placing untagged",
                        def.name,
                        record.id,
                        record.mastery_level
                    );
                    report.untagged += 1;
                }

                // Slot 0 sits one stride left of the anchor; short layers are not re-centred
                let offset = Vec3::new(-stride + position_in_layer as f32 * stride, 0.0, 0.0);
                let transform = Transform {
                    translation: def.anchor.local_offset(offset),
                    rotation: def.anchor.rotation,
                    // Block size is absolute; the anchor's scale does not stretch blocks
                    scale: self.settings.block_size,
                };

                def.units.push(Unit::new(
                    sequence_index,
                    layer_index,
                    position_in_layer,
                    category,
                    transform,
                    record.clone(),
                ));
            }

            def.anchor.translation.y += rise;

            if layer_index % 2 == 0 {
                let pivot = def.anchor.translation;
                for unit in &mut def.units[first..] {
                    unit.transform.rotate_around(pivot, Vec3::Y, FRAC_PI_2);
                }
            }

            log::debug!(
                "Stack {}: layer {} placed {} units, anchor y={:.3}",
                def.name,
                layer_index,
                layer.len(),
                def.anchor.translation.y
            );
        }

        report.layers = layers.len();
        report.units = def.units.len();
        def.built = true;

        log::info!(
            "Built stack {}: {} units in {} layers",
            def.name,
            report.units,
            report.layers
        );
        Ok(report)
    }

    /// Restore the initial anchor, discard all units and build again
    pub fn rebuild(&self, def: &mut StackDefinition) -> Result<BuildReport> {
        self.check_categories(def)?;
        def.clear();
        def.built = false;
        self.build(def)
    }

    fn check_categories(&self, def: &StackDefinition) -> Result<()> {
        if self.settings.category_policy != CategoryPolicy::RejectBuild {
            return Ok(());
        }
        match def.records().iter().find(|r| r.category().is_none()) {
            Some(record) => Err(StackError::InvalidCategory {
                stack: def.name.clone(),
                record_id: record.id,
                mastery_level: record.mastery_level,
            }),
            None => Ok(()),
        }
    }
}
