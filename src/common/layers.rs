//! Bitset-based collision layer filtering.
//!
//! Each collider belongs to one or more of 32 layers (a `u32` bitmask).
//! `LayerSettings` maps each layer to the mask of layers it collides with.
//! The filter runs before any narrow-phase test.

use serde::{Deserialize, Serialize};

use super::error::PhysicsError;

/// Number of available collision layers.
pub const MAX_LAYERS: usize = 32;

/// The default layer (bit 0). It cannot be excluded from any layer's mask.
pub const DEFAULT_LAYER: u32 = 1;

/// Mask matching every layer.
pub const ALL_LAYERS: u32 = u32::MAX;

/// Per-layer collision mask table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSettings {
    masks: [u32; MAX_LAYERS],
}

impl LayerSettings {
    /// Creates settings where every layer collides with every other layer.
    pub fn new() -> Self {
        Self {
            masks: [ALL_LAYERS; MAX_LAYERS],
        }
    }

    /// Sets the full collision mask for a layer. The default layer is
    /// non-excludable and is re-added to whatever mask is supplied.
    pub fn set_mask(&mut self, layer: usize, mask: u32) -> Result<(), PhysicsError> {
        if layer >= MAX_LAYERS {
            return Err(PhysicsError::InvalidLayer(layer));
        }
        self.masks[layer] = mask | DEFAULT_LAYER;
        Ok(())
    }

    /// Enables or disables collisions between two layers, in both directions.
    pub fn set_should_collide(
        &mut self,
        layer: usize,
        other: usize,
        enabled: bool,
    ) -> Result<(), PhysicsError> {
        if layer >= MAX_LAYERS {
            return Err(PhysicsError::InvalidLayer(layer));
        }
        if other >= MAX_LAYERS {
            return Err(PhysicsError::InvalidLayer(other));
        }
        if enabled {
            self.masks[layer] |= 1 << other;
            self.masks[other] |= 1 << layer;
        } else {
            self.masks[layer] &= !(1 << other);
            self.masks[other] &= !(1 << layer);
            // Bit 0 stays on regardless
            self.masks[layer] |= DEFAULT_LAYER;
            self.masks[other] |= DEFAULT_LAYER;
        }
        Ok(())
    }

    /// The combined mask for a membership bitmask: the union of the masks of
    /// every layer the bitmask belongs to.
    pub fn mask_for(&self, layers: u32) -> u32 {
        let mut mask = 0;
        let mut remaining = layers;
        while remaining != 0 {
            let bit = remaining.trailing_zeros() as usize;
            mask |= self.masks[bit];
            remaining &= remaining - 1;
        }
        mask
    }

    /// Whether two membership bitmasks are allowed to collide. The check is
    /// symmetric: a pair is only filtered out when *neither* side's mask
    /// admits the other's membership.
    pub fn should_collide(&self, layers_a: u32, layers_b: u32) -> bool {
        if layers_a == 0 || layers_b == 0 {
            return false;
        }
        (self.mask_for(layers_a) & layers_b) != 0 || (self.mask_for(layers_b) & layers_a) != 0
    }
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self::new()
    }
}
