//! Contracts between the locomotion core and whatever physics engine hosts it.

use glam::{Quat, Vec3};

/// Bitmask of collider layers. Bit `n` set means layer `n` is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// No layer.
    pub const NONE: Self = Self(0);

    /// Mask containing only layer `n`. Layers past 31 do not exist and give [`Self::NONE`].
    #[must_use]
    pub const fn layer(n: u32) -> Self {
        match 1u32.checked_shl(n) {
            Some(bits) => Self(bits),
            None => Self::NONE,
        }
    }

    /// Whether any of the layers in `bits` is part of this mask.
    #[must_use]
    pub const fn intersects(self, bits: u32) -> bool {
        self.0 & bits != 0
    }

    /// Whether layer `n` is part of this mask.
    #[must_use]
    pub const fn contains(self, n: u32) -> bool {
        self.intersects(Self::layer(n).0)
    }
}

/// Handle onto the rigid body a controller drives.
///
/// Positions are measured at the character's base. Writes take effect at the
/// next physics resolution, not immediately in the simulated world.
pub trait RigidBodyProxy {
    /// Current base position.
    fn position(&self) -> Vec3;
    /// Current orientation.
    fn rotation(&self) -> Quat;
    /// Current linear velocity.
    fn linear_velocity(&self) -> Vec3;
    /// Moves the body to `position` (base-relative).
    fn set_position(&mut self, position: Vec3);
    /// Sets the body's orientation.
    fn set_rotation(&mut self, rotation: Quat);
    /// Overwrites the body's linear velocity.
    fn set_linear_velocity(&mut self, velocity: Vec3);
    /// Applies an instantaneous impulse.
    fn add_impulse(&mut self, impulse: Vec3);
}

/// Synchronous downward ray query used for ground detection.
pub trait GroundProbe {
    /// Returns `true` if a collider on a layer in `mask` lies within
    /// `max_distance` straight below `origin`.
    fn cast_down(&self, origin: Vec3, max_distance: f32, mask: LayerMask) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_contains() {
        let mask = LayerMask::layer(0);
        assert!(mask.contains(0));
        assert!(!mask.contains(1));
        assert!(LayerMask::ALL.contains(31));
        assert!(!LayerMask::NONE.contains(0));
    }

    #[test]
    fn test_layer_mask_intersects_bits() {
        let mask = LayerMask(0b0110);
        assert!(mask.intersects(0b0100));
        assert!(!mask.intersects(0b1001));
    }

    #[test]
    fn test_out_of_range_layer_is_empty() {
        assert_eq!(LayerMask::layer(31), LayerMask(1 << 31));
        assert_eq!(LayerMask::layer(32), LayerMask::NONE);
        assert_eq!(LayerMask::layer(u32::MAX), LayerMask::NONE);
        assert!(!LayerMask::ALL.contains(40));
    }
}
