use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// COLLIDERS
// ============================================================================

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CollisionLayers: u32 {
        const STATIC      = 1 << 0;
        const CHARACTERS  = 1 << 1;
        const CREATURES   = 1 << 2;
        const PROJECTILES = 1 << 3;
        const PROPS       = 1 << 4;
        const TRIGGERS    = 1 << 5;
        /// Members pass through characters and creatures.
        const PIERCING    = 1 << 6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionFilter {
    pub belongs_to: CollisionLayers,
    pub collides_with: CollisionLayers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Capsule { radius: f32, height: f32 },
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColliderShape {
    pub kind: ShapeKind,
    pub filter: CollisionFilter,
}

/// Collider data shared by reference between every actor spawned from the
/// same template. Writers must call [`Collider::make_unique`] first.
#[derive(Component, Debug, Clone)]
pub struct Collider(Arc<ColliderShape>);

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self(Arc::new(shape))
    }

    pub fn shape(&self) -> &ColliderShape {
        &self.0
    }

    pub fn filter(&self) -> CollisionFilter {
        self.0.filter
    }

    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.0) == 1 && Arc::weak_count(&self.0) == 0
    }

    /// True when both handles point at the same shared collider instance.
    pub fn shares_with(&self, other: &Collider) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Copy-on-write: repoints this handle at a private copy if the data is shared.
    /// Returns whether a copy was made.
    pub fn make_unique(&mut self) -> bool {
        if self.is_unique() {
            return false;
        }
        self.0 = Arc::new(ColliderShape::clone(&self.0));
        true
    }

    /// Mutable access to collider data. Calling this on a shared collider is a bug.
    pub fn shape_mut(&mut self) -> &mut ColliderShape {
        debug_assert!(
            self.is_unique(),
            "collider must be made unique before it is mutated"
        );
        Arc::make_mut(&mut self.0)
    }

    /// Sets or clears a membership layer, uniquifying first.
    pub fn set_membership(&mut self, layer: CollisionLayers, on: bool) {
        if self.filter().belongs_to.contains(layer) == on {
            return;
        }
        self.make_unique();
        self.shape_mut().filter.belongs_to.set(layer, on);
    }
}

// ============================================================================
// BODY STATE
// ============================================================================

/// Per-entity mass. Zero inverse mass means immovable.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsMass {
    pub inverse_mass: f32,
}

impl Default for PhysicsMass {
    fn default() -> Self {
        Self { inverse_mass: 1.0 }
    }
}

impl PhysicsMass {
    pub fn from_mass(mass: f32) -> Self {
        let inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        Self { inverse_mass }
    }

    pub fn is_immovable(&self) -> bool {
        self.inverse_mass == 0.0
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Velocity handed to the physics step, rebuilt every tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearVelocity(pub Vec3);

/// Velocity the actor wants from its own locomotion.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct DesiredVelocity(pub Vec3);

/// Yaw in radians around +Y.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Facing(pub f32);

// ============================================================================
// EVENTS
// ============================================================================

/// A collision or trigger contact reported by the physics step.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactEvent {
    pub entity: Entity,
    /// Contact normal pointing away from the surface, towards the actor.
    pub normal: Vec3,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct KnockbackEvent {
    pub target: Entity,
    pub direction: Vec3,
    /// Impulse magnitude in ticks; clamped to 63.
    pub factor: u32,
}
