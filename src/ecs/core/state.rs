use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::ecs::core::bitfield::{self, Field, PackedWords};
use crate::ecs::core::kinds::{BodyKind, Flags, HeadKind, Motion, Teams};

/// Authoritative, replicated actor state. The packed words are the wire payload.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreState {
    words: PackedWords,
}

impl CoreState {
    pub fn new(head: HeadKind, body: BodyKind) -> Self {
        let mut state = Self::default();
        state.set_head(head);
        state.set_body(body);
        state
    }

    pub fn from_words(words: PackedWords) -> Self {
        Self { words }
    }

    pub fn words(&self) -> PackedWords {
        self.words
    }

    fn get(&self, field: Field) -> u32 {
        bitfield::decode(&self.words, field)
    }

    fn put(&mut self, field: Field, value: u32) {
        bitfield::encode(&mut self.words, field, value);
    }

    pub fn head_raw(&self) -> u32 {
        self.get(Field::HeadKind)
    }

    pub fn head(&self) -> Option<HeadKind> {
        HeadKind::from_raw(self.head_raw())
    }

    pub fn set_head(&mut self, head: HeadKind) {
        self.put(Field::HeadKind, head.raw());
    }

    pub fn body_raw(&self) -> u32 {
        self.get(Field::BodyKind)
    }

    pub fn body(&self) -> Option<BodyKind> {
        BodyKind::from_raw(self.body_raw())
    }

    pub fn set_body(&mut self, body: BodyKind) {
        self.put(Field::BodyKind, body.raw());
    }

    pub fn flags(&self) -> Flags {
        Flags::from_bits_retain(self.get(Field::FlagBits) as u8)
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.put(Field::FlagBits, flags.bits() as u32);
    }

    pub fn set_flag(&mut self, flag: Flags, on: bool) {
        let mut flags = self.flags();
        flags.set(flag, on);
        self.set_flags(flags);
    }

    pub fn teams(&self) -> Teams {
        Teams::from_bits_retain(self.get(Field::TeamBits) as u8)
    }

    pub fn set_teams(&mut self, teams: Teams) {
        self.put(Field::TeamBits, teams.bits() as u32);
    }

    /// Unknown raw values read as `Idle` so presentation always has a frame to show.
    pub fn motion(&self) -> Motion {
        Motion::from_raw(self.get(Field::Motion)).unwrap_or_default()
    }

    /// Switching to a different motion restarts its clock.
    pub fn set_motion(&mut self, motion: Motion) {
        if self.get(Field::Motion) != motion.raw() {
            self.put(Field::Motion, motion.raw());
            self.put(Field::MotionTime, 0);
        }
    }

    pub fn motion_time_ms(&self) -> u32 {
        self.get(Field::MotionTime)
    }

    pub fn set_motion_time_ms(&mut self, millis: u32) {
        self.put(Field::MotionTime, millis);
    }

    pub fn advance_motion_time(&mut self, millis: u32) {
        let next = self.motion_time_ms().wrapping_add(millis);
        self.put(Field::MotionTime, next);
    }

    pub fn gravity_factor(&self) -> u8 {
        self.get(Field::GravityFactor) as u8
    }

    pub fn set_gravity_factor(&mut self, factor: u32) {
        bitfield::encode_clamped(&mut self.words, Field::GravityFactor, factor);
    }

    pub fn is_grounded(&self) -> bool {
        self.gravity_factor() == 0
    }

    pub fn knock_factor(&self) -> u8 {
        self.get(Field::KnockFactor) as u8
    }

    /// `None` while no knockback is active; the stored axes are stale then.
    pub fn knock_direction(&self) -> Option<Vec3> {
        if self.knock_factor() == 0 {
            return None;
        }
        Some(bitfield::dequantize_direction([
            self.get(Field::KnockDirX),
            self.get(Field::KnockDirY),
            self.get(Field::KnockDirZ),
        ]))
    }

    /// Starts a knockback impulse. A zero direction or factor clears any active knock.
    pub fn apply_knock(&mut self, direction: Vec3, factor: u32) {
        if direction.length_squared() <= f32::EPSILON || factor == 0 {
            self.put(Field::KnockFactor, 0);
            return;
        }
        let [x, y, z] = bitfield::quantize_direction(direction);
        self.put(Field::KnockDirX, x);
        self.put(Field::KnockDirY, y);
        self.put(Field::KnockDirZ, z);
        bitfield::encode_clamped(&mut self.words, Field::KnockFactor, factor);
    }

    pub fn decay_knock(&mut self) {
        let next = self.knock_factor().saturating_sub(1);
        self.put(Field::KnockFactor, next as u32);
    }
}

bitflags! {
    /// Field families whose core value differs from the shadow copy.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ChangedFields: u8 {
        const HEAD    = 1 << 0;
        const BODY    = 1 << 1;
        const FLAGS   = 1 << 2;
        const TEAMS   = 1 << 3;
        const GRAVITY = 1 << 4;
        const KNOCK   = 1 << 5;
    }
}

/// Previous-tick mirror of the tracked [`CoreState`] fields.
///
/// Only the switch systems and the physics shadow pass write it, and each
/// field is synced right after the side effect for that field has been applied.
/// A zeroed shadow makes every non-default core field look freshly changed,
/// which is how new actors get their initial switches.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowState {
    pub head: u32,
    pub body: u32,
    pub flags: Flags,
    pub teams: Teams,
    pub gravity_factor: u8,
    pub knock_factor: u8,
}

impl ShadowState {
    /// Shadow that already agrees with `core`, for entities that need no initial switch.
    pub fn mirror(core: &CoreState) -> Self {
        Self {
            head: core.head_raw(),
            body: core.body_raw(),
            flags: core.flags(),
            teams: core.teams(),
            gravity_factor: core.gravity_factor(),
            knock_factor: core.knock_factor(),
        }
    }

    pub fn diff(&self, core: &CoreState) -> ChangedFields {
        let mut changed = ChangedFields::empty();
        changed.set(ChangedFields::HEAD, self.head != core.head_raw());
        changed.set(ChangedFields::BODY, self.body != core.body_raw());
        changed.set(ChangedFields::FLAGS, self.flags != core.flags());
        changed.set(ChangedFields::TEAMS, self.teams != core.teams());
        changed.set(ChangedFields::GRAVITY, self.gravity_factor != core.gravity_factor());
        changed.set(ChangedFields::KNOCK, self.knock_factor != core.knock_factor());
        changed
    }

    pub fn sync_head(&mut self, core: &CoreState) {
        self.head = core.head_raw();
    }

    pub fn sync_body(&mut self, core: &CoreState) {
        self.body = core.body_raw();
    }

    pub fn sync_flags(&mut self, core: &CoreState) {
        self.flags = core.flags();
    }

    pub fn sync_teams(&mut self, core: &CoreState) {
        self.teams = core.teams();
    }

    pub fn sync_physics(&mut self, core: &CoreState) {
        self.gravity_factor = core.gravity_factor();
        self.knock_factor = core.knock_factor();
    }
}
