/*!
# Bitfield Codec

Maps named logical fields onto fixed bit ranges of the three replicated
32-bit words. The layout lives in [`LAYOUT`] as plain data so it can be
checked on its own (disjointness, word budget) without any ECS types.

```text
word 0 | HeadKind 0..6  | BodyKind 6..16 | FlagBits 16..24 | TeamBits 24..32 |
word 1 | Motion 0..5    | MotionTime 5..24                  | Gravity 24..32  |
word 2 | Knock 0..6     | DirX 6..12 | DirY 12..18 | DirZ 18..24 | spare     |
```
*/

use glam::Vec3;

/// Number of packed words replicated per actor.
pub const WORD_COUNT: usize = 3;

/// The literal replication payload of one actor.
pub type PackedWords = [u32; WORD_COUNT];

/// Bias used by the signed 6-bit direction axes: `stored = round(c * 31) + 31`.
pub const AXIS_BIAS: i32 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    HeadKind,
    BodyKind,
    FlagBits,
    TeamBits,
    Motion,
    MotionTime,
    GravityFactor,
    KnockFactor,
    KnockDirX,
    KnockDirY,
    KnockDirZ,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::HeadKind,
        Field::BodyKind,
        Field::FlagBits,
        Field::TeamBits,
        Field::Motion,
        Field::MotionTime,
        Field::GravityFactor,
        Field::KnockFactor,
        Field::KnockDirX,
        Field::KnockDirY,
        Field::KnockDirZ,
    ];

    pub const fn range(self) -> BitRange {
        LAYOUT[self as usize].1
    }
}

/// A shift/width pair inside one of the packed words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub word: usize,
    pub shift: u32,
    pub bits: u32,
}

impl BitRange {
    pub const fn new(word: usize, shift: u32, bits: u32) -> Self {
        Self { word, shift, bits }
    }

    /// Largest value the range can hold.
    pub const fn max_value(self) -> u32 {
        ((1u64 << self.bits) - 1) as u32
    }

    pub const fn mask(self) -> u32 {
        self.max_value() << self.shift
    }

    /// Clears the range then ORs in the value. Bits above the width are dropped,
    /// which is the wrapping behaviour MotionTime relies on.
    pub const fn encode(self, word: u32, value: u32) -> u32 {
        (word & !self.mask()) | (value.wrapping_shl(self.shift) & self.mask())
    }

    /// Like [`BitRange::encode`] but saturates at [`BitRange::max_value`].
    pub const fn encode_clamped(self, word: u32, value: u32) -> u32 {
        let max = self.max_value();
        let value = if value > max { max } else { value };
        self.encode(word, value)
    }

    pub const fn decode(self, word: u32) -> u32 {
        (word & self.mask()) >> self.shift
    }
}

/// Field table, indexed by `Field as usize`.
pub const LAYOUT: [(Field, BitRange); 11] = [
    (Field::HeadKind, BitRange::new(0, 0, 6)),
    (Field::BodyKind, BitRange::new(0, 6, 10)),
    (Field::FlagBits, BitRange::new(0, 16, 8)),
    (Field::TeamBits, BitRange::new(0, 24, 8)),
    (Field::Motion, BitRange::new(1, 0, 5)),
    (Field::MotionTime, BitRange::new(1, 5, 19)),
    (Field::GravityFactor, BitRange::new(1, 24, 8)),
    (Field::KnockFactor, BitRange::new(2, 0, 6)),
    (Field::KnockDirX, BitRange::new(2, 6, 6)),
    (Field::KnockDirY, BitRange::new(2, 12, 6)),
    (Field::KnockDirZ, BitRange::new(2, 18, 6)),
];

pub fn encode(words: &mut PackedWords, field: Field, value: u32) {
    let range = field.range();
    words[range.word] = range.encode(words[range.word], value);
}

pub fn encode_clamped(words: &mut PackedWords, field: Field, value: u32) {
    let range = field.range();
    words[range.word] = range.encode_clamped(words[range.word], value);
}

pub fn decode(words: &PackedWords, field: Field) -> u32 {
    let range = field.range();
    range.decode(words[range.word])
}

pub fn quantize_axis(component: f32) -> u32 {
    let scaled = (component.clamp(-1.0, 1.0) * AXIS_BIAS as f32).round() as i32;
    (scaled + AXIS_BIAS) as u32
}

pub fn dequantize_axis(stored: u32) -> f32 {
    let stored = stored.min(2 * AXIS_BIAS as u32) as i32;
    (stored - AXIS_BIAS) as f32 / AXIS_BIAS as f32
}

/// Renormalizes before quantizing so repeated encode/decode cycles do not drift.
/// A zero vector quantizes to the biased origin.
pub fn quantize_direction(direction: Vec3) -> [u32; 3] {
    let unit = direction.normalize_or_zero();
    [
        quantize_axis(unit.x),
        quantize_axis(unit.y),
        quantize_axis(unit.z),
    ]
}

pub fn dequantize_direction(stored: [u32; 3]) -> Vec3 {
    Vec3::new(
        dequantize_axis(stored[0]),
        dequantize_axis(stored[1]),
        dequantize_axis(stored[2]),
    )
    .normalize_or_zero()
}

/// Seconds to whole milliseconds, rounded. Negative input maps to 0.
pub fn seconds_to_millis(seconds: f32) -> u32 {
    (seconds.max(0.0) * 1000.0).round() as u32
}
