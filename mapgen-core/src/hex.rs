//! Hex board geometry with cube coordinates
//!
//! Positions and displacement vectors share one type, [`Cube`], whose three
//! components always sum to zero. Rings and spirals are produced as
//! restartable iterators; their ordering is what fixes the canonical
//! numbering of board slots (see [`spiral_index`]).

use crate::error::{HexError, OperandError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Board radius (distance from center to the outermost slot ring)
pub const BOARD_RADIUS: u32 = 4;

/// Cube hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Cube {
    q: i32,
    r: i32,
    s: i32,
}

impl Cube {
    pub const ORIGIN: Cube = Cube::axial(0, 0);

    /// Build a coordinate, rejecting triples that do not sum to zero
    pub fn new(q: i32, r: i32, s: i32) -> Result<Self, HexError> {
        let sum = q as i64 + r as i64 + s as i64;
        if sum != 0 {
            return Err(HexError::InvalidCoordinate { sum });
        }
        Ok(Self { q, r, s })
    }

    /// Build from the two axial components; `s` is derived
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn s(&self) -> i32 {
        self.s
    }

    /// Convert a loosely shaped JSON operand into a coordinate.
    ///
    /// Accepts `{"q": .., "r": .., "s": ..}` or `[q, r, s]`.
    pub fn from_value(value: &Value) -> Result<Self, HexError> {
        operand(value, "conversion")
    }

    /// Distance from the origin: `(|q| + |r| + |s|) / 2`, which for a
    /// zero-sum triple is the largest component magnitude
    pub fn length(&self) -> u32 {
        self.q
            .unsigned_abs()
            .max(self.r.unsigned_abs())
            .max(self.s.unsigned_abs())
    }

    /// Build from wide components, failing if any does not fit in `i32`
    fn from_wide(q: i64, r: i64, s: i64, op: &'static str) -> Result<Self, HexError> {
        let narrow = |v: i64| i32::try_from(v).map_err(|_| HexError::Overflow { op });
        Self::new(narrow(q)?, narrow(r)?, narrow(s)?)
    }

    fn wide(self) -> [i64; 3] {
        [self.q as i64, self.r as i64, self.s as i64]
    }

    pub fn checked_add(self, other: Cube) -> Result<Self, HexError> {
        let [q, r, s] = self.wide();
        let [oq, or, os] = other.wide();
        Self::from_wide(q + oq, r + or, s + os, "+")
    }

    pub fn checked_sub(self, other: Cube) -> Result<Self, HexError> {
        let [q, r, s] = self.wide();
        let [oq, or, os] = other.wide();
        Self::from_wide(q - oq, r - or, s - os, "-")
    }

    pub fn checked_neg(self) -> Result<Self, HexError> {
        let [q, r, s] = self.wide();
        Self::from_wide(-q, -r, -s, "-")
    }

    pub fn checked_mul(self, k: i32) -> Result<Self, HexError> {
        let [q, r, s] = self.wide();
        let k = k as i64;
        Self::from_wide(q * k, r * k, s * k, "*")
    }

    /// Divide each component by `k`, truncating toward zero
    pub fn checked_div(self, k: i32) -> Result<Self, HexError> {
        if k == 0 {
            return Err(OperandError::DivisionByZero.into());
        }
        let [q, r, s] = self.wide();
        let k = k as i64;
        Self::from_wide(q / k, r / k, s / k, "//")
    }

    pub fn checked_add_value(self, other: &Value) -> Result<Self, HexError> {
        self.checked_add(operand(other, "+")?)
    }

    pub fn checked_sub_value(self, other: &Value) -> Result<Self, HexError> {
        self.checked_sub(operand(other, "-")?)
    }

    pub fn checked_mul_value(self, k: &Value) -> Result<Self, HexError> {
        self.checked_mul(scalar_from_value(k, "*")?)
    }

    pub fn checked_div_value(self, k: &Value) -> Result<Self, HexError> {
        self.checked_div(scalar_from_value(k, "//")?)
    }
}

impl TryFrom<Value> for Cube {
    type Error = HexError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Cube::from_value(&value)
    }
}

impl TryFrom<(i32, i32, i32)> for Cube {
    type Error = HexError;

    fn try_from((q, r, s): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Cube::new(q, r, s)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

// The operators follow integer semantics and overflow like `i32` does; use
// the `checked_*` methods for untrusted input.

impl Add for Cube {
    type Output = Cube;

    fn add(self, other: Cube) -> Cube {
        Cube::axial(self.q + other.q, self.r + other.r)
    }
}

impl Sub for Cube {
    type Output = Cube;

    fn sub(self, other: Cube) -> Cube {
        Cube::axial(self.q - other.q, self.r - other.r)
    }
}

impl Neg for Cube {
    type Output = Cube;

    fn neg(self) -> Cube {
        Cube::axial(-self.q, -self.r)
    }
}

impl Mul<i32> for Cube {
    type Output = Cube;

    fn mul(self, k: i32) -> Cube {
        Cube::axial(self.q * k, self.r * k)
    }
}

/// Name used in operand error messages for a JSON value
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn component(value: &Value, op: &'static str) -> Result<i32, HexError> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            OperandError::IncompatibleType {
                op,
                left: "int",
                right: type_name(value),
            }
            .into()
        })
}

fn operand(value: &Value, op: &'static str) -> Result<Cube, HexError> {
    match value {
        Value::Array(items) => {
            if items.len() != 3 {
                return Err(OperandError::WrongLength { len: items.len() }.into());
            }
            Cube::new(
                component(&items[0], op)?,
                component(&items[1], op)?,
                component(&items[2], op)?,
            )
        }
        Value::Object(map) => match (map.get("q"), map.get("r"), map.get("s")) {
            (Some(q), Some(r), Some(s)) => {
                Cube::new(component(q, op)?, component(r, op)?, component(s, op)?)
            }
            _ => Err(OperandError::WrongKeys {
                found: map.keys().cloned().collect(),
            }
            .into()),
        },
        other => Err(OperandError::IncompatibleType {
            op,
            left: "Cube",
            right: type_name(other),
        }
        .into()),
    }
}

/// Accept only integer scalars for `*` and `//`
pub fn scalar_from_value(value: &Value, op: &'static str) -> Result<i32, HexError> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| {
            OperandError::IncompatibleType {
                op,
                left: "Cube",
                right: type_name(value),
            }
            .into()
        })
}

// ============================================================================
// DIRECTIONS
// ============================================================================

/// Neighbor directions, 60 degrees apart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    SE,
    S,
    SW,
    NW,
}

impl Direction {
    /// Table order drives ring traversal and must not change
    pub const ALL: [Direction; 6] = [
        Direction::N,
        Direction::NE,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::NW,
    ];

    pub const fn vector(self) -> Cube {
        match self {
            Direction::N => Cube::axial(0, -1),
            Direction::NE => Cube::axial(1, -1),
            Direction::SE => Cube::axial(1, 0),
            Direction::S => Cube::axial(0, 1),
            Direction::SW => Cube::axial(-1, 1),
            Direction::NW => Cube::axial(-1, 0),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.index() + 3) % 6]
    }
}

/// Corner directions, between two neighbor directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagonal {
    E,
    NNE,
    NNW,
    W,
    SSW,
    SSE,
}

impl Diagonal {
    pub const ALL: [Diagonal; 6] = [
        Diagonal::E,
        Diagonal::NNE,
        Diagonal::NNW,
        Diagonal::W,
        Diagonal::SSW,
        Diagonal::SSE,
    ];

    pub const fn vector(self) -> Cube {
        match self {
            Diagonal::E => Cube::axial(2, -1),
            Diagonal::NNE => Cube::axial(1, -2),
            Diagonal::NNW => Cube::axial(-1, -1),
            Diagonal::W => Cube::axial(-2, 1),
            Diagonal::SSW => Cube::axial(-1, 2),
            Diagonal::SSE => Cube::axial(1, 1),
        }
    }
}

/// Rotational sense of a ring walk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Clockwise,
    Counterclockwise,
}

pub fn adjacent(position: Cube, direction: Direction) -> Cube {
    position + direction.vector()
}

pub fn diagonal_neighbor(position: Cube, diagonal: Diagonal) -> Cube {
    position + diagonal.vector()
}

// ============================================================================
// RINGS AND SPIRALS
// ============================================================================

/// Positions at exactly `radius` steps from a center, walked along the boundary
#[derive(Clone, Debug)]
pub struct Ring {
    position: Cube,
    sides: [Direction; 6],
    radius: u32,
    side: usize,
    step: u32,
}

/// Step directions for each side of the ring, starting after `start`
fn walk_order(start: Direction, rotation: Rotation) -> [Direction; 6] {
    let mut order = Direction::ALL;
    if rotation == Rotation::Counterclockwise {
        order.reverse();
    }
    let start_index = order.iter().position(|&d| d == start).unwrap_or(0);
    order.rotate_left((start_index + 2) % 6);
    order
}

impl Iterator for Ring {
    type Item = Cube;

    fn next(&mut self) -> Option<Cube> {
        if self.radius == 0 || self.side >= 6 {
            return None;
        }
        let current = self.position;
        self.position = adjacent(self.position, self.sides[self.side]);
        self.step += 1;
        if self.step == self.radius {
            self.step = 0;
            self.side += 1;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.radius == 0 || self.side >= 6 {
            0
        } else {
            (6 - self.side) * self.radius as usize - self.step as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ring {}

/// Every position within `radius` of `center` must fit in `i32`
fn check_reach(center: Cube, radius: u32) -> Result<(), HexError> {
    let radius = radius as i64;
    let fits = center.wide().iter().all(|&c| {
        c - radius >= i32::MIN as i64 && c + radius <= i32::MAX as i64
    });
    if fits {
        Ok(())
    } else {
        Err(HexError::Overflow { op: "ring" })
    }
}

fn walk_ring(center: Cube, radius: u32, direction: Direction, rotation: Rotation) -> Ring {
    Ring {
        position: center + direction.vector() * radius as i32,
        sides: walk_order(direction, rotation),
        radius,
        side: 0,
        step: 0,
    }
}

/// Walk the ring of `radius` around `center`, beginning at `direction`.
///
/// Fails with `Overflow` if the ring would leave the `i32` coordinate range.
pub fn ring(
    center: Cube,
    radius: u32,
    direction: Direction,
    rotation: Rotation,
) -> Result<Ring, HexError> {
    check_reach(center, radius)?;
    Ok(walk_ring(center, radius, direction, rotation))
}

/// Center followed by every ring out to `radius`
pub fn spiral(
    center: Cube,
    radius: u32,
    direction: Direction,
    rotation: Rotation,
) -> Result<impl Iterator<Item = Cube> + Clone, HexError> {
    check_reach(center, radius)?;
    Ok(std::iter::once(center)
        .chain((1..=radius).flat_map(move |r| walk_ring(center, r, direction, rotation))))
}

/// Number of positions in a filled hex of `radius`
pub fn spiral_len(radius: u32) -> usize {
    let r = radius as usize;
    1 + 3 * r * (r + 1)
}

/// Board position for a flat slot index of upstream map data
pub fn spiral_index(index: usize) -> Option<Cube> {
    spiral(Cube::ORIGIN, BOARD_RADIUS, Direction::N, Rotation::Clockwise)
        .ok()?
        .nth(index)
}

// ============================================================================
// ROTATION AND METRICS
// ============================================================================

fn rotate_clockwise([q, r, s]: [i64; 3]) -> [i64; 3] {
    [-r, -s, -q]
}

fn rotate_counterclockwise([q, r, s]: [i64; 3]) -> [i64; 3] {
    [-s, -q, -r]
}

/// Rotate `point` around `center` by a multiple of 60 degrees.
///
/// Positive angles turn clockwise, negative counterclockwise.
pub fn rotate(point: Cube, center: Cube, angle: i32) -> Result<Cube, HexError> {
    if angle % 60 != 0 {
        return Err(HexError::InvalidAngle { angle });
    }
    let steps = (angle.unsigned_abs() / 60) % 6;
    let step = if angle > 0 {
        rotate_clockwise
    } else {
        rotate_counterclockwise
    };

    let [cq, cr, cs] = center.wide();
    let [pq, pr, ps] = point.wide();
    let mut vector = [pq - cq, pr - cr, ps - cs];
    for _ in 0..steps {
        vector = step(vector);
    }
    let [vq, vr, vs] = vector;
    Cube::from_wide(cq + vq, cr + vr, cs + vs, "rotate")
}

pub fn length(vector: Cube) -> u32 {
    vector.length()
}

pub fn distance(a: Cube, b: Cube) -> u32 {
    let [aq, ar, as_] = a.wide();
    let [bq, br, bs] = b.wide();
    // the largest difference of two i32 values is u32::MAX
    let apart = |d: i64| d.unsigned_abs() as u32;
    apart(aq - bq).max(apart(ar - br)).max(apart(as_ - bs))
}
