//! Toroidal boundary crossing
//!
//! Each axis of a wrapping entity is either `Inside` or `Crossing`. An entity
//! that starts touching an edge spawns a mirror on the opposite edge and
//! keeps flying out on its own; the mirror flies in. At a corner up to four
//! copies coexist until the ones heading out are discarded. The band between
//! `touches_edge` and `fully_clear` is the hysteresis that keeps the flag from
//! flickering while a body straddles an edge for several frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;

/// Below this a direction component counts as parallel to the axis
const DIRECTION_EPSILON: f32 = 1e-6;

/// World axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// Wrap state of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisState {
    #[default]
    Inside,
    Crossing,
}

/// Wrap state of both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Crossing {
    pub x: AxisState,
    pub y: AxisState,
}

impl Crossing {
    pub fn get(&self, axis: Axis) -> AxisState {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, state: AxisState) {
        match axis {
            Axis::X => self.x = state,
            Axis::Y => self.y = state,
        }
    }

    pub fn is_crossing(&self, axis: Axis) -> bool {
        self.get(axis) == AxisState::Crossing
    }

    pub fn any(&self) -> bool {
        self.is_crossing(Axis::X) || self.is_crossing(Axis::Y)
    }

    pub fn both(&self) -> bool {
        self.is_crossing(Axis::X) && self.is_crossing(Axis::Y)
    }
}

/// Which edges a direction of travel points toward (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quadrant {
    pub is_top: bool,
    pub is_bottom: bool,
    pub is_left: bool,
    pub is_right: bool,
}

impl Quadrant {
    pub fn from_direction(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            is_top: sin < -DIRECTION_EPSILON,
            is_bottom: sin > DIRECTION_EPSILON,
            is_left: cos < -DIRECTION_EPSILON,
            is_right: cos > DIRECTION_EPSILON,
        }
    }

    /// Heading toward the low (left/top) edge of `axis`
    fn toward_low(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.is_left,
            Axis::Y => self.is_top,
        }
    }

    /// Heading toward the high (right/bottom) edge of `axis`
    fn toward_high(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.is_right,
            Axis::Y => self.is_bottom,
        }
    }
}

/// Edge distances driving the crossing transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WrapMargins {
    /// Inside -> Crossing once within this distance of an edge
    pub enter: f32,
    /// Crossing -> Inside once this far from both edges
    pub settle: f32,
    /// Crossing -> discarded once this far beyond the edge it is heading for
    pub discard: f32,
}

impl WrapMargins {
    pub fn uniform(margin: f32) -> Self {
        Self {
            enter: margin,
            settle: margin,
            discard: margin,
        }
    }
}

/// What the owner of a crossing must do after `advance`
#[derive(Debug, Clone, PartialEq)]
pub enum WrapAction {
    Stay,
    /// Spawn one copy per offset, each with the given crossing state
    Mirror { offsets: Vec<Vec2>, crossing: Crossing },
    /// The entity has left the world for good
    Discard,
}

/// Bounding circle not entirely beyond any single edge
pub fn is_partially_in_world(body: &Body, size: Vec2) -> bool {
    let Body { center, radius } = *body;
    !(center.x + radius < 0.0
        || center.x - radius > size.x
        || center.y + radius < 0.0
        || center.y - radius > size.y)
}

/// Bounding circle clear of every edge
pub fn is_fully_in_world(body: &Body, size: Vec2) -> bool {
    let Body { center, radius } = *body;
    center.x >= 0.0 && center.x + radius <= size.x && center.y >= 0.0 && center.y + radius <= size.y
}

/// Leading edge within `margin` of either boundary of the axis
#[inline]
pub fn touches_edge(pos: f32, size: f32, margin: f32) -> bool {
    pos - margin < 0.0 || pos + margin > size
}

/// Strictly more than `margin` away from both boundaries of the axis
#[inline]
pub fn fully_clear(pos: f32, size: f32, margin: f32) -> bool {
    pos > margin && pos < size - margin
}

/// Past the boundary the entity is heading for, by more than `margin`
#[inline]
fn exited(pos: f32, size: f32, margin: f32, quadrant: &Quadrant, axis: Axis) -> bool {
    (quadrant.toward_low(axis) && pos < -margin) || (quadrant.toward_high(axis) && pos > size + margin)
}

/// Initial crossing state for a body placed at `center`. An axis starts as
/// Crossing only when the body touches an edge while heading inward across
/// it, so an off-screen spawn flies in without spawning a mirror.
pub fn initial_crossing(center: Vec2, size: Vec2, margins: &WrapMargins, quadrant: &Quadrant) -> Crossing {
    let mut crossing = Crossing::default();
    for axis in Axis::BOTH {
        let pos = axis.of(center);
        let extent = axis.of(size);
        let entering_low = pos - margins.enter < 0.0 && quadrant.toward_high(axis);
        let entering_high = pos + margins.enter > extent && quadrant.toward_low(axis);
        if entering_low || entering_high {
            crossing.set(axis, AxisState::Crossing);
        }
    }
    crossing
}

/// Run one frame of the crossing machine for a body that has already moved.
///
/// Axes are independent: a Crossing axis is discarded or settled on its own,
/// and an Inside axis that touches an edge starts its own crossing even while
/// the other axis is mid-crossing. Every copy that leaves through an edge
/// therefore has a mirror on the opposite edge of that axis.
pub fn advance(
    body: &Body,
    size: Vec2,
    margins: &WrapMargins,
    quadrant: &Quadrant,
    crossing: &mut Crossing,
) -> WrapAction {
    let center = body.center;

    let gone = Axis::BOTH.iter().any(|&axis| {
        crossing.is_crossing(axis)
            && exited(axis.of(center), axis.of(size), margins.discard, quadrant, axis)
    });
    if gone {
        return WrapAction::Discard;
    }

    for axis in Axis::BOTH {
        if crossing.is_crossing(axis) && fully_clear(axis.of(center), axis.of(size), margins.settle) {
            crossing.set(axis, AxisState::Inside);
        }
    }

    let mut shift = Vec2::ZERO;
    for axis in Axis::BOTH {
        let pos = axis.of(center);
        let extent = axis.of(size);
        if crossing.is_crossing(axis) || !touches_edge(pos, extent, margins.enter) {
            continue;
        }
        let delta = if pos - margins.enter < 0.0 { extent } else { -extent };
        match axis {
            Axis::X => shift.x = delta,
            Axis::Y => shift.y = delta,
        }
        crossing.set(axis, AxisState::Crossing);
    }

    let offsets = match (shift.x != 0.0, shift.y != 0.0) {
        (false, false) => return WrapAction::Stay,
        (true, false) | (false, true) => vec![shift],
        // A corner needs a copy beyond each edge and one diagonally across
        (true, true) => vec![Vec2::new(shift.x, 0.0), Vec2::new(0.0, shift.y), shift],
    };
    WrapAction::Mirror {
        offsets,
        crossing: *crossing,
    }
}
