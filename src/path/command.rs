//! Drawing commands in internal point order.
//!
//! Every command stores its endpoint first, then its control points. Path
//! syntax writes curves the other way round (controls before the endpoint),
//! so the codec goes through [`Command::serialized_points`] and
//! [`Command::from_serialized`] to translate.

use glam::DVec2;

/// Command letters that survive decoding.
///
/// `H`, `V`, `T` and arcs are normalized into `L` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    M,
    L,
    Q,
    S,
    C,
    Z,
}

impl Letter {
    pub fn as_char(self) -> char {
        match self {
            Letter::M => 'M',
            Letter::L => 'L',
            Letter::Q => 'Q',
            Letter::S => 'S',
            Letter::C => 'C',
            Letter::Z => 'Z',
        }
    }

    /// Serialized position -> stored index, per point.
    fn order(self) -> &'static [usize] {
        match self {
            Letter::Q | Letter::S => &QUAD_ORDER,
            Letter::C => &CUBIC_ORDER,
            Letter::M | Letter::L => &[0],
            Letter::Z => &[],
        }
    }
}

// Stored as [end, ctrl]; written as `ctrl end`.
const QUAD_ORDER: [usize; 2] = [1, 0];
// Stored as [end, ctrl1, ctrl2]; written as `ctrl1 ctrl2 end`.
const CUBIC_ORDER: [usize; 3] = [1, 2, 0];

/// One normalized drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub letter: Letter,
    /// Endpoint first, then control points. A close holds the sub-path start.
    pub points: Vec<DVec2>,
}

impl Command {
    pub fn move_to(p: DVec2) -> Self {
        Command {
            letter: Letter::M,
            points: vec![p],
        }
    }

    pub fn line_to(p: DVec2) -> Self {
        Command {
            letter: Letter::L,
            points: vec![p],
        }
    }

    pub fn quad(end: DVec2, ctrl: DVec2) -> Self {
        Command {
            letter: Letter::Q,
            points: vec![end, ctrl],
        }
    }

    pub fn smooth(end: DVec2, ctrl: DVec2) -> Self {
        Command {
            letter: Letter::S,
            points: vec![end, ctrl],
        }
    }

    pub fn cubic(end: DVec2, ctrl1: DVec2, ctrl2: DVec2) -> Self {
        Command {
            letter: Letter::C,
            points: vec![end, ctrl1, ctrl2],
        }
    }

    /// Closing line back to `start`.
    pub fn close(start: DVec2) -> Self {
        Command {
            letter: Letter::Z,
            points: vec![start],
        }
    }

    /// Build a command from points in path-syntax order.
    pub fn from_serialized(letter: Letter, serialized: &[DVec2]) -> Self {
        let order = letter.order();
        let mut points = vec![DVec2::ZERO; order.len()];
        for (pos, &idx) in order.iter().enumerate() {
            if let (Some(slot), Some(p)) = (points.get_mut(idx), serialized.get(pos)) {
                *slot = *p;
            }
        }
        Command { letter, points }
    }

    /// Points in path-syntax order. A close serializes bare.
    pub fn serialized_points(&self) -> Vec<DVec2> {
        self.letter
            .order()
            .iter()
            .filter_map(|&idx| self.points.get(idx).copied())
            .collect()
    }

    pub fn end(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    pub fn is_close(&self) -> bool {
        self.letter == Letter::Z
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Apply `f` to every point, control points included.
    pub fn map_points(&self, f: impl Fn(DVec2) -> DVec2) -> Self {
        Command {
            letter: self.letter,
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Replace the endpoint, keeping control points where they are.
    pub(crate) fn with_end(&self, end: DVec2) -> Self {
        let mut cmd = self.clone();
        if let Some(slot) = cmd.points.first_mut() {
            *slot = end;
        }
        cmd
    }
}
