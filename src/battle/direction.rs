//! Facing for engagements
//!
//! Absolute facing (north/east/south/west) and facing relative to a unit's
//! front. Only the relative direction matters in combat: shields only cover
//! attacks from the front.

use serde::{Deserialize, Serialize};

/// Absolute cardinal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Direction clockwise of this one
    pub fn get_right(&self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Direction counter-clockwise of this one
    pub fn get_left(&self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    /// Opposite direction
    pub fn get_behind(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Absolute direction lying `relative` from this facing
    pub fn get_from_relative(&self, relative: RelativeDirection) -> Self {
        match relative {
            RelativeDirection::Front => *self,
            RelativeDirection::Right => self.get_right(),
            RelativeDirection::Back => self.get_behind(),
            RelativeDirection::Left => self.get_left(),
        }
    }

    /// All directions
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }
}

/// Direction relative to a unit's front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelativeDirection {
    #[default]
    Front,
    Right,
    Back,
    Left,
}

impl RelativeDirection {
    /// Relative direction a unit facing `from` runs into a unit facing `to`.
    ///
    /// Two units facing the same way means the first hits the second's back;
    /// facing each other means a frontal clash.
    pub fn direction_from(from: Direction, to: Direction) -> Self {
        if from == to {
            RelativeDirection::Back
        } else if from.get_behind() == to {
            RelativeDirection::Front
        } else if from.get_left() == to {
            RelativeDirection::Left
        } else {
            RelativeDirection::Right
        }
    }

    pub fn is_front(&self) -> bool {
        matches!(self, RelativeDirection::Front)
    }

    /// Parse a lowercase direction name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "front" => Some(RelativeDirection::Front),
            "right" => Some(RelativeDirection::Right),
            "back" => Some(RelativeDirection::Back),
            "left" => Some(RelativeDirection::Left),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelativeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RelativeDirection::Front => "front",
            RelativeDirection::Right => "right",
            RelativeDirection::Back => "back",
            RelativeDirection::Left => "left",
        };
        f.write_str(name)
    }
}
