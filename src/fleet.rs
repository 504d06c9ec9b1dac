//! Fleet and ship state
//!
//! Per-player set of ship placements with hit tracking and sunk
//! detection. Ships are built from endpoint pairs; geometry other than
//! collinearity is client-trusted (no overlap check across ships).

use std::collections::HashSet;

use serde::Serialize;

use crate::error::AppError;
use crate::types::Coord;

/// Outcome of a single shot, as reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotOutcome {
    Hit,
    Miss,
    Sink,
}

impl ShotOutcome {
    /// The status shown to the player who was fired upon.
    ///
    /// A sink is never revealed to the defender as a sink, only as a hit.
    pub fn concealed(self) -> Self {
        match self {
            Self::Sink => Self::Hit,
            other => other,
        }
    }
}

/// Result of registering a shot against a fleet
///
/// `sunk_cells` carries every cell of the sunk ship, in placement order,
/// and is present only when the outcome is a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotReport {
    pub outcome: ShotOutcome,
    pub sunk_cells: Option<Vec<Coord>>,
}

/// One placed ship: its occupied cells, the subset already hit, and
/// whether it has been sunk
#[derive(Debug, Clone)]
pub struct Ship {
    cells: Vec<Coord>,
    hits: HashSet<Coord>,
    sunk: bool,
}

impl Ship {
    /// Build a ship occupying every cell on the inclusive straight line
    /// between the two endpoints.
    ///
    /// Endpoint order is irrelevant. Fails with `InvalidShipShape` when
    /// the endpoints are neither row-aligned nor column-aligned, or when
    /// they are equal (a zero-length ship).
    pub fn between(start: Coord, end: Coord) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidShipShape {
            start: start.to_string(),
            end: end.to_string(),
        };

        let cells: Vec<Coord> = if start == end {
            return Err(invalid());
        } else if start.row == end.row {
            let (lo, hi) = (start.col.min(end.col), start.col.max(end.col));
            (lo..=hi).map(|col| Coord::new(start.row, col)).collect()
        } else if start.col == end.col {
            let (lo, hi) = (start.row.min(end.row), start.row.max(end.row));
            (lo..=hi).map(|row| Coord::new(row, start.col)).collect()
        } else {
            return Err(invalid());
        };

        Ok(Self {
            cells,
            hits: HashSet::new(),
            sunk: false,
        })
    }

    /// The occupied cells, in placement order
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Whether the ship occupies the given cell
    pub fn occupies(&self, cell: Coord) -> bool {
        self.cells.contains(&cell)
    }

    /// Whether every occupied cell has been hit
    pub fn is_sunk(&self) -> bool {
        self.sunk
    }
}

/// The complete set of one player's ships
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    /// An empty fleet (nothing placed yet)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(ships: Vec<Ship>) -> Self {
        Self { ships }
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Register a shot at the given cell.
    ///
    /// The first ship occupying the cell takes the hit; re-hitting an
    /// already-hit cell is idempotent and reports the same outcome. A
    /// cell no ship occupies (including on an empty fleet) is a miss.
    pub fn register_hit(&mut self, target: Coord) -> ShotReport {
        for ship in &mut self.ships {
            if !ship.occupies(target) {
                continue;
            }
            ship.hits.insert(target);
            if ship.hits.len() == ship.cells.len() {
                ship.sunk = true;
                return ShotReport {
                    outcome: ShotOutcome::Sink,
                    sunk_cells: Some(ship.cells.clone()),
                };
            }
            return ShotReport {
                outcome: ShotOutcome::Hit,
                sunk_cells: None,
            };
        }
        ShotReport {
            outcome: ShotOutcome::Miss,
            sunk_cells: None,
        }
    }

    /// True iff every ship is sunk. Vacuously true for an empty fleet,
    /// which is reachable only by a client that declared ready without
    /// placing anything.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.sunk)
    }
}
