//! Tile-grid pathfinding.
//!
//! # Data layout
//!
//! [`TileGrid`] stores walkability as a flat row-major `Vec<bool>`; tile
//! `(col, row)` lives at `row * columns + col`.  Tiles are squares of
//! `tile_size` world units with the grid's top-left corner at the origin.
//!
//! # Search
//!
//! [`GridPathFinder`] runs A* over the 8-connected tile graph.  Costs are
//! integers (10 per straight step, 14 per diagonal) so the open set orders
//! exactly and ties break on tile index, so the same query always yields the
//! same route.  Diagonal moves are only allowed when both adjacent straight
//! tiles are walkable, so routes never clip a blocked corner.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use rts_core::Vec2;

use crate::{Path, PathError, PathFinder, PathResult};

const STRAIGHT_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

// ── TileGrid ──────────────────────────────────────────────────────────────────

/// Walkability map of the terrain.
#[derive(Clone, Debug)]
pub struct TileGrid {
    columns:   u32,
    rows:      u32,
    tile_size: f32,
    blocked:   Vec<bool>,
}

impl TileGrid {
    /// A fully walkable grid.
    pub fn new(columns: u32, rows: u32, tile_size: f32) -> Self {
        Self {
            columns,
            rows,
            tile_size,
            blocked: vec![false; columns as usize * rows as usize],
        }
    }

    /// Build a grid from rows of characters: `#` is blocked, anything else
    /// walkable.  Short rows are padded with walkable tiles.
    pub fn from_ascii(lines: &[&str], tile_size: f32) -> Self {
        let rows = lines.len() as u32;
        let columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Self::new(columns, rows, tile_size);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set_blocked(col as u32, row as u32, true);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Mark a tile blocked or walkable.  Out-of-range tiles are ignored.
    pub fn set_blocked(&mut self, col: u32, row: u32, blocked: bool) {
        if let Some(i) = self.index(col, row) {
            self.blocked[i] = blocked;
        }
    }

    /// `true` for in-range, unblocked tiles.
    #[inline]
    pub fn is_walkable(&self, col: u32, row: u32) -> bool {
        self.index(col, row).is_some_and(|i| !self.blocked[i])
    }

    /// Tile containing `point`, or `None` outside the grid.
    pub fn tile_at(&self, point: Vec2) -> Option<(u32, u32)> {
        if !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / self.tile_size) as u32;
        let row = (point.y / self.tile_size) as u32;
        (col < self.columns && row < self.rows).then_some((col, row))
    }

    /// World position of a tile's centre.
    #[inline]
    pub fn tile_center(&self, col: u32, row: u32) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.tile_size,
            (row as f32 + 0.5) * self.tile_size,
        )
    }

    /// World-space centres of all blocked tiles.  Handy for feeding static
    /// obstacles to a radar.
    pub fn blocked_centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| {
                let (col, row) = self.coords(i);
                self.tile_center(col, row)
            })
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.columns && row < self.rows)
            .then(|| row as usize * self.columns as usize + col as usize)
    }

    #[inline]
    fn coords(&self, index: usize) -> (u32, u32) {
        let cols = self.columns as usize;
        ((index % cols) as u32, (index / cols) as u32)
    }

    fn tile_count(&self) -> usize {
        self.blocked.len()
    }
}

// ── GridPathFinder ────────────────────────────────────────────────────────────

/// A* over a [`TileGrid`].
///
/// The returned path starts at the exact `start` point, passes through the
/// centres of the tiles where the route turns, and ends at the exact `goal`.
#[derive(Clone, Debug)]
pub struct GridPathFinder {
    grid: TileGrid,
}

impl GridPathFinder {
    pub fn new(grid: TileGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }
}

impl PathFinder for GridPathFinder {
    fn find_path(&self, start: Vec2, goal: Vec2) -> PathResult<Path> {
        let from = self.grid.tile_at(start).ok_or(PathError::OutOfBounds(start))?;
        let to   = self.grid.tile_at(goal).ok_or(PathError::OutOfBounds(goal))?;

        if !self.grid.is_walkable(to.0, to.1) || !self.grid.is_walkable(from.0, from.1) {
            debug!(%start, %goal, "path endpoint is blocked");
            return Err(PathError::Unreachable { from: start, to: goal });
        }

        let tiles = astar(&self.grid, from, to)
            .ok_or(PathError::Unreachable { from: start, to: goal })?;

        let mut waypoints = Vec::with_capacity(tiles.len() + 1);
        waypoints.push(start);
        // Interior tiles only; the exact start/goal points replace the end tiles.
        for window in tiles.windows(3) {
            let (a, b, c) = (window[0], window[1], window[2]);
            if direction(a, b) != direction(b, c) {
                waypoints.push(self.grid.tile_center(b.0, b.1));
            }
        }
        waypoints.push(goal);

        debug!(%start, %goal, waypoints = waypoints.len(), "path found");
        Ok(Path::new(waypoints))
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

fn direction(a: (u32, u32), b: (u32, u32)) -> (i64, i64) {
    (b.0 as i64 - a.0 as i64, b.1 as i64 - a.1 as i64)
}

/// Octile distance in the same integer units as the step costs.
fn heuristic(a: (u32, u32), b: (u32, u32)) -> u32 {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + STRAIGHT_COST * (hi - lo)
}

fn neighbors(grid: &TileGrid, (col, row): (u32, u32)) -> impl Iterator<Item = ((u32, u32), u32)> + '_ {
    const STEPS: [(i64, i64); 8] = [
        (0, -1), (1, 0), (0, 1), (-1, 0),
        (1, -1), (1, 1), (-1, 1), (-1, -1),
    ];
    STEPS.iter().filter_map(move |&(dx, dy)| {
        let nc = u32::try_from(col as i64 + dx).ok()?;
        let nr = u32::try_from(row as i64 + dy).ok()?;
        if !grid.is_walkable(nc, nr) {
            return None;
        }
        if dx != 0 && dy != 0 {
            // No corner cutting: both orthogonal neighbours must be open.
            if !grid.is_walkable(nc, row) || !grid.is_walkable(col, nr) {
                return None;
            }
            Some(((nc, nr), DIAGONAL_COST))
        } else {
            Some(((nc, nr), STRAIGHT_COST))
        }
    })
}

/// Tile sequence from `from` to `to` inclusive, or `None` if disconnected.
fn astar(grid: &TileGrid, from: (u32, u32), to: (u32, u32)) -> Option<Vec<(u32, u32)>> {
    let n = grid.tile_count();
    let start = grid.index(from.0, from.1)?;
    let goal  = grid.index(to.0, to.1)?;

    // cost[v] = best known cost to reach tile v.
    let mut cost = vec![u32::MAX; n];
    // prev[v] = tile that reached v; usize::MAX for unreached tiles.
    let mut prev = vec![usize::MAX; n];
    cost[start] = 0;

    // Min-heap on (f = g + h, tile index).  Index breaks ties deterministically.
    let mut open: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();
    open.push(Reverse((heuristic(from, to), start)));

    while let Some(Reverse((f, tile))) = open.pop() {
        if tile == goal {
            return Some(reconstruct(grid, &prev, goal));
        }
        let here = grid.coords(tile);
        let g = cost[tile];
        // Skip stale heap entries.
        if f > g.saturating_add(heuristic(here, to)) {
            continue;
        }

        for (next, step) in neighbors(grid, here) {
            let Some(ni) = grid.index(next.0, next.1) else { continue };
            let new_cost = g.saturating_add(step);
            if new_cost < cost[ni] {
                cost[ni] = new_cost;
                prev[ni] = tile;
                open.push(Reverse((new_cost.saturating_add(heuristic(next, to)), ni)));
            }
        }
    }

    None
}

fn reconstruct(grid: &TileGrid, prev: &[usize], goal: usize) -> Vec<(u32, u32)> {
    let mut tiles = vec![grid.coords(goal)];
    let mut cur = goal;
    while prev[cur] != usize::MAX {
        cur = prev[cur];
        tiles.push(grid.coords(cur));
    }
    tiles.reverse();
    tiles
}
