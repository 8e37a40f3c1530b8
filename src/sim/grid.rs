//! Tile grid and cell geometry
//!
//! Cells are addressed by (col, row) and stored row-major as
//! `row * cols + col`. The tick logic relies on that addressing scheme when it
//! maps neutron positions back to cells, so it is a contract, not an
//! implementation detail.

use glam::Vec2;

use super::tile::TileKind;

/// Axis-aligned world-space rectangle of one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Check if a point lies inside the rectangle (half-open on the max edge)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// A fixed-size 2D grid of tiles.
///
/// All cells start [`TileKind::Empty`]. Out-of-range `get`/`set` indices are a
/// programming error and panic; callers that hold arbitrary positions go
/// through [`Grid::cell_at`] instead.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: u32,
    rows: u32,
    tile_size: f32,
    tiles: Vec<TileKind>,
}

impl Grid {
    /// Create a grid with every cell empty.
    ///
    /// `cols` and `rows` must be positive, `tile_size` validated upstream by
    /// [`Tuning::validate`](crate::tuning::Tuning::validate).
    pub fn new(cols: u32, rows: u32, tile_size: f32) -> Self {
        assert!(cols > 0 && rows > 0, "grid dimensions must be positive");
        Self {
            cols,
            rows,
            tile_size,
            tiles: vec![TileKind::Empty; (cols * rows) as usize],
        }
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// World-space width of the whole grid
    #[inline]
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    /// World-space height of the whole grid
    #[inline]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> usize {
        assert!(
            col < self.cols && row < self.rows,
            "cell ({col}, {row}) out of range for {}x{} grid",
            self.cols,
            self.rows
        );
        (row * self.cols + col) as usize
    }

    /// Tile at the given cell; caller guarantees in-range indices.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> TileKind {
        self.tiles[self.index(col, row)]
    }

    /// Overwrite the cell; visible to subsequent `get`/tick calls immediately.
    pub fn set(&mut self, col: u32, row: u32, tile: TileKind) {
        let idx = self.index(col, row);
        self.tiles[idx] = tile;
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.tiles.fill(TileKind::Empty);
    }

    /// World-space rectangle of a cell, used for in-tile fission placement.
    pub fn cell_bounds(&self, col: u32, row: u32) -> Rect {
        debug_assert!(col < self.cols && row < self.rows);
        let min = Vec2::new(col as f32 * self.tile_size, row as f32 * self.tile_size);
        Rect {
            min,
            max: min + Vec2::splat(self.tile_size),
        }
    }

    /// Map a world-space position to its cell, or `None` outside the grid.
    ///
    /// Negative coordinates are outside; so are positions at or past the far
    /// edges.
    pub fn cell_at(&self, pos: Vec2) -> Option<(u32, u32)> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x / self.tile_size) as u32;
        let row = (pos.y / self.tile_size) as u32;
        if col < self.cols && row < self.rows {
            Some((col, row))
        } else {
            None
        }
    }
}
