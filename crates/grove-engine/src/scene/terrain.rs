/// Terrain sampled for object placement.
pub trait HeightMap {
    /// Extent along x, in world units.
    fn width(&self) -> u32;

    /// Extent along z, in world units.
    fn length(&self) -> u32;

    fn height_at(&self, x: f32, z: f32) -> f32;
}

/// Terrain of constant height.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlatHeightMap {
    pub width: u32,
    pub length: u32,
    pub height: f32,
}

impl HeightMap for FlatHeightMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn length(&self) -> u32 {
        self.length
    }

    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

/// Column/row layout of instanced foliage over a terrain.
///
/// Instance `i` sits at column `i / rows`, row `i % rows`: columns are the
/// outer loop. Columns are spaced half a pitch apart along x, rows a full
/// pitch along z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FoliageGrid {
    columns: u32,
    rows: u32,
    pitch: f32,
    first_column: u32,
}

/// The grid has more cells or columns than a `u32` can index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("foliage grid of {columns}x{rows} cells from column {first_column} overflows u32")]
pub struct GridOverflow {
    pub columns: u32,
    pub rows: u32,
    pub first_column: u32,
}

/// One placed grid cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridCell {
    pub index: u32,
    pub column: u32,
    pub row: u32,
    pub x: f32,
    pub z: f32,
}

impl FoliageGrid {
    /// A zero pitch yields an empty grid.
    pub fn new(width: u32, length: u32, pitch: u32) -> Self {
        let (columns, rows) = match pitch {
            0 => (0, 0),
            p => (width / p, length / p),
        };
        Self {
            columns,
            rows,
            pitch: pitch as f32,
            first_column: 0,
        }
    }

    /// Grid over `terrain` with the given pitch.
    pub fn over(terrain: &dyn HeightMap, pitch: u32) -> Self {
        Self::new(terrain.width(), terrain.length(), pitch)
    }

    /// Shifts placement by `columns` whole columns along x.
    pub fn starting_at_column(mut self, columns: u32) -> Self {
        self.first_column = columns;
        self
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of cells. Fails when the cell count or the last column index
    /// does not fit a `u32`.
    pub fn count(&self) -> Result<u32, GridOverflow> {
        let overflow = GridOverflow {
            columns: self.columns,
            rows: self.rows,
            first_column: self.first_column,
        };
        self.first_column.checked_add(self.columns).ok_or(overflow)?;
        self.columns.checked_mul(self.rows).ok_or(overflow)
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Cells in instance order. Indices saturate on grids whose [`count`]
    /// fails.
    ///
    /// [`count`]: FoliageGrid::count
    pub fn cells(&self) -> impl Iterator<Item = GridCell> {
        let Self {
            columns,
            rows,
            pitch,
            first_column,
        } = *self;
        (0..columns).flat_map(move |c| {
            (0..rows).map(move |row| {
                let column = first_column.saturating_add(c);
                GridCell {
                    index: c.saturating_mul(rows).saturating_add(row),
                    column,
                    row,
                    x: column as f32 * pitch / 2.0,
                    z: row as f32 * pitch,
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_floors_both_axes() {
        let grid = FoliageGrid::new(1000, 1000, 200);
        assert_eq!((grid.columns(), grid.rows(), grid.count()), (5, 5, Ok(25)));
        assert_eq!(FoliageGrid::new(1199, 399, 200).count(), Ok(5));
    }

    #[test]
    fn terrain_smaller_than_pitch_is_empty() {
        let grid = FoliageGrid::new(150, 2000, 200);
        assert_eq!(grid.count(), Ok(0));
        assert_eq!(grid.cells().count(), 0);
        assert_eq!(FoliageGrid::new(1000, 1000, 0).count(), Ok(0));
    }

    #[test]
    fn cells_are_column_major_with_half_pitch_columns() {
        let grid = FoliageGrid::new(600, 400, 200);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!((cells[1].column, cells[1].row), (0, 1));
        assert_eq!((cells[2].column, cells[2].row), (1, 0));
        assert_eq!((cells[5].x, cells[5].z), (200.0, 200.0));
        assert!(cells.iter().enumerate().all(|(i, c)| c.index == i as u32));
    }

    #[test]
    fn column_offset_moves_x_only() {
        let grid = FoliageGrid::new(1000, 1000, 200).starting_at_column(5);
        let first = grid.cells().next().unwrap();
        assert_eq!((first.index, first.x, first.z), (0, 500.0, 0.0));
        assert_eq!(grid.count(), Ok(25));
    }

    #[test]
    fn flat_height_map() {
        let t = FlatHeightMap { width: 10, length: 20, height: 3.5 };
        assert_eq!(t.height_at(123.0, -4.0), 3.5);
        assert_eq!(FoliageGrid::over(&t, 5).count(), Ok(8));
    }

    #[test]
    fn oversized_grid_reports_overflow() {
        let grid = FoliageGrid::new(200_000, 200_000, 1);
        assert_eq!(
            grid.count(),
            Err(GridOverflow { columns: 200_000, rows: 200_000, first_column: 0 })
        );
    }

    #[test]
    fn shifted_columns_past_u32_overflow() {
        let grid = FoliageGrid::new(u32::MAX, 1, 1).starting_at_column(u32::MAX);
        assert!(grid.count().is_err());
        assert_eq!(grid.cells().nth(1).unwrap().column, u32::MAX);
    }
}
