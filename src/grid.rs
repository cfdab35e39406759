use crate::{config::validate_probability, LifeError, Result};
use rand::Rng;
use std::fmt;

/// Coordinate of a cell: `0 <= row, col < N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Square field of `N x N` cells.
///
/// Neighbour lookups wrap around both edges, so the field is a torus.
/// A published grid is never mutated: toggling and stepping produce new grids.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<bool>,
    n: usize,
}

impl Grid {
    /// Create a blank field with dimensions `n x n`.
    ///
    /// Panics if `n == 0`.
    pub fn empty(n: usize) -> Self {
        assert!(n >= 1, "grid size must be positive");
        Self {
            cells: vec![false; n * n],
            n,
        }
    }

    /// Create a field where every cell is alive with probability `alive_probability`.
    pub fn random<R: Rng + ?Sized>(n: usize, alive_probability: f64, rng: &mut R) -> Result<Self> {
        validate_probability(alive_probability)?;
        let mut result = Self::empty(n);
        for cell in result.cells.iter_mut() {
            *cell = rng.gen_bool(alive_probability);
        }
        Ok(result)
    }

    /// Create a field with random cells.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn random_seeded(n: usize, alive_probability: f64, seed: Option<u64>) -> Result<Self> {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        Self::random(n, alive_probability, &mut rng)
    }

    /// Build a field from rows of cells; the rows must form a square.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let n = rows.len();
        let mut result = Self::empty(n);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            assert_eq!(cells.len(), n, "row {} is not {} cells long", row, n);
            result.cells[row * n..(row + 1) * n].copy_from_slice(cells);
        }
        result
    }

    /// Build an `n x n` field with exactly the given cells alive.
    pub fn with_alive(n: usize, alive: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let mut result = Self::empty(n);
        for cell in alive {
            result.check(cell.row, cell.col)?;
            result.cells[cell.col + cell.row * n] = true;
        }
        Ok(result)
    }

    pub(crate) fn from_cells(n: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), n * n);
        Self { cells, n }
    }

    /// Exchange the cell storage with `other`, which must hold `N * N` cells.
    pub(crate) fn swap_cells(&mut self, other: &mut Vec<bool>) {
        assert_eq!(other.len(), self.cells.len());
        std::mem::swap(&mut self.cells, other);
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Side length of the field.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Get cell state at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        self.check(row, col)?;
        Ok(self.cells[col + row * self.n])
    }

    /// Cell state with both coordinates reduced modulo `N`.
    #[inline]
    pub fn get_wrapped(&self, row: usize, col: usize) -> bool {
        self.cells[col % self.n + (row % self.n) * self.n]
    }

    /// Copy of the field with the cell at (row, col) negated.
    ///
    /// Out-of-range coordinates are an error, never a silent no-op.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Self> {
        self.check(row, col)?;
        let mut result = self.clone();
        let idx = col + row * self.n;
        result.cells[idx] = !result.cells[idx];
        Ok(result)
    }

    /// Total number of alive cells in the field.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Coordinates of alive cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(move |(i, _)| Cell::new(i / n, i % n))
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if row < self.n && col < self.n {
            Ok(())
        } else {
            Err(LifeError::InvalidCoordinate {
                row,
                col,
                size: self.n,
            })
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks_exact(self.n) {
            for &c in row {
                f.write_str(if c { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.n, self.n)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 42;

    #[test]
    fn empty_has_no_population() {
        let grid = Grid::empty(7);
        assert_eq!(grid.size(), 7);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    #[should_panic]
    fn zero_size_panics() {
        Grid::empty(0);
    }

    #[test]
    fn random_density() {
        let grid = Grid::random_seeded(100, 0.3, Some(SEED)).unwrap();
        let density = grid.population() as f64 / 10_000.;
        assert!((density - 0.3).abs() < 0.03, "density={}", density);

        assert_eq!(Grid::random_seeded(10, 0., Some(SEED)).unwrap().population(), 0);
        assert_eq!(Grid::random_seeded(10, 1., Some(SEED)).unwrap().population(), 100);
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let a = Grid::random_seeded(32, 0.5, Some(SEED)).unwrap();
        let b = Grid::random_seeded(32, 0.5, Some(SEED)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_rejects_bad_probability() {
        assert!(matches!(
            Grid::random_seeded(4, -0.1, Some(SEED)),
            Err(LifeError::Config(_))
        ));
    }

    #[test]
    fn toggle_flips_exactly_one_cell() {
        let grid = Grid::empty(5);
        let toggled = grid.toggled(1, 3).unwrap();
        assert_ne!(grid, toggled);
        assert_eq!(toggled.alive_cells().collect::<Vec<_>>(), [Cell::new(1, 3)]);
        assert_eq!(toggled.toggled(1, 3).unwrap(), grid);
    }

    #[test]
    fn toggle_out_of_range() {
        let grid = Grid::empty(5);
        assert!(matches!(
            grid.toggled(5, 0),
            Err(LifeError::InvalidCoordinate {
                row: 5,
                col: 0,
                size: 5
            })
        ));
        assert!(grid.toggled(0, 17).is_err());
    }

    #[test]
    fn equality_requires_same_size() {
        assert_ne!(Grid::empty(3), Grid::empty(4));
    }

    #[test]
    fn display() {
        let grid = Grid::from_rows(&[[true, false], [false, true]]);
        assert_eq!(grid.to_string(), "#.\n.#\n");
    }
}
