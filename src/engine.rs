use crate::Grid;

/// Number of live cells among the 8 neighbours of (row, col) on the torus.
///
/// Each coordinate wraps independently as `(coord + offset + n) mod n`,
/// so cells on one edge neighbour the cells on the opposite edge.
pub fn count_neighbors(grid: &Grid, row: usize, col: usize) -> usize {
    let n = grid.size();
    let (row, col) = (row % n + n, col % n + n);
    let mut neibs = 0;
    for dr in [-1isize, 0, 1] {
        for dc in [-1isize, 0, 1] {
            if dr == 0 && dc == 0 {
                continue;
            }
            neibs += grid.get_wrapped(row.wrapping_add_signed(dr), col.wrapping_add_signed(dc))
                as usize;
        }
    }
    neibs
}

/// B3/S23.
#[inline]
fn next_state(alive: bool, neibs: usize) -> bool {
    if alive {
        neibs == 2 || neibs == 3
    } else {
        neibs == 3
    }
}

/// Next generation of `grid`, computed synchronously from the snapshot.
///
/// Allocates the result; use [`LifeEngine`] for repeated stepping.
pub fn step(grid: &Grid) -> Grid {
    let mut cells = vec![false; grid.size() * grid.size()];
    update_into(grid, &mut cells);
    Grid::from_cells(grid.size(), cells)
}

/// Writes the next generation of `grid` into `dst`.
fn update_into(grid: &Grid, dst: &mut [bool]) {
    let n = grid.size();
    let src = grid.cells();
    debug_assert_eq!(dst.len(), src.len());
    for y in 0..n {
        let y1 = if y == 0 { n - 1 } else { y - 1 };
        let y2 = if y == n - 1 { 0 } else { y + 1 };
        let (row_prev, row_curr, row_next) = (
            &src[y1 * n..(y1 + 1) * n],
            &src[y * n..(y + 1) * n],
            &src[y2 * n..(y2 + 1) * n],
        );
        for x in 0..n {
            let x1 = if x == 0 { n - 1 } else { x - 1 };
            let x2 = if x == n - 1 { 0 } else { x + 1 };
            let neibs = row_prev[x1] as usize
                + row_prev[x] as usize
                + row_prev[x2] as usize
                + row_curr[x1] as usize
                + row_curr[x2] as usize
                + row_next[x1] as usize
                + row_next[x] as usize
                + row_next[x2] as usize;
            dst[x + y * n] = next_state(row_curr[x], neibs);
        }
    }
}

/// Double-buffered stepper.
///
/// The storage of the consumed generation becomes the back buffer for the
/// following one, so stepping a grid of constant size does not allocate.
#[derive(Default)]
pub struct LifeEngine {
    back: Vec<bool>,
}

impl LifeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `grid` and return its next generation.
    pub fn advance(&mut self, mut grid: Grid) -> Grid {
        self.advance_in_place(&mut grid);
        grid
    }

    /// Replace `grid` with its next generation, swapping the buffers' roles.
    pub fn advance_in_place(&mut self, grid: &mut Grid) {
        let n = grid.size();
        self.back.resize(n * n, false);
        update_into(grid, &mut self.back);
        grid.swap_cells(&mut self.back);
    }

    /// Update the field `steps` times.
    pub fn advance_by(&mut self, mut grid: Grid, steps: u64) -> Grid {
        for _ in 0..steps {
            grid = self.advance(grid);
        }
        grid
    }

    /// Heap memory held by the back buffer.
    pub fn bytes_total(&self) -> usize {
        self.back.capacity() * std::mem::size_of::<bool>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    fn cells(list: &[(usize, usize)]) -> Vec<Cell> {
        list.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn counts_on_small_torus() {
        // on a 1x1 torus the single cell is its own neighbour 8 times
        let grid = Grid::from_rows(&[[true]]);
        assert_eq!(count_neighbors(&grid, 0, 0), 8);

        let grid = Grid::with_alive(2, cells(&[(0, 0)])).unwrap();
        assert_eq!(count_neighbors(&grid, 1, 1), 4);
        assert_eq!(count_neighbors(&grid, 0, 0), 0);
    }

    #[test]
    fn edge_cells_see_opposite_edge() {
        let grid = Grid::with_alive(6, cells(&[(0, 0)])).unwrap();
        assert_eq!(count_neighbors(&grid, 5, 5), 1);
        assert_eq!(count_neighbors(&grid, 5, 0), 1);
        assert_eq!(count_neighbors(&grid, 0, 5), 1);
        assert_eq!(count_neighbors(&grid, 3, 3), 0);
    }

    #[test]
    fn step_agrees_with_count_neighbors() {
        let grid = Grid::random_seeded(17, 0.4, Some(7)).unwrap();
        let next = step(&grid);
        for row in 0..17 {
            for col in 0..17 {
                let expected = next_state(
                    grid.get(row, col).unwrap(),
                    count_neighbors(&grid, row, col),
                );
                assert_eq!(next.get(row, col).unwrap(), expected, "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn advance_reuses_buffer() {
        let mut engine = LifeEngine::new();
        let grid = Grid::random_seeded(64, 0.3, Some(1)).unwrap();
        let grid = engine.advance(grid);
        let bytes = engine.bytes_total();
        let _ = engine.advance_by(grid, 10);
        assert_eq!(engine.bytes_total(), bytes);
    }

    #[test]
    fn glider_wraps_around() {
        // a glider moves one cell diagonally every 4 generations
        let n = 8;
        let glider = Grid::with_alive(n, cells(&[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)])).unwrap();
        let result = LifeEngine::new().advance_by(glider.clone(), 4 * n as u64);
        assert_eq!(result, glider);
    }
}
