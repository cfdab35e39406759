use crate::Cell;
use eframe::egui::{pos2, Pos2, Rect, Vec2};

/// Placement of an `N x N` grid inside a rectangle of the window.
///
/// Cell sizes are derived from the rectangle every frame, so the grid itself
/// never depends on pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldLayout {
    rect: Rect,
    n: usize,
}

impl FieldLayout {
    pub fn new(rect: Rect, n: usize) -> Self {
        assert!(n >= 1);
        Self { rect, n }
    }

    pub fn cell_size(&self) -> Vec2 {
        self.rect.size() / self.n as f32
    }

    /// Rectangle of the cell, its top left corner at `(col * width, row * height)`.
    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let size = self.cell_size();
        let min = pos2(
            self.rect.min.x + cell.col as f32 * size.x,
            self.rect.min.y + cell.row as f32 * size.y,
        );
        Rect::from_min_size(min, size)
    }

    /// Cell under a pointer position, clamped into the grid.
    pub fn cell_at(&self, pos: Pos2) -> Cell {
        let size = self.cell_size();
        let p = pos - self.rect.min;
        let clamp = |v: f32| ((v.floor().max(0.)) as usize).min(self.n - 1);
        Cell::new(clamp(p.y / size.y), clamp(p.x / size.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FieldLayout {
        FieldLayout::new(Rect::from_min_size(pos2(10., 20.), Vec2::new(200., 100.)), 10)
    }

    #[test]
    fn cell_rects_tile_the_field() {
        let l = layout();
        assert_eq!(l.cell_size(), Vec2::new(20., 10.));
        let r = l.cell_rect(Cell::new(2, 3));
        assert_eq!(r.min, pos2(70., 40.));
        assert_eq!(r.max, pos2(90., 50.));
    }

    #[test]
    fn pointer_maps_to_cell() {
        let l = layout();
        assert_eq!(l.cell_at(pos2(10., 20.)), Cell::new(0, 0));
        assert_eq!(l.cell_at(pos2(75.5, 49.9)), Cell::new(2, 3));
        assert_eq!(l.cell_at(pos2(209.9, 119.9)), Cell::new(9, 9));
    }

    #[test]
    fn pointer_is_clamped() {
        let l = layout();
        assert_eq!(l.cell_at(pos2(0., 0.)), Cell::new(0, 0));
        assert_eq!(l.cell_at(pos2(210., 120.)), Cell::new(9, 9));
        assert_eq!(l.cell_at(pos2(1e6, -5.)), Cell::new(0, 9));
    }

    #[test]
    fn round_trip_through_centres() {
        let l = layout();
        for row in 0..10 {
            for col in 0..10 {
                let cell = Cell::new(row, col);
                assert_eq!(l.cell_at(l.cell_rect(cell).center()), cell);
            }
        }
    }
}
