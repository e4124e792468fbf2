use super::ActiveMode;
use super::layout::slots_for;

pub const PREVIEW_ROWS: usize = 5;
pub const PREVIEW_COLUMNS: usize = 3;
pub const PREVIEW_CENTER: &str = "○";

/// Grid cell (row, column) of each slot in the preview.
const SLOT_CELLS: [(usize, usize); 6] = [(1, 0), (0, 1), (1, 2), (3, 2), (4, 1), (3, 0)];

pub type PreviewGrid = [[&'static str; PREVIEW_COLUMNS]; PREVIEW_ROWS];

/// A small text sketch of where each mode lands in the wheel, with the cursor in the middle.
pub fn preview_grid(active: &[ActiveMode]) -> PreviewGrid {
    let mut grid = [[""; PREVIEW_COLUMNS]; PREVIEW_ROWS];
    if let Some(slots) = slots_for(active.len()) {
        for (slot, mode) in slots.iter().zip(active) {
            let (row, col) = SLOT_CELLS[slot.as_index()];
            grid[row][col] = mode.short_name;
        }
    }
    grid[2][1] = PREVIEW_CENTER;
    grid
}
