use crate::layout::margins::PlotArea;

/// Main + ratio panel layout for 1D comparisons.
/// The ratio panel gets `ratio_frac` of the available height, below the main panel.
#[derive(Debug, Clone)]
pub struct MainRatioLayout {
    pub main: PlotArea,
    pub ratio: PlotArea,
}

impl MainRatioLayout {
    pub fn new(
        left: f64,
        top: f64,
        width: f64,
        total_height: f64,
        gap: f64,
        ratio_frac: f64,
    ) -> Self {
        let ratio_h = total_height * ratio_frac.clamp(0.1, 0.6);
        let main_h = total_height - ratio_h - gap;

        Self {
            main: PlotArea::manual(left, top, width, main_h),
            ratio: PlotArea::manual(left, top + main_h + gap, width, ratio_h),
        }
    }
}

/// Uniform grid of cells, filled row by row.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<PlotArea>,
}

impl GridLayout {
    pub fn new(width: f64, height: f64, rows: usize, cols: usize) -> Self {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let cw = width / cols as f64;
        let ch = height / rows as f64;
        let cells = (0..rows * cols)
            .map(|i| PlotArea::manual((i % cols) as f64 * cw, (i / cols) as f64 * ch, cw, ch))
            .collect();
        Self { rows, cols, cells }
    }

    /// Cell at row-major index `i`.
    pub fn cell(&self, i: usize) -> Option<PlotArea> {
        self.cells.get(i).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_ratio_split() {
        let l = MainRatioLayout::new(50.0, 20.0, 400.0, 300.0, 4.0, 0.25);
        assert_eq!(l.ratio.height, 75.0);
        assert_eq!(l.main.height, 221.0);
        assert_eq!(l.ratio.top, l.main.bottom() + 4.0);
    }

    #[test]
    fn grid_row_major() {
        let g = GridLayout::new(900.0, 600.0, 2, 3);
        assert_eq!(g.cell(0), Some(PlotArea::manual(0.0, 0.0, 300.0, 300.0)));
        assert_eq!(g.cell(4), Some(PlotArea::manual(300.0, 300.0, 300.0, 300.0)));
        assert_eq!(g.cell(6), None);
    }
}
