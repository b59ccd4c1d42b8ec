//! tandem eval crate - heuristic board cost, lower is better.
//!
//! The cost adds four parts: surface contour and holes, the height profile,
//! line clears and T-spins. Clear and spin parts look at up to two
//! placements, so the same function scores one-piece and two-piece lines.

use serde::{Deserialize, Serialize};
use tandem_core::{Board, CellState, Outcome};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Multiplier on the whole contour term.
    pub contour_scale: f64,
    /// Per empty orthogonal neighbour of an occupied cell.
    pub exposed_side: f64,
    /// Per empty cell below its column's surface.
    pub buried: f64,
    /// Extra for a buried cell walled in on both sides.
    pub enclosed: f64,
    /// First occupied cell stacked over an empty one.
    pub overhang: f64,
    /// Decay for each further occupied cell in the same stack.
    pub overhang_decay: f64,

    /// Quadratic and linear cost of the stack top above half height.
    pub height_quadratic: f64,
    pub height_linear: f64,
    pub perfect_clear: f64,
    /// Pulls mass towards the walls.
    pub side_mass: f64,
    pub column_step: f64,
    pub asymmetry_divisor: f64,
    /// Columns this far below the tallest one start costing.
    pub column_gap_allowance: f64,

    pub clear_base: f64,
    pub single: f64,
    pub double: f64,
    pub triple: f64,
    pub tetris: f64,
    /// Offset added to single clears and taken off triples.
    pub clear_bias: f64,
    /// Hole count at which downstacking is fully desirable.
    pub downstack_holes: f64,

    pub spin_base: f64,
    pub spin_single: f64,
    pub spin_double: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            contour_scale: 2.0,
            exposed_side: 1.0,
            buried: 10.0,
            enclosed: 8.0,
            overhang: 20.0,
            overhang_decay: 0.75,

            height_quadratic: 200.0,
            height_linear: 120.0,
            perfect_clear: 700.0,
            side_mass: 8.0,
            column_step: 2.0,
            asymmetry_divisor: 3.0,
            column_gap_allowance: 5.0,

            clear_base: 200.0,
            single: 24.0,
            double: 24.0,
            triple: 35.0,
            tetris: 65.0,
            clear_bias: 0.6,
            downstack_holes: 5.0,

            spin_base: 400.0,
            spin_single: 60.0,
            spin_double: 90.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    pub weights: EvalWeights,
}

/// Surface and hole statistics gathered in one pass over the field.
struct Contour {
    cost: f64,
    holes: f64,
    blocks: usize,
    side_mass: f64,
    heights: Vec<usize>,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    /// Cost of `board` after the given placements; lower is better.
    ///
    /// Costs are unrounded reals, so near ties stay distinct.
    /// Stores the tallest column height on `board` as a side effect.
    /// `_par` is the best cost seen so far by the caller; it is accepted for
    /// pruning but does not change the result.
    pub fn evaluate(
        &self,
        board: &mut Board,
        first: Option<Outcome>,
        second: Option<Outcome>,
        _par: f64,
    ) -> f64 {
        let contour = self.contour(board);
        let max_height = contour.heights.iter().copied().max().unwrap_or(0);
        board.set_block_height(max_height);

        let placements = [first, second];
        self.weights.contour_scale * contour.cost
            + self.height_cost(board, &contour, max_height)
            + self.clear_cost(board, contour.holes, max_height, &placements)
            + self.spin_cost(&placements)
    }

    fn contour(&self, board: &Board) -> Contour {
        let w = &self.weights;
        let width = board.width();
        let height = board.height();
        let half_width = (width / 2) as f64;

        let mut contour = Contour {
            cost: 0.0,
            holes: 0.0,
            blocks: 0,
            side_mass: 0.0,
            heights: vec![0; width],
        };

        for x in 0..width {
            // row of the topmost occupied cell seen so far
            let mut surface = height;
            for y in 0..height {
                let (xi, yi) = (x as i8, y as i8);
                let state = board.get(x, y);
                if !state.is_empty() {
                    if state == CellState::Block {
                        contour.blocks += 1;
                        let reach = half_width - (half_width - x as f64).abs();
                        contour.side_mass += reach * reach / 2.0;
                    }
                    surface = surface.min(y);

                    let exposed = [(xi - 1, yi), (xi + 1, yi), (xi, yi + 1), (xi, yi - 1)]
                        .iter()
                        .filter(|&&(nx, ny)| board.cell(nx, ny) == Some(CellState::Empty))
                        .count();
                    contour.cost += w.exposed_side * exposed as f64;
                    continue;
                }

                if y > surface {
                    let walled = |nx: i8| board.cell(nx, yi).map_or(true, |c| !c.is_empty());
                    if walled(xi - 1) && walled(xi + 1) {
                        contour.cost += w.enclosed;
                        contour.holes += 0.5;
                    }
                    contour.cost += w.buried;
                    contour.holes += 0.5;
                }

                let mut weight = w.overhang;
                for above in (0..y).rev() {
                    if board.get(x, above).is_empty() {
                        break;
                    }
                    contour.cost += weight;
                    weight *= w.overhang_decay;
                }
            }
            contour.heights[x] = height - surface;
        }
        contour
    }

    fn height_cost(&self, board: &Board, contour: &Contour, max_height: usize) -> f64 {
        let w = &self.weights;
        let width = board.width();
        let (half, scale) = half_height(board);
        let heights = &contour.heights;
        let mut cost = 0.0;

        let excess = (max_height as f64 - half).max(0.0);
        cost += w.height_quadratic * excess * excess / (scale * scale);
        cost += w.height_linear * excess / scale;

        if contour.blocks == 0 {
            cost -= w.perfect_clear;
        } else {
            cost += w.side_mass * contour.side_mass / contour.blocks as f64;
        }

        let steps = heights.windows(2).map(|pair| {
            let d = step_excess(pair[0], pair[1]);
            w.column_step * d * d
        });
        cost += sum_forgiving(steps, 1);

        let mirrored = (0..width / 2).map(|i| {
            let d = step_excess(heights[i], heights[width - 1 - i]);
            d * d / w.asymmetry_divisor
        });
        cost += sum_forgiving(mirrored, 1);

        let gaps = heights
            .iter()
            .map(|&h| (max_height as f64 - h as f64 - w.column_gap_allowance).max(0.0));
        cost += sum_forgiving(gaps, 2);

        cost
    }

    fn clear_cost(
        &self,
        board: &Board,
        holes: f64,
        max_height: usize,
        placements: &[Option<Outcome>; 2],
    ) -> f64 {
        let w = &self.weights;
        let (half, scale) = half_height(board);

        // -1 is highly desirable, 1 highly undesirable
        let offset = max_height as f64 - half;
        let sign = if max_height as f64 > half { -1.0 } else { 1.0 };
        let clear_desire = sign * offset * offset / (scale * scale);
        // -1 is highly desirable, 0 undesirable
        let downstack_desire = -(holes / w.downstack_holes).powi(3).min(1.0);
        let desire = clear_desire + downstack_desire;

        let count = |rows: u8| {
            placements
                .iter()
                .flatten()
                .filter(|o| o.cleared == rows)
                .count() as f64
        };

        let mut cost = w.clear_base;
        cost += w.single * count(1) * (desire + w.clear_bias);
        cost += w.double * count(2) * desire;
        cost += w.triple * count(3) * (desire - w.clear_bias);
        cost -= w.tetris * (1.0 - downstack_desire) * count(4);
        cost
    }

    fn spin_cost(&self, placements: &[Option<Outcome>; 2]) -> f64 {
        let w = &self.weights;
        let count = |rows: u8| {
            placements
                .iter()
                .flatten()
                .filter(|o| o.spin_rows() == rows)
                .count() as f64
        };
        let singles = count(1);
        let doubles = count(2);
        w.spin_base - w.spin_single * singles * singles - w.spin_double * doubles * doubles
    }
}

/// Rounded-down half height, which the stack is measured against, and the
/// exact half height the excess is scaled by.
fn half_height(board: &Board) -> (f64, f64) {
    ((board.height() / 2) as f64, board.height() as f64 / 2.0)
}

/// Height difference beyond one row, zero otherwise.
fn step_excess(a: usize, b: usize) -> f64 {
    (a.abs_diff(b) as f64 - 1.0).max(0.0)
}

/// Sum of penalties with the `forgiven` largest ones left out.
fn sum_forgiving(penalties: impl Iterator<Item = f64>, forgiven: usize) -> f64 {
    let mut all: Vec<f64> = penalties.collect();
    all.sort_by(|a, b| b.total_cmp(a));
    all.iter().skip(forgiven).sum()
}
