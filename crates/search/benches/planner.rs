use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tandem_core::{Board, CellState, Piece, TurnState};
use tandem_engine::ActivePiece;
use tandem_search::TurnPlanner;

fn turn(mut board: Board, current: Piece, next: Piece) -> TurnState {
    let spawn = ActivePiece::spawn(current, board.width());
    for (x, y) in spawn.blocks() {
        if y >= 0 {
            board.set(x as usize, y as usize, CellState::Piece);
        }
    }
    TurnState::new(board, current, spawn.location(), next)
}

fn stacked() -> Board {
    let mut board = Board::new(10, 20).unwrap();
    let heights = [5, 6, 4, 4, 7, 2, 0, 3, 5, 6];
    for (x, h) in heights.into_iter().enumerate() {
        for y in 20 - h..20 {
            board.set(x, y, CellState::Block);
        }
    }
    board
}

fn bench_plan(c: &mut Criterion) {
    let planner = TurnPlanner::new();
    let empty = turn(Board::new(10, 20).unwrap(), Piece::T, Piece::I);
    let stacked = turn(stacked(), Piece::L, Piece::S);

    c.bench_function("plan_empty_T_I", |b| {
        b.iter(|| planner.plan(black_box(&empty)))
    });
    c.bench_function("plan_stacked_L_S", |b| {
        b.iter(|| planner.plan(black_box(&stacked)))
    });
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
