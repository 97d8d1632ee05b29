//! Seeded random sessions: moves, edits, settles and position swaps in any
//! order must leave both stores consistent.

use plum_board::board_state::chess_types::{Color, Piece, Role, ALL_ROLES};
use plum_board::board_state::square::Square;
use plum_board::config::BoardConfig;
use plum_board::session::chess_board::ChessBoard;
use plum_board::utils::fen_generator::encode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_square(rng: &mut StdRng) -> Square {
    Square::from_index(rng.gen_range(0..64)).expect("index below 64")
}

fn random_piece(rng: &mut StdRng) -> Piece {
    let color = if rng.gen_bool(0.5) { Color::White } else { Color::Black };
    Piece::new(color, ALL_ROLES[rng.gen_range(0..ALL_ROLES.len())])
}

fn occupied_square(board: &ChessBoard, rng: &mut StdRng) -> Option<Square> {
    let squares: Vec<Square> = board.future().iter().map(|(square, _)| square).collect();
    if squares.is_empty() {
        None
    } else {
        Some(squares[rng.gen_range(0..squares.len())])
    }
}

fn check_board(board: &ChessBoard, step: usize) {
    board
        .future()
        .verify()
        .unwrap_or_else(|err| panic!("future store broken at step {step}: {err}"));
    board
        .current()
        .verify()
        .unwrap_or_else(|err| panic!("current store broken at step {step}: {err}"));
    for index in board.allocator().free_pool().iter() {
        assert!(
            board.future().by_index(index).is_none(),
            "free identity {index} still assigned at step {step}"
        );
    }
}

fn check_no_identity_lost(board: &ChessBoard, step: usize) {
    let pool = board.allocator().free_pool();
    for index in 0..board.allocator().next_index() {
        let on_board = board.future().by_index(index).is_some();
        assert!(
            on_board != pool.contains(index),
            "identity {index} is {} at step {step}",
            if on_board { "both placed and free" } else { "neither placed nor free" }
        );
    }
}

fn walk(seed: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = ChessBoard::new(BoardConfig::default());

    for step in 0..steps {
        match rng.gen_range(0..100) {
            0..=54 => {
                if let Some(from) = occupied_square(&board, &mut rng) {
                    let to = random_square(&mut rng);
                    assert_eq!(board.play_move(from, to).is_some(), from != to);
                }
            }
            55..=69 => {
                board.settle();
                assert_eq!(board.current(), board.future());
                check_no_identity_lost(&board, step);
            }
            70..=79 => {
                let square = random_square(&mut rng);
                board.remove_piece(square);
                assert!(!board.future().is_occupied(square));
                assert!(!board.current().is_occupied(square));
            }
            80..=89 => {
                let square = random_square(&mut rng);
                let piece = random_piece(&mut rng);
                let index = board.new_piece(piece, square);
                assert_eq!(board.future().get(square).map(|entry| entry.index), Some(index));
                assert_eq!(board.current().get(square).map(|entry| entry.index), Some(index));
            }
            _ => {
                let mut position = board.future().position();
                for _ in 0..rng.gen_range(1..4) {
                    let square = random_square(&mut rng);
                    if rng.gen_bool(0.5) {
                        position.remove(&square);
                    } else {
                        position.insert(square, random_piece(&mut rng));
                    }
                }
                let fen = encode(&position);
                board.set_position(&fen);
                assert_eq!(board.fen(), fen);
                assert_eq!(board.current(), board.future());
            }
        }
        check_board(&board, step);
    }
}

#[test]
fn random_sessions_keep_stores_consistent() {
    for seed in 0..24 {
        walk(seed, 400);
    }
}

#[test]
fn settled_identities_survive_quiet_moves() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = ChessBoard::default();

    for _ in 0..200 {
        let Some(from) = occupied_square(&board, &mut rng) else {
            break;
        };
        let to = random_square(&mut rng);
        if board.future().is_occupied(to) {
            continue;
        }
        let index = board.future().get(from).map(|entry| entry.index);
        let castles = board
            .future()
            .get(from)
            .map_or(false, |entry| entry.piece.role == Role::King);

        board.play_move(from, to);
        board.settle();

        if !castles {
            assert_eq!(board.future().get(to).map(|entry| entry.index), index);
        }
        assert_eq!(board.future().len() + board.allocator().free_pool().len(), 32);
    }
}
