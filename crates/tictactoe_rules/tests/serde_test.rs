//! Tests for the JSON shapes of states, marks and rejections.

use serde_json::json;
use tictactoe_rules::{Board, Cell, GameState, Mark, Player, Rejection};

#[test]
fn test_ongoing_state_json() {
    let game = GameState::ongoing(
        Player::Two,
        Board::from_iter([
            (Cell::BottomCenter, Player::Two),
            (Cell::TopLeft, Player::One),
        ]),
    );
    let value = serde_json::to_value(&game).unwrap();
    assert_eq!(
        value,
        json!({
            "status": "ONGOING",
            "next_player": 2,
            "marks": {"TOP_LEFT": 1, "BOTTOM_CENTER": 2},
        })
    );
}

#[test]
fn test_draw_state_json_has_null_winner() {
    let game = GameState::over(None, Board::new());
    let value = serde_json::to_value(&game).unwrap();
    assert_eq!(value, json!({"status": "OVER", "winner": null, "marks": {}}));
}

#[test]
fn test_state_parses_from_stored_json() {
    let game: GameState = serde_json::from_value(json!({
        "status": "OVER",
        "winner": 1,
        "marks": {"TOP_LEFT": 1, "CENTER_CENTER": 1, "BOTTOM_RIGHT": 1},
    }))
    .unwrap();
    assert_eq!(game.winner(), Some(Player::One));
    assert_eq!(game.marks().len(), 3);
}

#[test]
fn test_unknown_player_number_rejected() {
    let result: Result<Mark, _> = serde_json::from_value(json!({"cell": "TOP_LEFT", "player": 3}));
    assert!(result.is_err());
}

#[test]
fn test_unknown_cell_rejected() {
    let result: Result<Mark, _> = serde_json::from_value(json!({"cell": "MIDDLE", "player": 1}));
    assert!(result.is_err());
}

#[test]
fn test_mark_parses_request_body() {
    let mark: Mark = serde_json::from_value(json!({"cell": "CENTER_LEFT", "player": 1})).unwrap();
    assert_eq!(mark, Mark::new(Player::One, Cell::CenterLeft));
}

#[test]
fn test_rejection_json() {
    assert_eq!(
        serde_json::to_value(Rejection::GameIsOver).unwrap(),
        json!({"error": "GAME_IS_OVER"})
    );
    assert_eq!(
        serde_json::to_value(Rejection::PlayerCantMove { player: Player::Two }).unwrap(),
        json!({"error": "PLAYER_CANT_MOVE", "player": 2})
    );
    assert_eq!(
        serde_json::to_value(Rejection::CellAlreadyMarked { cell: Cell::TopLeft }).unwrap(),
        json!({"error": "CELL_ALREADY_MARKED", "cell": "TOP_LEFT"})
    );
}

#[test]
fn test_rejection_messages() {
    assert_eq!(Rejection::GameIsOver.to_string(), "Game is already over");
    assert_eq!(
        Rejection::PlayerCantMove { player: Player::One }.to_string(),
        "It's not player 1's turn"
    );
    assert_eq!(
        Rejection::CellAlreadyMarked { cell: Cell::CenterCenter }.to_string(),
        "Cell CENTER_CENTER is already marked"
    );
}
