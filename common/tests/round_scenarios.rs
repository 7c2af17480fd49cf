use std::collections::HashSet;

use common::{Direction, GameConfig, GameController, Position};

fn cells(list: &[(i16, i16)]) -> Vec<Position> {
    list.iter().map(|c| Position::from(*c)).collect()
}

fn seeded(seed: u64) -> GameController {
    GameController::new(GameConfig { seed: Some(seed), ..GameConfig::default() }).unwrap()
}

#[test]
fn eating_on_the_first_tick() {
    let mut game = seeded(1);
    game.start_with_layout(cells(&[(7, 7)]), Direction::Right, Position::new(8, 7))
        .unwrap();

    game.tick().unwrap();
    let snap = game.snapshot();

    assert_eq!(snap.snake_cells, cells(&[(8, 7), (7, 7)]));
    assert_eq!(snap.score, 10);
    let food = snap.food_cell.unwrap();
    assert!(!snap.snake_cells.contains(&food));
}

#[test]
fn reversal_request_is_rejected() {
    let mut game = seeded(2);
    game.start_with_layout(
        cells(&[(5, 5), (4, 5), (3, 5)]),
        Direction::Right,
        Position::new(0, 0),
    )
    .unwrap();

    assert!(game.request_direction(Direction::Left));
    game.tick().unwrap();

    let round = game.round().unwrap();
    assert_eq!(round.snake().direction(), Direction::Right);
    assert_eq!(round.snake().head().unwrap(), &Position::new(6, 5));
    assert!(game.is_playing());
}

#[test]
fn moving_away_from_the_tail_shifts_the_body() {
    let mut game = seeded(3);
    game.start_with_layout(cells(&[(5, 5), (6, 5)]), Direction::Left, Position::new(0, 0))
        .unwrap();

    game.tick().unwrap();
    let snap = game.snapshot();
    assert_eq!(snap.snake_cells, cells(&[(4, 5), (5, 5)]));
    assert!(snap.is_playing);
}

#[test]
fn self_collision_updates_best_score() {
    let mut game = seeded(5);

    // Round one: eat once, then run into the body.
    game.start_with_layout(
        cells(&[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4)]),
        Direction::Up,
        Position::new(5, 4),
    )
    .unwrap();
    game.tick().unwrap();
    assert_eq!(game.snapshot().score, 10);
    game.request_direction(Direction::Left);
    game.tick().unwrap();
    // (4,4) is the tail, and it stays put because the snake just grew.
    let snap = game.snapshot();
    assert!(snap.is_game_over);
    assert!(!snap.is_playing);
    assert_eq!(snap.best_score, 10);
    assert_eq!(snap.snake_cells.len(), 6);

    // A fresh round starts from zero without lowering the best.
    assert!(game.start().unwrap());
    assert_eq!(game.snapshot().score, 0);
    assert_eq!(game.snapshot().best_score, 10);
}

#[test]
fn two_cell_snake_forced_backwards_collides() {
    let mut game = seeded(6);
    game.start_with_layout(cells(&[(5, 5), (4, 5)]), Direction::Left, Position::new(0, 0))
        .unwrap();
    let before = game.snapshot().snake_cells;

    game.tick().unwrap();
    let snap = game.snapshot();
    assert!(snap.is_game_over);
    assert_eq!(snap.snake_cells, before);
}

#[test]
fn wraps_on_every_edge() {
    let cases = [
        ((14, 3), Direction::Right, (0, 3)),
        ((0, 3), Direction::Left, (14, 3)),
        ((3, 0), Direction::Up, (3, 14)),
        ((3, 14), Direction::Down, (3, 0)),
    ];
    for (start, direction, expected) in cases {
        let mut game = seeded(7);
        game.start_with_layout(cells(&[start]), direction, Position::new(8, 8))
            .unwrap();
        game.tick().unwrap();
        assert_eq!(game.snapshot().snake_cells[0], Position::from(expected));
    }
}

#[test]
fn long_random_play_keeps_invariants() {
    let mut game = seeded(8);
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    for round in 0..20u64 {
        game.start().unwrap();
        let mut best_before = game.snapshot().best_score;
        let mut len = game.snapshot().snake_cells.len();

        for step in 0..400u64 {
            if !game.is_playing() {
                break;
            }
            if (step + round) % 3 == 0 {
                game.request_direction(turns[((step / 3 + round) % 4) as usize]);
            }
            let food_before = game.snapshot().food_cell;
            game.tick().unwrap();
            let snap = game.snapshot();

            if snap.is_playing {
                let distinct: HashSet<Position> = snap.snake_cells.iter().copied().collect();
                assert_eq!(distinct.len(), snap.snake_cells.len());
                if let Some(food) = snap.food_cell {
                    assert!(!distinct.contains(&food));
                }

                let ate = food_before == Some(snap.snake_cells[0]);
                let expected = if ate { len + 1 } else { len };
                assert_eq!(snap.snake_cells.len(), expected);
                len = snap.snake_cells.len();
            }

            assert!(snap.best_score >= best_before);
            best_before = snap.best_score;
        }
    }
}
