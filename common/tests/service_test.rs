use std::time::Duration;

use common::{Direction, GameConfig, GameController, GameError, Position, Speed, spawn_game};
use tokio::time;

fn controller(speed: Speed) -> GameController {
    GameController::new(GameConfig { seed: Some(21), speed, ..GameConfig::default() }).unwrap()
}

#[tokio::test(start_paused = true)]
async fn start_publishes_a_playing_snapshot() {
    let (game, _task) = spawn_game(controller(Speed::Normal));
    let mut updates = game.subscribe();
    assert!(!game.snapshot().is_playing);

    game.start().unwrap();
    updates.changed().await.unwrap();

    let snap = updates.borrow_and_update().clone();
    assert!(snap.is_playing);
    assert_eq!(snap.round_id, 1);
    assert_eq!(snap.tick, 0);
    assert!(snap.food_cell.is_some());
}

#[tokio::test(start_paused = true)]
async fn ticks_follow_the_selected_speed() {
    let (game, _task) = spawn_game(controller(Speed::Fast));
    game.start().unwrap();

    // Fast is 120 ms: ticks land at 120, 240, 360.
    time::sleep(Duration::from_millis(400)).await;
    let snap = game.snapshot();
    assert_eq!(snap.tick, 3);
    assert_eq!(snap.snake_cells[0].y, 7);
}

#[tokio::test(start_paused = true)]
async fn direction_requests_apply_on_the_next_tick() {
    let (game, _task) = spawn_game(controller(Speed::Normal));
    game.start().unwrap();
    time::sleep(Duration::from_millis(10)).await;

    game.request_direction(Direction::Down).unwrap();
    time::sleep(Duration::from_millis(200)).await;

    let snap = game.snapshot();
    assert_eq!(snap.tick, 1);
    assert_eq!(snap.snake_cells[0], Position::new(7, 8));
}

#[tokio::test(start_paused = true)]
async fn speed_is_locked_while_playing() {
    let (game, _task) = spawn_game(controller(Speed::Normal));
    game.set_speed(Speed::Slow).await.unwrap();
    assert_eq!(game.snapshot().speed, Speed::Slow);

    game.start().unwrap();
    assert_eq!(game.set_speed(Speed::Fast).await, Err(GameError::SpeedLocked));
    assert_eq!(game.snapshot().speed, Speed::Slow);
}

#[tokio::test(start_paused = true)]
async fn restart_while_playing_is_ignored() {
    let (game, _task) = spawn_game(controller(Speed::Normal));
    game.start().unwrap();
    game.start().unwrap();
    time::sleep(Duration::from_millis(450)).await;

    let snap = game.snapshot();
    assert_eq!(snap.round_id, 1);
    // One clock only: two ticks in 450 ms at 200 ms.
    assert_eq!(snap.tick, 2);
}

#[tokio::test(start_paused = true)]
async fn restart_after_game_over_runs_a_single_clock() {
    // Heading left into its own second cell: dead on the first tick.
    let config = GameConfig {
        seed: Some(4),
        start_body: vec![Position::new(5, 5), Position::new(4, 5)],
        initial_direction: Direction::Left,
        ..GameConfig::default()
    };
    let (game, _task) = spawn_game(GameController::new(config).unwrap());

    game.start().unwrap();
    time::sleep(Duration::from_millis(250)).await;
    let snap = game.snapshot();
    assert!(snap.is_game_over);
    assert_eq!(snap.tick, 1);

    game.start().unwrap();
    game.request_direction(Direction::Up).unwrap();
    time::sleep(Duration::from_millis(450)).await;

    // Round two armed at 250 ms: ticks at 450 and 650 only.
    let snap = game.snapshot();
    assert_eq!(snap.round_id, 2);
    assert!(snap.is_playing);
    assert_eq!(snap.tick, 2);
    assert_eq!(snap.snake_cells[0], Position::new(5, 3));
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_task() {
    let (game, task) = spawn_game(controller(Speed::Normal));
    game.start().unwrap();
    drop(game);

    time::timeout(Duration::from_secs(5), task)
        .await
        .expect("service should stop")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_the_mailbox() {
    let (game, task) = spawn_game(controller(Speed::Normal));
    game.shutdown().unwrap();
    task.await.unwrap();
    assert_eq!(game.start(), Err(GameError::ServiceClosed));
}
