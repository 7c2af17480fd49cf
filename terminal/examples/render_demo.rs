use common::{Direction, GameConfig, GameController, Position, Snapshot};
use terminal::render::{
    arena::ArenaRenderer,
    standard_renderer::StandardRenderer,
    types::{CharDimensions, RenderConfig},
};

fn main() {
    // Play a seeded game for a few ticks and print the board at each size.
    let mut game = GameController::new(GameConfig { seed: Some(7), ..GameConfig::default() })
        .expect("default config is valid");
    game.start_with_layout(
        vec![Position::new(7, 7), Position::new(6, 7), Position::new(5, 7)],
        Direction::Right,
        Position::new(10, 7),
    )
    .expect("layout fits the board");
    game.request_direction(Direction::Down);
    for _ in 0..3 {
        game.tick().expect("tick");
    }
    let snapshot = game.snapshot();

    println!("=== 1x1 Rendering (Classic) ===");
    render_with_dimensions(&snapshot, CharDimensions::new(1, 1));

    println!("\n=== 2x1 Rendering (Wide) ===");
    render_with_dimensions(&snapshot, CharDimensions::new(2, 1));

    println!("\n=== 3x2 Rendering (Large) ===");
    render_with_dimensions(&snapshot, CharDimensions::new(3, 2));

    println!("\n{}", snapshot.to_json().expect("snapshot serializes"));
}

fn render_with_dimensions(snapshot: &Snapshot, char_dims: CharDimensions) {
    let renderer = StandardRenderer::new(char_dims);
    let arena_renderer = ArenaRenderer::new(renderer);
    let config = RenderConfig { chars_per_point: char_dims };

    let char_grid = arena_renderer.render(snapshot, &config);
    let width = char_grid.physical_width();

    println!("Dimensions: {}x{} chars per point", char_dims.horizontal, char_dims.vertical);
    println!("┌{}┐", "─".repeat(width));
    for line in char_grid.into_lines() {
        println!("│{}│", line.into_iter().collect::<String>());
    }
    println!("└{}┘", "─".repeat(width));
}
