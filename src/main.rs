//! Breakout entry point
//!
//! Runs a headless round with an autopilot paddle and prints the result.
//! Usage: `breakout [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use breakout::Settings;
#[cfg(not(target_arch = "wasm32"))]
use breakout::platform::{FrameLoop, HeadlessRenderer};
#[cfg(not(target_arch = "wasm32"))]
use breakout::sim::{Game, GamePhase, TickInput};

/// Five in-game minutes at the default tick rate
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 5 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let arena = settings.arena;

    let mut game = Game::new(settings, arena);
    let mut renderer = HeadlessRenderer::default();
    let mut frame_loop = FrameLoop::new();

    while !frame_loop.is_stopped() {
        let input = autopilot(&game);
        frame_loop.step(&mut game, &input, &arena, &mut renderer);

        if game.phase() == GamePhase::Ended {
            frame_loop.request_stop();
        } else if game.blocks_remaining() == 0 {
            log::info!("All blocks cleared");
            frame_loop.request_stop();
        } else if frame_loop.frames() >= MAX_FRAMES {
            log::info!("Frame cap reached");
            frame_loop.request_stop();
        }
    }

    log::info!("Stopped after {} frames", frame_loop.frames());
    if let Some(hud) = renderer.last_hud() {
        println!("{hud}");
    }
    match serde_json::to_string_pretty(game.state()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final state: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend; the library is driven by an embedding host
}

/// Steer the paddle center toward the ball center
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(game: &Game) -> TickInput {
    let paddle = game.entities().iter().find(|e| e.is_paddle());
    let ball = game.entities().iter().find(|e| e.is_ball());
    let (Some(paddle), Some(ball)) = (paddle, ball) else {
        return TickInput::default();
    };

    let paddle_center = paddle.pos.x + paddle.size.x / 2.0;
    let ball_center = ball.pos.x + ball.size.x / 2.0;
    let dead_zone = paddle.speed;

    TickInput {
        move_left: ball_center < paddle_center - dead_zone,
        move_right: ball_center > paddle_center + dead_zone,
        pause: false,
    }
}
