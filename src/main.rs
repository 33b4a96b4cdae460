use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::game_loop::FrameClock;
use engine::input::InputManager;
use game::{GameSettings, LevelAssets, Session, SessionEvent, SessionState, Variant};

const TITLE: &str = "Jam Platformer";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting {TITLE}...");

    let settings = GameSettings::default();
    let loader = AssetLoader::new(settings.asset_root);
    let assets = LevelAssets::load(&loader, settings.block_size)
        .with_context(|| format!("Failed to load assets from {}", settings.asset_root))?;
    let mut session = Session::new(settings.clone(), assets, Variant::Fire)
        .context("Failed to build levels")?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("{TITLE} - {}", session.hud_text()))
        .with_inner_size(winit::dpi::LogicalSize::new(
            settings.window_width,
            settings.window_height,
        ))
        .with_resizable(false)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut input = InputManager::new();
    let mut clock = FrameClock::new(settings.fps);
    let mut hud = session.hud_text();
    info!("Running at {} FPS", clock.fps());

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::AboutToWait => {
                if clock.begin_frame(Instant::now()) {
                    session.step(input.snapshot(), &clock.context());
                    input.end_frame();
                    log_events(&session);
                    if log::log_enabled!(log::Level::Trace) {
                        log_snapshot(&session);
                    }

                    let status = session.hud_text();
                    if status != hud {
                        window.set_title(&format!("{TITLE} - {status}"));
                        hud = status;
                    }
                    if session.state() == SessionState::Quit {
                        info!(
                            "Session ended after {} frames ({} late)",
                            clock.frame_count(),
                            clock.overruns()
                        );
                        elwt.exit();
                        return;
                    }
                }
                elwt.set_control_flow(ControlFlow::WaitUntil(clock.next_deadline()));
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

fn log_events(session: &Session) {
    for event in session.events() {
        match *event {
            SessionEvent::Jumped(count) => debug!("Jump {count}"),
            SessionEvent::Damaged { health } => debug!("Damaged, {health} health left"),
            SessionEvent::LevelComplete(variant) | SessionEvent::Restarted(variant) => {
                debug!("{event:?}: level {}", variant.number())
            }
            other => debug!("{other:?}"),
        }
    }
}

/// Trace what an external renderer would draw this frame
fn log_snapshot(session: &Session) {
    let snapshot = session.snapshot();
    let (width, height) = snapshot.player.frame.image().dimensions();
    let hazards = snapshot
        .obstacles
        .iter()
        .filter(|(kind, _)| kind.is_hazard())
        .count();
    log::trace!(
        "Level {} {:?}, health {}: {} ({}x{}) at {}, offset {}, {} obstacles ({} hazards)",
        snapshot.level,
        snapshot.state,
        snapshot.health,
        snapshot.player_sprite,
        width,
        height,
        snapshot.player.screen,
        snapshot.offset_x,
        snapshot.obstacles.len(),
        hazards
    );
}
