//! Rock Drift headless runner
//!
//! Runs the simulation with a scripted pilot and logs what happens.
//! Usage: `rock-drift [config.json] [frames] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive the world from their own frame callback
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), rock_drift::SimError> {
    use glam::Vec2;
    use rock_drift::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
    use rock_drift::renderer::{build_draw_list, rock_sprite_ids};
    use rock_drift::sim::{GameEvent, World, tick};
    use rock_drift::{GameConfig, InputState};

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => GameConfig::load(&path)?,
        _ => GameConfig::default(),
    };
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0FFEE);

    log::info!("Rock Drift (headless) starting: {} frames, seed {}", frames, seed);

    let mut world = World::new(
        config,
        Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
        seed,
        rock_sprite_ids(),
    )?;
    world.start();

    for frame in 0..frames {
        // Circle slowly while shooting in bursts
        let input = InputState {
            up: frame % 120 < 45,
            right: frame % 200 < 60,
            fire: frame % 30 < 10,
            ..Default::default()
        };
        tick(&mut world, &input);

        for event in world.drain_events() {
            match event {
                GameEvent::PlayerCrashed { ship } => {
                    log::info!("Frame {}: ship {} crashed", world.frame, ship)
                }
                GameEvent::RockDestroyed { rock } => {
                    log::info!("Frame {}: rock {} destroyed", world.frame, rock)
                }
            }
        }

        if world.ships.iter().all(|s| s.crashed) {
            log::info!("Game over at frame {}", world.frame);
            break;
        }
    }

    let stats = world.stats();
    let draw = build_draw_list(&world);
    log::info!(
        "Final: {} ships, {} projectiles, {} rocks, {} stars ({} triangles, {} sprites)",
        stats.ships,
        stats.projectiles,
        stats.rocks,
        stats.decorations,
        draw.triangles.len() / 3,
        draw.sprites.len()
    );
    Ok(())
}
