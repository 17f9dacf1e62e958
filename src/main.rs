//! Spriteflow demo driver.
//!
//! Runs the animation and particle systems headless for a fixed number of
//! ticks and logs what happened. Nothing is rendered to a window; draw calls
//! go to a recording target and are only counted.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (simulation settings) and the JSON asset document
//! 2. Build the image and animation stores
//! 3. Spawn an animated sprite with a flash effect, and a particle emitter
//! 4. Register observers for finish and drain events
//! 5. Tick the schedule `ticks` times at `1 / tps` seconds and render each tick
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini --burst
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};

use spriteflow::components::animation::Animation;
use spriteflow::components::effects::{Effects, FlashEffect, ShakeEffect};
use spriteflow::components::mapposition::MapPosition;
use spriteflow::components::particleemitter::{ParticleEmitter, ParticleVisual};
use spriteflow::components::sprite::Sprite;
use spriteflow::components::zindex::ZIndex;
use spriteflow::easing::Easing;
use spriteflow::errors::{Result, SpriteFlowError};
use spriteflow::events::animation::AnimationFinishedEvent;
use spriteflow::events::particles::EmitterDrainedEvent;
use spriteflow::render::RecordingTarget;
use spriteflow::resources::animationstore::AnimationStore;
use spriteflow::resources::assetconfig::{EmitterConfig, ResourceConfig, load_config_data};
use spriteflow::resources::imagestore::ImageStore;
use spriteflow::resources::simconfig::SimConfig;
use spriteflow::resources::worldtime::WorldTime;
use spriteflow::systems::animation::animation_system;
use spriteflow::systems::effects::effects_system;
use spriteflow::systems::particleemitter::particle_emitter_system;
use spriteflow::systems::render::render_pass;
use spriteflow::systems::time::update_world_time;

/// Spriteflow headless demo
#[derive(Parser)]
#[command(version, about = "Runs sprite animations and particle pools headless and logs the result.")]
struct Cli {
    /// INI settings file.
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Override the asset document path from the settings file.
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Override the number of ticks to run.
    #[arg(long)]
    ticks: Option<u32>,

    /// Animation to play instead of the configured default.
    #[arg(long)]
    animation: Option<String>,

    /// Fill the particle pool on the first tick.
    #[arg(long)]
    burst: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = SimConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        info!("{}; using defaults", e);
    }
    if let Some(assets) = cli.assets {
        config.assets_path = assets;
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }

    // --------------- Assets ---------------
    let assets: ResourceConfig = load_config_data(&config.assets_path)?;
    let mut images = ImageStore::new();
    for (name, size) in &assets.images {
        images.insert(name.as_str(), size.width, size.height);
    }
    let mut animations = AnimationStore::new();
    animations.load_config(&assets, &images)?;

    let anim_name = cli
        .animation
        .or_else(|| animations.default_animation.clone())
        .or_else(|| assets.animations.keys().next().cloned())
        .ok_or(SpriteFlowError::NoAnimations)?;

    let (emitter_cfg, visual) = match assets.emitters.iter().next() {
        Some((name, cfg)) => {
            info!("Using emitter '{}'", name);
            (cfg.clone(), ParticleVisual::from_config(cfg, &animations, &images)?)
        }
        None => (EmitterConfig::default(), ParticleVisual::Point),
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));

    let mut anim = animations.instantiate(&anim_name)?;
    anim.run();
    let sprite = Sprite::from_animation(&anim);
    let mut effects = Effects::new();
    effects.apply(FlashEffect::new(0.5, Easing::InQuad, Easing::OutQuad));
    effects.apply(ShakeEffect::new(0.25, 4.0, 4.0).with_seed(config.seed));
    world.spawn((anim, sprite, effects, MapPosition::new(160.0, 90.0), ZIndex(1)));

    let mut emitter = ParticleEmitter::from_config(&emitter_cfg, visual).with_seed(config.seed);
    if cli.burst {
        emitter.burst();
    } else {
        emitter.show(true);
    }
    world.spawn((emitter, MapPosition::new(160.0, 120.0)));

    world.insert_resource(config.clone());
    world.insert_resource(images);
    world.insert_resource(animations);

    world.add_observer(|trigger: On<AnimationFinishedEvent>, time: Res<WorldTime>| {
        info!(
            "Animation on {:?} finished at {:.2}s",
            trigger.event().entity,
            time.elapsed
        );
    });
    world.add_observer(|trigger: On<EmitterDrainedEvent>, time: Res<WorldTime>| {
        info!(
            "Emitter on {:?} drained at {:.2}s",
            trigger.event().entity,
            time.elapsed
        );
    });
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(animation_system);
    update.add_systems(effects_system);
    update.add_systems(particle_emitter_system);

    // --------------- Main loop ---------------
    let dt = config.tick_seconds();
    let mut target = RecordingTarget::new();
    let mut draws = 0usize;
    let mut peak_particles = 0usize;
    for _ in 0..config.ticks {
        update_world_time(&mut world, dt);
        update.run(&mut world);
        world.clear_trackers();

        target.clear();
        render_pass(&mut world, &mut target);
        draws += target.total();

        let mut q = world.query::<&ParticleEmitter>();
        let live: usize = q.iter(&world).map(ParticleEmitter::active_particles).sum();
        peak_particles = peak_particles.max(live);
    }

    let time = *world.resource::<WorldTime>();
    let mut q = world.query::<&Animation>();
    for anim in q.iter(&world) {
        info!(
            "'{}' ended in state {:?} on frame {}",
            anim_name,
            anim.state(),
            anim.current_frame()
        );
    }
    info!(
        "Ran {} ticks ({:.2}s simulated): {} draw calls, peak {} particles",
        time.frame_count, time.elapsed, draws, peak_particles
    );

    Ok(())
}
