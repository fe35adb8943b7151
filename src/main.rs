use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starraid::cli::{self, Command};
use starraid::models::position::{SectorCoord, Vec3};
use starraid::{Direction, GameEngine, GameEvent, MissionOutcome};

fn main() {
    let args = match cli::parse() {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", cli::args::USAGE);
            return;
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("{}", cli::args::USAGE);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    println!("*** STAR RAID ***");
    println!();

    let seed = args.seed.unwrap_or(0);
    let mut engine = GameEngine::new(args.difficulty, seed);
    engine.toggle_computer();
    report(&mut engine);

    for tick in 0..args.ticks {
        autopilot(&mut engine);
        engine.tick(args.dt);
        report(&mut engine);
        if !engine.state().is_active() {
            debug!(tick, "mission over");
            break;
        }
    }

    let data = engine.galaxy_data();
    let state = engine.state();
    println!();
    println!("DIFFICULTY            {}", data.difficulty);
    println!("ELAPSED               {:.1} s", state.elapsed);
    println!("HOSTILES DESTROYED    {}", data.enemies_destroyed);
    println!("HOSTILES REMAINING    {}", data.enemies_remaining);
    println!("STARBASES REMAINING   {}", data.strongholds_remaining);
    println!("ENERGY                {:.0}", state.player.energy);
    println!("SCORE                 {}", state.score);
    match state.outcome() {
        Some(MissionOutcome::Victory { score }) => println!("MISSION ACCOMPLISHED ({})", score),
        Some(MissionOutcome::Defeat { reason }) => println!("MISSION FAILED: {}", reason.describe()),
        None => println!("MISSION IN PROGRESS"),
    }
}

/// Minimal pilot for the headless run: shoot anything locked, line up
/// behind a hostile in the current sector, otherwise jump toward the
/// nearest sector with hostiles in it.
fn autopilot(engine: &mut GameEngine) {
    if engine.current_lock().is_full() {
        engine.fire_torpedo(Direction::Fore);
        return;
    }

    let here = engine.state().player.sector;
    let local = engine.galaxy().enemies_in_sector(here).first().map(|u| u.position);
    if let Some(target) = local {
        let firing_point = target - Vec3::new(0.0, 0.0, 50.0);
        if let Err(e) = engine.move_player(firing_point) {
            debug!("cannot line up: {}", e);
        }
        return;
    }
    let target = engine
        .galaxy()
        .units()
        .map(|u| SectorCoord::from_world(u.position))
        .min_by_key(|c| (c.manhattan(here), c.y, c.x));
    if let Some(dest) = target {
        match engine.hyperspace_jump(dest) {
            Ok(true) => {}
            Ok(false) => debug!(?dest, "jump refused"),
            Err(e) => warn!("jump failed: {}", e),
        }
    }
}

fn report(engine: &mut GameEngine) {
    for event in engine.drain_events() {
        match event {
            GameEvent::EnergyWarningPulse { .. } | GameEvent::PlayerFiredUpon { hit: false, .. } => {
                debug!(?event)
            }
            _ => info!(?event),
        }
    }
}
