//! Overworld Simulation Demo
//!
//! Runs a scripted session against a couple of demo enemies, logs the
//! interesting events, and verifies that replaying the same script
//! reproduces the same state hash.

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use overworld::{
    compute_state_hash, goal, run_script, CharSize, Direction, Enemy, FrameEventData, HitStatus,
    InputCommand, PixelVec2, Player, PlayerConfig, Stage, StateHash, World, FRAME_INTERVAL_MS,
    VERSION,
};

/// Minimal demo enemy: sits in place, stuns when stomped, rolls away when
/// kicked. Real enemy behaviors live outside the control core.
struct Snail {
    position: PixelVec2,
    size: CharSize,
    active: bool,
    stunned: bool,
}

impl Snail {
    fn new(x: i32, pixel_size: i32) -> Self {
        Self {
            position: PixelVec2::new(x, 0),
            size: CharSize::new(16 * pixel_size, 16 * pixel_size),
            active: true,
            stunned: false,
        }
    }

    fn stunned_at(x: i32, pixel_size: i32) -> Self {
        Self {
            stunned: true,
            ..Self::new(x, pixel_size)
        }
    }
}

impl Enemy for Snail {
    fn is_active(&self) -> bool {
        self.active
    }

    fn position(&self) -> PixelVec2 {
        self.position
    }

    fn char_size(&self) -> CharSize {
        self.size
    }

    fn is_stunned(&self) -> bool {
        self.stunned
    }

    fn on_kicked(&mut self, direction: Direction, impulse: i32) -> HitStatus {
        info!(?direction, impulse, "snail kicked away");
        self.active = false;
        HitStatus::Attack
    }

    fn on_killed(&mut self) {
        self.active = false;
    }

    fn on_stomped(&mut self, direction: Direction) {
        info!(?direction, "snail stomped");
        self.stunned = true;
    }

    fn on_grabbed(&mut self, held: bool) {
        info!(held, "snail grab state changed");
    }

    fn set_position(&mut self, position: PixelVec2) {
        self.position = position;
    }

    fn draw_action(&mut self) {}

    fn set_z_index(&mut self, _z_index: i32) {}
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Overworld Core v{}", VERSION);
    info!("Frame interval: {} ms", FRAME_INTERVAL_MS);

    let config = PlayerConfig::default();
    config.validate()?;
    let tuning = serde_json::to_string(&config)?;
    info!(config = %tuning, "tuning");

    let hash = demo_session(config, true);

    info!("=== Verifying Determinism ===");
    let replay_hash = demo_session(config, false);
    info!("First run hash:  {}", hex::encode(hash));
    info!("Replay hash:     {}", hex::encode(replay_hash));
    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: hashes match");
    } else {
        anyhow::bail!("determinism failure: hashes differ");
    }

    Ok(())
}

/// The demo script: run right with a dash, jump onto the first snail,
/// kick it, then pick up the second one and let it go again.
fn demo_script() -> Vec<(u32, InputCommand)> {
    vec![
        (0, InputCommand::PressRight),
        (10, InputCommand::PressJump),
        (50, InputCommand::PressGrab),
        (70, InputCommand::ReleaseGrab),
        (80, InputCommand::ReleaseRight),
    ]
}

fn demo_session(config: PlayerConfig, verbose: bool) -> StateHash {
    let stage = Stage::with_bounds(0, 640);
    let mut world = World::new(stage);
    world.add_enemy(Box::new(Snail::new(140, config.pixel_size)));
    world.add_enemy(Box::new(Snail::stunned_at(260, config.pixel_size)));

    let mut player = Player::new(config, PixelVec2::new(16, 0), Direction::Right);

    let events = run_script(&mut player, &mut world, &demo_script(), 100);

    if verbose {
        let mut draws = 0usize;
        for event in &events {
            match &event.data {
                FrameEventData::Draw { .. } => draws += 1,
                FrameEventData::ScoreAwarded { amount, total } => {
                    info!(tick = event.tick, amount, total, "score");
                }
                FrameEventData::PointEffect { position, streak } => {
                    info!(tick = event.tick, %position, streak, "point popup");
                }
                FrameEventData::StarEffect { position } => {
                    info!(tick = event.tick, %position, "stomp burst");
                }
                FrameEventData::SlipEffect { position } => {
                    info!(tick = event.tick, %position, "skid");
                }
                FrameEventData::SpecialEffect { position } => {
                    info!(tick = event.tick, %position, "special flash");
                }
                FrameEventData::PushedUp => info!(tick = event.tick, "ceiling bump"),
                FrameEventData::GameOver => info!(tick = event.tick, "game over"),
                FrameEventData::Destroyed => info!(tick = event.tick, "player removed"),
                FrameEventData::GoalReached => info!(tick = event.tick, "goal"),
            }
        }
        info!(
            draws,
            score = player.score,
            x = player.position.x,
            "session finished"
        );
    }

    // Wrap up with the goal sequence
    goal(&mut player, &mut world, Some(|| info!("course clear!")));
    let _ = world.take_events();

    compute_state_hash(world.tick, |hasher| player.hash_into(hasher))
}
