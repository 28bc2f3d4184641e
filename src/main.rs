use bevy::{prelude::*, window::PresentMode};
use clap::Parser;

use polytrack::game_logic::{LAP_TARGET, RaceConfig, VIEWPORT_HEIGHT, VIEWPORT_WIDTH, ViewMode};
use polytrack::race_plugin::RacePlugin;
use polytrack::session::RaceSession;

#[derive(Parser)]
#[command(name = "polytrack")]
#[command(version, about = "Arcade lap racing on a closed polyline circuit")]
struct Args {
    /// Orthographic camera straight above the car instead of the chase view
    #[arg(long)]
    top_down: bool,

    /// Laps needed to finish the race
    #[arg(long, default_value_t = LAP_TARGET)]
    laps: u32,
}

impl Args {
    fn view_mode(&self) -> ViewMode {
        if self.top_down {
            ViewMode::TopDown
        } else {
            ViewMode::Chase
        }
    }
}

fn main() -> AppExit {
    let args = Args::parse();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Polytrack".into(),
            resolution: (VIEWPORT_WIDTH, VIEWPORT_HEIGHT).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    let view_mode = args.view_mode();
    let config = RaceConfig::default()
        .with_view_mode(view_mode)
        .with_lap_target(args.laps);
    let session = match RaceSession::with_default_track(config) {
        Ok(session) => session,
        Err(err) => {
            error!("Cannot start race: {err}");
            return AppExit::error();
        }
    };
    info!(
        "Track ready: {} segments, {:.1} units per lap, {} laps, {:?} view",
        session.track().len(),
        session.track().total_length(),
        args.laps,
        view_mode
    );

    app.add_plugins(RacePlugin::new(session)).run()
}
