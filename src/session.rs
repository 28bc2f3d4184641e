use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::game_logic::*;
use crate::render::{CameraView, DrawList, compose, scene};
use crate::snapshot::RaceSnapshot;

/// Edge-triggered race controls, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RaceActions {
    pub start: bool,
    pub restart: bool,
}

/// Everything one race mutates: clocks, vehicle and camera.
///
/// Only the fixed tick and explicit resets write to it. Rendering and
/// snapshots borrow it immutably.
#[derive(Resource, Clone, Debug)]
pub struct RaceSession {
    track: Track,
    config: RaceConfig,
    race: RaceState,
    vehicle: VehicleState,
    camera: CameraRig,
}

impl RaceSession {
    pub fn new(track: Track, config: RaceConfig) -> Result<Self, ConfigError> {
        config.validate(&track)?;

        let race = RaceState::new(
            RaceMode::Menu,
            config.lap_target,
            config.start_s,
            track.total_length(),
        );
        let vehicle = VehicleState::at_start(&track, config.start_s);
        let camera = CameraRig::new(config.view_mode, &vehicle);

        Ok(Self {
            track,
            config,
            race,
            vehicle,
            camera,
        })
    }

    /// Session on the built-in circuit.
    pub fn with_default_track(config: RaceConfig) -> Result<Self, ConfigError> {
        Self::new(Track::default_circuit()?, config)
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn race(&self) -> &RaceState {
        &self.race
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    /// Direct vehicle access for scripted scenarios. Does not touch clocks.
    pub fn vehicle_mut(&mut self) -> &mut VehicleState {
        &mut self.vehicle
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn mode(&self) -> RaceMode {
        self.race.mode
    }

    /// Put the vehicle back on the start pose with fresh clocks.
    pub fn reset(&mut self, mode: RaceMode) {
        let start_s = self.config.start_s;
        let total = self.track.total_length();

        self.race.restart(mode, start_s, total);
        self.vehicle = VehicleState::at_start(&self.track, start_s);
        self.camera.snap(&self.vehicle);

        info!("Race reset: mode={} start_s={:.1}", mode.as_str(), start_s);
    }

    /// Apply start/restart transitions. Returns true if the race was reset.
    pub fn handle_actions(&mut self, actions: &RaceActions) -> bool {
        let reset = match self.race.mode {
            RaceMode::Menu => actions.start,
            RaceMode::Racing => actions.restart,
            RaceMode::Finished => actions.start || actions.restart,
        };
        if reset {
            self.reset(RaceMode::Racing);
        }
        reset
    }

    /// One fixed simulation step.
    pub fn tick(&mut self, input: &PhysicsInput) {
        let delta = self.config.fixed_timestep;

        if self.race.is_racing() {
            let report = apply_physics(
                &mut self.vehicle,
                ControlInput::from(input),
                &self.track,
                &self.config,
                delta,
            );
            self.race.off_track = report.off_track;
            self.race.race_clock += delta;

            if let Some(lap) = self.race.check_lap(
                self.vehicle.total_progress,
                self.vehicle.speed,
                self.config.lap_credit_min_speed,
                self.track.total_length(),
            ) {
                info!(
                    "Lap {}/{} completed in {}",
                    lap.lap,
                    self.race.lap_target,
                    format_clock(lap.lap_time)
                );
                if lap.finished {
                    self.vehicle.speed = 0.0;
                    info!(
                        "Race finished in {} (best lap {})",
                        format_clock(self.race.race_clock),
                        self.race.best_lap.map_or("--".to_string(), format_clock)
                    );
                }
            }
        }

        self.camera.update(&self.vehicle, self.race.off_track, delta);
    }

    /// Run enough fixed ticks to cover `ms` of wall time, then render.
    pub fn advance_time(&mut self, ms: f32, input: &PhysicsInput) -> DrawList {
        for _ in 0..self.ticks_for(ms) {
            self.tick(input);
        }
        self.render()
    }

    /// Whole fixed steps in `ms`, rounded to nearest, at least one.
    pub fn ticks_for(&self, ms: f32) -> u32 {
        let step_ms = self.config.fixed_timestep * 1000.0;
        (ms / step_ms).round().max(1.0) as u32
    }

    pub fn view(&self) -> CameraView {
        CameraView::for_mode(
            self.camera.mode,
            &self.camera.state,
            self.config.fov_deg,
            Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        )
    }

    /// Composite the current state, back to front.
    pub fn render(&self) -> DrawList {
        let polygons = scene(
            &self.track,
            &self.vehicle,
            self.race.off_track,
            self.config.start_s,
            self.config.half_width,
        );
        compose(polygons, &self.view())
    }

    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot::capture(self)
    }
}
