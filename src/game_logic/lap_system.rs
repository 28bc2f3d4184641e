/// Top-level race phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RaceMode {
    #[default]
    Menu,
    Racing,
    Finished,
}

impl RaceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaceMode::Menu => "menu",
            RaceMode::Racing => "racing",
            RaceMode::Finished => "finished",
        }
    }
}

/// Clocks and lap counters for one race.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceState {
    pub mode: RaceMode,
    pub race_clock: f32,
    pub lap_start_clock: f32,
    pub best_lap: Option<f32>,
    pub last_lap: Option<f32>,
    pub laps_completed: u32,
    pub lap_target: u32,
    /// Total progress the vehicle must reach to complete the next lap.
    pub next_lap_at: f32,
    pub off_track: bool,
}

/// Emitted when the vehicle crosses the line with enough speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LapCompleted {
    pub lap: u32,
    pub lap_time: f32,
    pub finished: bool,
}

impl RaceState {
    /// Fresh race clocks. `best_lap` survives across restarts.
    pub fn new(mode: RaceMode, lap_target: u32, start_s: f32, total_length: f32) -> Self {
        Self {
            mode,
            race_clock: 0.0,
            lap_start_clock: 0.0,
            best_lap: None,
            last_lap: None,
            laps_completed: 0,
            lap_target,
            next_lap_at: start_s + total_length,
            off_track: false,
        }
    }

    /// Reset clocks and counters for a new run, keeping the best lap.
    pub fn restart(&mut self, mode: RaceMode, start_s: f32, total_length: f32) {
        let best_lap = self.best_lap;
        *self = Self::new(mode, self.lap_target, start_s, total_length);
        self.best_lap = best_lap;
    }

    pub fn is_racing(&self) -> bool {
        self.mode == RaceMode::Racing
    }

    /// Time spent on the lap in progress.
    pub fn current_lap(&self) -> f32 {
        self.race_clock - self.lap_start_clock
    }

    /// Lap number shown to the driver, 1-based and capped at the target.
    pub fn display_lap(&self) -> u32 {
        (self.laps_completed + 1).min(self.lap_target)
    }

    /// Credit a lap if the vehicle has reached the line while moving.
    pub fn check_lap(
        &mut self,
        total_progress: f32,
        speed: f32,
        min_speed: f32,
        total_length: f32,
    ) -> Option<LapCompleted> {
        if !self.is_racing() || total_progress < self.next_lap_at || speed <= min_speed {
            return None;
        }

        let lap_time = self.race_clock - self.lap_start_clock;
        self.last_lap = Some(lap_time);
        self.best_lap = Some(self.best_lap.map_or(lap_time, |best| best.min(lap_time)));
        self.laps_completed += 1;
        self.lap_start_clock = self.race_clock;
        self.next_lap_at += total_length;

        let finished = self.laps_completed >= self.lap_target;
        if finished {
            self.mode = RaceMode::Finished;
        }

        Some(LapCompleted {
            lap: self.laps_completed,
            lap_time,
            finished,
        })
    }
}

/// Format seconds as `MM:SS.mmm`.
pub fn format_clock(seconds: f32) -> String {
    let total_ms = (seconds * 1000.0).round().max(0.0) as u64;
    let mins = total_ms / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;
    format!("{mins:02}:{secs:02}.{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn racing(lap_target: u32) -> RaceState {
        RaceState::new(RaceMode::Racing, lap_target, 24.0, 1000.0)
    }

    #[test]
    fn test_new_race_waits_one_loop_past_start() {
        let race = racing(3);
        assert_eq!(race.next_lap_at, 1024.0);
        assert_eq!(race.laps_completed, 0);
        assert_eq!(race.best_lap, None);
    }

    #[test]
    fn test_lap_requires_progress_and_speed() {
        let mut race = racing(3);
        race.race_clock = 20.0;
        assert_eq!(race.check_lap(1000.0, 200.0, 38.0, 1000.0), None);
        assert_eq!(race.check_lap(1030.0, 10.0, 38.0, 1000.0), None);

        let lap = race.check_lap(1030.0, 200.0, 38.0, 1000.0).unwrap();
        assert_eq!(lap.lap, 1);
        assert_eq!(lap.lap_time, 20.0);
        assert!(!lap.finished);
        assert_eq!(race.next_lap_at, 2024.0);
        assert_eq!(race.lap_start_clock, 20.0);
    }

    #[test]
    fn test_best_lap_tracks_minimum() {
        let mut race = racing(5);
        race.race_clock = 20.0;
        race.check_lap(1030.0, 200.0, 38.0, 1000.0);
        race.race_clock = 38.0;
        race.check_lap(2030.0, 200.0, 38.0, 1000.0);
        race.race_clock = 60.0;
        race.check_lap(3030.0, 200.0, 38.0, 1000.0);

        assert_eq!(race.last_lap, Some(22.0));
        assert_eq!(race.best_lap, Some(18.0));
        assert_eq!(race.laps_completed, 3);
    }

    #[test]
    fn test_reaching_target_finishes_race() {
        let mut race = racing(1);
        race.race_clock = 15.0;
        let lap = race.check_lap(1024.0 + 1.0, 100.0, 38.0, 1000.0).unwrap();
        assert!(lap.finished);
        assert_eq!(race.mode, RaceMode::Finished);
        assert_eq!(race.check_lap(5000.0, 100.0, 38.0, 1000.0), None);
    }

    #[test]
    fn test_no_laps_outside_racing() {
        let mut race = RaceState::new(RaceMode::Menu, 3, 24.0, 1000.0);
        assert_eq!(race.check_lap(5000.0, 100.0, 38.0, 1000.0), None);
    }

    #[test]
    fn test_restart_keeps_best_lap() {
        let mut race = racing(2);
        race.race_clock = 12.0;
        race.check_lap(1030.0, 100.0, 38.0, 1000.0);
        race.restart(RaceMode::Racing, 24.0, 1000.0);
        assert_eq!(race.race_clock, 0.0);
        assert_eq!(race.laps_completed, 0);
        assert_eq!(race.last_lap, None);
        assert_eq!(race.best_lap, Some(12.0));
        assert_eq!(race.lap_target, 2);
    }

    #[test]
    fn test_display_lap_is_capped() {
        let mut race = racing(2);
        assert_eq!(race.display_lap(), 1);
        race.laps_completed = 2;
        assert_eq!(race.display_lap(), 2);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00.000");
        assert_eq!(format_clock(75.5), "01:15.500");
        assert_eq!(format_clock(-3.0), "00:00.000");
        assert_eq!(format_clock(61.25), "01:01.250");
    }
}
