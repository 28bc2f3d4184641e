use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::game_logic::{RaceMode, RaceState, VIEWPORT_HEIGHT, VIEWPORT_WIDTH, format_clock};
use crate::session::RaceSession;

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct OffTrackWarning;

/// Race readout shown in the top-left corner.
pub fn hud_text(race: &RaceState, speed: f32) -> String {
    let last = race.last_lap.map_or("--".to_string(), format_clock);
    let best = race.best_lap.map_or("--".to_string(), format_clock);
    format!(
        "LAP {}/{}\nTIME {}\nLAP TIME {}\nLAST {last}\nBEST {best}\nSPEED {:.0}",
        race.display_lap(),
        race.lap_target,
        format_clock(race.race_clock),
        format_clock(race.current_lap()),
        speed.abs(),
    )
}

pub fn setup_hud(mut commands: Commands) {
    let margin = 16.;
    commands.spawn((
        Text2d::new(""),
        TextColor(Color::WHITE),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        Anchor::TopLeft,
        Transform::from_xyz(
            -VIEWPORT_WIDTH / 2. + margin,
            VIEWPORT_HEIGHT / 2. - margin,
            10.,
        ),
        Visibility::Hidden,
        HudText,
    ));
    commands.spawn((
        Text2d::new("OFF TRACK"),
        TextColor(Color::srgb(1.0, 0.75, 0.3)),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        Transform::from_xyz(0., VIEWPORT_HEIGHT / 2. - 40., 10.),
        Visibility::Hidden,
        OffTrackWarning,
    ));
}

pub fn update_hud(
    session: Res<RaceSession>,
    mut hud: Single<(&mut Text2d, &mut Visibility), With<HudText>>,
    mut warning: Single<&mut Visibility, (With<OffTrackWarning>, Without<HudText>)>,
) {
    let race = session.race();
    let (text, visibility) = &mut *hud;

    **visibility = if race.mode == RaceMode::Menu {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    text.0 = hud_text(race, session.vehicle().speed);

    **warning = if race.is_racing() && race.off_track {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_before_first_lap() {
        let race = RaceState::new(RaceMode::Racing, 3, 24.0, 1000.0);
        let text = hud_text(&race, -42.4);
        assert!(text.starts_with("LAP 1/3\n"));
        assert!(text.contains("LAST --"));
        assert!(text.contains("BEST --"));
        assert!(text.ends_with("SPEED 42"));
    }

    #[test]
    fn test_hud_after_a_lap() {
        let mut race = RaceState::new(RaceMode::Racing, 3, 24.0, 1000.0);
        race.race_clock = 31.5;
        race.check_lap(1100.0, 300.0, 38.0, 1000.0);
        race.race_clock = 40.0;
        let text = hud_text(&race, 300.0);
        assert!(text.starts_with("LAP 2/3\n"));
        assert!(text.contains("TIME 00:40.000"));
        assert!(text.contains("LAP TIME 00:08.500"));
        assert!(text.contains("BEST 00:31.500"));
    }
}
