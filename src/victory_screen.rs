use bevy::prelude::*;

use crate::game_logic::format_clock;
use crate::session::RaceSession;

#[derive(Component)]
pub struct VictoryScreenEntity;

pub fn setup_victory_screen(mut commands: Commands, session: Res<RaceSession>) {
    let race = session.race();
    let best = race.best_lap.map_or("--".to_string(), format_clock);
    let lines = [
        ("FINISHED".to_string(), 64.0, Color::WHITE, 70.),
        (
            format!("Total {}", format_clock(race.race_clock)),
            30.0,
            Color::srgb(0.9, 0.92, 0.95),
            0.,
        ),
        (format!("Best lap {best}"), 26.0, Color::srgb(0.9, 0.92, 0.95), -40.),
        (
            "ENTER / SPACE / R to race again".to_string(),
            24.0,
            Color::srgb(1.0, 0.75, 0.3),
            -95.,
        ),
    ];

    commands.spawn((
        Sprite::from_color(Color::srgba(0.05, 0.07, 0.1, 0.6), Vec2::new(560., 260.)),
        Transform::from_xyz(0., 0., 9.),
        VictoryScreenEntity,
    ));
    for (text, size, color, y) in lines {
        commands.spawn((
            Text2d::new(text),
            TextColor(color),
            TextFont {
                font_size: size,
                ..default()
            },
            Transform::from_xyz(0., y, 10.),
            VictoryScreenEntity,
        ));
    }
}
