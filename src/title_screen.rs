use bevy::prelude::*;

use crate::game_logic::format_clock;
use crate::session::RaceSession;

#[derive(Component)]
pub struct MainScreenEntity;

fn label(text: impl Into<String>, size: f32, color: Color, y: f32) -> impl Bundle {
    (
        Text2d::new(text),
        TextColor(color),
        TextFont {
            font_size: size,
            ..default()
        },
        Transform::from_xyz(0., y, 10.),
    )
}

pub fn setup_title_screen(mut commands: Commands, session: Res<RaceSession>) {
    let race = session.race();

    commands.spawn((
        Sprite::from_color(Color::srgba(0.05, 0.07, 0.1, 0.55), Vec2::new(620., 300.)),
        Transform::from_xyz(0., 0., 9.),
        MainScreenEntity,
    ));
    commands.spawn((label("POLYTRACK", 72.0, Color::WHITE, 80.), MainScreenEntity));
    commands.spawn((
        label(
            format!("{} laps around the circuit", race.lap_target),
            26.0,
            Color::srgb(0.85, 0.88, 0.92),
            10.,
        ),
        MainScreenEntity,
    ));
    commands.spawn((
        label(
            "W / Up to drive   S / Down to brake   A D to steer",
            20.0,
            Color::srgb(0.75, 0.8, 0.86),
            -40.,
        ),
        MainScreenEntity,
    ));
    commands.spawn((
        label("Press ENTER or SPACE to start", 30.0, Color::srgb(1.0, 0.75, 0.3), -95.),
        MainScreenEntity,
    ));

    if let Some(best) = race.best_lap {
        commands.spawn((
            label(format!("Best lap {}", format_clock(best)), 20.0, Color::WHITE, -130.),
            MainScreenEntity,
        ));
    }
}

pub fn destroy_screen<CurrentScreen: Component>(
    mut commands: Commands,
    query: Query<Entity, With<CurrentScreen>>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
