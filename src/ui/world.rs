//! World setup systems for camera and lighting

use bevy::prelude::*;

use super::components::{CityResource, MainCamera, NightMode};

/// System to setup the world environment (lighting, camera)
pub fn setup_world(mut commands: Commands, city: Res<CityResource>, night: Res<NightMode>) {
    let config = city.0.config();
    let reach = config.extent_x().max(config.extent_z());

    // Spawn a 3D camera looking down over the city at an angle
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, reach * 0.6, reach * 0.75).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let (illuminance, sky) = if night.0 {
        (800.0, Color::srgb(0.02, 0.03, 0.08))
    } else {
        (10000.0, Color::srgb(0.55, 0.7, 0.9))
    };
    commands.insert_resource(ClearColor(sky));

    // Spawn a directional light
    commands.spawn((
        DirectionalLight {
            illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(200.0, 400.0, 150.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
