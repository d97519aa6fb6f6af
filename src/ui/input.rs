//! Input handling systems

use bevy::prelude::*;
use log::error;

use super::components::{CameraSettings, CityResource, MainCamera};
use crate::simulation::DENSITY_STEP;

/// Handle exit and regeneration keys
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut city: ResMut<CityResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    let manager = &mut city.0;
    let current_seed = manager.city().map(|c| c.seed);

    let request = if keyboard.just_pressed(KeyCode::KeyR) {
        Some(None)
    } else if keyboard.just_pressed(KeyCode::BracketRight) {
        manager.set_density(manager.density() + DENSITY_STEP);
        Some(current_seed)
    } else if keyboard.just_pressed(KeyCode::BracketLeft) {
        manager.set_density(manager.density() - DENSITY_STEP);
        Some(current_seed)
    } else {
        None
    };

    if let Some(seed) = request {
        if let Err(err) = manager.regenerate(seed) {
            error!("Regeneration failed: {err:#}");
        }
    }
}

/// Pan the camera with W/A/S/D and zoom with Z/X
pub fn handle_camera_movement(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<CameraSettings>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    let forward = Vec3::new(transform.forward().x, 0.0, transform.forward().z).normalize_or_zero();
    let right = Vec3::new(transform.right().x, 0.0, transform.right().z).normalize_or_zero();

    let mut pan = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        pan += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        pan -= forward;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        pan += right;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        pan -= right;
    }
    transform.translation += pan.normalize_or_zero() * settings.movement_speed * dt;

    let look = *transform.forward();
    if keyboard.pressed(KeyCode::KeyZ) {
        transform.translation += look * settings.zoom_speed * dt;
    }
    if keyboard.pressed(KeyCode::KeyX) {
        transform.translation -= look * settings.zoom_speed * dt;
    }
}
