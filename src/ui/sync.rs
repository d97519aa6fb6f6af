//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{to_transform, CityResource, HudText, VehiclePart, VehiclePartKind};
use crate::simulation::WHEELS_PER_VEHICLE;

/// System to run one traffic tick per frame
pub fn tick_simulation(time: Res<Time>, mut city: ResMut<CityResource>) {
    city.0.tick(time.delta_secs());
}

/// System to copy vehicle transforms from the instance buffers onto entities
pub fn sync_vehicles(city: Res<CityResource>, mut parts: Query<(&VehiclePart, &mut Transform)>) {
    let Some(city) = city.0.city() else {
        return;
    };
    let buffers = &city.vehicle_instances;

    for (part, mut transform) in parts.iter_mut() {
        let instance = match part.kind {
            VehiclePartKind::Body => buffers.bodies.get(part.vehicle),
            VehiclePartKind::Roof => buffers.roofs.get(part.vehicle),
            VehiclePartKind::Wheel(wheel) => buffers
                .wheels
                .get(part.vehicle * WHEELS_PER_VEHICLE + wheel),
        };
        if let Some(instance) = instance {
            *transform = to_transform(instance);
        }
    }
}

/// System to spawn the HUD text panel
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Generating..."),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText,
            ));
        });
}

/// System to show the current city's summary in the HUD
pub fn update_hud(city: Res<CityResource>, mut text_query: Query<&mut Text, With<HudText>>) {
    if !city.is_changed() {
        return;
    }
    let line = match city.0.city() {
        Some(city) => {
            let summary = city.summary();
            format!(
                "{} | Density: {:.1} | Buildings: {}",
                summary.hud_line(),
                summary.density,
                summary.building_count
            )
        }
        None => "No city".to_string(),
    };
    for mut text in text_query.iter_mut() {
        **text = line.clone();
    }
}
