//! Systems for spawning visual entities from city state

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::components::{
    to_transform, CityEntity, CityResource, NightMode, RenderedGeneration, VehiclePart,
    VehiclePartKind,
};
use crate::simulation::{Axis, City, LotRect, WHEELS_PER_VEHICLE};

const ROAD_HEIGHT: f32 = 0.1;
const SIDEWALK_HEIGHT: f32 = 0.25;
const PARK_HEIGHT: f32 = 0.3;
const TRUNK_RADIUS: f32 = 0.4;
const CANOPY_RADIUS: f32 = 2.6;

/// Shared handles for meshes reused across many entities
struct CityMeshes {
    unit_cube: Handle<Mesh>,
    trunk: Handle<Mesh>,
    canopy: Handle<Mesh>,
    body: Handle<Mesh>,
    roof: Handle<Mesh>,
    wheel: Handle<Mesh>,
}

impl CityMeshes {
    fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            unit_cube: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
            trunk: meshes.add(Cylinder::new(TRUNK_RADIUS, 4.0)),
            canopy: meshes.add(Sphere::new(CANOPY_RADIUS)),
            // Vehicle meshes carry their own vertical offset; instances sit on the road
            body: meshes.add(
                Cuboid::new(1.8, 0.8, 4.0)
                    .mesh()
                    .build()
                    .translated_by(Vec3::new(0.0, 0.75, 0.0)),
            ),
            roof: meshes.add(
                Cuboid::new(1.6, 0.6, 2.0)
                    .mesh()
                    .build()
                    .translated_by(Vec3::new(0.0, 1.45, -0.2)),
            ),
            wheel: meshes.add(
                Cylinder::new(0.35, 0.3)
                    .mesh()
                    .build()
                    .rotated_by(Quat::from_rotation_z(FRAC_PI_2)),
            ),
        }
    }
}

/// Rebuild all city visuals whenever the manager holds a new city
pub fn spawn_city_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    city: Res<CityResource>,
    night: Res<NightMode>,
    mut rendered: ResMut<RenderedGeneration>,
    existing: Query<Entity, With<CityEntity>>,
) {
    let generation = city.0.generation();
    if rendered.0 == Some(generation) {
        return;
    }

    // Release the previous city's entities before spawning the new one
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }
    rendered.0 = Some(generation);

    let Some(city) = city.0.city() else {
        return;
    };

    let shared = CityMeshes::new(&mut meshes);
    spawn_ground(&mut commands, &mut meshes, &mut materials, city);
    spawn_roads(&mut commands, &mut meshes, &mut materials, city);
    spawn_parks(&mut commands, &mut meshes, &mut materials, &shared, city);
    spawn_buildings(&mut commands, &mut materials, &shared, city, night.0);
    spawn_vehicles(&mut commands, &mut materials, &shared, city);
}

fn slab(rect: &LotRect, height: f32) -> (Cuboid, Transform) {
    let center = rect.center();
    (
        Cuboid::new(rect.width(), height, rect.depth()),
        Transform::from_xyz(center.x, height / 2.0, center.z),
    )
}

fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    city: &City,
) {
    let size_x = city.config.extent_x() + city.config.block_size * 2.0;
    let size_z = city.config.extent_z() + city.config.block_size * 2.0;
    commands.spawn((
        CityEntity,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size_x, size_z))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.27, 0.25))),
    ));
}

fn spawn_roads(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    city: &City,
) {
    let road_material = materials.add(Color::srgb(0.15, 0.15, 0.16));
    let sidewalk_material = materials.add(Color::srgb(0.55, 0.55, 0.53));

    for road in &city.roads {
        let center = road.center();
        let size = match road.axis {
            Axis::X => Cuboid::new(road.length, ROAD_HEIGHT, road.width),
            Axis::Z => Cuboid::new(road.width, ROAD_HEIGHT, road.length),
        };
        commands.spawn((
            CityEntity,
            Mesh3d(meshes.add(size)),
            MeshMaterial3d(road_material.clone()),
            Transform::from_xyz(center.x, ROAD_HEIGHT / 2.0, center.z),
        ));
    }

    for block in &city.blocks {
        let (cuboid, transform) = slab(&block.sidewalk, SIDEWALK_HEIGHT);
        commands.spawn((
            CityEntity,
            Mesh3d(meshes.add(cuboid)),
            MeshMaterial3d(sidewalk_material.clone()),
            transform,
        ));
    }
}

fn spawn_parks(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    shared: &CityMeshes,
    city: &City,
) {
    let grass = materials.add(Color::srgb(0.22, 0.5, 0.2));
    let bark = materials.add(Color::srgb(0.35, 0.22, 0.1));
    let leaves = materials.add(Color::srgb(0.15, 0.42, 0.15));

    for (_, ground) in city.park_grounds() {
        let (cuboid, transform) = slab(ground, PARK_HEIGHT);
        commands.spawn((
            CityEntity,
            Mesh3d(meshes.add(cuboid)),
            MeshMaterial3d(grass.clone()),
            transform,
        ));
    }

    for tree in city.trees() {
        commands.spawn((
            CityEntity,
            Mesh3d(shared.trunk.clone()),
            MeshMaterial3d(bark.clone()),
            Transform::from_xyz(tree.trunk.x, tree.trunk.y, tree.trunk.z),
        ));
        commands.spawn((
            CityEntity,
            Mesh3d(shared.canopy.clone()),
            MeshMaterial3d(leaves.clone()),
            Transform::from_xyz(tree.canopy.x, tree.canopy.y, tree.canopy.z),
        ));
    }
}

fn spawn_buildings(
    commands: &mut Commands,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    shared: &CityMeshes,
    city: &City,
    night: bool,
) {
    // Lit windows are approximated by a faint emissive tint at night
    let emissive = if night {
        LinearRgba::rgb(0.35, 0.3, 0.15)
    } else {
        LinearRgba::BLACK
    };
    let facade = materials.add(StandardMaterial {
        base_color: Color::srgb(0.62, 0.64, 0.68),
        emissive,
        perceptual_roughness: 0.8,
        ..default()
    });

    for instance in city.building_instances.live() {
        commands.spawn((
            CityEntity,
            Mesh3d(shared.unit_cube.clone()),
            MeshMaterial3d(facade.clone()),
            to_transform(instance),
        ));
    }
}

fn spawn_vehicles(
    commands: &mut Commands,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    shared: &CityMeshes,
    city: &City,
) {
    let roof_material = materials.add(Color::srgb(0.1, 0.1, 0.12));
    let wheel_material = materials.add(Color::srgb(0.05, 0.05, 0.05));
    let buffers = &city.vehicle_instances;

    for (index, vehicle) in city.vehicles.iter().enumerate() {
        let c = vehicle.color;
        let paint = materials.add(Color::srgb(c.r, c.g, c.b));

        if let Some(body) = buffers.bodies.get(index) {
            commands.spawn((
                CityEntity,
                VehiclePart {
                    vehicle: index,
                    kind: VehiclePartKind::Body,
                },
                Mesh3d(shared.body.clone()),
                MeshMaterial3d(paint),
                to_transform(body),
            ));
        }
        if let Some(roof) = buffers.roofs.get(index) {
            commands.spawn((
                CityEntity,
                VehiclePart {
                    vehicle: index,
                    kind: VehiclePartKind::Roof,
                },
                Mesh3d(shared.roof.clone()),
                MeshMaterial3d(roof_material.clone()),
                to_transform(roof),
            ));
        }
        for wheel in 0..WHEELS_PER_VEHICLE {
            if let Some(transform) = buffers.wheels.get(index * WHEELS_PER_VEHICLE + wheel) {
                commands.spawn((
                    CityEntity,
                    VehiclePart {
                        vehicle: index,
                        kind: VehiclePartKind::Wheel(wheel),
                    },
                    Mesh3d(shared.wheel.clone()),
                    MeshMaterial3d(wheel_material.clone()),
                    to_transform(transform),
                ));
            }
        }
    }
}
