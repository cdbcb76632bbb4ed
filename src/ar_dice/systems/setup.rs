//! Scene setup system
//!
//! Spawns the AR camera, light, plane grid material, die template, and the
//! control overlay.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy_material_ui::prelude::*;

use super::camera::CAMERA_FOCUS;
use crate::ar_dice::grid_texture::{create_grid_image, create_grid_material};
use crate::ar_dice::meshes::create_die_mesh;
use crate::ar_dice::types::*;

/// Build the die template from settings.
pub fn load_die_template(
    settings: &AppSettings,
    asset_server: &AssetServer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> DieTemplate {
    let visual = match &settings.die.asset {
        Some(path) => {
            info!("Loading die asset {path}");
            DieVisual::Scene(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone())))
        }
        None => DieVisual::Procedural {
            mesh: meshes.add(create_die_mesh(settings.die.edge)),
            material: materials.add(StandardMaterial {
                base_color: settings.die.color.to_color(),
                perceptual_roughness: 0.3,
                reflectance: 0.6,
                ..default()
            }),
        },
    };

    DieTemplate {
        visual,
        bounding_radius: settings.die_bounding_radius(),
    }
}

/// Main setup system - initializes the scene and the control overlay
pub fn setup(
    mut commands: Commands,
    settings: Res<ActiveSettings>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    theme: Res<MaterialTheme>,
) {
    // The AR camera starts at the session origin.
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 0.0).looking_at(CAMERA_FOCUS, Vec3::Y),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 1.0).looking_at(CAMERA_FOCUS, Vec3::Y),
    ));

    let grid_image = images.add(create_grid_image(&settings.0.grid));
    commands.insert_resource(PlaneGridMaterial(
        materials.add(create_grid_material(grid_image)),
    ));

    let template = load_die_template(&settings.0, &asset_server, &mut meshes, &mut materials);
    commands.insert_resource(template);

    spawn_overlay(&mut commands, &theme);
}

fn spawn_overlay(commands: &mut Commands, theme: &MaterialTheme) {
    commands.spawn((
        Text::new("Looking for a flat surface..."),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        StatusText,
    ));

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            column_gap: Val::Px(16.0),
            ..default()
        })
        .with_children(|bar| {
            spawn_control_button(bar, theme, "Roll Again", RollAgainButton);
            spawn_control_button(bar, theme, "Remove All Dice", RemoveAllDiceButton);
        });
}

fn spawn_control_button(
    parent: &mut ChildSpawnerCommands,
    theme: &MaterialTheme,
    label: &str,
    marker: impl Component,
) {
    parent
        .spawn(Node {
            width: Val::Px(180.0),
            height: Val::Px(40.0),
            ..default()
        })
        .with_children(|slot| {
            slot.spawn((
                MaterialButtonBuilder::new(label).filled_tonal().build(theme),
                marker,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new(label),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(theme.on_surface),
                    ButtonLabel,
                ));
            });
        });
}
