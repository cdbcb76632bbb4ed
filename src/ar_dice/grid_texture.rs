//! Procedural grid texture for plane surfaces

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::ar_dice::types::GridSetting;

/// Line thickness as a fraction of one cell.
const LINE_FRACTION: f32 = 0.06;

/// Largest texture side the grid is generated at.
pub const MAX_GRID_RESOLUTION: u32 = 2048;

/// RGBA8 pixels of a square grid: `cells` cells per side, lines on every cell
/// border including the outer edge.
pub fn grid_pixels(resolution: u32, cells: u32, line: [u8; 4], fill: [u8; 4]) -> Vec<u8> {
    let resolution = resolution.clamp(1, MAX_GRID_RESOLUTION);
    let cells = cells.clamp(1, resolution);
    let cell_px = resolution as f32 / cells as f32;
    let line_px = (cell_px * LINE_FRACTION).max(1.0);

    // Each cell draws its leading edge; the last row and column close the outer border.
    let on_line = |coord: u32| coord as f32 % cell_px < line_px;

    let mut rgba = Vec::with_capacity(resolution as usize * resolution as usize * 4);
    for y in 0..resolution {
        let row_on_line = on_line(y) || y == resolution - 1;
        for x in 0..resolution {
            let pixel = if row_on_line || on_line(x) || x == resolution - 1 {
                line
            } else {
                fill
            };
            rgba.extend_from_slice(&pixel);
        }
    }
    rgba
}

pub fn create_grid_image(setting: &GridSetting) -> Image {
    let resolution = setting.resolution.clamp(1, MAX_GRID_RESOLUTION);
    let rgba = grid_pixels(
        resolution,
        setting.cells,
        setting.line_color.to_rgba8(),
        setting.fill_color.to_rgba8(),
    );

    Image::new(
        Extent3d {
            width: resolution,
            height: resolution,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// Material shared by every plane surface.
pub fn create_grid_material(image: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(image),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}
