use bevy::prelude::*;
use bevy_material_ui::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use ardice::ar_dice::{AppSettings, ArDicePlugin};

/// AR Dice - tap a detected surface to drop a die, shake to roll
#[derive(Parser, Debug)]
#[command(name = "ardice")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings JSON file
    #[arg(short, long, default_value = "ardice.json")]
    config: PathBuf,

    /// Seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// glTF die model to use instead of the built-in cube (relative to the assets folder)
    #[arg(long)]
    die_asset: Option<String>,

    /// Bounding radius of the die model, in meters
    #[arg(long)]
    die_radius: Option<f32>,

    /// Log filter (tracing env-filter syntax)
    #[arg(long, default_value = "info,wgpu=error,bevy_material_ui=warn")]
    log_filter: String,

    /// Write the default settings to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

impl Args {
    /// CLI values win over the settings file.
    fn apply_overrides(&self, settings: &mut AppSettings) {
        if let Some(seed) = self.seed {
            settings.roll.seed = Some(seed);
        }
        if let Some(asset) = &self.die_asset {
            settings.die.asset = Some(asset.clone());
        }
        if let Some(radius) = self.die_radius {
            settings.die.bounding_radius = Some(radius);
        }
    }
}

fn main() {
    let args = Args::parse();

    if args.write_default_config {
        match AppSettings::default().save_to_file(&args.config) {
            Ok(()) => println!("Wrote default settings to {}", args.config.display()),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "AR Dice".to_string(),
                    resolution: (1280u32, 720u32).into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: args.log_filter.clone(),
                ..default()
            }),
    )
    .add_plugins(MaterialUiPlugin);

    // Logging is up once DefaultPlugins are added.
    let mut settings = AppSettings::load_or_default(&args.config);
    args.apply_overrides(&mut settings);

    app.insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.11)))
        .add_plugins(ArDicePlugin { settings })
        .run();
}
