//! Soft Engine: CPU scanline rasterizer viewer
//!
//! Opens a window and draws the scene every frame:
//! - Left drag orbits the camera, middle drag pans the target
//! - Mouse wheel zooms
//! - Any key pauses the animation
//!
//! `--snapshot` and `--dump-scene` run headless and exit.

use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum};
use macroquad::prelude::*;
use soft_engine::export::{save_png, ExportError};
use soft_engine::rasterizer::{Framebuffer, RenderSettings, ShadingMode, Surface, HEIGHT, WIDTH};
use soft_engine::scene::{load_scene, load_settings, save_scene, OrbitController, SceneError, SceneState};
use soft_engine::VERSION;

/// Wheel zoom step, matching the browser's ~100 units per notch
const WHEEL_STEP: f32 = 100.0;

#[derive(Parser)]
#[command(name = "soft-engine")]
#[command(version, about = "CPU scanline rasterizer with a z-buffer")]
struct Cli {
    /// Scene file (RON). Defaults to the built-in cube and icosahedron
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Render settings file (RON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the shading mode from the settings
    #[arg(long, value_enum)]
    shading: Option<Shading>,

    /// Window or snapshot width in pixels
    #[arg(long, default_value_t = WIDTH as u32, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Window or snapshot height in pixels
    #[arg(long, default_value_t = HEIGHT as u32, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Render a single frame to this PNG and exit
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Animation clock for the snapshot, in milliseconds
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Write the active scene as RON and exit
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shading {
    Flat,
    FaceIndexGradient,
    Lambertian,
}

impl From<Shading> for ShadingMode {
    fn from(s: Shading) -> Self {
        match s {
            Shading::Flat => ShadingMode::Flat,
            Shading::FaceIndexGradient => ShadingMode::FaceIndexGradient,
            Shading::Lambertian => ShadingMode::Lambertian,
        }
    }
}

fn window_conf(width: u32, height: u32) -> Conf {
    Conf {
        window_title: format!("Soft Engine v{}", VERSION),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn load_inputs(cli: &Cli) -> Result<(SceneState, RenderSettings), SceneError> {
    let scene = match &cli.scene {
        Some(path) => {
            let scene = load_scene(path)?;
            println!("Loaded scene: {} ({} meshes)", path.display(), scene.meshes.len());
            scene
        }
        None => SceneState::default_scene(),
    };

    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => RenderSettings::default(),
    };
    if let Some(shading) = cli.shading {
        settings.shading = shading.into();
    }

    Ok((scene, settings))
}

/// Render one frame at `time_ms` and write it to `path`
fn snapshot(
    mut scene: SceneState,
    settings: &RenderSettings,
    width: usize,
    height: usize,
    time_ms: f64,
    path: &Path,
) -> Result<(), ExportError> {
    // One step from rest: oscillations read the clock, spins integrate it
    scene.advance(time_ms, (time_ms / 1000.0) as f32);

    let mut fb = Framebuffer::new(width, height);
    fb.clear(settings.clear_color);
    scene.render(&mut fb, settings);
    save_png(&fb, path)
}

/// Presents into the macroquad window, stretched to the screen
struct ScreenSurface;

impl Surface for ScreenSurface {
    fn size(&self) -> (usize, usize) {
        (screen_width().max(1.0) as usize, screen_height().max(1.0) as usize)
    }

    fn put_image_data(&mut self, pixels: &[u8], width: usize, height: usize) {
        let texture = Texture2D::from_rgba8(width as u16, height as u16, pixels);
        texture.set_filter(FilterMode::Nearest);

        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
    }
}

async fn run(mut scene: SceneState, settings: RenderSettings) {
    let mut screen = ScreenSurface;
    let (w, h) = screen.size();
    let mut fb = Framebuffer::new(w, h);

    let mut orbit = OrbitController::from_camera(&scene.camera);
    let mut last_mouse = mouse_position();
    let mut paused = false;
    let mut clock_ms = 0.0f64;

    println!("=== Soft Engine v{} ===", VERSION);
    println!("{} meshes, {:?} shading", scene.meshes.len(), settings.shading);

    loop {
        let dt = get_frame_time();

        if get_last_key_pressed().is_some() {
            paused = !paused;
        }

        // Orbit camera controls
        let mouse = mouse_position();
        let dx = mouse.0 - last_mouse.0;
        let dy = mouse.1 - last_mouse.1;
        last_mouse = mouse;

        if is_mouse_button_down(MouseButton::Left) {
            orbit.rotate(dx, dy);
        } else if is_mouse_button_down(MouseButton::Middle) {
            orbit.pan(dx, dy);
        }

        let scroll = mouse_wheel().1;
        if scroll != 0.0 {
            // Wheel up moves closer
            orbit.zoom(-scroll.signum() * WHEEL_STEP);
        }
        orbit.apply(&mut scene.camera);

        if !paused {
            clock_ms += dt as f64 * 1000.0;
            scene.advance(clock_ms, dt);
        }

        // Track window resizes
        let (w, h) = screen.size();
        fb.resize(w, h);

        fb.clear(settings.clear_color);
        scene.render(&mut fb, &settings);

        clear_background(Color::from_rgba(30, 30, 35, 255));
        fb.present(&mut screen);

        draw_text(&format!("{} fps", get_fps()), 10.0, 24.0, 24.0, WHITE);
        if paused {
            draw_text("paused", 10.0, 48.0, 24.0, GRAY);
        }

        next_frame().await
    }
}

fn main() {
    let cli = Cli::parse();

    let (scene, settings) = match load_inputs(&cli) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &cli.dump_scene {
        match save_scene(&scene, path) {
            Ok(()) => println!("Wrote scene: {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(path) = &cli.snapshot {
        let (width, height) = (cli.width as usize, cli.height as usize);
        match snapshot(scene, &settings, width, height, cli.time_ms, path) {
            Ok(()) => println!("Saved snapshot: {} ({}x{})", path.display(), width, height),
            Err(e) => {
                eprintln!("Failed to save {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    macroquad::Window::from_config(window_conf(cli.width, cli.height), run(scene, settings));
}
