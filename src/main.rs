//! cg-raster viewer
//!
//! Interactive front end for the rasterization and transform demos:
//! - 1-5 switch demo, Tab cycles the algorithm (object template in 3D)
//! - Clicks place points, C clears, G generates the square / object
//! - F12 writes a PNG snapshot of the canvas

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;

use macroquad::prelude::*;
use app::{AppState, Demo, TransformKey};
use cg_raster::config::{self, ViewerConfig};
use cg_raster::raster::Pixel;
use cg_raster::transform3d::Axis;

const MARGIN: f32 = 12.0;
const SIDEBAR_WIDTH: f32 = 340.0;
const BG_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const MUTED_COLOR: Color = Color::new(0.55, 0.55, 0.6, 1.0);
const ACCENT_COLOR: Color = Color::new(0.95, 0.65, 0.25, 1.0);

const HELP: [&str; 5] = [
    "1-5 demo  Tab algorithm  C clear  G generate",
    "2D: T translate  S scale  R rotate  H shear  F reflect",
    "3D: T S H F  X/Y/Z rotate  arrows view  +/- zoom",
    "3D: P projection",
    "F12 save PNG",
];

fn window_conf() -> Conf {
    let config = config::load_or_default();
    let scale = config.pixel_scale;
    Conf {
        window_title: format!("cg-raster v{}", VERSION),
        window_width: (config.canvas_width as f32 * scale + SIDEBAR_WIDTH + MARGIN * 3.0) as i32,
        window_height: (config.canvas_height as f32 * scale + MARGIN * 2.0) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let started = AppState::new(config::load_or_default()).or_else(|e| {
        log::warn!("config rejected ({}), falling back to defaults", e);
        AppState::new(ViewerConfig::default())
    });
    let mut app = match started {
        Ok(app) => app,
        Err(e) => {
            log::error!("cannot start viewer: {}", e);
            return;
        }
    };

    log::info!("=== cg-raster v{} ===", VERSION);

    loop {
        handle_keys(&mut app);

        let scale = app.config.pixel_scale;
        let canvas_w = app.canvas.width as f32 * scale;
        let canvas_h = app.canvas.height as f32 * scale;

        if is_mouse_button_pressed(MouseButton::Left) {
            let (mx, my) = mouse_position();
            let (cx, cy) = ((mx - MARGIN) / scale, (my - MARGIN) / scale);
            if cx >= 0.0 && cy >= 0.0 && cx < app.canvas.width as f32 && cy < app.canvas.height as f32 {
                let outcome = app.click(Pixel::new(cx as i32, cy as i32));
                app.report(outcome);
            }
        }

        if let Err(e) = app.redraw() {
            app.report(Err(e));
        }

        clear_background(BG_COLOR);

        let texture = Texture2D::from_rgba8(app.canvas.width as u16, app.canvas.height as u16, &app.canvas.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            MARGIN,
            MARGIN,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(canvas_w, canvas_h)),
                ..Default::default()
            },
        );

        draw_sidebar(&app, MARGIN * 2.0 + canvas_w, MARGIN);

        next_frame().await;
    }
}

fn draw_sidebar(app: &AppState, x: f32, y: f32) {
    let mut y = y + 20.0;
    for (i, demo) in Demo::ALL.iter().enumerate() {
        let color = if *demo == app.demo { ACCENT_COLOR } else { MUTED_COLOR };
        draw_text(&format!("{} {}", i + 1, demo.label()), x, y, 18.0, color);
        y += 20.0;
    }
    y += 10.0;

    for line in app.info_lines() {
        draw_text(&line, x, y, 16.0, TEXT_COLOR);
        y += 18.0;
    }

    let bottom = screen_height() - MARGIN;
    for (i, line) in HELP.iter().rev().enumerate() {
        draw_text(line, x, bottom - i as f32 * 16.0, 14.0, MUTED_COLOR);
    }
    if let Some(status) = app.get_status() {
        draw_text(status, x, bottom - HELP.len() as f32 * 16.0 - 8.0, 16.0, ACCENT_COLOR);
    }
}

fn handle_keys(app: &mut AppState) {
    let demo_keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4, KeyCode::Key5];
    for (i, key) in demo_keys.iter().enumerate() {
        if is_key_pressed(*key) {
            if let Some(demo) = Demo::from_index(i) {
                app.set_demo(demo);
                app.set_status(demo.label(), 2.0);
            }
        }
    }

    if is_key_pressed(KeyCode::Tab) {
        let msg = app.cycle_algorithm();
        app.report(Ok(msg));
    }
    if is_key_pressed(KeyCode::C) {
        let msg = app.clear();
        app.report(Ok(msg));
    }
    if is_key_pressed(KeyCode::G) {
        let outcome = app.generate();
        app.report(outcome);
    }

    let transform_keys = [
        (KeyCode::T, TransformKey::Translate),
        (KeyCode::S, TransformKey::Scale),
        (KeyCode::R, TransformKey::Rotate),
        (KeyCode::H, TransformKey::Shear),
        (KeyCode::F, TransformKey::Reflect),
        (KeyCode::X, TransformKey::RotateAxis(Axis::X)),
        (KeyCode::Y, TransformKey::RotateAxis(Axis::Y)),
        (KeyCode::Z, TransformKey::RotateAxis(Axis::Z)),
    ];
    for (key, transform) in transform_keys {
        if is_key_pressed(key) {
            let outcome = app.apply_transform(transform);
            app.report(outcome);
        }
    }

    if app.demo == Demo::Transform3D {
        let view_keys = [
            (KeyCode::Up, (-1.0, 0.0)),
            (KeyCode::Down, (1.0, 0.0)),
            (KeyCode::Left, (0.0, -1.0)),
            (KeyCode::Right, (0.0, 1.0)),
        ];
        for (key, (dx, dy)) in view_keys {
            if is_key_pressed(key) {
                let outcome = app.nudge_view(dx, dy);
                app.report(outcome);
            }
        }
        if is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
            let outcome = app.nudge_zoom(1.0);
            app.report(outcome);
        }
        if is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract) {
            let outcome = app.nudge_zoom(-1.0);
            app.report(outcome);
        }
        if is_key_pressed(KeyCode::P) {
            let outcome = app.toggle_projection();
            app.report(outcome);
        }
    }

    if is_key_pressed(KeyCode::F12) {
        save_snapshot(app);
    }
}

fn save_snapshot(app: &mut AppState) {
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = format!("cg-raster-{}.png", stamp);
    match app.canvas.save_png(&path) {
        Ok(()) => {
            log::info!("saved {}", path);
            app.set_status(&format!("Saved {}", path), 3.0);
        }
        Err(e) => {
            log::warn!("snapshot failed: {}", e);
            app.set_status(&format!("Snapshot failed: {}", e), 5.0);
        }
    }
}
