use glam::{Mat4, Vec2, Vec4};
use glow::HasContext;
use log::{error, info};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use crate::abs::*;
use crate::asset::AssetResolver;
use crate::config::Settings;
use crate::other::{FpsCounter, rand_int};
use crate::render::{Font, GlyphQuad, UIVertex, glyph_buffers};
use crate::text::wrap;

mod abs;
mod asset;
mod config;
mod other;
mod render;
mod text;

/// Upper bound on the wrapped HUD text, in bytes.
const HUD_TEXT_CAPACITY: usize = 1024;

const SPLASHES: [&str; 5] = [
    "Now with hexagons!",
    "Runs from any directory!",
    "Proportional pixels!",
    "Five ways to find a file!",
    "Magenta means missing!",
];

fn setup_logger() -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()
}

/// A required asset or subsystem is gone. Log the full story and bail.
fn fatal(message: String) -> ! {
    error!("{message}");
    std::process::exit(1);
}

fn hud_text(splash: &str, fps: u32) -> String {
    format!(
        "hexcraft v{}\nFPS: {}\n{}\nEsc quits.",
        env!("CARGO_PKG_VERSION"),
        fps,
        splash,
    )
}

/// The pixel budget handed to the wrapper: the window width minus the HUD
/// margins, in font pixels.
fn wrap_width(window_width: u32, margin: f32, scale: f32) -> u32 {
    let usable = window_width as f32 - margin * 2.0;
    (usable / scale).max(0.0) as u32
}

/// The translucent backdrop behind the HUD text block. Its height follows
/// the wrapped line count.
fn panel_buffers(
    window_width: u32,
    margin: f32,
    block_height: f32,
) -> (Vec<UIVertex>, Vec<u32>) {
    let pad = margin * 0.5;
    let quad = GlyphQuad {
        rect: [
            Vec2::new(margin - pad, margin - pad),
            Vec2::new(window_width as f32 - margin + pad, margin + block_height + pad),
        ],
        uv: [Vec2::ZERO, Vec2::ONE],
    };
    glyph_buffers(&[quad])
}

fn ortho(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
}

fn main() {
    if let Err(err) = setup_logger() {
        eprintln!("logger setup failed: {err}");
    }

    let resolver = AssetResolver::from_env();
    match resolver.exe_dir() {
        Some(dir) => info!("executable directory: {}", dir.display()),
        None => info!("executable directory: (unknown)"),
    }

    let settings = Settings::load(&resolver);
    let mut app = App::new("Hexcraft", &settings).unwrap_or_else(|err| fatal(err));

    unsafe {
        app.gl.enable(glow::BLEND);
        app.gl
            .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }

    let program = load_program(
        &app.gl,
        &resolver,
        "shaders/ui/vert.glsl",
        "shaders/ui/frag.glsl",
    )
    .unwrap_or_else(|err| fatal(err));

    let font = Font::new(Texture::load(&app.gl, &resolver, "textures/font.png"));
    let panel = Texture::load(&app.gl, &resolver, "textures/panel.png");

    let splash = SPLASHES[rand_int(SPLASHES.len() as u32) as usize];
    let mut fps = FpsCounter::new();

    let margin = settings.hud_margin;
    let scale = settings.hud_scale;
    let origin = Vec2::new(margin, margin);

    let (mut width, mut height) = app.window.size();
    let mut projection = ortho(width, height);

    let (text, line_count) = wrap(
        &hud_text(splash, fps.fps()),
        wrap_width(width, margin, scale),
        HUD_TEXT_CAPACITY,
    );
    let mut text_mesh = font.build_mesh(&app.gl, &text, origin, scale);
    let (panel_vertices, panel_indices) =
        panel_buffers(width, margin, line_count as f32 * font.line_height(scale));
    let mut panel_mesh = Mesh::new(&app.gl, &panel_vertices, &panel_indices, glow::TRIANGLES);

    info!("hexcraft started at {width}x{height}");

    'running: loop {
        let mut dirty = false;
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(w, h),
                    ..
                } => {
                    width = w as u32;
                    height = h as u32;
                    unsafe {
                        app.gl.viewport(0, 0, w, h);
                    }
                    projection = ortho(width, height);
                    dirty = true;
                }
                _ => {}
            }
        }

        if fps.tick() {
            dirty = true;
        }

        if dirty {
            let (text, line_count) = wrap(
                &hud_text(splash, fps.fps()),
                wrap_width(width, margin, scale),
                HUD_TEXT_CAPACITY,
            );
            let (vertices, indices) = font.buffers(&text, origin, scale);
            text_mesh.update(&vertices, &indices);
            let (panel_vertices, panel_indices) =
                panel_buffers(width, margin, line_count as f32 * font.line_height(scale));
            panel_mesh.update(&panel_vertices, &panel_indices);
        }

        unsafe {
            app.gl.clear_color(0.1, 0.1, 0.2, 1.0);
            app.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        program.use_program();
        program.set_uniform("u_projection", projection);
        program.set_uniform("u_tex", 0);
        program.set_uniform("u_solid", false);

        panel.bind(0);
        program.set_uniform("u_color", Vec4::new(1.0, 1.0, 1.0, 0.8));
        panel_mesh.draw();

        font.atlas().bind(0);
        program.set_uniform("u_color", Vec4::ONE);
        text_mesh.draw();

        app.window.gl_swap_window();
    }
}
