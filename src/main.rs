//! Dino Dash entry point
//!
//! Owns the window, sprite-sheet texture, input pump, and the wall-clock
//! frame limiter. Everything that can fail fails here, at startup, and
//! propagates out of `main`; the simulation itself lives in `dino_dash::sim`
//! and is total.

use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{BlendMode, Texture, TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;

use dino_dash::Settings;
use dino_dash::consts::*;
use dino_dash::render::{RenderSink, SpriteRegion, draw_scene};
use dino_dash::sim::collision::Rect;
use dino_dash::sim::state::GameState;
use dino_dash::sim::tick::{TickInput, tick};

/// Background fill matching the sheet's grey
const CLEAR_COLOR: Color = Color::RGB(128, 128, 128);
const HITBOX_COLOR: Color = Color::RGB(0, 0, 0);

/// Decode the sprite sheet and upload it as a static texture
fn load_sheet<'r>(
    creator: &'r TextureCreator<WindowContext>,
    path: &str,
) -> Result<Texture<'r>, String> {
    let sheet = image::open(path)
        .map_err(|err| format!("failed to load sprite sheet {path}: {err}"))?
        .to_rgba8();
    let (w, h) = sheet.dimensions();

    let mut texture = creator
        .create_texture_static(PixelFormatEnum::ABGR8888, w, h)
        .map_err(|err| err.to_string())?;
    texture
        .update(None, &sheet, w as usize * 4)
        .map_err(|err| err.to_string())?;
    texture.set_blend_mode(BlendMode::Blend);
    Ok(texture)
}

/// [`RenderSink`] over an SDL2 canvas and the uploaded sheet texture
struct CanvasSink<'a, 'r> {
    canvas: &'a mut WindowCanvas,
    sheet: &'a Texture<'r>,
    scale: f32,
}

impl CanvasSink<'_, '_> {
    fn to_screen(&self, rect: Rect) -> SdlRect {
        SdlRect::new(
            (rect.min.x * self.scale).round() as i32,
            (rect.min.y * self.scale).round() as i32,
            (rect.size.x * self.scale).round().max(1.0) as u32,
            (rect.size.y * self.scale).round().max(1.0) as u32,
        )
    }
}

impl RenderSink for CanvasSink<'_, '_> {
    fn clear(&mut self) {
        self.canvas.set_draw_color(CLEAR_COLOR);
        self.canvas.clear();
    }

    fn draw_sprite(&mut self, src: SpriteRegion, dest: Rect) {
        let src = SdlRect::new(src.x as i32, src.y as i32, src.w, src.h);
        if let Err(err) = self.canvas.copy(self.sheet, src, self.to_screen(dest)) {
            log::error!("blit failed: {err}");
        }
    }

    fn draw_outline(&mut self, rect: Rect) {
        self.canvas.set_draw_color(HITBOX_COLOR);
        if let Err(err) = self.canvas.draw_rect(self.to_screen(rect)) {
            log::error!("outline failed: {err}");
        }
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("session seed {seed}");

    let sdl = sdl2::init()?;
    let video = sdl.video()?;
    let scale = settings.window_scale.max(1);
    let window = video
        .window(
            "Dino Dash",
            VIEW_WIDTH as u32 * scale,
            VIEW_HEIGHT as u32 * scale,
        )
        .position_centered()
        .build()
        .map_err(|err| err.to_string())?;
    let mut canvas = window
        .into_canvas()
        .accelerated()
        .build()
        .map_err(|err| err.to_string())?;
    let texture_creator = canvas.texture_creator();
    let sheet = load_sheet(&texture_creator, &settings.sprite_sheet)?;
    let mut events = sdl.event_pump()?;

    let clock = Instant::now();
    let mut state = GameState::new(seed, clock.elapsed().as_secs_f64());

    'running: loop {
        let frame_start = Instant::now();

        let mut input = TickInput::default();
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    repeat: false,
                    ..
                } => {
                    // One key, two meanings; tick picks by phase
                    input.jump = true;
                    input.restart = true;
                }
                _ => {}
            }
        }

        tick(&mut state, &input, clock.elapsed().as_secs_f64());

        let mut sink = CanvasSink {
            canvas: &mut canvas,
            sheet: &sheet,
            scale: scale as f32,
        };
        draw_scene(&state, &mut sink, settings.show_hitboxes);

        // Difficulty doubles as frame cadence: the faster the world scrolls,
        // the more frames per second the limiter allows.
        let target = Duration::from_secs_f32(1.0 / state.speed.max(1.0));
        let spent = frame_start.elapsed();
        if spent < target {
            std::thread::sleep(target - spent);
        }
    }

    Ok(())
}
