//! Companion face simulator for desktop.
//!
//! Runs the face in an SDL2 window through the embedded-graphics-simulator
//! crate, standing in for the SPI panel of the real device.
//!
//! Keys: `D` toggles the debug mood cycle, `Space` skips the current hold,
//! `L` toggles the event log overlay.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod timing;

use std::fmt::Write;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use face_core::colors::{BLACK, LOG_GREEN, WHITE};
use face_core::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use face_core::eyes::{EyeLayout, EyesState};
use face_core::face::{FaceController, FaceMode, mouth_geometry};
use face_core::rng::Xoroshiro128;
use face_core::styles::LOG_FONT;
use face_core::surface::Surface;
use heapless::String;

use crate::timing::FRAME_TIME;

/// Simulated panel. The real display driver flushes batched pixels over SPI;
/// the simulator draws straight through and presents once per frame, so the
/// batch hooks keep their no-op defaults.
struct SimSurface(SimulatorDisplay<Rgb565>);

impl Dimensions for SimSurface {
    fn bounding_box(&self) -> Rectangle {
        self.0.bounding_box()
    }
}

impl DrawTarget for SimSurface {
    type Color = Rgb565;
    type Error = <SimulatorDisplay<Rgb565> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.0.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.0.clear(color)
    }
}

impl Surface for SimSurface {}

/// Log overlay band, kept clear of the eyes above and the mouth below.
const LOG_AREA: Rectangle = Rectangle::new(Point::new(0, 141), Size::new(SCREEN_WIDTH, 82));
/// Dark green wash behind the log text.
const LOG_BG: Rgb565 = Rgb565::new(1, 2, 1);
const LOG_X: i32 = 4;
const LOG_Y: i32 = 148;
const LOG_LINE_HEIGHT: i32 = 12;

fn main() {
    let mut display = SimSurface(SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Companion Face Sim", &output_settings);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED);
    let mut rng = Xoroshiro128::from_seed(seed);

    let layout = EyeLayout::default();
    let geometry = mouth_geometry(SCREEN_WIDTH, SCREEN_HEIGHT, &layout);
    let started = Instant::now();

    display.clear(BLACK).ok();
    let mut eyes = EyesState::new(layout, 0, &mut rng);
    let mut face = FaceController::start(geometry, FaceMode::Normal, &mut display, 0, &mut rng);

    let mut seed_line: String<40> = String::new();
    let _ = write!(seed_line, "seed {seed:#018x}");
    face.note(seed_line.as_str());

    window.update(&display.0);

    // UI state
    let mut show_log = false;

    loop {
        let frame_start = Instant::now();
        let now = started.elapsed().as_millis() as u32;

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::D => {
                            let next = match face.mode() {
                                FaceMode::Normal => FaceMode::DebugCycle,
                                FaceMode::DebugCycle => FaceMode::Normal,
                            };
                            face.set_mode(next, &mut display, now, &mut rng);
                        }
                        Keycode::Space => {
                            face.note("key: skip hold");
                            face.force_transition(now);
                        }
                        Keycode::L => {
                            show_log = !show_log;
                            if !show_log {
                                clear_log_overlay(&mut display);
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        eyes.update(now, &mut rng);
        display.with_batch(|s| eyes.draw(s, now));
        face.tick(&mut display, now, &mut rng);

        if show_log {
            draw_log_overlay(&mut display, &face);
        }

        window.update(&display.0);

        let pre_sleep = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(pre_sleep) {
            thread::sleep(remaining);
        }
    }
}

fn clear_log_overlay(display: &mut SimSurface) {
    LOG_AREA
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
}

fn draw_log_overlay(display: &mut SimSurface, face: &FaceController) {
    LOG_AREA
        .into_styled(PrimitiveStyle::with_fill(LOG_BG))
        .draw(display)
        .ok();

    let prompt_style = MonoTextStyle::new(LOG_FONT, LOG_GREEN);
    let text_style = MonoTextStyle::new(LOG_FONT, WHITE);

    let mut y = LOG_Y;
    for line in face.log().iter() {
        Text::new(">", Point::new(LOG_X, y), prompt_style)
            .draw(display)
            .ok();
        Text::new(line, Point::new(LOG_X + 10, y), text_style)
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }

    // Blinkless cursor on the line after the newest entry.
    Text::new("> _", Point::new(LOG_X, y), prompt_style)
        .draw(display)
        .ok();
}
