//! SDL2 window, keyboard polling and frame pacing.

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::error::{Error, Result};
use crate::input::InputState;
use crate::math::ScreenSize;

pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

// Fields drop in declaration order: the texture must go before its creator.
pub struct Window {
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    size: ScreenSize,
}

impl Window {
    pub fn new(title: &str, size: ScreenSize) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(Error::Window)?;
        let video_subsystem = sdl_context.video().map_err(Error::Window)?;
        let timer_subsystem = sdl_context.timer().map_err(Error::Window)?;

        let window = video_subsystem
            .window(title, size.width, size.height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| Error::Window(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| Error::Window(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(Error::Window)?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, size.width, size.height)
            .map_err(|e| Error::Window(e.to_string()))?;

        log::info!("Opened {}x{} window '{}'", size.width, size.height, title);
        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            size,
        })
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => result = WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }
        result
    }

    /// Snapshot of the camera keys currently held down.
    pub fn input_state(&self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        let held = |code| keys.is_scancode_pressed(code);
        InputState {
            forward: held(Scancode::W),
            back: held(Scancode::S),
            left: held(Scancode::A),
            right: held(Scancode::D),
            up: held(Scancode::Space),
            down: held(Scancode::C),
            pitch_up: held(Scancode::Up),
            pitch_down: held(Scancode::Down),
            yaw_left: held(Scancode::Left),
            yaw_right: held(Scancode::Right),
            roll_left: held(Scancode::PageUp),
            roll_right: held(Scancode::PageDown),
            reset: held(Scancode::R),
        }
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<()> {
        self.texture
            .update(None, buffer, (self.size.width * 4) as usize)
            .map_err(|e| Error::Window(e.to_string()))?;

        self.canvas.clear();
        self.canvas
            .copy(
                &self.texture,
                None,
                Some(Rect::new(0, 0, self.size.width, self.size.height)),
            )
            .map_err(Error::Window)?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, size: ScreenSize) -> Result<()> {
        self.size = size;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, size.width, size.height)
            .map_err(|e| Error::Window(e.to_string()))?;
        Ok(())
    }

    pub fn size(&self) -> ScreenSize {
        self.size
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
