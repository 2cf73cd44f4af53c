//! 窗口宿主：winit 事件循环 + softbuffer 输出

pub mod events;
pub mod present;

use events::{map_key, wheel_delta, KeyAction};
use photo_essay::event::{PageEvent, TouchEvent};
use photo_essay::page::EssayPage;
use photo_essay::painter::paint_page;
use photo_essay::Canvas;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowAttributes, WindowId};

pub struct EssayWindow {
    page: EssayPage,
    started: Instant,
    window: Option<Arc<Window>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    canvas: Canvas,
    scale_factor: f64,
    mouse_pos: (f32, f32),
    needs_redraw: bool,
}

impl EssayWindow {
    pub fn new(page: EssayPage, started: Instant) -> Self {
        let viewport = *page.viewport();
        Self {
            page,
            started,
            window: None,
            surface: None,
            canvas: Canvas::new(viewport.width as u32, viewport.height as u32),
            scale_factor: 1.0,
            mouse_pos: (0.0, 0.0),
            needs_redraw: true,
        }
    }

    /// 页面时钟（毫秒）
    fn now(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn dispatch(&mut self, event: PageEvent) {
        let now = self.now();
        match self.page.dispatch(&event, now) {
            Ok(outcome) => {
                if outcome.redraw {
                    self.request_redraw();
                }
            }
            Err(e) => tracing::error!("event {:?} failed: {}", event, e),
        }
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn render(&mut self) {
        let viewport = *self.page.viewport();
        let (w, h) = (viewport.width.max(1.0) as u32, viewport.height.max(1.0) as u32);
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas = Canvas::new(w, h);
        }
        paint_page(&self.page, &mut self.canvas);
        self.needs_redraw = false;
    }

    fn present(&mut self) {
        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return;
        };
        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return;
        };
        if let Err(e) = surface.resize(width, height) {
            tracing::warn!("surface resize failed: {}", e);
            return;
        }
        match surface.buffer_mut() {
            Ok(mut buffer) => {
                present::present_to_buffer(
                    &mut buffer,
                    size.width,
                    size.height,
                    &self.canvas,
                    self.scale_factor as f32,
                );
                if let Err(e) = buffer.present() {
                    tracing::warn!("present failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("buffer unavailable: {}", e),
        }
    }

    fn handle_key(&mut self, action: KeyAction) {
        let now = self.now();
        match action {
            KeyAction::Page(event) => self.dispatch(event),
            KeyAction::ScrollHome => {
                self.page.smooth_scroll_to(0.0, now);
                self.request_redraw();
            }
            KeyAction::ScrollEnd => {
                self.page.smooth_scroll_to(self.page.content_height(), now);
                self.request_redraw();
            }
            KeyAction::Rotate => self.dispatch(PageEvent::OrientationChange),
        }
    }
}

impl ApplicationHandler for EssayWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let viewport = *self.page.viewport();
        let attrs = WindowAttributes::default()
            .with_title(self.page.config().title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(viewport.width, viewport.height));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        match surface {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                tracing::error!("failed to create surface: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.scale_factor = window.scale_factor();
        self.window = Some(window);
        self.render();
        self.present();
        tracing::info!("window ready ({}x{} @{}x)", viewport.width, viewport.height, self.scale_factor);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.page.shutdown();
                event_loop.exit();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
                self.request_redraw();
            }
            WindowEvent::Resized(size) => {
                let sf = self.scale_factor;
                self.dispatch(PageEvent::Resize {
                    width: (size.width as f64 / sf) as f32,
                    height: (size.height as f64 / sf) as f32,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let x = (position.x / self.scale_factor) as f32;
                let y = (position.y / self.scale_factor) as f32;
                self.mouse_pos = (x, y);
                self.dispatch(PageEvent::PointerMove { x, y });
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_pos;
                match state {
                    ElementState::Pressed => self.dispatch(PageEvent::PointerDown { x, y }),
                    ElementState::Released => self.dispatch(PageEvent::PointerUp { x, y }),
                }
            }
            WindowEvent::Touch(touch) => {
                let x = (touch.location.x / self.scale_factor) as f32;
                let y = (touch.location.y / self.scale_factor) as f32;
                let event = match touch.phase {
                    TouchPhase::Started => PageEvent::TouchStart(TouchEvent::single(x, y)),
                    TouchPhase::Moved => PageEvent::TouchMove(TouchEvent::single(x, y)),
                    TouchPhase::Ended | TouchPhase::Cancelled => PageEvent::TouchEnd(TouchEvent::lifted(x, y)),
                };
                self.dispatch(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = wheel_delta(delta, self.scale_factor);
                if dy.abs() >= 0.1 {
                    let y = self.page.viewport().scroll_y + dy;
                    self.dispatch(PageEvent::Scroll { y });
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let Some(action) = map_key(event.physical_key) {
                        self.handle_key(action);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if self.needs_redraw {
                    self.render();
                }
                self.present();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.now();
        if self.page.frame(now) {
            self.request_redraw();
        }

        if self.page.is_animating() {
            event_loop.set_control_flow(ControlFlow::Poll);
        } else {
            match self.page.next_deadline() {
                Some(at) => {
                    let wait = Duration::from_millis(at.saturating_sub(now));
                    event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + wait));
                }
                None => event_loop.set_control_flow(ControlFlow::Wait),
            }
        }
    }
}
