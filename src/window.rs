use std::sync::Arc;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId, WindowLevel},
};

use crate::{input::InputEvent, settings};

pub trait AppLoop: Sized {
    fn init(window: Arc<Window>) -> Result<Self>;

    /// Draws one frame. An error stops the loop and is returned from [App::run].
    fn draw(&mut self) -> Result<()>;

    fn input(&mut self, _input: InputEvent) {}
}

/// The frame loop keeps drawing until something asks it to close. There is no way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closing,
}

impl LoopState {
    pub fn on_close_requested(self) -> Self {
        LoopState::Closing
    }

    pub fn on_input(self, input: &InputEvent) -> Self {
        match self {
            LoopState::Running if input.is_escape_press() => LoopState::Closing,
            state => state,
        }
    }
}

pub struct App {
    title: String,
    window_size: (u32, u32),
    resizable: bool,
    always_on_top: bool,
}

impl App {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_window_size(mut self, window_size: (u32, u32)) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_always_on_top(mut self, always_on_top: bool) -> Self {
        self.always_on_top = always_on_top;
        self
    }

    pub fn attributes(&self) -> WindowAttributes {
        let level = if self.always_on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };

        Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(self.window_size.0, self.window_size.1))
            .with_resizable(self.resizable)
            .with_window_level(level)
    }

    pub fn run<T: AppLoop>(self, app_loop_init: fn(Arc<Window>) -> Result<T>) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create the event loop")?;

        let mut runner = Runner::new(self.attributes(), app_loop_init);

        event_loop
            .run_app(&mut runner)
            .context("event loop terminated abnormally")?;

        runner.finish()
    }
}

struct Runner<T: AppLoop> {
    attributes: WindowAttributes,
    init: fn(Arc<Window>) -> Result<T>,
    window: Option<Arc<Window>>,
    app_loop: Option<T>,
    state: LoopState,
    error: Option<anyhow::Error>,
}

impl<T: AppLoop> Runner<T> {
    fn new(attributes: WindowAttributes, init: fn(Arc<Window>) -> Result<T>) -> Self {
        Self {
            attributes,
            init,
            window: None,
            app_loop: None,
            state: LoopState::Running,
            error: None,
        }
    }

    fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop
                .create_window(self.attributes.clone())
                .context("failed to create window")?,
        );
        let app_loop = (self.init)(Arc::clone(&window))?;

        window.request_redraw();
        self.window = Some(window);
        self.app_loop = Some(app_loop);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == LoopState::Closing {
            return;
        }

        let result = match (&self.window, &mut self.app_loop) {
            (Some(window), Some(app_loop)) => app_loop.draw().map(|()| window.request_redraw()),
            _ => return,
        };

        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.stop(err);
        event_loop.exit();
    }

    // not logged here, the caller of [App::run] reports it
    fn stop(&mut self, err: anyhow::Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.state = LoopState::Closing;
    }

    fn finish(mut self) -> Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<T: AppLoop> ApplicationHandler for Runner<T> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.state == LoopState::Closing {
            return;
        }

        if let Err(err) = self.create(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.state = self.state.on_close_requested(),
            WindowEvent::KeyboardInput { event, .. } => {
                let input = InputEvent::keyboard_input(&event);
                self.state = self.state.on_input(&input);
                if let Some(app_loop) = &mut self.app_loop {
                    app_loop.input(input);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }

        if self.state == LoopState::Closing {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // gpu resources go before the window they draw into
        self.app_loop = None;
        self.window = None;
        log::info!("shut down");
    }
}

pub fn make_window() -> App {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    App {
        title: settings::WINDOW_TITLE.into(),
        window_size: settings::WINDOW_SIZE,
        resizable: false,
        always_on_top: true,
    }
}
