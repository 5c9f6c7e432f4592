//! The interactive window.
//!
//! [`run`] opens a window and drives the engine once per redraw: keys and
//! pointer presses become commands, the engine draws into a [`Raster`] the
//! size of the window, and the [`Presenter`] puts it on screen.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::controls::{binding, Command, FrontendAction, KEY_BINDINGS};
use crate::engine::{Engine, FrameInput};
use crate::error::AppError;
use crate::gpu::Presenter;
use crate::input::Input;
use crate::raster::Raster;
use crate::time::FrameClock;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;

/// Title refresh interval in frames.
const TITLE_INTERVAL: u64 = 30;

/// Open a window and run until it is closed.
pub fn run(engine: Engine) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(engine);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    engine: Engine,
    raster: Raster,
    input: Input,
    clock: FrameClock,
    show_controls: bool,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    /// Fatal error that stopped the loop.
    error: Option<AppError>,
}

impl App {
    fn new(engine: Engine) -> Self {
        Self {
            engine,
            raster: Raster::new(0, 0),
            input: Input::new(),
            clock: FrameClock::new(),
            show_controls: true,
            window: None,
            presenter: None,
            #[cfg(feature = "egui")]
            egui: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title("sparkfield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;

        let size = window.inner_size();
        self.raster.resize(size.width, size.height);

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(presenter.device(), presenter.format(), &window));
        }

        log_bindings();
        self.window = Some(window);
        self.presenter = Some(presenter);
        Ok(())
    }

    fn dispatch(&mut self, command: &Command) {
        match command.apply(&mut self.engine) {
            Some(FrontendAction::ToggleControls) => {
                self.show_controls = !self.show_controls;
                #[cfg(not(feature = "egui"))]
                if self.show_controls {
                    log_bindings();
                }
            }
            Some(FrontendAction::Snapshot) => self.save_snapshot(),
            None => {}
        }
    }

    fn save_snapshot(&self) {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let path = format!("sparkfield-{}.png", stamp);
        if let Err(e) = self.raster.snapshot(&path) {
            log::error!("{}", e);
        }
    }

    /// Whether the UI layer is using the pointer this frame.
    fn ui_owns_pointer(&self) -> bool {
        #[cfg(feature = "egui")]
        if let Some(egui) = &self.egui {
            return self.show_controls && egui.wants_pointer();
        }
        false
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let time_ms = self.clock.tick();

        let commands: Vec<Command> = self
            .input
            .keys_pressed()
            .iter()
            .filter_map(|&key| binding(key))
            .collect();
        for command in &commands {
            self.dispatch(command);
        }

        let ui_pointer = self.ui_owns_pointer();
        if self.input.pointer_pressed() && !ui_pointer {
            let burst = self.engine.burst_at(self.input.pointer_position());
            log::trace!("{:?} on press", burst);
        }

        let frame = FrameInput {
            pointer: self.input.pointer_position(),
            pointer_held: self.input.pointer_held() && !ui_pointer,
            time_ms,
        };
        self.engine.update(&mut self.raster, &frame);
        self.input.begin_frame();

        let Some(window) = self.window.clone() else {
            return;
        };

        if self.clock.frame() % TITLE_INTERVAL == 0 {
            window.set_title(&format!(
                "sparkfield - {} - {} particles - {:.0} fps",
                self.engine.config().mode.name(),
                self.engine.len(),
                self.clock.fps()
            ));
        }

        self.present(&window, event_loop);
    }

    #[cfg(not(feature = "egui"))]
    fn present(&mut self, _window: &Window, event_loop: &ActiveEventLoop) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };
        let result = presenter.present(&self.raster, |_| {});
        self.handle_surface_result(result, event_loop);
    }

    #[cfg(feature = "egui")]
    fn present(&mut self, window: &Window, event_loop: &ActiveEventLoop) {
        let mut ui_commands = Vec::new();
        let output = match (self.egui.as_mut(), self.show_controls) {
            (Some(egui), true) => {
                let config = self.engine.config().clone();
                let count = self.engine.len();
                let fps = self.clock.fps();
                Some(egui.run(window, |ctx| {
                    ui_commands = crate::ui::controls_panel(ctx, &config, count, fps);
                }))
            }
            _ => None,
        };

        if let Some(presenter) = self.presenter.as_mut() {
            let egui = self.egui.as_mut();
            let result = presenter.present(&self.raster, |overlay| {
                if let (Some(egui), Some(output)) = (egui, output) {
                    egui.paint(overlay, output);
                }
            });
            self.handle_surface_result(result, event_loop);
        }

        for command in &ui_commands {
            self.dispatch(command);
        }
    }

    fn handle_surface_result(
        &mut self,
        result: Result<(), wgpu::SurfaceError>,
        event_loop: &ActiveEventLoop,
    ) {
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.reconfigure();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        if let (Some(egui), Some(window)) = (self.egui.as_mut(), self.window.as_ref()) {
            if self.show_controls && egui.on_window_event(window, &event) {
                self.input.handle_consumed_event(&event);
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(physical_size);
                }
                self.raster.resize(physical_size.width, physical_size.height);
                log::debug!("Resized to {}x{}", physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            other => {
                if let Some(pointer) = self.input.handle_event(&other) {
                    if !self.ui_owns_pointer() {
                        self.engine.pointer_moved(pointer, self.input.pointer_held());
                    }
                }
            }
        }
    }
}

fn log_bindings() {
    let help: Vec<String> = KEY_BINDINGS
        .iter()
        .map(|(key, command)| format!("{:?}: {}", key, command.describe()))
        .collect();
    log::info!("Keys: {}", help.join(", "));
}
