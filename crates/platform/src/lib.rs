//! Platform layer: windowing & event loop.
//!
//! One window, one mesh, redrawn continuously. Frame statistics live in the
//! event handler and are fed from each render call.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use asset::FlatBuffers;
use corelib::FrameStats;
use renderer::{GpuState, SceneSettings};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Window and surface options chosen at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub backends: wgpu::Backends,
    /// Append the running FPS average to the window title.
    pub show_fps: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Mesh Viewer".to_owned(),
            width: 1280,
            height: 1280,
            backends: wgpu::Backends::all(),
            show_fps: true,
        }
    }
}

struct ViewerApp {
    config: ViewerConfig,
    mesh: FlatBuffers,
    scene: SceneSettings,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    stats: FrameStats,
    error: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(config: ViewerConfig, mesh: FlatBuffers, scene: SceneSettings) -> Self {
        Self {
            config,
            mesh,
            scene,
            window: None,
            gpu: None,
            stats: FrameStats::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.backends,
            &self.mesh,
            self.scene,
        ))?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        match gpu.render() {
            Ok(frame_time) => {
                self.stats.record(frame_time);
                if self.config.show_fps {
                    if let Some(window) = &self.window {
                        window.set_title(&self.stats.title(&self.config.title));
                    }
                }
            }
            Err(e) if GpuState::is_surface_lost(&e) => {
                log::warn!("Surface lost/outdated; reconfiguring");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {e}");
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::info!("Scale factor changed: {:.3}", scale_factor);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open a window and draw `mesh` until the window is closed.
pub fn run_with_renderer(
    config: ViewerConfig,
    mesh: FlatBuffers,
    scene: SceneSettings,
) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config, mesh, scene);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    if let Some(err) = app.error.take() {
        return Err(err);
    }

    if let Some(fps) = app.stats.fps() {
        log::info!(
            "Rendered {} frames, average {:.2} FPS",
            app.stats.frames(),
            fps
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_viewer_window() {
        let config = ViewerConfig::default();
        assert_eq!((config.width, config.height), (1280, 1280));
        assert!(config.show_fps);
        assert_eq!(config.backends, wgpu::Backends::all());
    }
}
