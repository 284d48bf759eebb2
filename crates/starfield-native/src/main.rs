use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use starfield_core::gpu::{preferred_surface_format, StarPipeline};
use starfield_core::{
    Camera, FrameRateMonitor, FrameSnapshot, ParticleField, RenderLoop, SceneRenderer,
    ScrollCameraBinding, Stage, StarfieldConfig, Theme, ThemeController,
};

mod state_file;

use state_file::FileStore;

/// Height of the imaginary page the mouse wheel scrolls through.
const VIRTUAL_PAGE_HEIGHT: f64 = 4000.0;
/// Pixels per wheel notch when the OS reports line deltas.
const WHEEL_LINE_PX: f64 = 40.0;

const CLEAR_LIGHT: wgpu::Color = wgpu::Color {
    r: 0.03,
    g: 0.04,
    b: 0.09,
    a: 1.0,
};
const CLEAR_DARK: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.01,
    b: 0.02,
    a: 1.0,
};

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    stars: StarPipeline,
    clear: wgpu::Color,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = preferred_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let stars = StarPipeline::new(&device, format);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            stars,
            clear: CLEAR_LIGHT,
            width,
            height,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn set_theme(&mut self, theme: Theme) {
        self.clear = if theme.is_dark() { CLEAR_DARK } else { CLEAR_LIGHT };
    }
}

impl SceneRenderer for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), wgpu::SurfaceError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.window.inner_size());
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.stars.prepare(
            &self.device,
            &self.queue,
            frame,
            [self.width as f32, self.height as f32],
        );
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.stars.encode(&mut encoder, &view, self.clear);
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Wheel-driven stand-in for document scrolling.
struct VirtualScroll {
    offset: f64,
    viewport_h: f64,
}

impl VirtualScroll {
    fn max_offset(&self) -> f64 {
        (VIRTUAL_PAGE_HEIGHT - self.viewport_h).max(0.0)
    }

    fn scroll_by(&mut self, dy: f64) {
        self.offset = (self.offset + dy).clamp(0.0, self.max_offset());
    }

    fn set_viewport(&mut self, height: f64) {
        self.viewport_h = height;
        self.offset = self.offset.min(self.max_offset());
    }
}

/// `STARFIELD_PARTICLES`, `STARFIELD_PARTICLES_NARROW`, ...
fn env_lookup(key: &str) -> Option<String> {
    let name = format!("STARFIELD_{}", key.to_ascii_uppercase().replace('-', "_"));
    std::env::var(name).ok()
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let (config, rejected) = StarfieldConfig::from_lookup_lenient(env_lookup);
    for e in rejected {
        log::warn!("[config] {}; keeping default", e);
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Starfield (native preview)")
        .build(&event_loop)?;

    let size = window.inner_size();
    let device = config.device_class(size.width as f32 / window.scale_factor() as f32);
    let mut stage = Stage::new(Camera::new(
        size.width as f32 / size.height.max(1) as f32,
    ));
    let os_dark = window.theme() == Some(winit::window::Theme::Dark);
    let store = FileStore::from_env();
    log::info!("[theme] state dir: {}", store.dir().display());
    let mut themes = ThemeController::new(store, os_dark);
    let theme = themes.initialize(&mut stage);

    let mut scroll = VirtualScroll {
        offset: 0.0,
        viewport_h: f64::from(size.height),
    };
    ScrollCameraBinding.on_scroll(&mut stage, scroll.offset, scroll.max_offset());

    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    stage.install_field(ParticleField::for_device(device, &config, seed));

    let mut state = pollster::block_on(GpuState::new(&window))?;
    state.set_theme(theme);

    let mut render_loop = RenderLoop::new();
    if config.monitor_fps {
        render_loop = render_loop.with_monitor(FrameRateMonitor::default());
    }
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            state.resize(size);
            stage
                .camera
                .set_viewport(size.width as f32, size.height as f32);
            scroll.set_viewport(f64::from(size.height));
            ScrollCameraBinding.on_scroll(&mut stage, scroll.offset, scroll.max_offset());
        }
        Event::WindowEvent {
            event: WindowEvent::MouseWheel { delta, .. },
            ..
        } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * WHEEL_LINE_PX,
                MouseScrollDelta::PixelDelta(p) => -p.y,
            };
            scroll.scroll_by(dy);
            ScrollCameraBinding.on_scroll(&mut stage, scroll.offset, scroll.max_offset());
        }
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                },
            ..
        } => match logical_key {
            Key::Character(c) if c.as_str().eq_ignore_ascii_case("d") => {
                let theme = themes.toggle(&mut stage);
                log::info!("[theme] switched to {}", theme);
                state.set_theme(theme);
            }
            Key::Named(NamedKey::Escape) => elwt.exit(),
            _ => {}
        },
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;
            render_loop.tick(&mut stage, Some(&mut state), dt);
            state.window.request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}
