use crate::config::Config;
use crate::input::{Action, Flow, Painter};
use crate::render::{create_render_bind_group, create_render_bind_group_layout, create_render_pipeline, pack_cells, GridParams};
use crate::scheduler::Scheduler;
use crate::simulation::Simulation;
use std::sync::Arc;
use thiserror::Error;
use wgpu::util::DeviceExt;
use winit::window::Window;

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Timeout and Outdated clear up on their own; Lost and OutOfMemory need attention.
pub fn is_transient_surface_error(err: &wgpu::SurfaceError) -> bool {
    matches!(err, wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Outdated)
}

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub settings: Config,
    pub simulation: Simulation,
    pub scheduler: Scheduler,
    pub painter: Painter,

    pub grid_param_buffer: wgpu::Buffer,
    pub cell_buffer: wgpu::Buffer,
    uploaded_revision: Option<u64>,
    upload_scratch: Vec<u32>,

    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group: wgpu::BindGroup,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub menu_open: bool,
}

impl State {
    pub async fn new(window: Arc<Window>, settings: Config) -> Result<Self, RenderError> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Simulation, sized once from the configured window
        let (rows, cols) = settings.grid_dimensions();
        let simulation = Simulation::new(rows, cols);
        let scheduler = Scheduler::new(settings.ticks_per_second);
        log::info!("Grid is {}x{} cells of {}px ({:?})", rows, cols, settings.cell_size, settings.cell_shape);

        // Grid resources
        let grid_params = GridParams::new(rows, cols, settings.cell_size, settings.cell_shape);
        let grid_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Parameters"),
            contents: bytemuck::bytes_of(&grid_params),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let cell_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cell Buffer"),
            size: grid_params.cell_buffer_size(),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Render pipeline
        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_pipeline = create_render_pipeline(&device, &render_bind_group_layout, config.format);
        let render_bind_group =
            create_render_bind_group(&device, &render_bind_group_layout, &grid_param_buffer, &cell_buffer);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("egui initialized.");

        log::info!("wgpu initialized successfully.");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            settings,
            simulation,
            scheduler,
            painter: Painter::default(),
            grid_param_buffer,
            cell_buffer,
            uploaded_revision: None,
            upload_scratch: Vec::with_capacity(rows * cols),
            render_pipeline,
            render_bind_group,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            menu_open: false,
        })
    }

    /// Reconfigures the surface only; the grid keeps its dimensions.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Flow {
        if action == Action::ToggleMenu {
            self.menu_open = !self.menu_open;
            return Flow::Continue;
        }
        action.apply(&mut self.simulation, &mut self.scheduler)
    }

    pub fn handle_mouse_input(&mut self, button: winit::event::MouseButton, element_state: winit::event::ElementState) {
        self.painter
            .handle_mouse_input(&mut self.simulation, self.settings.cell_size, button, element_state);
    }

    pub fn handle_cursor_move(&mut self, position: winit::dpi::PhysicalPosition<f64>) {
        self.painter
            .handle_cursor_move(&mut self.simulation, self.settings.cell_size, position);
    }

    /// Copy the active grid to the GPU if it changed since the last upload.
    fn upload_cells(&mut self) {
        let revision = self.simulation.revision();
        if self.uploaded_revision == Some(revision) {
            return;
        }
        pack_cells(self.simulation.grid().cells(), &mut self.upload_scratch);
        self.queue
            .write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(&self.upload_scratch));
        self.uploaded_revision = Some(revision);
    }

    /// Run due generations & render the grid. Returns the surface texture for egui to draw on.
    pub fn update_and_render(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.scheduler.run_due(&mut self.simulation);
        self.upload_cells();

        // --- Get Surface Texture (early exit on error) ---
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        // --- Render Pass ---
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut render_encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });
        {
            let mut render_pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle
        }
        self.queue.submit(Some(render_encoder.finish()));
        // egui draws on top and presents

        Ok(output_frame)
    }
}
