// Declare modules directly in the binary crate root
pub mod config;
pub mod grid;
pub mod input;
pub mod render;
pub mod rules;
pub mod scheduler;
pub mod simulation;
pub mod state;

use crate::config::Config;
use crate::input::{Action, Flow};
use crate::rules::Pattern;
use crate::simulation::ResetMode;
use crate::state::{is_transient_surface_error, State};

use std::error::Error;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, settings: Config) -> Result<(), Box<dyn Error>> {
    let mut state = State::new(window, settings).await?;

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);

                if response.repaint {
                    state.window.request_redraw();
                }

                // Resize must reach the surface even when egui uses it. Keys egui
                // consumes (Tab, typing into a widget) never reach the key map below.
                let consumed_by_egui = response.consumed && !matches!(event, WindowEvent::Resized(_));
                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::KeyboardInput { event: key_event, .. } => {
                        if let Some(action) = input::action_for_key_event(key_event) {
                            if state.handle_action(action) == Flow::Exit {
                                window_target.exit();
                            }
                        }
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        state.handle_mouse_input(*button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        state.handle_cursor_move(*position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        state.painter.handle_cursor_left();
                    }
                    WindowEvent::RedrawRequested => {
                        let output_frame = match state.update_and_render() {
                            Ok(frame) => frame,
                            Err(err) => {
                                if is_transient_surface_error(&err) {
                                    log::warn!("Skipping frame, surface {:?} (temporary)", err);
                                } else {
                                    // Lost already reconfigured the surface in update_and_render
                                    log::warn!("Skipping frame due to surface error: {:?}", err);
                                }
                                state.window.request_redraw();
                                return;
                            }
                        };

                        let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

                        // --- Egui Frame and UI Definition ---
                        let raw_input = state.egui_winit_state.take_egui_input(&state.window);
                        state.egui_ctx.begin_frame(raw_input);
                        let ctx = state.egui_ctx.clone();
                        let actions = draw_menu(&ctx, &state);
                        let full_output = state.egui_ctx.end_frame();

                        for action in actions {
                            if state.handle_action(action) == Flow::Exit {
                                window_target.exit();
                            }
                        }

                        let paint_jobs = state.egui_ctx.tessellate(full_output.shapes, state.window.scale_factor() as f32);
                        let screen_descriptor = egui_wgpu::ScreenDescriptor {
                            size_in_pixels: [state.config.width, state.config.height],
                            pixels_per_point: state.window.scale_factor() as f32,
                        };

                        // Upload egui data to GPU
                        let mut encoder = state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui Encoder"),
                        });
                        for (id, image_delta) in &full_output.textures_delta.set {
                            state.egui_renderer.update_texture(&state.device, &state.queue, *id, image_delta);
                        }
                        let egui_commands = state.egui_renderer.update_buffers(
                            &state.device,
                            &state.queue,
                            &mut encoder,
                            &paint_jobs,
                            &screen_descriptor,
                        );
                        state.egui_winit_state.handle_platform_output(
                            &state.window,
                            full_output.platform_output,
                        );

                        // Render egui on top of the grid
                        {
                            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui Render Pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &output_view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                timestamp_writes: None,
                                occlusion_query_set: None,
                            });

                            state.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
                        }

                        for id in &full_output.textures_delta.free {
                            state.egui_renderer.free_texture(id);
                        }

                        state.queue.submit(egui_commands.into_iter().chain(Some(encoder.finish())));
                        output_frame.present();
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                state.window.request_redraw();
            }
            _ => (),
        }
    })?;

    Ok(())
}

/// Menu button plus the optional side panel. Returns the actions clicked this frame.
fn draw_menu(ctx: &egui::Context, state: &State) -> Vec<Action> {
    let mut actions = Vec::new();

    egui::Area::new(egui::Id::new("menu_button_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
        .show(ctx, |ui| {
            if ui.button("☰").clicked() {
                actions.push(Action::ToggleMenu);
            }
        });

    if !state.menu_open {
        return actions;
    }

    let panel_frame = egui::Frame {
        fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 100),
        ..egui::Frame::side_top_panel(&ctx.style())
    };

    egui::SidePanel::left("side_panel")
        .frame(panel_frame)
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Game of Life");
            ui.separator();

            let (rows, cols) = state.simulation.dimensions();
            ui.label(format!("Grid: {}x{}", rows, cols));
            ui.label(format!("Generation: {}", state.simulation.generation()));
            ui.label(format!("Live Cells: {}", state.simulation.population()));
            ui.label(format!("Shape: {:?}", state.settings.cell_shape));
            ui.separator();

            let pause_label = if state.scheduler.is_paused() { "Resume (s)" } else { "Pause (s)" };
            ui.horizontal(|ui| {
                if ui.button(pause_label).clicked() {
                    actions.push(Action::TogglePause);
                }
                if ui.button("Step (.)").clicked() {
                    actions.push(Action::Step);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Randomize (r)").clicked() {
                    actions.push(Action::Reset(ResetMode::Random));
                }
                if ui.button("Clear (0)").clicked() {
                    actions.push(Action::Reset(ResetMode::AllDead));
                }
                if ui.button("Fill (a)").clicked() {
                    actions.push(Action::Reset(ResetMode::AllAlive));
                }
            });
            ui.separator();

            ui.label("Spawn Pattern:");
            for (i, pattern) in Pattern::ALL.iter().enumerate() {
                if ui.button(format!("{} {}", i + 1, pattern.name())).clicked() {
                    actions.push(Action::Spawn(*pattern));
                }
            }
            ui.separator();

            if ui.button("Quit (q)").clicked() {
                actions.push(Action::Quit);
            }
        });

    actions
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings = Config::default();
    settings.validate()?;

    let event_loop = EventLoop::new()?;

    // Physical size so one cell is exactly `cell_size` pixels
    let initial_size = winit::dpi::PhysicalSize::new(settings.window_width, settings.window_height);

    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("Game of Life")
            .with_inner_size(initial_size)
            .with_resizable(false)
            .build(&event_loop)?,
    );

    pollster::block_on(run(event_loop, window, settings))
}
