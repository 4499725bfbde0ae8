use crate::core::rasterizer::CullMode;
use crate::error::Result;
use crate::io::config::Config;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::passes::{compose_frame, post_process_to_buffer, render_frame};
use crate::pipeline::renderer::Renderer;
use crate::scene::canvas::DrawList;
use crate::scene::context::RenderContext;
use crate::scene::loader::init_scene_resources;
use crate::scene::state::{BlimpState, Control};
use crate::ui::input::InputController;
use log::{debug, info};
use minifb::{Key, Window, WindowOptions};
use std::path::Path;
use std::time::Instant;

fn build_renderer(config: &Config) -> Renderer {
    let mut renderer = Renderer::new(
        config.render.width,
        config.render.height,
        config.render.samples,
    );
    renderer
        .rasterizer
        .set_cull_mode(CullMode::from_name(&config.render.cull_mode));
    renderer.rasterizer.wireframe = config.render.wireframe;
    renderer
}

/// Composes and rasterizes one frame, then resolves it into `buffer`.
pub fn draw_frame(
    state: &BlimpState,
    context: &RenderContext,
    renderer: &mut Renderer,
    list: &mut DrawList,
    buffer: &mut [u32],
) {
    compose_frame(state, context, list);
    render_frame(list, context, renderer);
    post_process_to_buffer(&renderer.framebuffer, buffer);
}

/// Runs the application in GUI mode. A frame is drawn on start-up and after every input.
pub fn run_gui(config: &Config) -> Result<()> {
    let width = config.render.width;
    let height = config.render.height;

    info!("Starting GUI mode ({}x{})...", width, height);
    info!("Controls: W=Forward, Left/Right=Turn, Up/Down=Climb, Esc=Quit");

    // 1. Initialize Window
    let mut window = Window::new(
        &config.render.title,
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    // 2. Initialize Resources
    let context = init_scene_resources(config)?;
    let mut renderer = build_renderer(config);
    let mut input = InputController::new();
    let mut state = context.initial_state;
    let mut list = DrawList::new();
    let mut buffer = vec![0u32; width * height];
    let mut needs_redraw = true;

    // 3. Main Loop
    while window.is_open() && !window.is_key_down(Key::Escape) {
        // --- Input ---
        for control in input.poll(&window) {
            state.apply(control, &context.control_steps);
            needs_redraw = true;
        }

        // --- Render ---
        if needs_redraw {
            let start = Instant::now();
            draw_frame(&state, &context, &mut renderer, &mut list, &mut buffer);
            debug!("Frame drawn in {:.2?}", start.elapsed());
            needs_redraw = false;
        }

        // --- Display ---
        // Presents the last frame again when nothing changed, which also pumps window events.
        window.update_with_buffer(&buffer, width, height)?;
    }

    info!("Window closed.");
    Ok(())
}

/// Runs the application in CLI mode (headless): applies `inputs`, renders one frame and saves it.
pub fn run_cli(config: &Config, inputs: &[Control], output: &Path) -> Result<()> {
    info!("Starting CLI mode...");
    let context = init_scene_resources(config)?;
    let mut renderer = build_renderer(config);

    let mut state = context.initial_state;
    for &control in inputs {
        state.apply(control, &context.control_steps);
    }
    if !inputs.is_empty() {
        info!("Applied {} inputs: {:?}", inputs.len(), state);
    }

    let start_time = Instant::now();
    let mut list = DrawList::new();
    let mut buffer = vec![0u32; config.render.width * config.render.height];
    draw_frame(&state, &context, &mut renderer, &mut list, &mut buffer);
    info!(
        "Render completed in {:.2?} ({} draw commands)",
        start_time.elapsed(),
        list.len()
    );

    // Save
    info!("Saving output to '{}'...", output.display());
    save_buffer_to_image(&buffer, config.render.width, config.render.height, output)?;
    info!("Done.");
    Ok(())
}
