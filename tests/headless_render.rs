use blimp_scene::app::{draw_frame, run_cli};
use blimp_scene::core::color::{pack_rgb, unpack_rgb};
use blimp_scene::io::config::Config;
use blimp_scene::pipeline::renderer::Renderer;
use blimp_scene::scene::canvas::DrawList;
use blimp_scene::scene::loader::init_scene_resources;
use blimp_scene::scene::state::{BlimpState, Control};
use nalgebra::Vector3;
use std::path::PathBuf;

fn render(config: &Config, state: Option<BlimpState>) -> Vec<u32> {
    let context = init_scene_resources(config).unwrap();
    let state = state.unwrap_or(context.initial_state);
    let mut renderer = Renderer::new(config.render.width, config.render.height, config.render.samples);
    let mut list = DrawList::new();
    let mut buffer = vec![0u32; config.render.width * config.render.height];
    draw_frame(&state, &context, &mut renderer, &mut list, &mut buffer);
    buffer
}

fn pixel(buffer: &[u32], config: &Config, x: usize, y: usize) -> [u8; 3] {
    unpack_rgb(buffer[y * config.render.width + x])
}

#[test]
fn default_frame_shows_blimp_and_ground() {
    let config = Config::default();
    let buffer = render(&config, None);
    let (w, h) = (config.render.width, config.render.height);
    let clear = unpack_rgb(pack_rgb(Vector3::new(0.4, 0.4, 0.4)));

    // The camera looks at the origin, where the blimp starts.
    let [r, g, b] = pixel(&buffer, &config, w / 2, h / 2);
    assert_ne!([r, g, b], clear);
    // Two bright lights saturate the envelope, but blue stays the dominant channel.
    assert!(b >= r && b >= g, "blimp body should be blue, got {:?}", [r, g, b]);

    // The lower edge of the view lands on the green ground.
    let [r, g, b] = pixel(&buffer, &config, w / 2, h - 1);
    assert!(g > r && g > b, "ground should be green, got {:?}", [r, g, b]);

    // Top corners see only the clear colour.
    assert_eq!(pixel(&buffer, &config, 0, 0), clear);
    assert_eq!(pixel(&buffer, &config, w - 1, 0), clear);
}

#[test]
fn climbing_out_of_view_reveals_background() {
    let config = Config::default();
    let state = BlimpState {
        height: 60.0,
        ..Default::default()
    };
    let buffer = render(&config, Some(state));
    let clear = unpack_rgb(pack_rgb(Vector3::new(0.4, 0.4, 0.4)));
    assert_eq!(pixel(&buffer, &config, config.render.width / 2, config.render.height / 2), clear);
}

#[test]
fn sample_config_matches_defaults() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scene.toml");
    let config = Config::load(&path).unwrap();
    let defaults = Config::default();

    assert_eq!(config.render.width, defaults.render.width);
    assert_eq!(config.camera.position, defaults.camera.position);
    assert_eq!(config.ground.subdivisions, defaults.ground.subdivisions);
    assert_eq!(config.lights.len(), defaults.lights.len());
    assert_eq!(config.blimp.heading, defaults.blimp.heading);
}

#[test]
fn headless_run_writes_png() {
    let mut config = Config::default();
    config.render.width = 130;
    config.render.height = 100;
    let output = std::env::temp_dir().join(format!("blimp-scene-test-{}.png", std::process::id()));

    let inputs = Control::parse_list("forward,left,up").unwrap();
    run_cli(&config, &inputs, &output).unwrap();

    let img = image::open(&output).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (130, 100));
    std::fs::remove_file(&output).unwrap();
}
