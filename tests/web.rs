//! Browser tests; run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;
use sunflower_garden::{SongPlayer, VirtualGarden};

wasm_bindgen_test_configure!(run_in_browser);

const SIZE: u32 = 200;

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_width(SIZE);
    canvas.set_height(SIZE);
    canvas
}

fn garden() -> VirtualGarden {
    VirtualGarden::new(canvas()).expect("WebGL2 context")
}

#[wasm_bindgen_test]
fn plant_then_water_grows_after_delay() {
    let mut garden = garden();
    let center = SIZE as f32 / 2.0;

    // The default camera looks at the origin, so the middle pixel hits soil
    assert_eq!(garden.on_click(center, center), "planted");
    assert_eq!(garden.flower_count(), 1);
    assert!((garden.flower_growth(0).unwrap() - 0.1).abs() < 0.0001);

    // The new flower now sits under the same pixel
    assert_eq!(garden.on_click(center, center), "watering");
    assert_eq!(garden.watering_index(), Some(0));
    assert_eq!(garden.on_click(center, center), "ignored");

    garden.render(1.0);
    assert!((garden.flower_growth(0).unwrap() - 0.1).abs() < 0.0001);
    garden.render(1.1);
    assert!((garden.flower_growth(0).unwrap() - 0.3).abs() < 0.0001);
    assert_eq!(garden.watering_index(), None);

    garden.dispose();
}

#[wasm_bindgen_test]
fn hints_and_cap() {
    let garden = garden();
    assert_eq!(garden.max_flowers(), 10);
    assert!(garden.planting_hint().contains("10"));
    assert!(!garden.watering_hint().is_empty());
}

#[wasm_bindgen_test]
fn hover_tracks_flower_under_pointer() {
    let mut garden = garden();
    let center = SIZE as f32 / 2.0;
    assert_eq!(garden.on_mouse_move(center, center), None);
    assert_eq!(garden.hovered_flower(), None);

    assert_eq!(garden.on_click(center, center), "planted");
    assert_eq!(garden.on_mouse_move(center, center), Some(0));
    assert_eq!(garden.hovered_flower(), Some(0));

    // Top-left corner looks over the soil
    assert_eq!(garden.on_mouse_move(0.0, 0.0), None);
    assert_eq!(garden.hovered_flower(), None);
}

#[wasm_bindgen_test]
fn soil_fallback_bound_before_image_loads() {
    let mut garden = garden();
    // The image decodes asynchronously; the fallback color is bound first
    assert!(!garden.ground_loaded());
    garden.dispose();
    assert!(!garden.ground_loaded());
}

#[wasm_bindgen_test]
fn config_overrides_cap() {
    let yaml = "garden:\n  max_flowers: 3\n";
    let garden = VirtualGarden::with_config(canvas(), yaml).expect("WebGL2 context");
    assert_eq!(garden.max_flowers(), 3);
    assert!(garden.planting_hint().contains("3"));
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let yaml = "garden:\n  max_flowers: 0\n";
    assert!(VirtualGarden::with_config(canvas(), yaml).is_err());
}

#[wasm_bindgen_test]
fn song_toggle_shows_quote() {
    let mut player = SongPlayer::new(canvas()).expect("WebGL2 context");
    assert!(!player.is_open());
    assert_eq!(player.quote(), None);

    assert!(player.toggle_play());
    assert!(player.is_open());
    assert!(player.quote().is_some());
    player.render(0.016);

    assert!(!player.toggle_play());
    assert!(!player.is_open());
    player.dispose();
    // Rendering after dispose is a no-op
    player.render(0.016);
}
