use shared::models::Team;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

use crate::home::team_label;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 400;

/// Draws the confirmation card onto an offscreen canvas and triggers a PNG
/// download of it.
pub fn download(team: Team) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or("no document")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "failed to create canvas")?
        .dyn_into()
        .map_err(|_| "failed to create canvas")?;
    canvas.set_width(WIDTH);
    canvas.set_height(HEIGHT);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "no 2d context")?
        .ok_or("no 2d context")?
        .dyn_into()
        .map_err(|_| "no 2d context")?;

    let center = WIDTH as f64 / 2.0;

    context.set_fill_style_str("#1f2937");
    context.fill_rect(0.0, 0.0, WIDTH as f64, HEIGHT as f64);

    context.set_text_align("center");

    context.set_fill_style_str("#22c55e");
    context.set_font("bold 36px sans-serif");
    context
        .fill_text("Vote Confirmed!", center, 120.0)
        .map_err(|_| "failed to draw")?;

    context.set_fill_style_str("#e5e7eb");
    context.set_font("24px sans-serif");
    context
        .fill_text(&format!("You voted for {}", team_label(team)), center, 200.0)
        .map_err(|_| "failed to draw")?;

    context.set_fill_style_str("#9ca3af");
    context.set_font("16px sans-serif");
    context
        .fill_text("#PanchayatSeason4 #PrimeVideo", center, 280.0)
        .map_err(|_| "failed to draw")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "failed to encode image")?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "failed to create link")?
        .dyn_into()
        .map_err(|_| "failed to create link")?;
    link.set_download("voting-certificate.png");
    link.set_href(&data_url);
    link.click();

    Ok(())
}
