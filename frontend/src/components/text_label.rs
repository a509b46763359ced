use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::config::{LABEL_COLOR, LABEL_FONT, LABEL_TEXT};
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct TextLabelProps {
    pub visible: bool,
}

fn draw_label(canvas: &HtmlCanvasElement) {
    canvas.set_width(canvas.client_width().max(0) as u32);
    canvas.set_height(canvas.client_height().max(0) as u32);
    let Some(context) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    context.clear_rect(0.0, 0.0, width, height);
    context.set_fill_style_str(LABEL_COLOR);
    context.set_font(LABEL_FONT);
    context.set_text_align("center");
    context.set_text_baseline("middle");
    if let Err(err) = context.fill_text(LABEL_TEXT, width / 2.0, height / 2.0) {
        debug!("label draw failed: {:?}", err);
    }
}

/// Static text drawn on its own canvas; hidden entirely when not visible.
#[function_component(TextLabel)]
pub fn text_label(props: &TextLabelProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.visible, move |visible| {
            if *visible {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    draw_label(&canvas);
                }
            }
            || ()
        });
    }

    if !props.visible {
        return html! {};
    }

    html! {
        <canvas ref={canvas_ref} class={styles::TEXT_LABEL} />
    }
}
