use gloo_render::{request_animation_frame, AnimationFrame};
use log::debug;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use wheel_shared::segment::Color;
use wheel_shared::{ArcCanvas, Orientation, Rect, WheelWidget};
use yew::prelude::*;

use crate::styles;

/// Shared handle to the wheel; equality is identity.
#[derive(Clone)]
pub struct WheelHandle(pub Rc<RefCell<WheelWidget>>);

impl PartialEq for WheelHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub wheel: WheelHandle,
}

struct ContextCanvas<'a>(&'a CanvasRenderingContext2d);

impl ArcCanvas for ContextCanvas<'_> {
    fn draw_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32, color: Color) {
        let (center_x, center_y) = oval.center();
        let radius_x = (oval.width() / 2.0).max(0.0) as f64;
        let radius_y = (oval.height() / 2.0).max(0.0) as f64;
        let start = start_angle as f64 * PI / 180.0;
        let end = (start_angle + sweep_angle) as f64 * PI / 180.0;

        let context = self.0;
        context.begin_path();
        context.set_fill_style_str(&color.css());
        context.move_to(center_x as f64, center_y as f64);
        if let Err(err) = context.ellipse(center_x as f64, center_y as f64, radius_x, radius_y, 0.0, start, end) {
            debug!("arc draw failed: {:?}", err);
        }
        context.close_path();
        context.fill();
    }
}

// The frame that is currently running its callback must outlive that
// callback, so the previous handle is parked in `retired` for one more frame.
#[derive(Default)]
struct FrameLoop {
    current: Option<AnimationFrame>,
    retired: Option<AnimationFrame>,
}

fn screen_orientation() -> Orientation {
    window()
        .and_then(|w| {
            let width = w.inner_width().ok()?.as_f64()?;
            let height = w.inner_height().ok()?.as_f64()?;
            Some(Orientation::from_size(width as f32, height as f32))
        })
        .unwrap_or(Orientation::Portrait)
}

/// Matches the backing store to the displayed size. Returns whether it changed.
fn sync_canvas_size(canvas: &HtmlCanvasElement) -> bool {
    let width = canvas.client_width().max(0) as u32;
    let height = canvas.client_height().max(0) as u32;
    if canvas.width() == width && canvas.height() == height {
        return false;
    }
    canvas.set_width(width);
    canvas.set_height(height);
    true
}

fn paint(wheel: &WheelWidget, canvas: &HtmlCanvasElement) {
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
    wheel.render(&mut ContextCanvas(&context), width as f32, height as f32, screen_orientation());
}

fn schedule_frame(wheel: WheelHandle, canvas_ref: NodeRef, frames: Rc<RefCell<FrameLoop>>, last_timestamp: Option<f64>) {
    let next_frames = frames.clone();
    let frame = request_animation_frame(move |timestamp| {
        let delta_ms = last_timestamp
            .map(|last| (timestamp - last).max(0.0) as i64)
            .unwrap_or(0);
        let invalidated = {
            let mut widget = wheel.0.borrow_mut();
            widget.tick(delta_ms);
            widget.take_invalidated()
        };

        if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
            let resized = sync_canvas_size(&canvas);
            if invalidated || resized {
                paint(&wheel.0.borrow(), &canvas);
            }
        }

        schedule_frame(wheel, canvas_ref, next_frames, Some(timestamp));
    });

    let mut frames = frames.borrow_mut();
    let previous = frames.current.replace(frame);
    frames.retired = previous;
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.wheel.clone(), move |wheel| {
            wheel.0.borrow_mut().on_mount();
            let frames = Rc::new(RefCell::new(FrameLoop::default()));
            schedule_frame(wheel.clone(), canvas_ref, frames.clone(), None);

            let wheel = wheel.clone();
            move || {
                // Dropping the pending frame cancels it
                *frames.borrow_mut() = FrameLoop::default();
                wheel.0.borrow_mut().on_unmount();
            }
        });
    }

    let onclick = {
        let wheel = props.wheel.clone();
        Callback::from(move |_: MouseEvent| {
            wheel.0.borrow_mut().on_tap();
        })
    };

    html! {
        <canvas ref={canvas_ref} class={styles::WHEEL_CANVAS} {onclick} />
    }
}
