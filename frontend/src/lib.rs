pub mod components;
pub mod config;
pub mod styles;

use gloo_events::EventListener;
use std::rc::Rc;
use web_sys::{window, HtmlInputElement};
use wheel_shared::constants::DEFAULT_SCALE;
use wheel_shared::{RandomTargets, ScreenSnapshot, ScreenState, WheelValue, WheelWidget};
use yew::prelude::*;

use crate::components::{TextLabel, WheelCanvas, WheelHandle};

pub enum ScreenAction {
    WheelValue(WheelValue),
    Clear,
}

#[derive(Clone, PartialEq, Default)]
pub struct ScreenModel(pub ScreenState);

impl Reducible for ScreenModel {
    type Action = ScreenAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            ScreenAction::WheelValue(value) => {
                if !state.on_wheel_value(value) {
                    return self;
                }
            }
            ScreenAction::Clear => state.clear(),
        }
        Rc::new(ScreenModel(state))
    }
}

fn build_wheel(saved: Option<&ScreenSnapshot>) -> WheelWidget {
    let mut wheel = WheelWidget::with_defaults(RandomTargets::from_entropy());
    if let Some(saved) = saved {
        // Resumes once the canvas mounts
        wheel.restore_state(&saved.wheel);
    }
    wheel
}

fn slider_position(scale: f32) -> u32 {
    ((1.0 - scale.clamp(0.0, 1.0)) * 100.0).round() as u32
}

#[function_component(App)]
pub fn app() -> Html {
    let saved = use_state(config::load_snapshot);

    let wheel = {
        let saved = saved.clone();
        use_mut_ref(move || build_wheel((*saved).as_ref()))
    };
    let screen = {
        let saved = saved.clone();
        use_reducer(move || ScreenModel((*saved).as_ref().map(ScreenState::restore).unwrap_or_default()))
    };
    let slider = {
        let scale = (*saved).as_ref().map(|s| s.wheel.scale).unwrap_or(DEFAULT_SCALE);
        use_state(move || slider_position(scale))
    };

    // Latest panel state for the pagehide handler
    let screen_ref = use_mut_ref(ScreenState::default);
    *screen_ref.borrow_mut() = screen.0.clone();

    {
        let wheel = wheel.clone();
        let dispatcher = screen.dispatcher();
        use_effect_with((), move |_| {
            let id = wheel
                .borrow_mut()
                .subscribe_result(move |value| dispatcher.dispatch(ScreenAction::WheelValue(*value)));
            move || {
                wheel.borrow_mut().unsubscribe_result(id);
            }
        });
    }

    {
        let wheel = wheel.clone();
        let screen_ref = screen_ref.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|window| {
                EventListener::new(&window, "pagehide", move |_| {
                    let snapshot = screen_ref.borrow().snapshot(wheel.borrow().serialize_state());
                    config::save_snapshot(&snapshot);
                })
            });
            move || drop(listener)
        });
    }

    let on_slider = {
        let wheel = wheel.clone();
        let slider = slider.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(progress) = input.value().parse::<u32>() {
                slider.set(progress);
                wheel.borrow_mut().set_scale(progress as f32 / 100.0);
            }
        })
    };

    let on_clear = {
        let screen = screen.clone();
        Callback::from(move |_: MouseEvent| screen.dispatch(ScreenAction::Clear))
    };

    let image = match screen.0.image_url(config::IMAGE_URL) {
        Some(url) => html! { <img src={url} class={styles::IMAGE} alt="" /> },
        None => html! {},
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::WHEEL_FRAME}>
                <WheelCanvas wheel={WheelHandle(wheel.clone())} />
            </div>
            <div class={styles::CONTROLS}>
                <input
                    type="range"
                    min="0"
                    max="100"
                    value={slider.to_string()}
                    class={styles::SLIDER}
                    oninput={on_slider}
                />
                <button class={styles::BUTTON_PRIMARY} onclick={on_clear}>{ "Clear" }</button>
            </div>
            <TextLabel visible={screen.0.text_visible} />
            { image }
        </div>
    }
}
