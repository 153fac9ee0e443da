//! Demo page for the achievement renderer using Yew.
//! A form designs an achievement; buttons trigger it inline or floating.

use achievement_toast::{
    components::AchievementCard,
    config::*,
    defaults,
    hooks::{use_inline_achievement, use_validated_input},
    layout::Placement,
    renderer::{self, Renderer},
    utils::{shadow_from_opacity, validate_dissolve, validate_duration, validate_points},
    AchievementRequest, StackPolicy,
};
use log::{info, warn};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

fn text_setter(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}

fn checkbox_setter(handle: &UseStateHandle<bool>) -> Callback<Event> {
    let handle = handle.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        handle.set(input.checked());
    })
}

/// Named presets behind the quick-trigger buttons.
fn preset(name: &str) -> AchievementRequest {
    let builder = AchievementRequest::builder();
    let builder = match name {
        "master" => builder.title("Master Player").description("Completed All Levels").points(100).icon_text("⭐"),
        "responsive" => builder
            .title("Responsive Design")
            .description("Auto-width achievement")
            .points(25)
            .icon_text("🌟"),
        "float-top" | "float-middle" | "float-bottom" => builder
            .title("Floating Achievement!")
            .description(format!("Overlay at the {}", &name[6..]))
            .points(50)
            .icon_text("🚀")
            .floating(true)
            .position(&name[6..])
            .duration(6_000),
        _ => builder.title("Achievement Unlocked!").description("You Win").points(10).icon_text("🏆"),
    };
    // Presets only use known-good values
    builder
        .build()
        .unwrap_or_else(|_| AchievementRequest::new("Achievement Unlocked!", "You Win", 10, "🏆"))
}

// ──────────────────────────────────────────────────────────────────────────────

#[function_component(Main)]
fn main_component() -> Html {
    let title = use_state(|| "Achievement Unlocked!".to_string());
    let description = use_state(|| "Custom Achievement".to_string());
    let icon_text = use_state(|| "🎮".to_string());
    let icon_background_color = use_state(|| defaults::ICON_BACKGROUND_COLOR.to_string());
    let background_color = use_state(|| defaults::BACKGROUND_COLOR.to_string());
    let text_color = use_state(|| defaults::TEXT_COLOR.to_string());
    let shadow_opacity = use_state(|| 0.3_f64);
    let auto_width = use_state(|| defaults::AUTO_WIDTH);
    let floating = use_state(|| defaults::FLOATING);
    let stack = use_state(|| true);
    let position = use_state(|| defaults::POSITION.to_string());
    let pixel_offset = use_state(|| "120".to_string());

    let points = use_validated_input(10u32, Rc::new(validate_points));
    let duration = use_validated_input(defaults::DURATION_MS, Rc::new(validate_duration));
    let dissolve = use_validated_input(defaults::DISSOLVE_MS, Rc::new(validate_dissolve));

    let last_error = use_state(|| None::<String>);
    let last_shown = use_state(|| None::<String>);
    let inline_slot = use_inline_achievement();

    // Route a request to the inline slot or the floating renderer
    let show = {
        let last_error = last_error.clone();
        let last_shown = last_shown.clone();
        let trigger_inline = inline_slot.trigger.clone();
        let stack = *stack;
        Callback::from(move |request: AchievementRequest| {
            if !request.floating() {
                info!("Showing inline achievement '{}'", request.title());
                trigger_inline.emit(request);
                last_error.set(None);
                return;
            }
            let policy = if stack { StackPolicy::Stack } else { StackPolicy::Replace };
            match Renderer::new().with_policy(policy).display(request) {
                Ok(handle) => {
                    last_shown.set(serde_json::to_string_pretty(handle.shown_event()).ok());
                    last_error.set(None);
                }
                Err(err) => {
                    warn!("Achievement failed: {}", err);
                    last_error.set(Some(err.to_string()));
                }
            }
        })
    };

    let on_submit = {
        let show = show.clone();
        let last_error = last_error.clone();
        let title = title.clone();
        let description = description.clone();
        let icon_text = icon_text.clone();
        let icon_background_color = icon_background_color.clone();
        let background_color = background_color.clone();
        let text_color = text_color.clone();
        let shadow_opacity = shadow_opacity.clone();
        let auto_width = auto_width.clone();
        let floating = floating.clone();
        let position = position.clone();
        let pixel_offset = pixel_offset.clone();
        let points = points.value;
        let duration = duration.value;
        let dissolve = dissolve.value;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let position = if *position == "custom" {
                format!("{}px", pixel_offset.trim())
            } else {
                (*position).clone()
            };
            let built = AchievementRequest::builder()
                .title((*title).clone())
                .description((*description).clone())
                .points(points)
                .icon_text((*icon_text).clone())
                .duration(duration)
                .dissolve(dissolve)
                .icon_background_color((*icon_background_color).clone())
                .background_color((*background_color).clone())
                .text_color((*text_color).clone())
                .shadow_color(shadow_from_opacity(*shadow_opacity))
                .auto_width(*auto_width)
                .floating(*floating)
                .position(position)
                .build();
            match built {
                Ok(request) => show.emit(request),
                Err(err) => last_error.set(Some(err.to_string())),
            }
        })
    };

    let preset_button = |name: &'static str, label: &'static str| {
        let show = show.clone();
        html! {
            <button type="button" class="btn-secondary" onclick={Callback::from(move |_| show.emit(preset(name)))}>
                { label }
            </button>
        }
    };

    html! {
        <div class="container">
            <h1>{ "🎮 Achievement Component Demo" }</h1>

            <form class="custom-achievement" onsubmit={on_submit}>
                <h2>{ "🛠️ Create Custom Achievement" }</h2>
                <div class="form-row">
                    <div class="form-column">
                        <div class="form-group">
                            <label for="title">{ "Achievement Title" }</label>
                            <input id="title" type="text" value={(*title).clone()} oninput={text_setter(&title)} />
                        </div>
                        <div class="form-group">
                            <label for="description">{ "Achievement Description" }</label>
                            <input id="description" type="text" value={(*description).clone()} oninput={text_setter(&description)} />
                        </div>
                        <div class="form-group">
                            <label for="points">{ "Points" }</label>
                            <input
                                id="points"
                                type="number"
                                min="0"
                                max={MAX_POINTS.to_string()}
                                value={points.text.clone()}
                                class={if points.error.is_some() { "invalid" } else { "" }}
                                oninput={points.oninput.clone()}
                            />
                            if let Some(ref err) = points.error {
                                <div class="input-error">{ err }</div>
                            }
                        </div>
                        <div class="form-group">
                            <label for="icon">{ "Icon Text/Emoji" }</label>
                            <input id="icon" type="text" value={(*icon_text).clone()} oninput={text_setter(&icon_text)} />
                        </div>
                        <div class="form-group">
                            <label for="duration">{ "Duration (ms)" }</label>
                            <input
                                id="duration"
                                type="number"
                                min={MIN_DURATION_MS.to_string()}
                                max={MAX_DURATION_MS.to_string()}
                                value={duration.text.clone()}
                                class={if duration.error.is_some() { "invalid" } else { "" }}
                                oninput={duration.oninput.clone()}
                            />
                            if let Some(ref err) = duration.error {
                                <div class="input-error">{ err }</div>
                            }
                        </div>
                        <div class="form-group">
                            <label for="dissolve">{ "Dissolve at (ms, 0 = at duration)" }</label>
                            <input
                                id="dissolve"
                                type="number"
                                min="0"
                                value={dissolve.text.clone()}
                                class={if dissolve.error.is_some() { "invalid" } else { "" }}
                                oninput={dissolve.oninput.clone()}
                            />
                            if let Some(ref err) = dissolve.error {
                                <div class="input-error">{ err }</div>
                            }
                        </div>
                    </div>

                    <div class="form-column">
                        <h3>{ "Color Customization" }</h3>
                        <div class="form-group">
                            <label for="icon-bg">{ "Icon Background Color" }</label>
                            <input id="icon-bg" type="color" value={(*icon_background_color).clone()} oninput={text_setter(&icon_background_color)} />
                        </div>
                        <div class="form-group">
                            <label for="bg">{ "Achievement Background" }</label>
                            <input id="bg" type="color" value={(*background_color).clone()} oninput={text_setter(&background_color)} />
                        </div>
                        <div class="form-group">
                            <label for="text-color">{ "Text Color" }</label>
                            <input id="text-color" type="color" value={(*text_color).clone()} oninput={text_setter(&text_color)} />
                        </div>
                        <div class="form-group">
                            <label for="shadow">{ "Shadow Opacity" }</label>
                            <div class="slider-with-value">
                                <input
                                    id="shadow"
                                    type="range"
                                    min="0"
                                    max="1"
                                    step="0.05"
                                    value={(*shadow_opacity).to_string()}
                                    oninput={
                                        let shadow_opacity = shadow_opacity.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            if let Ok(v) = input.value().parse::<f64>() {
                                                shadow_opacity.set(v);
                                            }
                                        })
                                    }
                                />
                                <span class="slider-value">{ format!("{:.2}", *shadow_opacity) }</span>
                            </div>
                        </div>

                        <h3>{ "Placement" }</h3>
                        <label class="checkbox">
                            <input type="checkbox" checked={*auto_width} onchange={checkbox_setter(&auto_width)} />
                            { "Auto width" }
                        </label>
                        <label class="checkbox">
                            <input type="checkbox" checked={*floating} onchange={checkbox_setter(&floating)} />
                            { "Floating overlay" }
                        </label>
                        <label class="checkbox">
                            <input type="checkbox" checked={*stack} onchange={checkbox_setter(&stack)} />
                            { "Stack floating achievements (otherwise replace)" }
                        </label>
                        <div class="form-group">
                            <label for="position">{ "Position" }</label>
                            <select
                                id="position"
                                onchange={
                                    let position = position.clone();
                                    Callback::from(move |e: Event| {
                                        let select: HtmlSelectElement = e.target_unchecked_into();
                                        position.set(select.value());
                                    })
                                }
                            >
                                { for ["top", "middle", "bottom", "custom"].iter().map(|p| html! {
                                    <option value={*p} selected={*position == *p}>{ *p }</option>
                                }) }
                            </select>
                            if *position == "custom" {
                                <input type="number" min="0" value={(*pixel_offset).clone()} oninput={text_setter(&pixel_offset)} />
                                <span>{ "px from top" }</span>
                            }
                        </div>
                    </div>
                </div>

                <button type="submit" class="btn-primary">{ "🚀 Trigger Custom Achievement" }</button>
            </form>

            if let Some(ref err) = *last_error {
                <div class="current-error">{ err }</div>
            }

            <div class="inline-achievement-area">
                if let Some(ref current) = inline_slot.current {
                    <AchievementCard
                        key={current.id.raw().to_string()}
                        id={current.id}
                        request={current.request.clone()}
                        placement={Placement::for_request(&current.request, 0)}
                        on_finished={Some(inline_slot.on_finished.clone())}
                    />
                }
            </div>

            <h2>{ "🆕 Quick Triggers" }</h2>
            <div class="preset-buttons">
                { preset_button("basic", "🏆 Basic Achievement") }
                { preset_button("master", "⭐ Master Player") }
                { preset_button("responsive", "🌟 Responsive Achievement") }
                { preset_button("float-top", "⬆️ Floating Top") }
                { preset_button("float-middle", "↔️ Floating Middle") }
                { preset_button("float-bottom", "⬇️ Floating Bottom") }
                <button type="button" class="btn-secondary small" onclick={Callback::from(|_| {
                    let removed = renderer::remove_all();
                    info!("Cleared {} floating achievements", removed);
                })}>
                    { "Clear Floating" }
                </button>
            </div>

            if let Some(ref shown) = *last_shown {
                <div class="last-shown">
                    <h3>{ "Last status" }</h3>
                    <pre>{ shown }</pre>
                </div>
            }
        </div>
    }
}

/// Entry point: initializes Yew renderer for the demo page.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    yew::Renderer::<Main>::new().render();
}
