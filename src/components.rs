//! Yew view component for a single achievement card.
//!
//! The card drives its own phase changes with `gloo_timers` timeouts, so it
//! animates the same way whether the renderer mounted it or a host yew app
//! embedded it directly.

use crate::config::SLIDE_IN_MS;
use crate::layout::Placement;
use crate::style::{EXPAND_KEYFRAMES, FADE_IN_KEYFRAMES, PULSE_KEYFRAMES};
use crate::timeline::{Phase, Timeline};
use crate::{AchievementId, AchievementRequest};
use gloo_timers::callback::Timeout;
use log::debug;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AchievementCardProps {
    pub id: AchievementId,
    pub request: Rc<AchievementRequest>,
    pub placement: Placement,
    /// Emitted once the card reaches [`Phase::Removed`].
    #[prop_or_default]
    pub on_finished: Option<Callback<AchievementId>>,
}

/// CSS `animation` shorthand for a one-shot keyframe run.
fn animation(name: &str, len_ms: u32, delay_ms: u32) -> String {
    format!("animation: {} {}ms ease-out {}ms forwards;", name, len_ms, delay_ms)
}

/// Color variables consumed by the shared stylesheet.
fn color_vars(request: &AchievementRequest) -> String {
    format!(
        "--achievement-icon-bg: {}; --achievement-bg: {}; --achievement-text: {}; --achievement-shadow: {};",
        request.icon_background_color(),
        request.background_color(),
        request.text_color(),
        request.shadow_color()
    )
}

fn card_style(placement: &Placement, timeline: &Timeline, slid_in: bool, phase: Phase) -> String {
    let leaving = phase >= Phase::Dissolving;
    let transform = if slid_in && !leaving {
        placement.shown_transform()
    } else {
        placement.hidden_transform(leaving)
    };
    let (len, easing) = if leaving {
        (timeline.fade_len, "ease-in")
    } else {
        (SLIDE_IN_MS, "ease-out")
    };
    format!(
        "transform: {}; transition: opacity {len}ms {easing}, transform {len}ms {easing};",
        transform
    )
}

#[function_component(AchievementCard)]
pub fn achievement_card(props: &AchievementCardProps) -> Html {
    let timeline = Timeline::for_request(&props.request);
    let phase = use_state(|| Phase::Entering);
    let slid_in = use_state(|| false);

    // Schedule every phase boundary; dropping the timeouts on unmount cancels them
    {
        let phase = phase.clone();
        let slid_in = slid_in.clone();
        let on_finished = props.on_finished.clone();
        use_effect_with((props.id, timeline), move |(id, timeline)| {
            let id = *id;
            let mut timers = Vec::with_capacity(5);
            timers.push(Timeout::new(timeline.slide_in_at, move || slid_in.set(true)));
            for (at, next) in timeline.transitions() {
                let phase = phase.clone();
                let on_finished = on_finished.clone();
                timers.push(Timeout::new(at, move || {
                    debug!("{} -> {:?} at {} ms", id, next, at);
                    phase.set(next);
                    if next == Phase::Removed {
                        if let Some(cb) = on_finished {
                            cb.emit(id);
                        }
                    }
                }));
            }
            move || drop(timers)
        });
    }

    if *phase == Phase::Removed {
        return html! {};
    }

    let request = &props.request;
    let visible = *slid_in && *phase < Phase::Dissolving;
    let hidden_unless = |shown: bool| if shown { "" } else { "display: none;" };

    html! {
        <div class="achievement-host" style={props.placement.style_attr()}>
            <div
                class={classes!("achievement-card", visible.then_some("is-visible"))}
                style={format!("{} {}", color_vars(request), card_style(&props.placement, &timeline, *slid_in, *phase))}
            >
                <div
                    class="achievement-background"
                    style={animation(EXPAND_KEYFRAMES, timeline.expand_len, timeline.expand_start)}
                ></div>
                <div
                    class="achievement-icon"
                    style={animation(PULSE_KEYFRAMES, timeline.icon_pulse_len, timeline.icon_pulse_at)}
                >
                    { request.icon_text() }
                </div>
                <div class="achievement-content">
                    <div
                        class="achievement-title"
                        style={format!("{} {}",
                            animation(FADE_IN_KEYFRAMES, timeline.text_fade_len, timeline.title_at),
                            hidden_unless(request.shows_title()))}
                    >
                        { request.title() }
                    </div>
                    <div
                        class="achievement-description"
                        style={format!("{} {}",
                            animation(FADE_IN_KEYFRAMES, timeline.text_fade_len, timeline.description_at),
                            hidden_unless(request.shows_description()))}
                    >
                        { request.description() }
                    </div>
                </div>
                <div
                    class="achievement-points"
                    style={format!("{} {}",
                        animation(FADE_IN_KEYFRAMES, timeline.text_fade_len, timeline.points_at),
                        hidden_unless(request.shows_points()))}
                >
                    { format!("{}P", request.points()) }
                </div>
            </div>
        </div>
    }
}
