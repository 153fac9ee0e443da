use crate::registry::next_id;
use crate::{AchievementId, AchievementRequest};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State and callback for a text field that is parsed on every keystroke.
#[derive(Clone)]
pub struct ValidatedInput<T: Clone + PartialEq + 'static> {
    /// What the user typed.
    pub text: String,
    /// Last value that passed validation.
    pub value: T,
    pub error: Option<String>,
    pub oninput: Callback<InputEvent>,
}

/// Custom hook to manage a validated form field.
///
/// An invalid entry keeps the previous good value and records the error
/// message, so a trigger always has something usable to send.
#[hook]
pub fn use_validated_input<T: Clone + PartialEq + std::fmt::Display + 'static>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
) -> ValidatedInput<T> {
    let value = use_state(|| initial_value.clone());
    let text = use_state(|| initial_value.to_string());
    let error = use_state(|| None::<String>);

    let oninput = {
        let value = value.clone();
        let text = text.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            match parse_and_validate(&raw) {
                Ok(parsed) => {
                    value.set(parsed);
                    error.set(None);
                }
                Err(msg) => error.set(Some(msg)),
            }
            text.set(raw);
        })
    };

    ValidatedInput {
        text: (*text).clone(),
        value: (*value).clone(),
        error: (*error).clone(),
        oninput,
    }
}

/// The achievement currently embedded in a yew tree, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineAchievement {
    pub id: AchievementId,
    pub request: Rc<AchievementRequest>,
}

/// Handle returned by [`use_inline_achievement`].
#[derive(Clone)]
pub struct InlineAchievementSlot {
    pub current: Option<InlineAchievement>,
    /// Show a request, replacing whatever is showing.
    pub trigger: Callback<AchievementRequest>,
    /// Pass to `AchievementCard::on_finished` so the slot clears itself.
    pub on_finished: Callback<AchievementId>,
}

/// Keep one inline achievement in component state.
#[hook]
pub fn use_inline_achievement() -> InlineAchievementSlot {
    let current = use_state(|| None::<InlineAchievement>);

    let trigger = {
        let current = current.clone();
        Callback::from(move |request: AchievementRequest| {
            current.set(Some(InlineAchievement {
                id: next_id(),
                request: Rc::new(request),
            }));
        })
    };

    let on_finished = {
        let current = current.clone();
        Callback::from(move |finished: AchievementId| {
            // A newer trigger may have replaced the finished card already
            if current.as_ref().map(|a| a.id) == Some(finished) {
                current.set(None);
            }
        })
    };

    InlineAchievementSlot {
        current: (*current).clone(),
        trigger,
        on_finished,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::AchievementCard;
    use crate::layout::Placement;
    use crate::utils::validate_points;

    #[function_component(PointsForm)]
    fn points_form() -> Html {
        let points = use_validated_input(10u32, Rc::new(validate_points));
        let slot = use_inline_achievement();
        let trigger = slot.trigger.clone();
        let value = points.value;
        let onclick = Callback::from(move |_| trigger.emit(AchievementRequest::new("t", "d", value, "i")));

        html! {
            <div>
                <input value={points.text.clone()} oninput={points.oninput.clone()} />
                <button {onclick}>{ "Show" }</button>
                if let Some(ref current) = slot.current {
                    <AchievementCard
                        key={current.id.raw().to_string()}
                        id={current.id}
                        request={current.request.clone()}
                        placement={Placement::for_request(&current.request, 0)}
                        on_finished={Some(slot.on_finished.clone())}
                    />
                }
            </div>
        }
    }

    #[test]
    fn hooks_compose_inside_a_component() {
        let node = html! { <PointsForm /> };
        assert!(matches!(node, yew::virtual_dom::VNode::VComp(_)));
    }

    #[test]
    fn inline_achievements_compare_by_id() {
        let request = Rc::new(AchievementRequest::new("t", "d", 1, "i"));
        let a = InlineAchievement {
            id: next_id(),
            request: request.clone(),
        };
        let b = InlineAchievement { id: next_id(), request };
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }
}
