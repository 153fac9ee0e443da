//! Mounts achievement cards into the page and tears them down on schedule.
//!
//! Each `display` call creates one mount element, renders an
//! [`AchievementCard`] into it with its own yew app and schedules the
//! removal timeout. Inline cards replace earlier cards in the same
//! container. Floating cards stack per anchor unless the renderer uses
//! [`StackPolicy::Replace`].

use crate::components::{AchievementCard, AchievementCardProps};
use crate::config::{CONTAINER_ATTRIBUTE, FALLBACK_ROOT_ID, ID_ATTRIBUTE, MOUNT_CLASS};
use crate::layout::Placement;
use crate::timeline::Timeline;
use crate::{registry, style, AchievementError, AchievementId, AchievementRequest, ShownEvent};
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};
use yew::AppHandle;

/// What happens to live floating cards at the same anchor when a new one arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackPolicy {
    /// Shift the new card away from the anchor below/above the live ones.
    #[default]
    Stack,
    /// Remove the live ones first.
    Replace,
}

/// Removal state of one instance. Each step happens at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Lifecycle {
    dismissed: bool,
    removed: bool,
}

impl Lifecycle {
    /// `false` if the fade already started or the card is gone.
    fn begin_dismiss(&mut self) -> bool {
        if self.removed || self.dismissed {
            return false;
        }
        self.dismissed = true;
        true
    }

    /// `false` on every call after the first.
    fn begin_teardown(&mut self) -> bool {
        if self.removed {
            return false;
        }
        self.removed = true;
        true
    }
}

struct Instance {
    id: AchievementId,
    mount: Option<Element>,
    app: Option<AppHandle<AchievementCard>>,
    timers: Vec<Timeout>,
    fade_ms: u32,
    lifecycle: Lifecycle,
}

type SharedInstance = Rc<RefCell<Instance>>;

thread_local! {
    /// Instances that are still mounted, so a replace can reach them.
    static LIVE: RefCell<HashMap<AchievementId, SharedInstance>> = RefCell::new(HashMap::new());
}

fn live_instance(id: AchievementId) -> Option<SharedInstance> {
    LIVE.with(|l| l.borrow().get(&id).cloned())
}

/// Remove an instance from the display. Returns `false` if it was already gone.
fn teardown(instance: &SharedInstance) -> bool {
    let (id, app, mount, timers) = {
        let mut inst = instance.borrow_mut();
        if !inst.lifecycle.begin_teardown() {
            return false;
        }
        (inst.id, inst.app.take(), inst.mount.take(), std::mem::take(&mut inst.timers))
    };

    if let Some(app) = app {
        app.destroy();
    }
    // `remove` is a no-op for an element the host already detached
    if let Some(mount) = mount {
        mount.remove();
    }
    registry::release_slot(id);
    LIVE.with(|l| l.borrow_mut().remove(&id));
    drop(timers);

    info!("Achievement removed: {}", id);
    true
}

fn schedule_teardown(instance: Weak<RefCell<Instance>>, delay_ms: u32) -> Timeout {
    Timeout::new(delay_ms, move || {
        if let Some(instance) = instance.upgrade() {
            teardown(&instance);
        }
    })
}

/// Registry group for `request`. Only inline cards need `container_key`.
fn slot_key_for(
    request: &AchievementRequest,
    container_key: impl FnOnce() -> Result<String, AchievementError>,
) -> Result<String, AchievementError> {
    let placement = Placement::for_request(request, 0);
    match placement.anchor {
        Some(anchor) => Ok(anchor.slot_key()),
        None => Ok(placement.slot_key(&container_key()?)),
    }
}

/// Members of the group that a new card displaces.
fn replace_targets(floating: bool, policy: StackPolicy, members: Vec<AchievementId>) -> Vec<AchievementId> {
    if !floating || policy == StackPolicy::Replace {
        members
    } else {
        Vec::new()
    }
}

fn check_guard(now_ms: f64, min_interval_ms: u32) -> Result<(), AchievementError> {
    registry::check_trigger(now_ms, min_interval_ms)
        .map_err(|since_last_ms| AchievementError::Interrupted { since_last_ms })
}

/// Stable registry key for an inline container, assigned on first use.
fn container_key(container: &Element) -> Result<String, AchievementError> {
    if let Some(key) = container.get_attribute(CONTAINER_ATTRIBUTE) {
        return Ok(key);
    }
    let key = format!("container-{}", registry::next_id().raw());
    container.set_attribute(CONTAINER_ATTRIBUTE, &key)?;
    Ok(key)
}

/// Handle to one displayed achievement.
///
/// Dropping the handle does not affect the card; it stays on screen until
/// its timeline ends.
#[derive(Clone)]
pub struct AchievementHandle {
    id: AchievementId,
    instance: SharedInstance,
    shown: Rc<ShownEvent>,
}

impl AchievementHandle {
    pub fn id(&self) -> AchievementId {
        self.id
    }

    /// Status report for the host.
    pub fn shown_event(&self) -> &ShownEvent {
        &self.shown
    }

    pub fn is_active(&self) -> bool {
        !self.instance.borrow().lifecycle.removed
    }

    /// Start the fade-out now and remove the card once it completes.
    pub fn dismiss(&self) {
        let old_timers = {
            let mut inst = self.instance.borrow_mut();
            if !inst.lifecycle.begin_dismiss() {
                return;
            }

            if let Some(mount) = inst.mount.as_ref().and_then(|m| m.dyn_ref::<HtmlElement>()) {
                let style = mount.style();
                let fade = format!("opacity {}ms ease-in", inst.fade_ms);
                if let Err(e) = style
                    .set_property("transition", &fade)
                    .and_then(|_| style.set_property("opacity", "0"))
                {
                    warn!("Could not start fade for {}: {:?}", self.id, e);
                }
            }

            let timer = schedule_teardown(Rc::downgrade(&self.instance), inst.fade_ms);
            std::mem::replace(&mut inst.timers, vec![timer])
        };
        drop(old_timers);
        debug!("Achievement dismissed: {}", self.id);
    }

    /// Remove the card immediately. Safe to call any number of times.
    pub fn remove_now(&self) -> bool {
        let removed = teardown(&self.instance);
        if !removed {
            debug!("{} was already removed", self.id);
        }
        removed
    }
}

/// Displays achievements into a target container or the page body.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    container: Option<Element>,
    policy: StackPolicy,
    min_interval_ms: u32,
}

impl Renderer {
    /// Inline cards go to `#root` (or the body), floating cards to the body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline cards go to `container`.
    pub fn with_container(container: Element) -> Self {
        Self {
            container: Some(container),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: StackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reject triggers arriving within `ms` of the previous one while it is still on screen.
    pub fn with_min_interval(mut self, ms: u32) -> Self {
        self.min_interval_ms = ms;
        self
    }

    fn document() -> Result<Document, AchievementError> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or(AchievementError::MissingDocument)
    }

    fn parent_for(&self, document: &Document, floating: bool) -> Result<Element, AchievementError> {
        let body = || document.body().map(Element::from).ok_or(AchievementError::MissingContainer);
        if floating {
            return body();
        }
        match &self.container {
            Some(container) => Ok(container.clone()),
            None => document
                .get_element_by_id(FALLBACK_ROOT_ID)
                .map_or_else(body, Ok),
        }
    }

    /// Show `request`. Returns once the card is mounted and its removal is scheduled.
    pub fn display(&self, request: AchievementRequest) -> Result<AchievementHandle, AchievementError> {
        let document = Self::document()?;
        let now = js_sys::Date::now();
        check_guard(now, self.min_interval_ms)?;

        style::ensure_registered(&document)?;
        let parent = self.parent_for(&document, request.floating())?;
        let slot_key = slot_key_for(&request, || container_key(&parent))?;

        for previous in replace_targets(request.floating(), self.policy, registry::slot_members(&slot_key)) {
            if let Some(instance) = live_instance(previous) {
                debug!("Replacing {} in '{}'", previous, slot_key);
                teardown(&instance);
            }
        }

        let id = registry::next_id();
        let mount = document.create_element("div")?;
        mount.set_class_name(MOUNT_CLASS);
        mount.set_attribute(ID_ATTRIBUTE, &id.to_string())?;
        parent.append_child(&mount)?;

        let slot = registry::claim_slot(id, &slot_key);
        let placement = Placement::for_request(&request, slot);
        let timeline = Timeline::for_request(&request);
        let shown = Rc::new(ShownEvent::new(id, &request, now));
        let fade_ms = request.fade_ms();

        let app = yew::Renderer::<AchievementCard>::with_root_and_props(
            mount.clone(),
            AchievementCardProps {
                id,
                request: Rc::new(request),
                placement,
                on_finished: None,
            },
        )
        .render();

        let instance = Rc::new(RefCell::new(Instance {
            id,
            mount: Some(mount),
            app: Some(app),
            timers: Vec::new(),
            fade_ms,
            lifecycle: Lifecycle::default(),
        }));
        let removal = schedule_teardown(Rc::downgrade(&instance), timeline.removal_at());
        instance.borrow_mut().timers.push(removal);
        LIVE.with(|l| l.borrow_mut().insert(id, instance.clone()));
        registry::record_trigger(now);

        info!(
            "Achievement shown: {} ({}, slot {}, removal at {} ms)",
            id,
            slot_key,
            slot,
            timeline.removal_at()
        );
        Ok(AchievementHandle { id, instance, shown })
    }
}

/// Remove every live achievement immediately. Returns how many were removed.
pub fn remove_all() -> usize {
    let instances: Vec<SharedInstance> = LIVE.with(|l| l.borrow().values().cloned().collect());
    instances.iter().filter(|instance| teardown(instance)).count()
}

/// Number of achievements currently mounted.
pub fn live_count() -> usize {
    LIVE.with(|l| l.borrow().len())
}
