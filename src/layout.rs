//! Placement of an achievement card: anchor, width and stacking offset.
//!
//! Kept free of DOM types so the geometry can be checked natively. The
//! renderer and the yew component both consume [`Placement::declarations`].

use crate::config::*;
use crate::{AchievementRequest, Position};

/// Where a floating card is pinned vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Top,
    Middle,
    Bottom,
    Offset(u32),
}

impl From<Position> for Anchor {
    fn from(position: Position) -> Self {
        match position {
            Position::Top => Anchor::Top,
            Position::Middle => Anchor::Middle,
            Position::Bottom => Anchor::Bottom,
            Position::Offset(px) => Anchor::Offset(px),
        }
    }
}

impl Anchor {
    /// Registry group for cards competing for this anchor.
    pub fn slot_key(&self) -> String {
        match self {
            Anchor::Top => "floating:top".to_string(),
            Anchor::Middle => "floating:middle".to_string(),
            Anchor::Bottom => "floating:bottom".to_string(),
            Anchor::Offset(px) => format!("floating:{}px", px),
        }
    }

    /// Signed distance a card in `slot` is moved away from the anchor edge.
    /// Top and offset anchors grow downwards, bottom grows upwards and
    /// middle alternates below and above the center.
    pub fn stack_shift(&self, slot: usize) -> i64 {
        let step = (CARD_HEIGHT_PX + STACK_GAP_PX) as i64;
        let slot = slot as i64;
        match self {
            Anchor::Top | Anchor::Offset(_) => slot * step,
            Anchor::Bottom => -(slot * step),
            Anchor::Middle => {
                let rank = (slot + 1) / 2;
                if slot % 2 == 1 {
                    rank * step
                } else {
                    -(rank * step)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Fill the container.
    Container,
    /// Always this many pixels.
    Fixed(u32),
    /// Up to `max` pixels, leaving `margin` pixels of the viewport free.
    Viewport { max: u32, margin: u32 },
}

impl Width {
    /// Width in pixels for a container (or viewport) `container_px` wide.
    pub fn resolve(&self, container_px: f64) -> f64 {
        match *self {
            Width::Container => container_px.max(0.0),
            Width::Fixed(px) => px as f64,
            Width::Viewport { max, margin } => (max as f64).min(container_px - margin as f64).max(0.0),
        }
    }

    fn css(&self) -> Vec<(&'static str, String)> {
        match *self {
            Width::Container => vec![("width", "100%".to_string()), ("box-sizing", "border-box".to_string())],
            Width::Fixed(px) => vec![("width", format!("{}px", px))],
            Width::Viewport { max, margin } => vec![
                ("width", format!("{}px", max)),
                ("max-width", format!("calc(100vw - {}px)", margin)),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// `None` for inline cards.
    pub anchor: Option<Anchor>,
    pub width: Width,
    pub slot: usize,
}

impl Placement {
    pub fn for_request(request: &AchievementRequest, slot: usize) -> Self {
        if request.floating() {
            let width = if request.auto_width() {
                Width::Viewport {
                    max: FIXED_WIDTH_PX,
                    margin: VIEWPORT_MARGIN_PX,
                }
            } else {
                Width::Fixed(FIXED_WIDTH_PX)
            };
            Self {
                anchor: Some(request.position().into()),
                width,
                slot,
            }
        } else {
            let width = if request.auto_width() {
                Width::Container
            } else {
                Width::Fixed(FIXED_WIDTH_PX)
            };
            Self {
                anchor: None,
                width,
                slot: 0,
            }
        }
    }

    pub fn is_floating(&self) -> bool {
        self.anchor.is_some()
    }

    /// Registry group this placement competes in, given the inline container's key.
    pub fn slot_key(&self, container_key: &str) -> String {
        match self.anchor {
            Some(anchor) => anchor.slot_key(),
            None => format!("inline:{}", container_key),
        }
    }

    /// Transform applied while the card is off-screen (before slide-in / after fade).
    pub fn hidden_transform(&self, leaving: bool) -> String {
        let slide = if leaving { "translateX(100%)" } else { "translateX(-100%)" };
        match self.anchor {
            Some(Anchor::Middle) => format!("translateX(-50%) translateY(-50%) {}", slide),
            Some(_) => format!("translateX(-50%) {}", slide),
            None => slide.to_string(),
        }
    }

    /// Transform applied while the card is on screen.
    pub fn shown_transform(&self) -> String {
        match self.anchor {
            Some(Anchor::Middle) => "translateX(-50%) translateY(-50%)".to_string(),
            Some(_) => "translateX(-50%)".to_string(),
            None => "none".to_string(),
        }
    }

    /// CSS declarations for the host element, in application order.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        match self.anchor {
            None => {
                out.push(("position", "relative".to_string()));
                out.push(("display", "block".to_string()));
            }
            Some(anchor) => {
                let shift = anchor.stack_shift(self.slot);
                out.push(("position", "fixed".to_string()));
                out.push(("z-index", OVERLAY_Z_INDEX.to_string()));
                out.push(("left", "50%".to_string()));
                out.push(("min-width", format!("{}px", MIN_FLOATING_WIDTH_PX)));
                out.push(("pointer-events", "none".to_string()));
                match anchor {
                    Anchor::Top => out.push(("top", px(EDGE_OFFSET_PX as i64 + shift))),
                    Anchor::Offset(offset) => out.push(("top", px(offset as i64 + shift))),
                    Anchor::Bottom => out.push(("bottom", px(EDGE_OFFSET_PX as i64 - shift))),
                    Anchor::Middle if shift == 0 => out.push(("top", "50%".to_string())),
                    Anchor::Middle if shift > 0 => out.push(("top", format!("calc(50% + {}px)", shift))),
                    Anchor::Middle => out.push(("top", format!("calc(50% - {}px)", -shift))),
                }
            }
        }
        out.extend(self.width.css());
        out.push(("height", format!("{}px", CARD_HEIGHT_PX)));
        out
    }

    /// Declarations joined into an inline `style` attribute.
    pub fn style_attr(&self) -> String {
        self.declarations()
            .iter()
            .map(|(prop, value)| format!("{}: {};", prop, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn px(value: i64) -> String {
    format!("{}px", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floating(position: &str) -> AchievementRequest {
        AchievementRequest::builder()
            .floating(true)
            .position(position)
            .build()
            .unwrap()
    }

    fn vertical(placement: &Placement) -> Vec<(&'static str, String)> {
        placement
            .declarations()
            .into_iter()
            .filter(|(p, _)| *p == "top" || *p == "bottom")
            .collect()
    }

    #[test]
    fn named_positions_have_distinct_anchors() {
        let top = vertical(&Placement::for_request(&floating("top"), 0));
        let middle = vertical(&Placement::for_request(&floating("middle"), 0));
        let bottom = vertical(&Placement::for_request(&floating("bottom"), 0));

        assert_eq!(top, vec![("top", "20px".to_string())]);
        assert_eq!(middle, vec![("top", "50%".to_string())]);
        assert_eq!(bottom, vec![("bottom", "20px".to_string())]);
    }

    #[test]
    fn pixel_position_is_exact() {
        let placement = Placement::for_request(&floating("120px"), 0);
        assert_eq!(vertical(&placement), vec![("top", "120px".to_string())]);
    }

    #[test]
    fn fixed_width_ignores_container() {
        for req in [
            AchievementRequest::builder().auto_width(false).build().unwrap(),
            AchievementRequest::builder().auto_width(false).floating(true).build().unwrap(),
        ] {
            let placement = Placement::for_request(&req, 0);
            for container in [0.0, 250.0, 400.0, 1920.0] {
                assert_eq!(placement.width.resolve(container), 400.0);
            }
        }
    }

    #[test]
    fn auto_width_never_exceeds_container() {
        for req in [
            AchievementRequest::new("t", "d", 1, "i"),
            AchievementRequest::builder().floating(true).build().unwrap(),
        ] {
            let placement = Placement::for_request(&req, 0);
            for container in [0.0, 120.0, 399.0, 440.0, 1920.0] {
                assert!(placement.width.resolve(container) <= container, "{container}");
            }
        }
    }

    #[test]
    fn inline_cards_are_not_positioned() {
        let placement = Placement::for_request(&AchievementRequest::new("t", "d", 1, "i"), 3);
        assert!(!placement.is_floating());
        assert_eq!(placement.slot, 0);
        assert!(vertical(&placement).is_empty());
        assert!(placement.style_attr().contains("width: 100%;"));
    }

    #[test]
    fn stacked_cards_move_away_from_anchor() {
        let second_top = Placement::for_request(&floating("top"), 1);
        assert_eq!(vertical(&second_top), vec![("top", "110px".to_string())]);

        let second_bottom = Placement::for_request(&floating("bottom"), 1);
        assert_eq!(vertical(&second_bottom), vec![("bottom", "110px".to_string())]);

        let below = Placement::for_request(&floating("middle"), 1);
        let above = Placement::for_request(&floating("middle"), 2);
        assert_eq!(vertical(&below), vec![("top", "calc(50% + 90px)".to_string())]);
        assert_eq!(vertical(&above), vec![("top", "calc(50% - 90px)".to_string())]);
    }

    #[test]
    fn middle_transform_keeps_vertical_centering() {
        let placement = Placement::for_request(&floating("middle"), 0);
        assert_eq!(placement.shown_transform(), "translateX(-50%) translateY(-50%)");
        assert!(placement.hidden_transform(true).ends_with("translateX(100%)"));
        assert!(placement.hidden_transform(false).ends_with("translateX(-100%)"));
    }

    #[test]
    fn slot_keys_separate_groups() {
        let top = Placement::for_request(&floating("top"), 0);
        let offset = Placement::for_request(&floating("20px"), 0);
        let inline = Placement::for_request(&AchievementRequest::new("t", "d", 1, "i"), 0);
        assert_ne!(top.slot_key("root"), offset.slot_key("root"));
        assert_eq!(inline.slot_key("root"), "inline:root");
    }
}
