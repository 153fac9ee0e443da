//! Shared stylesheet for achievement cards.
//!
//! Registered once per document under [`STYLE_ELEMENT_ID`]; repeated
//! triggers find the existing element and leave it alone.

use crate::config::STYLE_ELEMENT_ID;
use crate::AchievementError;
use log::debug;
use web_sys::Document;

pub const EXPAND_KEYFRAMES: &str = "achievementExpand";
pub const PULSE_KEYFRAMES: &str = "achievementPulse";
pub const FADE_IN_KEYFRAMES: &str = "achievementFadeIn";

const STYLESHEET: &str = r#"
@keyframes achievementExpand {
  0% { transform: scaleX(0); }
  100% { transform: scaleX(1); }
}
@keyframes achievementPulse {
  0%, 100% { transform: scale(1); }
  50% { transform: scale(1.15); }
}
@keyframes achievementFadeIn {
  to { opacity: 1; }
}
.achievement-host {
  margin: 0;
  font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
}
.achievement-card {
  position: relative;
  width: 100%;
  height: 100%;
  box-sizing: border-box;
  display: flex;
  align-items: center;
  overflow: hidden;
  border-radius: 40px;
  background: var(--achievement-icon-bg);
  border: 2px solid var(--achievement-bg);
  box-shadow: 0 8px 32px var(--achievement-shadow);
  color: var(--achievement-text);
  opacity: 0;
}
.achievement-card.is-visible {
  opacity: 1;
}
.achievement-background {
  position: absolute;
  top: 0;
  left: 0;
  width: 100%;
  height: 100%;
  border-radius: 38px;
  background: var(--achievement-bg);
  transform: scaleX(0);
  transform-origin: left center;
}
.achievement-icon {
  position: relative;
  flex: none;
  width: 60px;
  height: 60px;
  margin: 10px;
  display: flex;
  align-items: center;
  justify-content: center;
  border-radius: 50%;
  background: var(--achievement-icon-bg);
  border: 3px solid var(--achievement-bg);
  font-size: 24px;
  font-weight: bold;
  text-shadow: 0 1px 3px var(--achievement-shadow);
  z-index: 2;
}
.achievement-content {
  position: relative;
  flex: 1;
  padding: 10px 20px 10px 0;
  z-index: 2;
}
.achievement-title,
.achievement-description,
.achievement-points {
  opacity: 0;
  text-shadow: 0 1px 2px var(--achievement-shadow);
}
.achievement-title {
  margin: 0 0 4px 0;
  font-size: 14px;
  font-weight: 600;
}
.achievement-description {
  margin: 0;
  font-size: 18px;
  font-weight: bold;
}
.achievement-points {
  position: absolute;
  top: 50%;
  right: 20px;
  margin-top: -12px;
  padding: 4px 12px;
  border-radius: 15px;
  background: rgba(255, 255, 255, 0.2);
  font-size: 12px;
  font-weight: bold;
  z-index: 2;
}
"#;

/// Stylesheet text injected into the page.
pub fn stylesheet() -> &'static str {
    STYLESHEET
}

/// Inject the stylesheet unless the document already has it.
///
/// Returns `true` if this call injected it.
pub fn ensure_registered(document: &Document) -> Result<bool, AchievementError> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(false);
    }

    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(stylesheet()));

    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document
            .body()
            .ok_or(AchievementError::MissingContainer)?
            .append_child(&style)?,
    };
    debug!("Registered achievement stylesheet as #{}", STYLE_ELEMENT_ID);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_declares_every_keyframe_used_by_cards() {
        for name in [EXPAND_KEYFRAMES, PULSE_KEYFRAMES, FADE_IN_KEYFRAMES] {
            assert!(stylesheet().contains(&format!("@keyframes {} {{", name)), "{name}");
        }
    }

    #[test]
    fn stylesheet_braces_balance() {
        let open = stylesheet().matches('{').count();
        let close = stylesheet().matches('}').count();
        assert_eq!(open, close);
    }

    #[test]
    fn card_classes_read_color_variables() {
        for var in [
            "--achievement-icon-bg",
            "--achievement-bg",
            "--achievement-text",
            "--achievement-shadow",
        ] {
            assert!(stylesheet().contains(&format!("var({})", var)), "{var}");
        }
    }
}
