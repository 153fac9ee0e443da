//! Lifecycle schedule of one achievement.
//!
//! Every offset is in milliseconds from the trigger. The appear and expand
//! phases scale with the hold time (trigger to dissolve start), so a short
//! duration compresses the whole animation instead of cutting it off.

use crate::config::*;
use crate::AchievementRequest;

/// Visual phase of an achievement at a point in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Sliding in; icon and text appear.
    Entering,
    /// Background expanding from the icon.
    Expanding,
    /// Fully visible.
    Holding,
    /// Fading out.
    Dissolving,
    /// Gone from the display.
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    pub slide_in_at: u32,
    pub expand_start: u32,
    pub expand_len: u32,
    pub icon_pulse_at: u32,
    pub icon_pulse_len: u32,
    pub title_at: u32,
    pub description_at: u32,
    pub points_at: u32,
    pub text_fade_len: u32,
    pub dissolve_at: u32,
    pub fade_len: u32,
}

impl Timeline {
    pub fn for_request(request: &AchievementRequest) -> Self {
        Self::new(request.dissolve_at(), request.fade_ms())
    }

    /// Build a schedule whose fade-out starts at `dissolve_at` and lasts `fade_len`.
    pub fn new(dissolve_at: u32, fade_len: u32) -> Self {
        let hold = dissolve_at as f64;
        let at = |ratio: f64| (hold * ratio).round() as u32;

        let expand_start = at(EXPAND_START_RATIO);
        let expand_len = at(EXPAND_LEN_RATIO);
        let fully_visible = expand_start + expand_len;

        // Text reveals must finish by the time expansion completes
        let points_at = at(POINTS_REVEAL_RATIO);
        let text_fade_len = TEXT_FADE_MS.min(fully_visible.saturating_sub(points_at));
        let icon_pulse_at = at(ICON_PULSE_RATIO);
        let icon_pulse_len = ICON_PULSE_MS.min(fully_visible.saturating_sub(icon_pulse_at));

        Self {
            slide_in_at: SLIDE_IN_DELAY_MS.min(dissolve_at),
            expand_start,
            expand_len,
            icon_pulse_at,
            icon_pulse_len,
            title_at: at(TITLE_REVEAL_RATIO),
            description_at: at(DESCRIPTION_REVEAL_RATIO),
            points_at,
            text_fade_len,
            dissolve_at,
            fade_len,
        }
    }

    /// Offset at which the card is fully visible.
    pub fn fully_visible_at(&self) -> u32 {
        self.expand_start + self.expand_len
    }

    /// Offset at which the element leaves the display.
    pub fn removal_at(&self) -> u32 {
        self.dissolve_at.saturating_add(self.fade_len)
    }

    /// Phase at `elapsed` milliseconds after the trigger.
    pub fn phase_at(&self, elapsed: u32) -> Phase {
        if elapsed >= self.removal_at() {
            Phase::Removed
        } else if elapsed >= self.dissolve_at {
            Phase::Dissolving
        } else if elapsed >= self.fully_visible_at() {
            Phase::Holding
        } else if elapsed >= self.expand_start {
            Phase::Expanding
        } else {
            Phase::Entering
        }
    }

    /// Phase boundaries in order, each paired with the phase that starts there.
    pub fn transitions(&self) -> Vec<(u32, Phase)> {
        let mut out = vec![
            (self.expand_start, Phase::Expanding),
            (self.fully_visible_at(), Phase::Holding),
            (self.dissolve_at, Phase::Dissolving),
            (self.removal_at(), Phase::Removed),
        ];
        // Zero-length phases collapse onto the later one
        out.dedup_by(|later, earlier| {
            if later.0 == earlier.0 {
                *earlier = *later;
                true
            } else {
                false
            }
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_schedule_at_five_seconds() {
        let t = Timeline::new(5_000, FADE_INLINE_MS);
        assert_eq!(t.slide_in_at, 50);
        assert_eq!(t.expand_start, 800);
        assert_eq!(t.expand_len, 2_500);
        assert_eq!(t.icon_pulse_at, 1_200);
        assert_eq!(t.title_at, 1_500);
        assert_eq!(t.description_at, 1_800);
        assert_eq!(t.points_at, 2_100);
        assert_eq!(t.text_fade_len, 600);
        assert_eq!(t.fully_visible_at(), 3_300);
        assert_eq!(t.removal_at(), 5_600);
    }

    #[test]
    fn default_request_lifecycle() {
        let req = AchievementRequest::new("Achievement Unlocked!", "You Win", 10, "🏆");
        let t = Timeline::for_request(&req);
        assert_eq!(t.dissolve_at, 6_500);
        assert_eq!(t.removal_at(), 6_500 + FADE_INLINE_MS);

        let phases: Vec<Phase> = [0, 1_100, 5_000, 6_600, 7_100].iter().map(|&ms| t.phase_at(ms)).collect();
        assert_eq!(
            phases,
            vec![Phase::Entering, Phase::Expanding, Phase::Holding, Phase::Dissolving, Phase::Removed]
        );
    }

    #[test]
    fn absolute_dissolve_moves_fade_start() {
        let req = AchievementRequest::builder()
            .duration(6_000)
            .dissolve(4_000)
            .floating(true)
            .build()
            .unwrap();
        let t = Timeline::for_request(&req);
        assert_eq!(t.dissolve_at, 4_000);
        assert_eq!(t.removal_at(), 4_000 + FADE_FLOATING_MS);
        assert!(t.removal_at() <= req.duration() + req.fade_ms());
    }

    #[test]
    fn removal_bound_holds_for_any_duration() {
        for duration in [1, 7, 50, 99, 333, 1_000, 6_500, 60_000] {
            for dissolve in [0, duration / 2, duration] {
                let t = Timeline::new(if dissolve == 0 { duration } else { dissolve }, FADE_FLOATING_MS);
                assert!(t.removal_at() <= duration + FADE_FLOATING_MS, "{duration}/{dissolve}");
                assert!(t.fully_visible_at() <= t.dissolve_at, "{duration}/{dissolve}");
                assert!(t.slide_in_at <= t.dissolve_at);
            }
        }
    }

    #[test]
    fn removal_saturates_instead_of_wrapping() {
        let t = Timeline::new(u32::MAX, FADE_FLOATING_MS);
        assert_eq!(t.removal_at(), u32::MAX);
        assert_eq!(t.phase_at(u32::MAX), Phase::Removed);

        let t = Timeline::new(MAX_SCHEDULE_MS, FADE_FLOATING_MS);
        assert_eq!(t.removal_at(), i32::MAX as u32);
    }

    #[test]
    fn phases_are_monotone() {
        let t = Timeline::new(3_000, FADE_INLINE_MS);
        let mut last = Phase::Entering;
        for ms in 0..=t.removal_at() + 10 {
            let phase = t.phase_at(ms);
            assert!(phase >= last, "phase went backwards at {ms}");
            last = phase;
        }
        assert_eq!(last, Phase::Removed);
    }

    #[test]
    fn text_reveals_finish_before_full_visibility() {
        for hold in [200, 1_000, 2_000, 10_000] {
            let t = Timeline::new(hold, FADE_INLINE_MS);
            assert!(t.title_at < t.description_at && t.description_at < t.points_at);
            assert!(t.points_at + t.text_fade_len <= t.fully_visible_at(), "{hold}");
            assert!(t.icon_pulse_at + t.icon_pulse_len <= t.fully_visible_at(), "{hold}");
        }
    }

    #[test]
    fn transitions_are_sorted_and_end_in_removal() {
        let t = Timeline::new(6_500, FADE_INLINE_MS);
        let transitions = t.transitions();
        assert_eq!(transitions.len(), 4);
        assert!(transitions.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(transitions.last(), Some(&(7_100, Phase::Removed)));
    }

    #[test]
    fn zero_fade_collapses_dissolve_into_removal() {
        let t = Timeline::new(1_000, 0);
        let transitions = t.transitions();
        assert_eq!(transitions.last(), Some(&(1_000, Phase::Removed)));
        assert!(!transitions.iter().any(|(_, p)| *p == Phase::Dissolving));
    }
}
