//! Per-marker label state machine.
//!
//! Transitions are pure; the render layer executes the returned effects in
//! order against the scene.

use crate::core::InteractionMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelState {
    #[default]
    Hidden,
    Shown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelEffect {
    /// Despawn the marker's current label
    TearDown,
    /// Back to the default marker radius and colour
    RestoreDefault,
    /// Build a label from the marker's data point
    Show,
    Highlight,
}

const SHOW: &[LabelEffect] = &[LabelEffect::Show, LabelEffect::Highlight];
const HIDE: &[LabelEffect] = &[LabelEffect::TearDown, LabelEffect::RestoreDefault];
const REPLACE: &[LabelEffect] = &[
    LabelEffect::TearDown,
    LabelEffect::RestoreDefault,
    LabelEffect::Show,
    LabelEffect::Highlight,
];

pub fn transition(
    mode: InteractionMode,
    state: LabelState,
    event: PointerEvent,
) -> (LabelState, &'static [LabelEffect]) {
    use LabelState::*;
    use PointerEvent::*;

    match (mode, state, event) {
        (_, Hidden, Enter) => (Shown, SHOW),
        (InteractionMode::HoverPair, Shown, Leave) => (Hidden, HIDE),
        (InteractionMode::EnterReplace, Shown, Enter) => (Shown, REPLACE),
        (_, state, _) => (state, &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run events through the machine and count live labels the way the
    /// scene adapter would.
    fn replay(mode: InteractionMode, events: &[PointerEvent]) -> (LabelState, usize) {
        let mut state = LabelState::Hidden;
        let mut labels = 0usize;
        for &ev in events {
            let (next, effects) = transition(mode, state, ev);
            for effect in effects {
                match effect {
                    LabelEffect::TearDown => labels = labels.saturating_sub(1),
                    LabelEffect::Show => labels += 1,
                    _ => {}
                }
                assert!(labels <= 1);
            }
            state = next;
        }
        (state, labels)
    }

    #[test]
    fn hover_pair_shows_then_hides() {
        use PointerEvent::*;
        let mode = InteractionMode::HoverPair;
        assert_eq!(replay(mode, &[Enter]), (LabelState::Shown, 1));
        assert_eq!(replay(mode, &[Enter, Leave]), (LabelState::Hidden, 0));
        assert_eq!(replay(mode, &[Leave]), (LabelState::Hidden, 0));
        assert_eq!(replay(mode, &[Enter, Enter, Leave, Leave]), (LabelState::Hidden, 0));
    }

    #[test]
    fn enter_replace_keeps_exactly_one_label() {
        let mode = InteractionMode::EnterReplace;
        for n in 1..8 {
            let events = vec![PointerEvent::Enter; n];
            assert_eq!(replay(mode, &events), (LabelState::Shown, 1), "n={n}");
        }
        assert_eq!(
            replay(mode, &[PointerEvent::Enter, PointerEvent::Leave]),
            (LabelState::Shown, 1)
        );
    }

    #[test]
    fn replace_tears_down_before_rebuilding() {
        let (_, effects) = transition(
            InteractionMode::EnterReplace,
            LabelState::Shown,
            PointerEvent::Enter,
        );
        let teardown = effects.iter().position(|e| *e == LabelEffect::TearDown);
        let show = effects.iter().position(|e| *e == LabelEffect::Show);
        assert!(teardown.unwrap() < show.unwrap());
    }
}
