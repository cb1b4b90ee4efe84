//! FLIP (first, last, invert, play) animation of tiles that changed position.

use crate::config::ReorderConfig;
use crate::geometry::{GeometrySnapshot, LayoutProvider, TileView};
use crate::scheduler::FrameQueue;
use crate::tile::TileId;
use kurbo::Vec2;

/// Default duration of the "play" transition.
pub const DEFAULT_FLIP_DURATION_MS: u32 = 280;

/// Default timing function, a slightly springy ease-out.
pub const DEFAULT_EASING: &str = "cubic-bezier(.2, .8, .2, 1)";

/// How a transform change should be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Jump immediately.
    Instant,
    /// Interpolate over `duration_ms` using a CSS timing function.
    Timed { duration_ms: u32, easing: String },
}

impl Transition {
    /// CSS `transition` value for the `transform` property.
    pub fn css(&self) -> String {
        match self {
            Transition::Instant => "transform 0s".to_string(),
            Transition::Timed { duration_ms, easing } => {
                format!("transform {}ms {}", duration_ms, easing)
            }
        }
    }
}

/// CSS `transform` value for an offset.
pub fn translate_css(offset: Vec2) -> String {
    if offset == Vec2::ZERO {
        "translate(0, 0)".to_string()
    } else {
        format!("translate({}px, {}px)", offset.x, offset.y)
    }
}

/// A tile that moved and must be played back from its old position.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipMove {
    pub id: TileId,
    /// `before.origin - after.origin`.
    pub delta: Vec2,
}

/// Plays FLIP transitions between two layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipAnimator {
    duration_ms: u32,
    easing: String,
}

impl Default for FlipAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_FLIP_DURATION_MS, DEFAULT_EASING)
    }
}

impl FlipAnimator {
    pub fn new(duration_ms: u32, easing: impl Into<String>) -> Self {
        Self {
            duration_ms,
            easing: easing.into(),
        }
    }

    pub fn from_config(config: &ReorderConfig) -> Self {
        Self::new(config.flip_duration_ms, config.easing.clone())
    }

    /// The transition used for the play step.
    pub fn play_transition(&self) -> Transition {
        Transition::Timed {
            duration_ms: self.duration_ms,
            easing: self.easing.clone(),
        }
    }

    /// Compare `before` with the current layout.
    ///
    /// Every "after" rectangle is read before anything is displaced. Tiles with
    /// no before or after rectangle, or with a zero delta, are skipped.
    pub fn plan<'a, L>(
        &self,
        before: &GeometrySnapshot,
        layout: &L,
        items: impl IntoIterator<Item = &'a TileId>,
        exclude: &[TileId],
    ) -> Vec<FlipMove>
    where
        L: LayoutProvider + ?Sized,
    {
        items
            .into_iter()
            .filter(|id| !exclude.contains(id))
            .filter_map(|id| {
                let first = before.get(id)?;
                let last = layout.rect_of(id)?;
                let delta = first.origin() - last.origin();
                (delta != Vec2::ZERO).then(|| FlipMove {
                    id: id.clone(),
                    delta,
                })
            })
            .collect()
    }

    /// Invert every moved tile now and queue the play step for the next frame.
    ///
    /// Layout is read back after the invert so the renderer styles the inverted
    /// transforms before the play step changes them; otherwise both land in the
    /// same style pass and nothing transitions.
    pub fn animate<'a, V>(
        &self,
        before: &GeometrySnapshot,
        view: &mut V,
        items: impl IntoIterator<Item = &'a TileId>,
        exclude: &[TileId],
        frames: &mut FrameQueue<V>,
    ) -> Vec<FlipMove>
    where
        V: TileView + 'static,
    {
        let moves = self.plan(before, view, items, exclude);
        if moves.is_empty() {
            return moves;
        }

        for FlipMove { id, delta } in &moves {
            view.set_offset(id, *delta, &Transition::Instant);
        }
        if let Some(first) = moves.first() {
            let _ = view.rect_of(&first.id);
        }

        let ids = moves.iter().map(|m| m.id.clone()).collect();
        frames.defer_to_next_frame(play_task::<V>(ids, self.play_transition()));

        moves
    }
}

fn play_task<V>(ids: Vec<TileId>, play: Transition) -> impl FnOnce(&mut V) + 'static
where
    V: TileView + 'static,
{
    move |view: &mut V| {
        for id in &ids {
            view.set_offset(id, Vec2::ZERO, &play);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Slot;
    use kurbo::Rect;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct Rects(HashMap<TileId, Rect>);

    impl LayoutProvider for Rects {
        fn rect_of(&self, id: &TileId) -> Option<Rect> {
            self.0.get(id).copied()
        }
    }

    #[test]
    fn test_transition_css() {
        assert_eq!(Transition::Instant.css(), "transform 0s");
        assert_eq!(
            FlipAnimator::default().play_transition().css(),
            "transform 280ms cubic-bezier(.2, .8, .2, 1)"
        );
    }

    #[test]
    fn test_translate_css() {
        assert_eq!(translate_css(Vec2::ZERO), "translate(0, 0)");
        assert_eq!(translate_css(Vec2::new(100.0, -20.5)), "translate(100px, -20.5px)");
    }

    #[test]
    fn test_plan_skips_unmoved_and_excluded() {
        let a = TileId::from("A");
        let b = TileId::from("B");
        let c = TileId::from("C");

        let mut before = GeometrySnapshot::new();
        before.insert(a.clone(), Rect::new(0.0, 0.0, 10.0, 10.0));
        before.insert(b.clone(), Rect::new(10.0, 0.0, 20.0, 10.0));
        before.insert(c.clone(), Rect::new(20.0, 0.0, 30.0, 10.0));

        let mut after = HashMap::new();
        after.insert(a.clone(), Rect::new(0.0, 0.0, 10.0, 10.0));
        after.insert(b.clone(), Rect::new(0.0, 10.0, 10.0, 20.0));
        after.insert(c.clone(), Rect::new(30.0, 0.0, 40.0, 10.0));

        let ids = [a, b.clone(), c.clone()];
        let moves = FlipAnimator::default().plan(&before, &Rects(after), &ids, &[c]);
        assert_eq!(
            moves,
            vec![FlipMove {
                id: b,
                delta: Vec2::new(10.0, -10.0),
            }]
        );
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Read(TileId),
        Offset(TileId, Transition),
    }

    /// Fixed rectangles; records every layout read and offset write in order.
    struct Recorder {
        rects: HashMap<TileId, Rect>,
        calls: RefCell<Vec<Call>>,
    }

    impl LayoutProvider for Recorder {
        fn rect_of(&self, id: &TileId) -> Option<Rect> {
            self.calls.borrow_mut().push(Call::Read(id.clone()));
            self.rects.get(id).copied()
        }
    }

    impl TileView for Recorder {
        fn sync_order(&mut self, _slots: &[Slot]) {}
        fn set_dragging(&mut self, _id: &TileId, _dragging: bool) {}
        fn detach(&mut self, _id: &TileId) {}

        fn set_offset(&mut self, id: &TileId, _offset: Vec2, transition: &Transition) {
            self.calls.borrow_mut().push(Call::Offset(id.clone(), transition.clone()));
        }

        fn focus(&mut self, _id: &TileId) {}
    }

    #[test]
    fn test_layout_read_between_invert_and_play() {
        let b = TileId::from("B");
        let c = TileId::from("C");

        let mut before = GeometrySnapshot::new();
        before.insert(b.clone(), Rect::new(100.0, 0.0, 200.0, 100.0));
        before.insert(c.clone(), Rect::new(200.0, 0.0, 300.0, 100.0));

        let mut view = Recorder {
            rects: HashMap::from([
                (b.clone(), Rect::new(0.0, 0.0, 100.0, 100.0)),
                (c.clone(), Rect::new(100.0, 0.0, 200.0, 100.0)),
            ]),
            calls: RefCell::new(Vec::new()),
        };
        let mut frames = FrameQueue::new();
        let animator = FlipAnimator::default();
        let moves = animator.animate(&before, &mut view, &[b.clone(), c.clone()], &[], &mut frames);
        assert_eq!(moves.len(), 2);

        assert_eq!(frames.run_frame(&mut view), 1);
        let calls = view.calls.into_inner();
        let last_invert = calls
            .iter()
            .rposition(|call| matches!(call, Call::Offset(_, Transition::Instant)))
            .unwrap();
        let first_play = calls
            .iter()
            .position(|call| matches!(call, Call::Offset(_, Transition::Timed { .. })))
            .unwrap();
        assert!(last_invert < first_play);
        assert!(
            calls[last_invert..first_play]
                .iter()
                .any(|call| matches!(call, Call::Read(_)))
        );
        assert_eq!(
            calls[first_play..],
            [
                Call::Offset(b, animator.play_transition()),
                Call::Offset(c, animator.play_transition()),
            ]
        );
    }
}
