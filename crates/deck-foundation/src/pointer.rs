use deck_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

thread_local! {
    static INPUT_EPOCH: Instant = Instant::now();
}

/// Milliseconds since the first pointer event on this thread.
pub fn uptime_millis() -> i64 {
    INPUT_EPOCH.with(|epoch| epoch.elapsed().as_millis() as i64)
}

/// Touch/pointer event with consumption tracking.
///
/// Positions are in window coordinates. A recognizer that claims the event
/// marks it consumed so other handlers sharing the same event can back off.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub phase: PointerPhase,
    pub position: Point,
    pub time_ms: i64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            id: 0,
            kind,
            phase: match kind {
                PointerEventKind::Down => PointerPhase::Start,
                PointerEventKind::Move => PointerPhase::Move,
                PointerEventKind::Up => PointerPhase::End,
                PointerEventKind::Cancel => PointerPhase::Cancel,
            },
            position,
            time_ms: uptime_millis(),
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_pointer(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_time_ms(mut self, time_ms: i64) -> Self {
        self.time_ms = time_ms;
        self
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}
