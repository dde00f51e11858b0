use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    Cancel,
    Enter,
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub event: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(event: PointerEventKind, position: Vec2) -> Self {
        Self {
            id: PointerId::default(),
            event,
            position,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), Vec2 { x, y })
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), Vec2 { x, y })
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, Vec2 { x, y })
    }

    pub fn enter(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Enter, Vec2 { x, y })
    }

    pub fn leave(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Leave, Vec2 { x, y })
    }

    pub fn cancel() -> Self {
        Self::new(PointerEventKind::Cancel, Vec2::ZERO)
    }

    /// Only the primary button drives menu interactions.
    pub fn is_primary(&self) -> bool {
        match self.event {
            PointerEventKind::Down(b) | PointerEventKind::Up(b) => b == PointerButton::Primary,
            _ => true,
        }
    }
}
