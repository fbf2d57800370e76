use refresh_graphics::Point;
use smallvec::SmallVec;

pub type PointerId = u64;

/// Masked action of a motion event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionAction {
    /// First pointer went down; starts a gesture.
    Down,
    Move,
    /// An additional pointer went down. `action_index` names it.
    PointerDown,
    /// A non-final pointer went up. `action_index` names it.
    PointerUp,
    /// Last pointer went up; ends the gesture.
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub position: Point,
}

/// A multi-pointer motion event.
///
/// Pointers are addressed either by index (their slot in this event) or by
/// id (stable across the gesture), the same way platform motion events are.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    /// Index of the pointer that changed for `PointerDown`/`PointerUp`.
    pub action_index: usize,
    pub pointers: SmallVec<[PointerSample; 4]>,
}

impl MotionEvent {
    pub fn new(action: MotionAction) -> Self {
        Self {
            action,
            action_index: 0,
            pointers: SmallVec::new(),
        }
    }

    /// Single-pointer event, the common case.
    pub fn single(action: MotionAction, id: PointerId, x: f32, y: f32) -> Self {
        Self::new(action).with_pointer(id, x, y)
    }

    pub fn with_pointer(mut self, id: PointerId, x: f32, y: f32) -> Self {
        self.pointers.push(PointerSample {
            id,
            position: Point::new(x, y),
        });
        self
    }

    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = index;
        self
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_id(&self, index: usize) -> Option<PointerId> {
        self.pointers.get(index).map(|sample| sample.id)
    }

    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|sample| sample.id == id)
    }

    pub fn y(&self, index: usize) -> Option<f32> {
        self.pointers.get(index).map(|sample| sample.position.y)
    }

    /// Vertical position of the pointer with the given id.
    pub fn y_of(&self, id: PointerId) -> Option<f32> {
        self.find_pointer_index(id).and_then(|index| self.y(index))
    }
}
