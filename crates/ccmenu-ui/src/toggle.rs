//! Press-drag-release logic for circle toggle buttons.
//!
//! A press starts tracking. While tracking, every move re-tests the pointer
//! against the bounds, so dragging out disarms the button and dragging back
//! re-arms it. The release commits only if it happens armed.

use std::rc::Rc;

use ccmenu_core::{
    Binding, Color, ColorScheme, PointerEvent, PointerEventKind, Rect, color::system,
};

use crate::item::{ChangeCallback, ToggleItem};

/// Resolved colors of one circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircleColors {
    pub background: Color,
    pub foreground: Color,
    /// Drawn over the circle while the pointer is down on it.
    pub pressed_overlay: Option<Color>,
}

pub struct ToggleGestureController {
    is_on: Binding<bool>,
    on_change: Option<ChangeCallback>,
    color: Color,
    invert_foreground: bool,
    bounds: Rect,
    tracking: bool,
    is_pointer_down: bool,
}

impl ToggleGestureController {
    pub fn new(is_on: Binding<bool>) -> Self {
        Self {
            is_on,
            on_change: None,
            color: system::accent(),
            invert_foreground: false,
            bounds: Rect::default(),
            tracking: false,
            is_pointer_down: false,
        }
    }

    pub fn for_item(item: &ToggleItem) -> Self {
        let mut t = Self::new(item.is_on.clone());
        t.update(item);
        t
    }

    /// Takes the binding, callback and colors of a re-composed item.
    pub fn update(&mut self, item: &ToggleItem) {
        self.is_on = item.is_on.clone();
        self.on_change = item.on_change.clone();
        self.color = item.color;
        self.invert_foreground = item.invert_foreground;
    }

    pub fn on_change(mut self, f: impl Fn(bool) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn is_on(&self) -> bool {
        self.is_on.get()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.is_pointer_down
    }

    /// Whether a press is being tracked, armed or not.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Returns true when the event was consumed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if !event.is_primary() {
            return false;
        }
        match event.event {
            PointerEventKind::Down(_) => {
                if !self.bounds.contains(event.position) {
                    return false;
                }
                self.tracking = true;
                self.is_pointer_down = true;
                true
            }
            PointerEventKind::Move | PointerEventKind::Enter => {
                if !self.tracking {
                    return false;
                }
                self.is_pointer_down = self.bounds.contains(event.position);
                true
            }
            PointerEventKind::Up(_) => {
                if !self.tracking {
                    return false;
                }
                let armed = self.is_pointer_down;
                self.tracking = false;
                self.is_pointer_down = false;
                if armed {
                    self.commit();
                } else {
                    log::trace!("toggle: released outside");
                }
                true
            }
            PointerEventKind::Cancel => {
                let was = self.tracking;
                self.tracking = false;
                self.is_pointer_down = false;
                was
            }
            // Drags continue outside the row; the host keeps routing to us.
            PointerEventKind::Leave => false,
        }
    }

    fn commit(&self) {
        self.is_on.toggle();
        // Report what the binding holds now, which is not the flipped value
        // for a constant binding.
        let value = self.is_on.get();
        log::debug!("toggle: committed, now {value}");
        if let Some(cb) = &self.on_change {
            cb(value);
        }
    }

    pub fn circle_colors(&self, scheme: ColorScheme) -> CircleColors {
        let on = self.is_on.get();
        let background = match (on, scheme) {
            (true, _) => self.color,
            (false, ColorScheme::Dark) => system::control(scheme),
            (false, ColorScheme::Light) => Color::white(0.75),
        };
        let foreground = match (on, scheme) {
            (true, ColorScheme::Dark) if self.invert_foreground => system::text_background(scheme),
            (true, ColorScheme::Dark) => system::text(scheme),
            (true, ColorScheme::Light) if self.invert_foreground => system::text(scheme),
            (true, ColorScheme::Light) => system::text_background(scheme),
            (false, ColorScheme::Dark) => Color::white(0.85),
            (false, ColorScheme::Light) => Color::BLACK,
        };
        let pressed_overlay = self.is_pointer_down.then(|| match scheme {
            ColorScheme::Dark => Color::WHITE.with_opacity(0.1),
            ColorScheme::Light => Color::BLACK.with_opacity(0.1),
        });
        CircleColors {
            background,
            foreground,
            pressed_overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccmenu_core::signal;
    use std::cell::RefCell;

    fn armed(is_on: Binding<bool>) -> (ToggleGestureController, Rc<RefCell<Vec<bool>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let c = calls.clone();
        let mut t = ToggleGestureController::new(is_on).on_change(move |v| c.borrow_mut().push(v));
        t.set_bounds(Rect::new(0.0, 0.0, 26.0, 26.0));
        (t, calls)
    }

    #[test]
    fn drag_out_and_back_still_commits() {
        let on = signal(false);
        let (mut t, calls) = armed(Binding::from_signal(&on));

        t.handle_pointer(&PointerEvent::down(10.0, 10.0));
        assert!(t.is_pointer_down());
        t.handle_pointer(&PointerEvent::moved(60.0, 10.0));
        assert!(!t.is_pointer_down());
        t.handle_pointer(&PointerEvent::moved(12.0, 12.0));
        assert!(t.is_pointer_down());
        t.handle_pointer(&PointerEvent::up(12.0, 12.0));

        assert!(on.get());
        assert_eq!(*calls.borrow(), vec![true]);
        assert!(!t.is_pointer_down());
        assert!(!t.is_tracking());
    }

    #[test]
    fn release_outside_cancels() {
        let on = signal(false);
        let (mut t, calls) = armed(Binding::from_signal(&on));

        t.handle_pointer(&PointerEvent::down(10.0, 10.0));
        t.handle_pointer(&PointerEvent::moved(60.0, 10.0));
        t.handle_pointer(&PointerEvent::up(60.0, 10.0));

        assert!(!on.get());
        assert!(calls.borrow().is_empty());
        assert!(!t.is_pointer_down());
    }

    #[test]
    fn cancel_resets_without_commit() {
        let on = signal(true);
        let (mut t, calls) = armed(Binding::from_signal(&on));
        t.handle_pointer(&PointerEvent::down(10.0, 10.0));
        assert!(t.handle_pointer(&PointerEvent::cancel()));
        assert!(!t.handle_pointer(&PointerEvent::up(10.0, 10.0)));
        assert!(on.get());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn press_outside_is_ignored() {
        let (mut t, _) = armed(Binding::constant(false));
        assert!(!t.handle_pointer(&PointerEvent::down(40.0, 40.0)));
        assert!(!t.handle_pointer(&PointerEvent::moved(5.0, 5.0)));
        assert!(!t.is_pointer_down());
    }

    #[test]
    fn constant_binding_reports_the_read_back_value() {
        let (mut t, calls) = armed(Binding::constant(false));
        t.handle_pointer(&PointerEvent::down(5.0, 5.0));
        t.handle_pointer(&PointerEvent::up(5.0, 5.0));
        assert_eq!(*calls.borrow(), vec![false]);
    }

    #[test]
    fn colors_follow_state_and_scheme() {
        let on = signal(false);
        let (mut t, _) = armed(Binding::from_signal(&on));

        let off_dark = t.circle_colors(ColorScheme::Dark);
        assert_eq!(off_dark.background, system::control(ColorScheme::Dark));
        assert_eq!(off_dark.foreground, Color::white(0.85));
        assert_eq!(off_dark.pressed_overlay, None);
        assert_eq!(t.circle_colors(ColorScheme::Light).foreground, Color::BLACK);

        on.set(true);
        let on_light = t.circle_colors(ColorScheme::Light);
        assert_eq!(on_light.background, system::accent());
        assert_eq!(on_light.foreground, system::text_background(ColorScheme::Light));

        t.handle_pointer(&PointerEvent::down(5.0, 5.0));
        assert_eq!(
            t.circle_colors(ColorScheme::Dark).pressed_overlay,
            Some(Color(255, 255, 255, 26))
        );
    }
}
