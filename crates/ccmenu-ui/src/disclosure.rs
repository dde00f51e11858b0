//! Expand/collapse for a group of child items.
//!
//! Collapsing never unmounts the children. The content region is pinned to
//! height 0 and faded out, so nested toggles, scroll offsets and inner groups
//! keep their state and come back as they were.
//!
//! Height goes through two steps in either direction:
//!
//! | transition | immediately                         | next turn          |
//! |------------|-------------------------------------|--------------------|
//! | collapse   | `content = Some(0)`, `min = Some(0)` | `min = None`       |
//! | expand     | `content = None`, `min = Some(0)`    | `min = None`       |
//!
//! The floor keeps the region from jumping to an intermediate size during
//! the layout pass that applies the change.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ccmenu_core::{Binding, EventLoop, Scope, TaskHandle};

use crate::config::BlinkTiming;
use crate::interaction::InteractionController;
use crate::style::MenuCommandStyle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisclosureState {
    pub expanded: bool,
    /// Explicit region height; `None` means "use the natural height".
    pub content_height: Option<f32>,
    /// Temporary lower bound on the region height.
    pub min_content_height: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisclosurePhase {
    Collapsed,
    Expanded,
    /// Collapsed, floor clear still pending.
    Collapsing,
    /// Expanded, floor clear still pending.
    Expanding,
}

struct Inner {
    state: DisclosureState,
    phase: DisclosurePhase,
    binding: Binding<bool>,
    /// Last binding value seen, to tell external changes from our own writes.
    last_external: bool,
    floor_clear: Option<TaskHandle>,
}

pub struct DisclosureController {
    inner: Rc<RefCell<Inner>>,
    label: InteractionController,
    ev: EventLoop,
    scope: Scope,
}

impl DisclosureController {
    pub fn new(ev: &EventLoop, parent: &Scope, is_expanded: Binding<bool>) -> Self {
        let expanded = is_expanded.get();
        let inner = Rc::new(RefCell::new(Inner {
            state: DisclosureState {
                expanded,
                content_height: if expanded { None } else { Some(0.0) },
                min_content_height: None,
            },
            phase: settled(expanded),
            binding: is_expanded,
            last_external: expanded,
            floor_clear: None,
        }));
        let scope = parent.child();

        let action = {
            let weak = Rc::downgrade(&inner);
            let (ev, scope) = (ev.clone(), scope.clone());
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    user_toggle(&inner, &ev, &scope);
                }
            })
        };
        let label = InteractionController::new(
            ev,
            &scope,
            MenuCommandStyle::ControlCenter,
            BlinkTiming::default(),
            action,
        );

        let me = Self {
            inner,
            label,
            ev: ev.clone(),
            scope,
        };
        me.scope.add_disposer({
            let weak = Rc::downgrade(&me.inner);
            move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let pending = inner.borrow_mut().floor_clear.take();
                if let Some(h) = pending {
                    h.cancel();
                }
            }
        });
        log::debug!(
            "disclosure: mounted {}",
            if expanded { "expanded" } else { "collapsed" }
        );
        me
    }

    /// Flips the group and writes the new value to the binding. Same as a
    /// click on the label.
    pub fn toggle(&self) {
        user_toggle(&self.inner, &self.ev, &self.scope);
    }

    /// Entry point for a committed label click.
    pub fn on_user_toggle(&self) {
        self.toggle();
    }

    /// Applies a value decided outside the group. The binding is brought in
    /// line with one write if it holds something else.
    pub fn set_expanded(&self, expanded: bool) {
        transition(&self.inner, &self.ev, &self.scope, expanded);
        write_through(&self.inner, expanded);
    }

    /// Picks up changes made to the binding since the last pass.
    /// Returns true if the group changed state.
    pub fn sync(&self) -> bool {
        let binding = self.inner.borrow().binding.clone();
        let external = binding.get();
        {
            let mut inner = self.inner.borrow_mut();
            if external == inner.last_external {
                return false;
            }
            inner.last_external = external;
        }
        log::debug!("disclosure: binding changed to {external}");
        transition(&self.inner, &self.ev, &self.scope, external)
    }

    /// Replaces the binding on re-composition; the next `sync` compares the
    /// new binding against the last value seen.
    pub fn set_binding(&self, binding: Binding<bool>) {
        self.inner.borrow_mut().binding = binding;
    }

    pub fn state(&self) -> DisclosureState {
        self.inner.borrow().state
    }

    pub fn phase(&self) -> DisclosurePhase {
        self.inner.borrow().phase
    }

    pub fn is_expanded(&self) -> bool {
        self.inner.borrow().state.expanded
    }

    /// Height of the content region given the children's natural height.
    pub fn resolve_height(&self, natural: f32) -> f32 {
        let s = self.inner.borrow().state;
        match s.content_height {
            Some(h) => h,
            None => natural.max(s.min_content_height.unwrap_or(0.0)),
        }
    }

    pub fn content_opacity(&self) -> f32 {
        if self.is_expanded() { 1.0 } else { 0.0 }
    }

    pub fn chevron_rotation_degrees(&self) -> f32 {
        if self.is_expanded() { 90.0 } else { 0.0 }
    }

    /// The clickable header row.
    pub fn label(&self) -> &InteractionController {
        &self.label
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Drop for DisclosureController {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}

fn settled(expanded: bool) -> DisclosurePhase {
    if expanded {
        DisclosurePhase::Expanded
    } else {
        DisclosurePhase::Collapsed
    }
}

fn user_toggle(inner: &Rc<RefCell<Inner>>, ev: &EventLoop, scope: &Scope) {
    let to = !inner.borrow().state.expanded;
    transition(inner, ev, scope, to);
    write_through(inner, to);
}

fn write_through(inner: &Rc<RefCell<Inner>>, to: bool) {
    let binding = inner.borrow().binding.clone();
    if binding.get() != to {
        binding.set(to);
    }
    // Whatever the binding now reports is ours, not an external change.
    let read_back = binding.get();
    inner.borrow_mut().last_external = read_back;
}

fn transition(inner: &Rc<RefCell<Inner>>, ev: &EventLoop, scope: &Scope, to: bool) -> bool {
    let mut i = inner.borrow_mut();
    if i.state.expanded == to {
        return false;
    }
    i.state = DisclosureState {
        expanded: to,
        content_height: if to { None } else { Some(0.0) },
        min_content_height: Some(0.0),
    };
    i.phase = if to {
        DisclosurePhase::Expanding
    } else {
        DisclosurePhase::Collapsing
    };
    if let Some(prev) = i.floor_clear.take() {
        prev.cancel();
    }

    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    i.floor_clear = Some(ev.next_turn(scope, move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut i = inner.borrow_mut();
        i.state.min_content_height = None;
        i.phase = settled(i.state.expanded);
        i.floor_clear = None;
    }));
    log::debug!(
        "disclosure: {}",
        if to { "expanding" } else { "collapsing" }
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccmenu_core::{ManualClock, PointerEvent, Rect, signal};
    use std::cell::Cell;

    fn setup() -> (ManualClock, EventLoop, Scope) {
        let clock = ManualClock::new();
        (clock.clone(), EventLoop::with_clock(clock), Scope::new())
    }

    #[test]
    fn mounting_collapsed_pins_height_to_zero() {
        let (_, ev, scope) = setup();
        let d = DisclosureController::new(&ev, &scope, Binding::constant(false));
        assert_eq!(d.phase(), DisclosurePhase::Collapsed);
        assert_eq!(d.state().content_height, Some(0.0));
        assert_eq!(d.resolve_height(120.0), 0.0);
        assert_eq!(d.content_opacity(), 0.0);
        assert_eq!(d.chevron_rotation_degrees(), 0.0);
    }

    #[test]
    fn round_trip_clears_the_floor_on_the_next_turn() {
        let (clock, ev, scope) = setup();
        let expanded = signal(true);
        let d = DisclosureController::new(&ev, &scope, Binding::from_signal(&expanded));

        d.toggle();
        assert!(!expanded.get());
        assert_eq!(
            d.state(),
            DisclosureState {
                expanded: false,
                content_height: Some(0.0),
                min_content_height: Some(0.0),
            }
        );
        assert_eq!(d.phase(), DisclosurePhase::Collapsing);
        ev.run_until_idle(&clock).unwrap();
        assert_eq!(d.phase(), DisclosurePhase::Collapsed);
        assert_eq!(d.state().min_content_height, None);

        d.toggle();
        assert!(expanded.get());
        assert_eq!(d.state().content_height, None);
        assert_eq!(d.state().min_content_height, Some(0.0));
        assert_eq!(d.resolve_height(80.0), 80.0);
        ev.run_until_idle(&clock).unwrap();
        assert_eq!(
            d.state(),
            DisclosureState {
                expanded: true,
                content_height: None,
                min_content_height: None,
            }
        );
        assert_eq!(d.phase(), DisclosurePhase::Expanded);
        assert_eq!(d.chevron_rotation_degrees(), 90.0);
    }

    #[test]
    fn external_changes_are_never_written_back() {
        let (clock, ev, scope) = setup();
        let value = Rc::new(Cell::new(true));
        let writes = Rc::new(Cell::new(0));
        let binding = {
            let (v, v2, w) = (value.clone(), value.clone(), writes.clone());
            Binding::new(move || v.get(), move |x: bool| {
                w.set(w.get() + 1);
                v2.set(x);
            })
        };
        let d = DisclosureController::new(&ev, &scope, binding);

        value.set(false);
        assert!(d.sync());
        assert!(!d.is_expanded());
        assert!(!d.sync(), "second pass sees no change");
        ev.run_until_idle(&clock).unwrap();
        assert_eq!(writes.get(), 0);

        d.toggle();
        assert_eq!(writes.get(), 1);
        assert!(!d.sync(), "own write is not an external change");
        assert!(d.is_expanded());
    }

    #[test]
    fn set_expanded_round_trip_keeps_binding_in_step() {
        let (clock, ev, scope) = setup();
        let expanded = signal(true);
        let d = DisclosureController::new(&ev, &scope, Binding::from_signal(&expanded));

        d.set_expanded(false);
        assert!(!d.is_expanded());
        assert!(!expanded.get());
        assert!(!d.sync());
        ev.run_until_idle(&clock).unwrap();
        assert!(!d.sync());
        assert_eq!(d.phase(), DisclosurePhase::Collapsed);

        d.set_expanded(true);
        ev.run_until_idle(&clock).unwrap();
        assert!(!d.sync());
        assert_eq!(d.is_expanded(), expanded.get());
        assert_eq!(
            d.state(),
            DisclosureState {
                expanded: true,
                content_height: None,
                min_content_height: None,
            }
        );
    }

    #[test]
    fn set_expanded_writes_only_when_the_binding_differs() {
        let (_, ev, scope) = setup();
        let value = Rc::new(Cell::new(false));
        let writes = Rc::new(Cell::new(0));
        let binding = {
            let (v, v2, w) = (value.clone(), value.clone(), writes.clone());
            Binding::new(move || v.get(), move |x: bool| {
                w.set(w.get() + 1);
                v2.set(x);
            })
        };
        let d = DisclosureController::new(&ev, &scope, binding);

        value.set(true);
        d.set_expanded(true);
        assert_eq!(writes.get(), 0);
        assert!(!d.sync());

        d.set_expanded(false);
        assert_eq!(writes.get(), 1);
        assert!(!value.get());
        assert!(!d.sync());
    }

    #[test]
    fn on_user_toggle_flips_and_writes() {
        let (_, ev, scope) = setup();
        let expanded = signal(false);
        let d = DisclosureController::new(&ev, &scope, Binding::from_signal(&expanded));
        d.on_user_toggle();
        assert!(d.is_expanded() && expanded.get());
    }

    #[test]
    fn constant_binding_keeps_local_state() {
        let (clock, ev, scope) = setup();
        let d = DisclosureController::new(&ev, &scope, Binding::constant(false));
        d.toggle();
        ev.run_until_idle(&clock).unwrap();
        assert!(!d.sync());
        assert!(d.is_expanded());
    }

    #[test]
    fn a_new_transition_replaces_the_pending_clear() {
        let (clock, ev, scope) = setup();
        let d = DisclosureController::new(&ev, &scope, Binding::constant(true));
        d.toggle();
        d.toggle();
        assert_eq!(ev.pending(), 1);
        assert_eq!(d.phase(), DisclosurePhase::Expanding);
        ev.run_until_idle(&clock).unwrap();
        assert_eq!(d.phase(), DisclosurePhase::Expanded);
        assert_eq!(d.state().min_content_height, None);
    }

    #[test]
    fn unmount_cancels_the_floor_clear() {
        let (_, ev, scope) = setup();
        let d = DisclosureController::new(&ev, &scope, Binding::constant(true));
        d.toggle();
        assert_eq!(ev.pending(), 1);
        drop(d);
        assert_eq!(ev.pending(), 0);
    }

    #[test]
    fn clicking_the_label_toggles() {
        let (_, ev, scope) = setup();
        let expanded = signal(false);
        let d = DisclosureController::new(&ev, &scope, Binding::from_signal(&expanded));
        d.label().set_bounds(Rect::new(0.0, 0.0, 310.0, 22.0));
        d.label().handle_pointer(&PointerEvent::enter(4.0, 4.0));
        d.label().handle_pointer(&PointerEvent::down(4.0, 4.0));
        d.label().handle_pointer(&PointerEvent::up(4.0, 4.0));
        assert!(d.is_expanded());
        assert!(expanded.get());
        assert!(!d.label().state().highlighted);
    }
}
