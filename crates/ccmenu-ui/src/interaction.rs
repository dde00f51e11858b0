//! # Hover, press and commit
//!
//! Every command row owns an [`InteractionController`]:
//!
//! ```text
//! Idle ──enter──▶ Hovering ──down──▶ Pressed ──up inside──▶ commit
//!   ▲                 │                 │
//!   └─────leave───────┴──up outside / cancel / leave
//! ```
//!
//! A commit in [`MenuCommandStyle::ControlCenter`] runs right away. In
//! [`MenuCommandStyle::Menu`] the row first blinks the way native menus do:
//! highlight off, back on, then the commit, each step a task on the
//! [`EventLoop`] at the offsets in [`BlinkTiming`].
//!
//! The commit itself always runs in the same order: bring the app forward
//! (if asked), dismiss the popover (if asked), then call the action.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use ccmenu_core::{
    Binding, Color, EventLoop, PointerEvent, PointerEventKind, Rect, Scope, Signal, color_scheme,
    signal,
};
use smallvec::SmallVec;

use crate::config::BlinkTiming;
use crate::item::Action;
use crate::style::MenuCommandStyle;

bitflags! {
    /// Side effects that run before a command's action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct CommitEffects: u8 {
        const ACTIVATE_APP = 1 << 0;
        const DISMISS_MENU = 1 << 1;
    }
}

impl CommitEffects {
    pub fn from_flags(activates_app: bool, dismisses_menu: bool) -> Self {
        let mut e = CommitEffects::empty();
        e.set(CommitEffects::ACTIVATE_APP, activates_app);
        e.set(CommitEffects::DISMISS_MENU, dismisses_menu);
        e
    }
}

/// The application hosting the menu.
pub trait HostApp {
    /// Bring the application to the foreground.
    fn activate(&self);
    /// Show the application's settings window.
    fn open_settings(&self) {
        log::debug!("open_settings: host has no settings window");
    }
}

/// Host without an application to activate.
pub struct DetachedApp;

impl HostApp for DetachedApp {
    fn activate(&self) {}
}

/// What a commit needs from the surrounding popover.
#[derive(Clone)]
pub struct CommitContext {
    pub app: Rc<dyn HostApp>,
    /// Whether the popover is shown; set to false to dismiss it.
    pub is_presented: Binding<bool>,
}

impl CommitContext {
    pub fn new(app: Rc<dyn HostApp>, is_presented: Binding<bool>) -> Self {
        Self { app, is_presented }
    }

    pub fn detached() -> Self {
        Self::new(Rc::new(DetachedApp), Binding::constant(true))
    }

    fn run(&self, effects: CommitEffects, action: &Action) {
        if effects.contains(CommitEffects::ACTIVATE_APP) {
            self.app.activate();
        }
        if effects.contains(CommitEffects::DISMISS_MENU) {
            self.is_presented.set(false);
        }
        action();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovering: bool,
    pub pressed: bool,
    pub highlighted: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Hovering,
    Pressed,
    /// Menu-style blink in flight; input can't start another commit.
    Committing,
}

struct Inner {
    phase: InteractionPhase,
    hovering: bool,
    pressed: bool,
    style: MenuCommandStyle,
    effects: CommitEffects,
    timing: BlinkTiming,
    action: Action,
    ctx: CommitContext,
    bounds: Rect,
    commits: u64,
}

pub struct InteractionController {
    inner: Rc<RefCell<Inner>>,
    highlighted: Signal<bool>,
    ev: EventLoop,
    scope: Scope,
}

impl InteractionController {
    pub fn new(
        ev: &EventLoop,
        parent: &Scope,
        style: MenuCommandStyle,
        timing: BlinkTiming,
        action: Action,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                phase: InteractionPhase::Idle,
                hovering: false,
                pressed: false,
                style,
                effects: CommitEffects::empty(),
                timing,
                action,
                ctx: CommitContext::detached(),
                bounds: Rect::default(),
                commits: 0,
            })),
            highlighted: signal(false),
            ev: ev.clone(),
            scope: parent.child(),
        }
    }

    pub fn with_effects(self, effects: CommitEffects, ctx: CommitContext) -> Self {
        {
            let mut inner = self.inner.borrow_mut();
            inner.effects = effects;
            inner.ctx = ctx;
        }
        self
    }

    pub fn state(&self) -> InteractionState {
        let inner = self.inner.borrow();
        InteractionState {
            hovering: inner.hovering,
            pressed: inner.pressed,
            highlighted: self.highlighted.get(),
        }
    }

    pub fn phase(&self) -> InteractionPhase {
        self.inner.borrow().phase
    }

    pub fn style(&self) -> MenuCommandStyle {
        self.inner.borrow().style
    }

    /// Observable highlight flag; subscribers see every change.
    pub fn highlighted(&self) -> &Signal<bool> {
        &self.highlighted
    }

    /// Completed commits.
    pub fn commits(&self) -> u64 {
        self.inner.borrow().commits
    }

    pub fn bounds(&self) -> Rect {
        self.inner.borrow().bounds
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.inner.borrow_mut().bounds = bounds;
    }

    /// Refreshes what a re-composed item describes. Interaction state is kept.
    pub fn update(
        &self,
        style: MenuCommandStyle,
        timing: BlinkTiming,
        effects: CommitEffects,
        action: Action,
        ctx: CommitContext,
    ) {
        let mut inner = self.inner.borrow_mut();
        inner.style = style;
        inner.timing = timing;
        inner.effects = effects;
        inner.action = action;
        inner.ctx = ctx;
    }

    pub fn text_color(&self) -> Color {
        self.style().text_color(self.highlighted.get(), color_scheme())
    }

    pub fn background(&self) -> Color {
        self.style().background(self.highlighted.get(), color_scheme())
    }

    /// Feeds one pointer event. Returns true when the event changed state.
    pub fn handle_pointer(&self, event: &PointerEvent) -> bool {
        if !event.is_primary() {
            return false;
        }
        let (phase, inside) = {
            let inner = self.inner.borrow();
            (inner.phase, inner.bounds.contains(event.position))
        };
        match (event.event, phase) {
            (_, InteractionPhase::Committing) => {
                // The blink owns the highlight until the commit lands.
                self.inner.borrow_mut().hovering = inside
                    && !matches!(event.event, PointerEventKind::Leave | PointerEventKind::Cancel);
                false
            }
            (PointerEventKind::Enter | PointerEventKind::Move, InteractionPhase::Pressed) => {
                self.inner.borrow_mut().hovering = inside;
                self.highlighted.set_if_changed(inside)
            }
            (PointerEventKind::Enter | PointerEventKind::Move, _) => {
                if inside {
                    self.enter_hover()
                } else if phase == InteractionPhase::Hovering {
                    self.reset("pointer moved out");
                    true
                } else {
                    false
                }
            }
            (PointerEventKind::Leave, InteractionPhase::Idle) => false,
            (PointerEventKind::Leave, _) => {
                self.reset("pointer left");
                true
            }
            (PointerEventKind::Down(_), InteractionPhase::Idle | InteractionPhase::Hovering) => {
                if !inside {
                    return false;
                }
                {
                    let mut inner = self.inner.borrow_mut();
                    inner.phase = InteractionPhase::Pressed;
                    inner.hovering = true;
                    inner.pressed = true;
                }
                self.highlighted.set_if_changed(true);
                log::trace!("interaction: pressed");
                true
            }
            (PointerEventKind::Down(_), InteractionPhase::Pressed) => false,
            (PointerEventKind::Up(_), InteractionPhase::Pressed) => {
                if inside {
                    self.commit();
                } else {
                    self.reset("released outside");
                }
                true
            }
            (PointerEventKind::Up(_), InteractionPhase::Idle | InteractionPhase::Hovering) => false,
            (PointerEventKind::Cancel, InteractionPhase::Pressed) => {
                self.reset("gesture cancelled");
                true
            }
            (PointerEventKind::Cancel, InteractionPhase::Idle | InteractionPhase::Hovering) => {
                false
            }
        }
    }

    fn enter_hover(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            inner.phase = InteractionPhase::Hovering;
            inner.hovering = true;
        }
        self.highlighted.set_if_changed(true)
    }

    fn reset(&self, why: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.phase = InteractionPhase::Idle;
            inner.hovering = false;
            inner.pressed = false;
        }
        self.highlighted.set_if_changed(false);
        log::trace!("interaction: idle ({why})");
    }

    fn commit(&self) {
        let (style, timing) = {
            let mut inner = self.inner.borrow_mut();
            inner.pressed = false;
            (inner.style, inner.timing)
        };
        if !style.blinks() {
            self.reset("committed");
            finish_commit(&self.inner);
            return;
        }

        self.inner.borrow_mut().phase = InteractionPhase::Committing;
        log::debug!(
            "interaction: blinking before commit ({}/{}/{} ms)",
            timing.off_ms,
            timing.on_ms,
            timing.commit_ms
        );

        let steps: SmallVec<[(ccmenu_core::Duration, BlinkStep); 3]> = SmallVec::from_buf([
            (timing.off(), BlinkStep::Off),
            (timing.on(), BlinkStep::On),
            (timing.commit(), BlinkStep::Commit),
        ]);
        for (delay, step) in steps {
            let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
            let highlighted = self.highlighted.clone();
            self.ev.schedule_in(&self.scope, delay, move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                match step {
                    BlinkStep::Off => {
                        highlighted.set_if_changed(false);
                    }
                    BlinkStep::On => {
                        highlighted.set_if_changed(true);
                    }
                    BlinkStep::Commit => {
                        {
                            let mut i = inner.borrow_mut();
                            i.phase = InteractionPhase::Idle;
                            i.hovering = false;
                            i.pressed = false;
                        }
                        highlighted.set_if_changed(false);
                        finish_commit(&inner);
                    }
                }
            });
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum BlinkStep {
    Off,
    On,
    Commit,
}

// Runs effects and the action with no borrow held; the action may re-enter.
fn finish_commit(inner: &Rc<RefCell<Inner>>) {
    let (ctx, effects, action) = {
        let mut i = inner.borrow_mut();
        i.commits += 1;
        (i.ctx.clone(), i.effects, i.action.clone())
    };
    log::debug!("interaction: commit ({effects:?})");
    ctx.run(effects, &action);
}

impl Drop for InteractionController {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}
