//! # Menu host
//!
//! `MenuHost` is what turns a [`MenuBody`] into something interactive. On
//! every [`MenuHost::compose`] it:
//!
//! 1. walks the body and gives each item a key made of its parent's key, its
//!    kind, its label and its ordinal among same-labelled siblings;
//! 2. mounts a controller for each new key and refreshes callbacks and
//!    bindings of kept ones, so hover, expansion and scroll state survive the
//!    body being rebuilt;
//! 3. unmounts keys that disappeared, disposing their scope so pending blinks
//!    and floor clears never run;
//! 4. lays the rows out top to bottom into a [`MenuFrame`].
//!
//! Pointer and wheel events go through [`MenuHost::handle_pointer`] and
//! [`MenuHost::handle_scroll`], in menu coordinates.
//!
//! ```rust
//! use ccmenu_core::*;
//! use ccmenu_ui::*;
//!
//! let ev = EventLoop::new();
//! let mut host = MenuHost::new(&ev, CommitContext::detached());
//! let frame = host.compose(menu![
//!     MenuToggle("Wi-Fi", Binding::constant(true)),
//!     MenuCommand("Network Settings…", || {}),
//! ]);
//! assert_eq!(frame.height, 32.0 + 22.0);
//! assert_eq!(frame.rows[1].rect.y, 32.0);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::rc::Rc;

use ccmenu_core::{
    Color, Composer, EventLoop, PointerEvent, PointerEventKind, Rect, Scope, Size, Vec2,
    color::system, color_scheme,
};

use crate::builder::MenuBody;
use crate::config::MenuConfig;
use crate::disclosure::DisclosureController;
use crate::interaction::{CommitContext, CommitEffects, InteractionController};
use crate::item::{Action, CommandAction, CommandItem, HeightClass, ItemKind, ItemVariant};
use crate::scroll::{OverflowIndicators, ScrollHost};
use crate::style::MenuCommandStyle;
use crate::toggle::{CircleColors, ToggleGestureController};

enum Mounted {
    Command {
        scope: Scope,
        height: HeightClass,
        ctl: InteractionController,
    },
    Toggle {
        scope: Scope,
        height: HeightClass,
        ctl: ToggleGestureController,
    },
    Disclosure {
        scope: Scope,
        height: HeightClass,
        ctl: DisclosureController,
    },
    Scroll {
        scope: Scope,
        ctl: ScrollHost,
    },
    Content {
        scope: Scope,
    },
}

impl Mounted {
    fn scope(&self) -> &Scope {
        match self {
            Mounted::Command { scope, .. }
            | Mounted::Toggle { scope, .. }
            | Mounted::Disclosure { scope, .. }
            | Mounted::Scroll { scope, .. }
            | Mounted::Content { scope } => scope,
        }
    }

    fn row_height(&self) -> Option<f32> {
        match self {
            Mounted::Command { height, .. }
            | Mounted::Toggle { height, .. }
            | Mounted::Disclosure { height, .. } => Some(height.height()),
            Mounted::Scroll { .. } | Mounted::Content { .. } => None,
        }
    }
}

struct MountEnv<'a> {
    ev: &'a EventLoop,
    ctx: &'a CommitContext,
    config: &'a MenuConfig,
}

impl MountEnv<'_> {
    fn command_parts(&self, item: &CommandItem) -> (MenuCommandStyle, CommitEffects, Action) {
        let style = item.style.unwrap_or(self.config.command_style);
        let effects = CommitEffects::from_flags(item.activates_app, item.dismisses_menu);
        let action: Action = match &item.action {
            CommandAction::Run(f) => f.clone(),
            CommandAction::OpenSettings => {
                let app = self.ctx.app.clone();
                Rc::new(move || app.open_settings())
            }
        };
        (style, effects, action)
    }

    fn mount(&self, item: &ItemVariant) -> Mounted {
        let scope = Scope::new();
        match item {
            ItemVariant::Command(c) => {
                let (style, effects, action) = self.command_parts(c);
                let ctl = InteractionController::new(self.ev, &scope, style, self.config.blink, action)
                    .with_effects(effects, self.ctx.clone());
                Mounted::Command {
                    scope,
                    height: c.height,
                    ctl,
                }
            }
            ItemVariant::Toggle(t) => Mounted::Toggle {
                scope,
                height: t.height,
                ctl: ToggleGestureController::for_item(t),
            },
            ItemVariant::Disclosure(d) => {
                let ctl = DisclosureController::new(self.ev, &scope, d.is_expanded.clone());
                Mounted::Disclosure {
                    scope,
                    height: d.height,
                    ctl,
                }
            }
            ItemVariant::ScrollRegion(s) => Mounted::Scroll {
                scope,
                ctl: ScrollHost::new(s.max_height.unwrap_or(self.config.default_scroll_max_height)),
            },
            ItemVariant::PlainContent(_) => Mounted::Content { scope },
        }
    }

    fn update(&self, key: &str, slot: &mut Mounted, item: &ItemVariant) {
        if let (Some(kept), Some(class)) = (slot.row_height(), item.height_class())
            && kept != class.height()
        {
            log::warn!(
                "'{key}' changed height class to {class:?}; keeping {kept} for its lifetime"
            );
        }
        match (slot, item) {
            (Mounted::Command { ctl, .. }, ItemVariant::Command(c)) => {
                let (style, effects, action) = self.command_parts(c);
                ctl.update(style, self.config.blink, effects, action, self.ctx.clone());
            }
            (Mounted::Toggle { ctl, .. }, ItemVariant::Toggle(t)) => ctl.update(t),
            (Mounted::Disclosure { ctl, .. }, ItemVariant::Disclosure(d)) => {
                ctl.set_binding(d.is_expanded.clone());
                ctl.sync();
            }
            (Mounted::Scroll { .. }, ItemVariant::ScrollRegion(_))
            | (Mounted::Content { .. }, ItemVariant::PlainContent(_)) => {}
            (slot, item) => {
                log::warn!("'{key}' is now a {}; remounting", item.kind());
                slot.scope().dispose();
                *slot = self.mount(item);
            }
        }
    }
}

/// Escapes the characters that delimit key segments, so a label can never
/// spell out the key of another item.
fn key_label(label: &str) -> Cow<'_, str> {
    if !label.contains(['\\', '/', '#']) {
        return Cow::Borrowed(label);
    }
    let mut out = String::with_capacity(label.len() + 2);
    for ch in label.chars() {
        if matches!(ch, '\\' | '/' | '#') {
            out.push('\\');
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

fn child_keys(body: &MenuBody, parent: &str) -> Vec<String> {
    let mut seen: HashMap<(ItemKind, &str), usize> = HashMap::new();
    body.iter()
        .map(|item| {
            let n = seen.entry((item.kind(), item.label())).or_default();
            let key = format!("{parent}/{}:{}#{n}", item.kind(), key_label(item.label()));
            *n += 1;
            key
        })
        .collect()
}

fn reconcile(slots: &mut Composer<Mounted>, env: &MountEnv<'_>, body: &MenuBody, parent: &str) {
    for (item, key) in body.iter().zip(child_keys(body, parent)) {
        let (slot, created) = slots.remember_with_key(key.clone(), || env.mount(item));
        if created {
            log::debug!("host: mounted {key}");
        } else {
            env.update(&key, slot, item);
        }
        if let Some(children) = item.children() {
            reconcile(slots, env, children, &key);
        }
    }
}

/// One laid-out item, in menu coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    pub key: String,
    pub kind: ItemKind,
    pub label: String,
    /// Nesting level; top-level items are 0.
    pub depth: usize,
    pub rect: Rect,
    /// Viewport of the enclosing scroll region or disclosure content.
    pub clip: Option<Rect>,
    /// False inside collapsed groups and when scrolled out of view.
    pub visible: bool,
    pub opacity: f32,
    pub highlighted: bool,
    pub text_color: Color,
    pub background: Color,
    pub is_on: Option<bool>,
    pub circle: Option<CircleColors>,
    /// Where the toggle circle sits, left-aligned and vertically centered.
    pub circle_rect: Option<Rect>,
    pub expanded: Option<bool>,
    pub chevron_degrees: Option<f32>,
    pub indicators: Option<OverflowIndicators>,
}

impl RowLayout {
    /// Part of the row that can be hit.
    pub fn hit_rect(&self) -> Rect {
        match self.clip {
            Some(c) => self.rect.intersect(&c),
            None => self.rect,
        }
    }

    fn accepts(&self, p: Vec2) -> bool {
        self.visible && self.rect.contains(p) && self.clip.is_none_or(|c| c.contains(p))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuFrame {
    pub width: f32,
    pub height: f32,
    /// Rows in declaration order, each container before its children.
    pub rows: Vec<RowLayout>,
}

impl MenuFrame {
    /// First row with this label.
    pub fn row(&self, label: &str) -> Option<&RowLayout> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Text rendering of the rows, one per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for r in &self.rows {
            let _ = write!(
                out,
                "{:indent$}{} {:?} y={} h={}",
                "",
                r.kind,
                r.label,
                r.rect.y,
                r.rect.h,
                indent = r.depth * 2
            );
            if !r.visible {
                out.push_str(" hidden");
            }
            if r.highlighted {
                out.push_str(" highlighted");
            }
            if let Some(on) = r.is_on {
                let _ = write!(out, " on={on}");
            }
            if let Some(e) = r.expanded {
                let _ = write!(out, " expanded={e}");
            }
            if let Some(i) = r.indicators {
                let _ = write!(out, " top={} bottom={}", i.top, i.bottom);
            }
            out.push('\n');
        }
        out.truncate(out.trim_end().len());
        out
    }
}

impl fmt::Display for MenuFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[derive(Clone, Copy)]
struct Level<'a> {
    parent: &'a str,
    depth: usize,
    opacity: f32,
    clip: Option<Rect>,
    visible: bool,
    circle_size: f32,
}

impl Level<'_> {
    fn row(&self, key: &str, item: &ItemVariant, rect: Rect) -> RowLayout {
        let visible = self.visible
            && self.opacity > 0.0
            && self.clip.is_none_or(|c| !rect.intersect(&c).is_empty());
        RowLayout {
            key: key.to_string(),
            kind: item.kind(),
            label: item.label().to_string(),
            depth: self.depth,
            rect,
            clip: self.clip,
            visible,
            opacity: self.opacity,
            highlighted: false,
            text_color: system::text(color_scheme()),
            background: Color::TRANSPARENT,
            is_on: None,
            circle: None,
            circle_rect: None,
            expanded: None,
            chevron_degrees: None,
            indicators: None,
        }
    }

    fn clip_to(&self, region: Rect) -> Option<Rect> {
        Some(match self.clip {
            Some(c) => c.intersect(&region),
            None => region,
        })
    }
}

fn measure(slots: &Composer<Mounted>, body: &MenuBody, parent: &str) -> f32 {
    body.iter()
        .zip(child_keys(body, parent))
        .map(|(item, key)| measure_item(slots, item, &key))
        .sum()
}

fn measure_item(slots: &Composer<Mounted>, item: &ItemVariant, key: &str) -> f32 {
    let slot = slots.get(key);
    let row = |class: HeightClass| slot.and_then(Mounted::row_height).unwrap_or(class.height());
    match item {
        ItemVariant::Command(c) => row(c.height),
        ItemVariant::Toggle(t) => row(t.height),
        ItemVariant::Disclosure(d) => {
            let natural = measure(slots, &d.children, key);
            let region = match slot {
                Some(Mounted::Disclosure { ctl, .. }) => ctl.resolve_height(natural),
                _ => natural,
            };
            row(d.height) + region
        }
        ItemVariant::ScrollRegion(s) => {
            let natural = measure(slots, &s.children, key);
            match slot {
                Some(Mounted::Scroll { ctl, .. }) => ctl.max_height().min(natural),
                _ => s.max_height.map_or(natural, |m| m.min(natural)),
            }
        }
        ItemVariant::PlainContent(c) => c.height,
    }
}

fn layout_body(
    slots: &mut Composer<Mounted>,
    body: &MenuBody,
    lv: &Level<'_>,
    top: f32,
    width: f32,
    rows: &mut Vec<RowLayout>,
) -> f32 {
    let mut y = top;
    for (item, key) in body.iter().zip(child_keys(body, lv.parent)) {
        y += layout_item(slots, item, &key, lv, y, width, rows);
    }
    y - top
}

fn layout_item(
    slots: &mut Composer<Mounted>,
    item: &ItemVariant,
    key: &str,
    lv: &Level<'_>,
    y: f32,
    width: f32,
    rows: &mut Vec<RowLayout>,
) -> f32 {
    match item {
        ItemVariant::Command(c) => {
            let h = slots.get(key).and_then(Mounted::row_height).unwrap_or(c.height.height());
            let mut row = lv.row(key, item, Rect::new(0.0, y, width, h));
            if let Some(Mounted::Command { ctl, .. }) = slots.get(key) {
                ctl.set_bounds(row.hit_rect());
                row.highlighted = ctl.state().highlighted;
                row.text_color = ctl.text_color();
                row.background = ctl.background();
            }
            rows.push(row);
            h
        }
        ItemVariant::Toggle(t) => {
            let h = slots.get(key).and_then(Mounted::row_height).unwrap_or(t.height.height());
            let mut row = lv.row(key, item, Rect::new(0.0, y, width, h));
            // The press area is a circle-high band across the row.
            let size = lv.circle_size.min(h);
            let band = Rect::new(0.0, (h - size) / 2.0, width, size).translate(0.0, y);
            row.circle_rect = Some(Rect::new(band.x, band.y, size, size));
            if let Some(Mounted::Toggle { ctl, .. }) = slots.get_mut(key) {
                ctl.set_bounds(match row.clip {
                    Some(c) => band.intersect(&c),
                    None => band,
                });
                row.is_on = Some(ctl.is_on());
                row.circle = Some(ctl.circle_colors(color_scheme()));
            }
            rows.push(row);
            h
        }
        ItemVariant::Disclosure(d) => {
            let h = slots.get(key).and_then(Mounted::row_height).unwrap_or(d.height.height());
            let natural = measure(slots, &d.children, key);
            let mut header = lv.row(key, item, Rect::new(0.0, y, width, h));
            let (expanded, region, opacity) = match slots.get(key) {
                Some(Mounted::Disclosure { ctl, .. }) => {
                    let label = ctl.label();
                    label.set_bounds(header.hit_rect());
                    header.highlighted = label.state().highlighted;
                    header.text_color = label.text_color();
                    header.background = label.background();
                    header.chevron_degrees = Some(ctl.chevron_rotation_degrees());
                    (
                        ctl.is_expanded(),
                        ctl.resolve_height(natural),
                        ctl.content_opacity(),
                    )
                }
                _ => (true, natural, 1.0),
            };
            header.expanded = Some(expanded);
            rows.push(header);

            let inner = Level {
                parent: key,
                depth: lv.depth + 1,
                opacity: lv.opacity * opacity,
                clip: lv.clip_to(Rect::new(0.0, y + h, width, region)),
                visible: lv.visible && expanded,
                circle_size: lv.circle_size,
            };
            layout_body(slots, &d.children, &inner, y + h, width, rows);
            h + region
        }
        ItemVariant::ScrollRegion(s) => {
            let natural = measure(slots, &s.children, key);
            let (visible_h, offset, indicators) = match slots.get(key) {
                Some(Mounted::Scroll { ctl, .. }) => {
                    ctl.set_content_size(Size::new(width, natural));
                    (ctl.visible_height(), ctl.offset().y, Some(ctl.indicators()))
                }
                _ => (s.max_height.map_or(natural, |m| m.min(natural)), 0.0, None),
            };
            let viewport = Rect::new(0.0, y, width, visible_h);
            let mut row = lv.row(key, item, viewport);
            row.indicators = indicators;
            rows.push(row);

            let inner = Level {
                parent: key,
                depth: lv.depth + 1,
                opacity: lv.opacity,
                clip: lv.clip_to(viewport),
                visible: lv.visible,
                circle_size: lv.circle_size,
            };
            layout_body(slots, &s.children, &inner, y + offset, width, rows);
            visible_h
        }
        ItemVariant::PlainContent(c) => {
            rows.push(lv.row(key, item, Rect::new(0.0, y, width, c.height)));
            c.height
        }
    }
}

pub struct MenuHost {
    ev: EventLoop,
    ctx: CommitContext,
    config: MenuConfig,
    slots: Composer<Mounted>,
    body: MenuBody,
    frame: MenuFrame,
    hovered: Option<String>,
    captured: Option<String>,
}

impl MenuHost {
    pub fn new(ev: &EventLoop, ctx: CommitContext) -> Self {
        Self::with_config(ev, ctx, MenuConfig::default())
    }

    /// Invalid configs are replaced by the defaults.
    pub fn with_config(ev: &EventLoop, ctx: CommitContext, config: MenuConfig) -> Self {
        Self {
            ev: ev.clone(),
            ctx,
            config: config.or_default(),
            slots: Composer::new(),
            body: MenuBody::default(),
            frame: MenuFrame::default(),
            hovered: None,
            captured: None,
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn event_loop(&self) -> &EventLoop {
        &self.ev
    }

    /// One composition pass.
    pub fn compose(&mut self, body: MenuBody) -> &MenuFrame {
        let env = MountEnv {
            ev: &self.ev,
            ctx: &self.ctx,
            config: &self.config,
        };
        self.slots.begin_pass();
        reconcile(&mut self.slots, &env, &body, "");
        for (key, mounted) in self.slots.end_pass() {
            log::debug!("host: unmounted {key}");
            if self.hovered.as_deref() == Some(key.as_str()) {
                self.hovered = None;
            }
            if self.captured.as_deref() == Some(key.as_str()) {
                self.captured = None;
            }
            mounted.scope().dispose();
        }
        self.body = body;
        self.relayout()
    }

    /// Lays out the last composed body again, picking up state changes.
    pub fn relayout(&mut self) -> &MenuFrame {
        let root = Level {
            parent: "",
            depth: 0,
            opacity: 1.0,
            clip: None,
            visible: true,
            circle_size: self.config.circle_size,
        };
        let width = self.config.width;
        let mut rows = Vec::with_capacity(self.frame.rows.len());
        let height = layout_body(&mut self.slots, &self.body, &root, 0.0, width, &mut rows);
        self.frame = MenuFrame {
            width,
            height,
            rows,
        };
        &self.frame
    }

    pub fn frame(&self) -> &MenuFrame {
        &self.frame
    }

    /// Runs one event-loop turn and lays out again if anything ran.
    pub fn tick(&mut self) -> usize {
        let ran = self.ev.pump();
        if ran > 0 {
            self.relayout();
        }
        ran
    }

    pub fn is_mounted(&self, key: &str) -> bool {
        self.slots.get(key).is_some()
    }

    pub fn mounted_count(&self) -> usize {
        self.slots.len()
    }

    pub fn disclosure(&self, key: &str) -> Option<&DisclosureController> {
        match self.slots.get(key)? {
            Mounted::Disclosure { ctl, .. } => Some(ctl),
            _ => None,
        }
    }

    pub fn scroll_host(&self, key: &str) -> Option<&ScrollHost> {
        match self.slots.get(key)? {
            Mounted::Scroll { ctl, .. } => Some(ctl),
            _ => None,
        }
    }

    /// Innermost interactive row under `p`.
    pub fn hit_test(&self, p: Vec2) -> Option<&RowLayout> {
        self.frame
            .rows
            .iter()
            .rev()
            .find(|r| r.kind.is_interactive() && r.accepts(p))
    }

    fn dispatch(&mut self, key: &str, event: &PointerEvent) -> bool {
        match self.slots.get_mut(key) {
            Some(Mounted::Command { ctl, .. }) => ctl.handle_pointer(event),
            Some(Mounted::Toggle { ctl, .. }) => ctl.handle_pointer(event),
            Some(Mounted::Disclosure { ctl, .. }) => ctl.label().handle_pointer(event),
            Some(Mounted::Scroll { .. } | Mounted::Content { .. }) | None => false,
        }
    }

    fn set_hovered(&mut self, target: Option<String>, at: Vec2) {
        if self.hovered == target {
            return;
        }
        if let Some(old) = self.hovered.take() {
            log::trace!("host: leave {old}");
            self.dispatch(&old, &PointerEvent::new(PointerEventKind::Leave, at));
        }
        if let Some(new) = &target {
            log::trace!("host: enter {new}");
            self.dispatch(new, &PointerEvent::new(PointerEventKind::Enter, at));
        }
        self.hovered = target;
    }

    /// Routes a pointer event. A pressed item keeps receiving events until
    /// the release, wherever the pointer goes.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let at = event.position;
        let handled = if let Some(key) = self.captured.clone() {
            let handled = self.dispatch(&key, event);
            if matches!(
                event.event,
                PointerEventKind::Up(_) | PointerEventKind::Cancel
            ) {
                self.captured = None;
                // Commits can change the layout under the pointer.
                self.relayout();
                let target = self.hit_test(at).map(|r| r.key.clone());
                self.set_hovered(target, at);
            }
            handled
        } else {
            match event.event {
                PointerEventKind::Leave => {
                    self.set_hovered(None, at);
                    true
                }
                PointerEventKind::Enter | PointerEventKind::Move => {
                    let target = self.hit_test(at).map(|r| r.key.clone());
                    self.set_hovered(target.clone(), at);
                    target.is_some_and(|k| self.dispatch(&k, event))
                }
                PointerEventKind::Down(_) => {
                    let target = self.hit_test(at).map(|r| r.key.clone());
                    self.set_hovered(target.clone(), at);
                    match target {
                        Some(k) if self.dispatch(&k, event) => {
                            log::trace!("host: {k} captured the pointer");
                            self.captured = Some(k);
                            true
                        }
                        _ => false,
                    }
                }
                PointerEventKind::Up(_) | PointerEventKind::Cancel => {
                    let target = self.hovered.clone();
                    target.is_some_and(|k| self.dispatch(&k, event))
                }
            }
        };
        self.relayout();
        handled
    }

    /// Routes a wheel delta to the innermost scroll region under `p`; what it
    /// can't consume bubbles to enclosing regions. Returns the remainder.
    pub fn handle_scroll(&mut self, p: Vec2, dy: f32) -> f32 {
        let chain: Vec<String> = self
            .frame
            .rows
            .iter()
            .filter(|r| r.kind == ItemKind::ScrollRegion && r.accepts(p))
            .map(|r| r.key.clone())
            .collect();
        let mut left = dy;
        for key in chain.iter().rev() {
            if left == 0.0 {
                break;
            }
            if let Some(ctl) = self.scroll_host(key) {
                left = ctl.scroll_by(left);
            }
        }
        if left != dy {
            self.relayout();
        }
        left
    }
}

impl Drop for MenuHost {
    fn drop(&mut self) {
        for (_, mounted) in self.slots.drain() {
            mounted.scope().dispose();
        }
    }
}
