//! # Menu items
//!
//! A menu body is a flat, ordered `Vec<ItemVariant>`. `ItemVariant` is a
//! closed enum: the builder, the host's mount step, its height calculation
//! and its pointer routing all `match` on it without a wildcard arm, so a new
//! kind of item does not compile until every one of them handles it.
//!
//! Items are plain descriptions. They carry callbacks and bindings but no
//! interaction state; that lives in the controllers the host mounts for them.

use std::fmt;
use std::rc::Rc;

use ccmenu_core::{Binding, Color, color::system};

use crate::builder::MenuBody;
use crate::style::MenuCommandStyle;

pub type Action = Rc<dyn Fn()>;
pub type ChangeCallback = Rc<dyn Fn(bool)>;

/// Fixed row heights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeightClass {
    /// A single line of menu text.
    StandardTextOnly,
    /// An icon (e.g. a circle button) next to text.
    IconAndText,
    Custom(f32),
}

impl HeightClass {
    pub const STANDARD_TEXT_ONLY: f32 = 22.0;
    pub const ICON_AND_TEXT: f32 = 32.0;

    /// Custom height, clamped to be non-negative.
    pub fn custom(height: f32) -> Self {
        HeightClass::Custom(clamp_len(height))
    }

    pub fn height(self) -> f32 {
        match self {
            HeightClass::StandardTextOnly => Self::STANDARD_TEXT_ONLY,
            HeightClass::IconAndText => Self::ICON_AND_TEXT,
            HeightClass::Custom(h) => clamp_len(h),
        }
    }
}

pub(crate) fn clamp_len(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}

/// What a command does when committed.
#[derive(Clone)]
pub enum CommandAction {
    Run(Action),
    /// Ask the host application to show its settings window.
    OpenSettings,
}

/// A clickable row that highlights on hover, like a classic menu item.
#[derive(Clone)]
pub struct CommandItem {
    pub label: String,
    pub action: CommandAction,
    pub activates_app: bool,
    pub dismisses_menu: bool,
    /// `None` uses the host's configured style.
    pub style: Option<MenuCommandStyle>,
    pub height: HeightClass,
}

impl CommandItem {
    pub fn new(label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            action: CommandAction::Run(Rc::new(action)),
            activates_app: true,
            dismisses_menu: true,
            style: None,
            height: HeightClass::StandardTextOnly,
        }
    }

    /// Command that opens the host application's settings window.
    pub fn settings(label: impl Into<String>) -> Self {
        Self {
            action: CommandAction::OpenSettings,
            ..Self::new(label, || {})
        }
    }

    pub fn activates_app(mut self, on: bool) -> Self {
        self.activates_app = on;
        self
    }

    pub fn dismisses_menu(mut self, on: bool) -> Self {
        self.dismisses_menu = on;
        self
    }

    pub fn style(mut self, style: MenuCommandStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// A row with a circular on/off button.
#[derive(Clone)]
pub struct ToggleItem {
    pub label: String,
    pub is_on: Binding<bool>,
    pub on_change: Option<ChangeCallback>,
    pub height: HeightClass,
    /// Fill color of the circle while on.
    pub color: Color,
    pub invert_foreground: bool,
}

impl ToggleItem {
    pub fn new(label: impl Into<String>, is_on: Binding<bool>) -> Self {
        Self {
            label: label.into(),
            is_on,
            on_change: None,
            height: HeightClass::IconAndText,
            color: system::accent(),
            invert_foreground: false,
        }
    }

    pub fn on_change(mut self, f: impl Fn(bool) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn invert_foreground(mut self, on: bool) -> Self {
        self.invert_foreground = on;
        self
    }

    pub fn height(mut self, height: HeightClass) -> Self {
        self.height = height;
        self
    }
}

/// A labelled, collapsible group of items.
#[derive(Clone)]
pub struct DisclosureItem {
    pub label: String,
    pub height: HeightClass,
    pub is_expanded: Binding<bool>,
    pub children: MenuBody,
}

impl DisclosureItem {
    pub fn new(
        label: impl Into<String>,
        height: HeightClass,
        is_expanded: Binding<bool>,
        children: MenuBody,
    ) -> Self {
        Self {
            label: label.into(),
            height,
            is_expanded,
            children,
        }
    }

    /// Group whose expansion is tracked only internally.
    pub fn initially_expanded(
        label: impl Into<String>,
        height: HeightClass,
        expanded: bool,
        children: MenuBody,
    ) -> Self {
        Self::new(label, height, Binding::constant(expanded), children)
    }
}

/// A region of at most `max_height` that scrolls its children.
#[derive(Clone)]
pub struct ScrollRegionItem {
    /// `None` uses the host's configured default.
    pub max_height: Option<f32>,
    pub children: MenuBody,
}

impl ScrollRegionItem {
    pub const DEFAULT_MAX_HEIGHT: f32 = 300.0;

    /// `max_height` is clamped to be non-negative.
    pub fn new(max_height: f32, children: MenuBody) -> Self {
        Self {
            max_height: Some(clamp_len(max_height)),
            children,
        }
    }

    pub fn with_default_height(children: MenuBody) -> Self {
        Self {
            max_height: None,
            children,
        }
    }
}

/// Non-interactive content of a known height.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
    pub text: String,
    pub height: f32,
}

impl ContentItem {
    pub fn new(text: impl Into<String>, height: f32) -> Self {
        Self {
            text: text.into(),
            height: clamp_len(height),
        }
    }
}

#[derive(Clone)]
pub enum ItemVariant {
    Command(CommandItem),
    Toggle(ToggleItem),
    Disclosure(DisclosureItem),
    ScrollRegion(ScrollRegionItem),
    PlainContent(ContentItem),
}

/// Payload-free tag of an `ItemVariant`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Command,
    Toggle,
    Disclosure,
    ScrollRegion,
    PlainContent,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Command => "command",
            ItemKind::Toggle => "toggle",
            ItemKind::Disclosure => "disclosure",
            ItemKind::ScrollRegion => "scroll",
            ItemKind::PlainContent => "content",
        }
    }

    /// Kinds that react to pointer presses.
    pub fn is_interactive(self) -> bool {
        match self {
            ItemKind::Command | ItemKind::Toggle | ItemKind::Disclosure => true,
            ItemKind::ScrollRegion | ItemKind::PlainContent => false,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ItemVariant {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemVariant::Command(_) => ItemKind::Command,
            ItemVariant::Toggle(_) => ItemKind::Toggle,
            ItemVariant::Disclosure(_) => ItemKind::Disclosure,
            ItemVariant::ScrollRegion(_) => ItemKind::ScrollRegion,
            ItemVariant::PlainContent(_) => ItemKind::PlainContent,
        }
    }

    /// Text shown for the item; empty for scroll regions.
    pub fn label(&self) -> &str {
        match self {
            ItemVariant::Command(c) => &c.label,
            ItemVariant::Toggle(t) => &t.label,
            ItemVariant::Disclosure(d) => &d.label,
            ItemVariant::ScrollRegion(_) => "",
            ItemVariant::PlainContent(c) => &c.text,
        }
    }

    /// Row height class of row-like items.
    pub fn height_class(&self) -> Option<HeightClass> {
        match self {
            ItemVariant::Command(c) => Some(c.height),
            ItemVariant::Toggle(t) => Some(t.height),
            ItemVariant::Disclosure(d) => Some(d.height),
            ItemVariant::ScrollRegion(_) | ItemVariant::PlainContent(_) => None,
        }
    }

    pub fn children(&self) -> Option<&MenuBody> {
        match self {
            ItemVariant::Disclosure(d) => Some(&d.children),
            ItemVariant::ScrollRegion(s) => Some(&s.children),
            ItemVariant::Command(_) | ItemVariant::Toggle(_) | ItemVariant::PlainContent(_) => None,
        }
    }
}

impl fmt::Debug for ItemVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemVariant::Command(c) => f
                .debug_struct("Command")
                .field("label", &c.label)
                .field("activates_app", &c.activates_app)
                .field("dismisses_menu", &c.dismisses_menu)
                .field("style", &c.style)
                .field("action", &"<callback>")
                .finish(),
            ItemVariant::Toggle(t) => f
                .debug_struct("Toggle")
                .field("label", &t.label)
                .field("is_on", &t.is_on.get())
                .finish(),
            ItemVariant::Disclosure(d) => f
                .debug_struct("Disclosure")
                .field("label", &d.label)
                .field("height", &d.height)
                .field("is_expanded", &d.is_expanded.get())
                .field("children", &d.children)
                .finish(),
            ItemVariant::ScrollRegion(s) => f
                .debug_struct("ScrollRegion")
                .field("max_height", &s.max_height)
                .field("children", &s.children)
                .finish(),
            ItemVariant::PlainContent(c) => f
                .debug_struct("PlainContent")
                .field("text", &c.text)
                .field("height", &c.height)
                .finish(),
        }
    }
}

impl From<CommandItem> for ItemVariant {
    fn from(v: CommandItem) -> Self {
        ItemVariant::Command(v)
    }
}
impl From<ToggleItem> for ItemVariant {
    fn from(v: ToggleItem) -> Self {
        ItemVariant::Toggle(v)
    }
}
impl From<DisclosureItem> for ItemVariant {
    fn from(v: DisclosureItem) -> Self {
        ItemVariant::Disclosure(v)
    }
}
impl From<ScrollRegionItem> for ItemVariant {
    fn from(v: ScrollRegionItem) -> Self {
        ItemVariant::ScrollRegion(v)
    }
}
impl From<ContentItem> for ItemVariant {
    fn from(v: ContentItem) -> Self {
        ItemVariant::PlainContent(v)
    }
}

// Constructor functions, named like the views they describe.

pub fn MenuCommand(label: impl Into<String>, action: impl Fn() + 'static) -> CommandItem {
    CommandItem::new(label, action)
}

pub fn MenuSettingsCommand(label: impl Into<String>) -> CommandItem {
    CommandItem::settings(label)
}

pub fn MenuToggle(label: impl Into<String>, is_on: Binding<bool>) -> ToggleItem {
    ToggleItem::new(label, is_on)
}

pub fn MenuDisclosureGroup(
    label: impl Into<String>,
    is_expanded: Binding<bool>,
    children: MenuBody,
) -> DisclosureItem {
    DisclosureItem::new(label, HeightClass::StandardTextOnly, is_expanded, children)
}

pub fn MenuScrollView(max_height: f32, children: MenuBody) -> ScrollRegionItem {
    ScrollRegionItem::new(max_height, children)
}

pub fn MenuContent(text: impl Into<String>, height: f32) -> ContentItem {
    ContentItem::new(text, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_heights_are_clamped() {
        assert_eq!(HeightClass::custom(-4.0).height(), 0.0);
        assert_eq!(HeightClass::custom(f32::NAN).height(), 0.0);
        assert_eq!(HeightClass::custom(48.0).height(), 48.0);
        assert_eq!(HeightClass::Custom(-1.0).height(), 0.0);
    }

    #[test]
    fn scroll_region_clamps_max_height() {
        let s = ScrollRegionItem::new(-10.0, MenuBody::default());
        assert_eq!(s.max_height, Some(0.0));
        let s = ScrollRegionItem::with_default_height(MenuBody::default());
        assert_eq!(s.max_height, None);
    }

    #[test]
    fn command_defaults_match_menu_conventions() {
        let c = MenuCommand("Quit", || {});
        assert!(c.activates_app);
        assert!(c.dismisses_menu);
        assert_eq!(c.style, None);
        assert_eq!(c.height, HeightClass::StandardTextOnly);
        assert!(matches!(
            MenuSettingsCommand("Settings…").action,
            CommandAction::OpenSettings
        ));
    }

    #[test]
    fn only_rows_are_interactive() {
        let item: ItemVariant = MenuContent("Now Playing", 40.0).into();
        assert!(!item.kind().is_interactive());
        assert_eq!(item.height_class(), None);
        let item: ItemVariant = MenuToggle("Wi-Fi", Binding::constant(true)).into();
        assert!(item.kind().is_interactive());
        assert_eq!(item.height_class(), Some(HeightClass::IconAndText));
    }
}
