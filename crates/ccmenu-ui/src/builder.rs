//! # Building a menu body
//!
//! A menu is declared as a sequence of item expressions. Conditional
//! expressions that come out as `None` contribute nothing, collections are
//! flattened in iteration order, and everything else keeps its declaration
//! order:
//!
//! ```rust
//! use ccmenu_core::*;
//! use ccmenu_ui::*;
//!
//! let show_debug = false;
//! let devices = ["AirPods", "Speakers"];
//!
//! let body = menu![
//!     if show_debug => MenuCommand("Debug", || {}),
//!     MenuCommand("Settings…", || {}),
//!     for d in devices => MenuToggle(d, Binding::constant(false)),
//! ];
//! assert_eq!(body.labels(), vec!["Settings…", "AirPods", "Speakers"]);
//! ```
//!
//! The same composition without the macro:
//!
//! ```rust
//! use ccmenu_core::*;
//! use ccmenu_ui::*;
//!
//! let body = MenuBuilder::new()
//!     .item_if(false, || MenuCommand("Debug", || {}))
//!     .item(MenuCommand("Settings…", || {}))
//!     .items(["AirPods", "Speakers"].map(|d| MenuToggle(d, Binding::constant(false))))
//!     .build();
//! assert_eq!(body.len(), 3);
//! ```
//!
//! Only types implementing [`IntoMenuItems`] are accepted, so an unsupported
//! item is a compile error rather than something the host has to skip.

use std::fmt::{self, Write};
use std::ops::Deref;

use crate::item::{
    CommandItem, ContentItem, DisclosureItem, ItemVariant, ScrollRegionItem, ToggleItem,
};

/// Ordered list of items produced by one composition.
#[derive(Clone, Default)]
pub struct MenuBody(Vec<ItemVariant>);

impl MenuBody {
    pub fn new(items: Vec<ItemVariant>) -> Self {
        Self(items)
    }

    pub fn into_vec(self) -> Vec<ItemVariant> {
        self.0
    }

    /// Top-level labels, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.0.iter().map(|i| i.label()).collect()
    }

    /// One line per item, nested items indented by two spaces.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        write_outline(&mut out, self, 0);
        out.truncate(out.trim_end().len());
        out
    }
}

fn write_outline(out: &mut String, body: &MenuBody, depth: usize) {
    for item in body.iter() {
        let label = item.label();
        let _ = if label.is_empty() {
            writeln!(out, "{:indent$}{}", "", item.kind(), indent = depth * 2)
        } else {
            writeln!(out, "{:indent$}{} {}", "", item.kind(), label, indent = depth * 2)
        };
        if let Some(children) = item.children() {
            write_outline(out, children, depth + 1);
        }
    }
}

impl Deref for MenuBody {
    type Target = [ItemVariant];
    fn deref(&self) -> &[ItemVariant] {
        &self.0
    }
}

impl IntoIterator for MenuBody {
    type Item = ItemVariant;
    type IntoIter = std::vec::IntoIter<ItemVariant>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MenuBody {
    type Item = &'a ItemVariant;
    type IntoIter = std::slice::Iter<'a, ItemVariant>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for MenuBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Anything that expands to zero or more items, in order.
pub trait IntoMenuItems {
    fn into_menu_items(self, out: &mut Vec<ItemVariant>);
}

impl IntoMenuItems for ItemVariant {
    fn into_menu_items(self, out: &mut Vec<ItemVariant>) {
        out.push(self);
    }
}

macro_rules! impl_into_menu_items {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoMenuItems for $t {
                fn into_menu_items(self, out: &mut Vec<ItemVariant>) {
                    out.push(self.into());
                }
            }
        )*
    };
}

impl_into_menu_items!(
    CommandItem,
    ToggleItem,
    DisclosureItem,
    ScrollRegionItem,
    ContentItem
);

impl IntoMenuItems for MenuBody {
    fn into_menu_items(self, out: &mut Vec<ItemVariant>) {
        out.extend(self.0);
    }
}

impl<T: IntoMenuItems> IntoMenuItems for Option<T> {
    fn into_menu_items(self, out: &mut Vec<ItemVariant>) {
        if let Some(v) = self {
            v.into_menu_items(out);
        }
    }
}

impl<T: IntoMenuItems> IntoMenuItems for Vec<T> {
    fn into_menu_items(self, out: &mut Vec<ItemVariant>) {
        for v in self {
            v.into_menu_items(out);
        }
    }
}

impl<T: IntoMenuItems, const N: usize> IntoMenuItems for [T; N] {
    fn into_menu_items(self, out: &mut Vec<ItemVariant>) {
        for v in self {
            v.into_menu_items(out);
        }
    }
}

#[derive(Default)]
pub struct MenuBuilder {
    items: Vec<ItemVariant>,
}

impl MenuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: impl IntoMenuItems) -> Self {
        item.into_menu_items(&mut self.items);
        self
    }

    /// Adds the item built by `f` only when `cond` holds; `f` is not called otherwise.
    pub fn item_if<I: IntoMenuItems>(self, cond: bool, f: impl FnOnce() -> I) -> Self {
        if cond { self.item(f()) } else { self }
    }

    pub fn items<I: IntoMenuItems>(mut self, iter: impl IntoIterator<Item = I>) -> Self {
        for item in iter {
            item.into_menu_items(&mut self.items);
        }
        self
    }

    pub fn build(self) -> MenuBody {
        MenuBody(self.items)
    }
}

/// Declarative menu body. Entries are separated by commas:
///
/// - `expr`: anything implementing [`IntoMenuItems`] (`Option`s and `Vec`s included);
/// - `if cond => expr`: included only when `cond` is true;
/// - `for pat in iter => expr`: one entry per element, in iteration order.
#[macro_export]
macro_rules! menu {
    () => {
        $crate::builder::MenuBody::default()
    };
    ($($body:tt)+) => {{
        #[allow(unused_mut)]
        let mut b = $crate::builder::MenuBuilder::new();
        $crate::__menu_items!(b; $($body)+);
        b.build()
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __menu_items {
    ($b:ident;) => {};
    ($b:ident; if $cond:expr => $item:expr $(, $($rest:tt)*)?) => {
        if $cond {
            $b = $b.item($item);
        }
        $crate::__menu_items!($b; $($($rest)*)?);
    };
    ($b:ident; for $pat:pat in $iter:expr => $item:expr $(, $($rest:tt)*)?) => {
        for $pat in $iter {
            $b = $b.item($item);
        }
        $crate::__menu_items!($b; $($($rest)*)?);
    };
    ($b:ident; $item:expr $(, $($rest:tt)*)?) => {
        $b = $b.item($item);
        $crate::__menu_items!($b; $($($rest)*)?);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::*;
    use ccmenu_core::Binding;

    fn cmd(label: &str) -> CommandItem {
        MenuCommand(label, || {})
    }

    #[test]
    fn absent_branches_contribute_nothing_and_iteration_flattens() {
        let body = menu![
            if false => cmd("A"),
            cmd("B"),
            for l in ["C", "D"] => cmd(l),
        ];
        insta::assert_snapshot!(body.labels().join(","), @"B,C,D");
    }

    #[test]
    fn options_and_vecs_expand_in_place() {
        let maybe: Option<CommandItem> = None;
        let body = menu![
            cmd("first"),
            maybe,
            Some(cmd("second")),
            vec![cmd("third"), cmd("fourth")],
            MenuBody::default(),
            cmd("last"),
        ];
        assert_eq!(
            body.labels(),
            vec!["first", "second", "third", "fourth", "last"]
        );
    }

    #[test]
    fn empty_composition_is_empty() {
        let body = menu![];
        assert!(body.is_empty());
        assert!(MenuBuilder::new().build().is_empty());
        let none: Vec<CommandItem> = Vec::new();
        assert!(MenuBuilder::new().items(none).build().is_empty());
    }

    #[test]
    fn item_if_skips_the_closure() {
        let body = MenuBuilder::new()
            .item_if(false, || -> CommandItem { panic!("should not be built") })
            .item_if(true, || cmd("kept"))
            .build();
        assert_eq!(body.labels(), vec!["kept"]);
    }

    #[test]
    fn same_inputs_same_output() {
        let build = |wifi: bool| {
            menu![
                MenuToggle("Wi-Fi", Binding::constant(wifi)),
                if wifi => MenuContent("Home Network", 22.0),
                MenuDisclosureGroup(
                    "Other Networks",
                    Binding::constant(false),
                    menu![for n in ["Cafe", "Office"] => cmd(n)],
                ),
            ]
        };
        assert_eq!(build(true).outline(), build(true).outline());
        insta::assert_snapshot!(build(true).outline(), @r"
        toggle Wi-Fi
        content Home Network
        disclosure Other Networks
          command Cafe
          command Office
        ");
        assert_eq!(build(false).len(), 2);
    }

    #[test]
    fn nested_scroll_region_outline() {
        let body = menu![MenuScrollView(120.0, menu![MenuContent("row", 22.0)])];
        assert_eq!(body.outline(), "scroll\n  content row");
    }
}
