#![allow(non_snake_case)]
//! # Control-Center style menus
//!
//! Items are declared with constructor functions named after the views they
//! describe (`MenuCommand`, `MenuToggle`, `MenuDisclosureGroup`, ...) and
//! composed into a [`MenuBody`] with [`menu!`] or [`MenuBuilder`]. A
//! [`MenuHost`] mounts the body, keeps per-item state across passes and
//! routes pointer input.
//!
//! ```rust
//! use ccmenu_core::*;
//! use ccmenu_ui::*;
//!
//! let clock = ManualClock::new();
//! let ev = EventLoop::with_clock(clock.clone());
//! let wifi = signal(true);
//! let show_other = signal(false);
//!
//! let body = |wifi: &Signal<bool>, other: &Signal<bool>| {
//!     menu![
//!         MenuToggle("Wi-Fi", Binding::from_signal(wifi)),
//!         MenuDisclosureGroup(
//!             "Other Networks",
//!             Binding::from_signal(other),
//!             menu![for n in ["Cafe", "Office"] => MenuCommand(n, || {})],
//!         ),
//!     ]
//! };
//!
//! let mut host = MenuHost::new(&ev, CommitContext::detached());
//! assert_eq!(host.compose(body(&wifi, &show_other)).height, 32.0 + 22.0);
//!
//! show_other.set(true);
//! host.compose(body(&wifi, &show_other));
//! ev.run_until_idle(&clock).unwrap();
//! assert_eq!(host.relayout().height, 32.0 + 22.0 + 2.0 * 22.0);
//! ```
//!
//! ## Commands
//!
//! A command highlights on hover and commits on release. With
//! [`MenuCommandStyle::Menu`] the highlight blinks before the action runs;
//! see [`interaction`] for the exact sequence.
//!
//! ## Disclosure groups
//!
//! Collapsing a group hides its children without unmounting them. Their
//! state (toggle presses in flight, scroll offsets, nested groups) is intact
//! when the group opens again. See [`disclosure`].

pub mod builder;
pub mod config;
pub mod disclosure;
pub mod host;
pub mod interaction;
pub mod item;
pub mod scroll;
pub mod style;
pub mod toggle;

pub use builder::{IntoMenuItems, MenuBody, MenuBuilder};
pub use config::{BlinkTiming, ConfigError, MenuConfig};
pub use disclosure::{DisclosureController, DisclosurePhase, DisclosureState};
pub use host::{MenuFrame, MenuHost, RowLayout};
pub use interaction::{
    CommitContext, CommitEffects, DetachedApp, HostApp, InteractionController, InteractionPhase,
    InteractionState,
};
pub use item::*;
pub use scroll::{OverflowIndicators, ScrollHost};
pub use style::MenuCommandStyle;
pub use toggle::{CircleColors, ToggleGestureController};
