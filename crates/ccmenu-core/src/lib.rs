//! # Signals, bindings, scopes and the event loop
//!
//! `ccmenu-core` is the small runtime the menu widgets in `ccmenu-ui` sit on.
//! It has no rendering; everything here is plain single-threaded state.
//!
//! - `Signal<T>`: observable value, cloneable handle.
//! - `Binding<T>`: get/set pair onto state owned by the host application.
//! - `Scope`: lifetime of a mounted item; disposing it cancels its work.
//! - `EventLoop`: delayed tasks on the UI thread, run turn by turn.
//! - `Composer<T>`: keyed slots that survive composition passes.
//!
//! ## Signals and bindings
//!
//! ```rust
//! use ccmenu_core::*;
//!
//! let wifi = signal(true);
//! let binding = Binding::from_signal(&wifi);
//! binding.toggle();
//! assert!(!wifi.get());
//!
//! // Host-owned constants: writes are ignored.
//! let fixed = Binding::constant(true);
//! fixed.set(false);
//! assert!(fixed.get());
//! ```
//!
//! ## Scheduled work
//!
//! Components never sleep or block. A blink or a deferred layout fix-up is
//! queued on the `EventLoop` against the component's `Scope`:
//!
//! ```rust
//! use ccmenu_core::*;
//!
//! let clock = ManualClock::new();
//! let ev = EventLoop::with_clock(clock.clone());
//! let item = Scope::new();
//!
//! let fired = signal(false);
//! let f = fired.clone();
//! ev.next_turn(&item, move || f.set(true));
//!
//! item.dispose(); // item unmounted before the next turn
//! ev.run_until_idle(&clock).unwrap();
//! assert!(!fired.get());
//! ```

pub mod binding;
pub mod clock;
pub mod color;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod locals;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod tests;

pub use binding::*;
pub use clock::*;
pub use color::*;
pub use error::*;
pub use event_loop::*;
pub use geometry::*;
pub use input::*;
pub use locals::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
