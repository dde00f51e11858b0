pub use crate::binding::Binding;
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::color::{Color, ColorScheme};
pub use crate::error::LoopError;
pub use crate::event_loop::{EventLoop, TaskHandle};
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::input::*;
pub use crate::locals::{color_scheme, with_color_scheme};
pub use crate::runtime::Composer;
pub use crate::scope::{Scope, WeakScope};
pub use crate::signal::{Signal, signal};
pub use web_time::{Duration, Instant};
