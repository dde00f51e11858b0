//! # Composition locals
//!
//! The platform's light/dark appearance is a thread-local "composition
//! local": widgets read it with [`color_scheme`] while resolving colors, and
//! hosts override it for a subtree with [`with_color_scheme`]:
//!
//! ```rust
//! use ccmenu_core::*;
//!
//! assert_eq!(color_scheme(), ColorScheme::Dark);
//! with_color_scheme(ColorScheme::Light, || {
//!     assert_eq!(color_scheme(), ColorScheme::Light);
//! });
//! ```

use std::cell::RefCell;

use crate::ColorScheme;

thread_local! {
    static SCHEME_STACK: RefCell<Vec<ColorScheme>> = const { RefCell::new(Vec::new()) };
}

pub fn with_color_scheme<R>(scheme: ColorScheme, f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            SCHEME_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    SCHEME_STACK.with(|st| st.borrow_mut().push(scheme));
    let _guard = Guard;
    f()
}

/// Innermost scheme set by `with_color_scheme`, or the default (`Dark`).
pub fn color_scheme() -> ColorScheme {
    SCHEME_STACK.with(|st| st.borrow().last().copied().unwrap_or_default())
}
