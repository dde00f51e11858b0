#[cfg(test)]
mod tests {
    use crate::Color;
    use crate::ColorScheme;
    use crate::Composer;
    use crate::Rect;
    use crate::Vec2;
    use crate::locals::*;
    use crate::scope::*;
    use crate::signal::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(false));

        let called_clone = called.clone();
        sig.subscribe(move |_| {
            *called_clone.borrow_mut() = true;
        });

        sig.set(42);
        assert!(*called.borrow());
    }

    #[test]
    fn test_subscriber_may_read_signal() {
        let sig = signal(1);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let (s, seen2) = (sig.clone(), seen.clone());
        sig.subscribe(move |v| seen2.borrow_mut().push((*v, s.get())));
        sig.set(2);
        assert_eq!(*seen.borrow(), vec![(2, 2)]);
    }

    #[test]
    fn test_set_if_changed_skips_equal_values() {
        let sig = signal(true);
        let writes = Rc::new(RefCell::new(0));
        let w = writes.clone();
        let id = sig.subscribe(move |_| *w.borrow_mut() += 1);

        assert!(!sig.set_if_changed(true));
        assert!(sig.set_if_changed(false));
        assert_eq!(*writes.borrow(), 1);

        sig.unsubscribe(id);
        sig.set(true);
        assert_eq!(*writes.borrow(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        scope.dispose();
        assert!(*cleaned_up.borrow());
        assert!(!scope.is_alive());
    }

    #[test]
    fn test_scope_children_die_with_parent() {
        let parent = Scope::new();
        let child = parent.child();
        let weak = child.downgrade();
        assert!(weak.is_alive());

        parent.dispose();
        assert!(!child.is_alive());
        assert!(!weak.is_alive());
    }

    #[test]
    fn test_weak_scope_dead_after_drop() {
        let weak = {
            let scope = Scope::new();
            scope.downgrade()
        };
        assert!(!weak.is_alive());
    }

    #[test]
    fn test_composer_evicts_undeclared_keys() {
        let mut c: Composer<i32> = Composer::new();
        c.begin_pass();
        let (_, created) = c.remember_with_key("a", || 1);
        assert!(created);
        c.remember_with_key("b", || 2);
        assert!(c.end_pass().is_empty());

        c.begin_pass();
        let (a, created) = c.remember_with_key("a", || 100);
        assert!(!created);
        assert_eq!(*a, 1);
        let evicted = c.end_pass();
        assert_eq!(evicted, vec![("b".to_string(), 2)]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_color_scheme_fallback() {
        assert_eq!(
            ColorScheme::from_appearance_name("NSAppearanceNameAqua"),
            ColorScheme::Light
        );
        assert_eq!(
            ColorScheme::from_appearance_name("NSAppearanceNameDarkAqua"),
            ColorScheme::Dark
        );
        assert_eq!(
            ColorScheme::from_appearance_name("HighContrastVibrant"),
            ColorScheme::Dark
        );
    }

    #[test]
    fn test_color_scheme_local_nests() {
        assert_eq!(color_scheme(), ColorScheme::Dark);
        with_color_scheme(ColorScheme::Light, || {
            assert_eq!(color_scheme(), ColorScheme::Light);
            with_color_scheme(ColorScheme::Dark, || {
                assert_eq!(color_scheme(), ColorScheme::Dark);
            });
            assert_eq!(color_scheme(), ColorScheme::Light);
        });
        assert_eq!(color_scheme(), ColorScheme::Dark);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 80.0, 100.0, 100.0);
        assert_eq!(a.intersect(&b), Rect::new(50.0, 80.0, 50.0, 20.0));
        assert!(a.intersect(&Rect::new(200.0, 0.0, 5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_rect_translate_keeps_size() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).translate(-10.0, 5.0);
        assert_eq!(r, Rect::new(0.0, 25.0, 30.0, 40.0));
    }
}
