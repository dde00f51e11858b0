use ccmenu_core::{Color, ColorScheme, color::system};

/// How a command row highlights and commits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MenuCommandStyle {
    /// Classic menu: accent highlight, blinks before the action runs.
    Menu,
    /// Control Center: subtle gray highlight, commits immediately.
    #[default]
    ControlCenter,
}

impl MenuCommandStyle {
    pub fn blinks(self) -> bool {
        match self {
            MenuCommandStyle::Menu => true,
            MenuCommandStyle::ControlCenter => false,
        }
    }

    pub fn text_color(self, highlighted: bool, scheme: ColorScheme) -> Color {
        match self {
            MenuCommandStyle::Menu if highlighted => system::selected_menu_item_text(scheme),
            MenuCommandStyle::Menu | MenuCommandStyle::ControlCenter => system::text(scheme),
        }
    }

    /// Row fill; transparent when not highlighted.
    pub fn background(self, highlighted: bool, scheme: ColorScheme) -> Color {
        if !highlighted {
            return Color::TRANSPARENT;
        }
        match (self, scheme) {
            (MenuCommandStyle::Menu, _) => system::accent(),
            (MenuCommandStyle::ControlCenter, ColorScheme::Dark) => Color::WHITE.with_opacity(0.1),
            (MenuCommandStyle::ControlCenter, ColorScheme::Light) => Color::BLACK.with_opacity(0.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_style_inverts_text_when_highlighted() {
        let s = MenuCommandStyle::Menu;
        assert_eq!(s.text_color(true, ColorScheme::Light), Color::WHITE);
        assert_eq!(
            s.text_color(false, ColorScheme::Light),
            system::text(ColorScheme::Light)
        );
        assert_eq!(s.background(true, ColorScheme::Dark), system::accent());
    }

    #[test]
    fn control_center_keeps_text_and_uses_translucent_fill() {
        let s = MenuCommandStyle::ControlCenter;
        assert_eq!(
            s.text_color(true, ColorScheme::Dark),
            system::text(ColorScheme::Dark)
        );
        assert_eq!(s.background(true, ColorScheme::Dark), Color(255, 255, 255, 26));
        assert_eq!(s.background(true, ColorScheme::Light), Color(0, 0, 0, 26));
        assert_eq!(s.background(false, ColorScheme::Light), Color::TRANSPARENT);
    }
}
