use egui::Color32;
use plotters::style::RGBColor;

/// An opaque sRGB colour shared by the egui panels and the plotters chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0, self.1, self.2)
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}

/// Light or dark appearance, held as explicit application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn tokens(self) -> &'static ThemeTokens {
        match self {
            ThemeMode::Light => &LIGHT_THEME,
            ThemeMode::Dark => &DARK_THEME,
        }
    }
}

/// Every named colour the presentation layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub bg: Rgb,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub text: Rgb,
    pub chart_bg: Rgb,
    pub controls_bg: Rgb,
    pub table_border: Rgb,
    pub table_header: Rgb,
    pub table_row_even: Rgb,
    pub table_row_odd: Rgb,
    pub button_active: Rgb,
    pub button_inactive: Rgb,
    pub button_active_text: Rgb,
}

pub const LIGHT_THEME: ThemeTokens = ThemeTokens {
    bg: Rgb::from_hex(0xffffff),
    primary: Rgb::from_hex(0x2d2df1),
    secondary: Rgb::from_hex(0x001324),
    text: Rgb::from_hex(0x001324),
    chart_bg: Rgb::from_hex(0xf9fafb),
    controls_bg: Rgb::from_hex(0xf3f4f6),
    table_border: Rgb::from_hex(0xe5e7eb),
    table_header: Rgb::from_hex(0xf3f4f6),
    table_row_even: Rgb::from_hex(0xffffff),
    table_row_odd: Rgb::from_hex(0xf9fafb),
    button_active: Rgb::from_hex(0x2d2df1),
    button_inactive: Rgb::from_hex(0xe5e7e9),
    button_active_text: Rgb::from_hex(0xffffff),
};

pub const DARK_THEME: ThemeTokens = ThemeTokens {
    bg: Rgb::from_hex(0x001324),
    primary: Rgb::from_hex(0x17cac6),
    secondary: Rgb::from_hex(0xffffff),
    text: Rgb::from_hex(0xffffff),
    chart_bg: Rgb::from_hex(0x0a192f),
    controls_bg: Rgb::from_hex(0x0f2942),
    table_border: Rgb::from_hex(0x1e3a5f),
    table_header: Rgb::from_hex(0x0f2942),
    table_row_even: Rgb::from_hex(0x0a192f),
    table_row_odd: Rgb::from_hex(0x112240),
    button_active: Rgb::from_hex(0x17cac6),
    button_inactive: Rgb::from_hex(0x99a1a7),
    button_active_text: Rgb::from_hex(0xffffff),
};

/// Chart style configuration
pub struct ChartStyle {
    pub line_width: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    pub size: (u32, u32),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 2,
            font_size: 15,
            margin: 10,
            label_area_size: 50,
            size: (960, 400),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex(0x17cac6), Rgb(0x17, 0xca, 0xc6));
        assert_eq!(LIGHT_THEME.primary.to_color32(), Color32::from_rgb(45, 45, 241));
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(ThemeMode::default().toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.tokens().bg, Rgb::from_hex(0x001324));
        assert!(ThemeMode::from_dark(true).is_dark());
    }
}
