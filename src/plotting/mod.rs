pub mod chart;
pub mod styles;

pub use chart::{render_active_devs, show_point_labels, PlotError, RenderedChart};
pub use styles::{ChartStyle, Rgb, ThemeMode, ThemeTokens, DARK_THEME, LIGHT_THEME};
