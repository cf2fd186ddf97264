use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::HashSet;
use std::error::Error;

use crate::plotting::styles::{ChartStyle, ThemeTokens};
use crate::types::ActiveDevPoint;
use crate::utils::month_end_points;

pub type PlotError = Box<dyn Error + Send + Sync>;

/// An RGB bitmap ready to be uploaded as a texture.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub size: [usize; 2],
    pub rgb: Vec<u8>,
}

/// Month-end value labels only fit once the visible range is narrow enough.
pub fn show_point_labels(position: f64) -> bool {
    position >= 50.0
}

/// Render the active developer trend line into an in-memory bitmap.
pub fn render_active_devs(
    points: &[ActiveDevPoint],
    tokens: &ThemeTokens,
    style: &ChartStyle,
    show_labels: bool,
) -> Result<RenderedChart, PlotError> {
    let (width, height) = style.size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_active_devs(points, tokens, style, show_labels, &root)?;
        root.present()?;
    }

    Ok(RenderedChart {
        size: [width as usize, height as usize],
        rgb: buffer,
    })
}

fn draw_active_devs(
    points: &[ActiveDevPoint],
    tokens: &ThemeTokens,
    style: &ChartStyle,
    show_labels: bool,
    root: &DrawingArea<BitMapBackend, Shift>,
) -> Result<(), PlotError> {
    let background = tokens.chart_bg.to_plotters();
    let text = tokens.text.to_plotters();
    let primary = tokens.primary.to_plotters();
    root.fill(&background)?;

    if points.is_empty() {
        return Ok(());
    }

    let values: Vec<f64> = points.iter().map(|p| p.active_dev_count as f64).collect();
    let (y_min, y_max) = y_axis_range(&values);
    let x_max = points.len().saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(
            "Active Developers",
            ("sans-serif", style.font_size * 2).into_font().color(&primary),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    let dates: Vec<String> = points.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect();
    let x_label_formatter = |x: &f64| x_label_for(x.round() as usize, &dates);

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(tokens.table_border.to_plotters())
        .axis_style(text)
        .y_desc("Active Developers")
        .label_style(("sans-serif", style.font_size).into_font().color(&text))
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&|y| format!("{:.0}", y))
        .x_label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&text)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        )
        .draw()?;

    let series: Vec<(f64, f64)> = values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect();
    chart.draw_series(LineSeries::new(series, primary.stroke_width(style.line_width)))?;

    if show_labels {
        let labelled: HashSet<_> = month_end_points(points).into_iter().map(|p| p.date).collect();
        let label_font = ("sans-serif", style.font_size).into_font().color(&text);
        chart.draw_series(points.iter().enumerate().filter(|(_, p)| labelled.contains(&p.date)).map(
            |(i, p)| {
                EmptyElement::at((i as f64, p.active_dev_count as f64))
                    + Circle::new((0, 0), 3, primary.filled())
                    + Text::new(p.active_dev_count.to_string(), (-10, -20), label_font.clone())
            },
        ))?;
    }

    Ok(())
}

/// Y axis from zero to a little above the peak.
pub fn y_axis_range(values: &[f64]) -> (f64, f64) {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    (0.0, (max * 1.1).max(1.0))
}

/// Label only the ends and every quarter of the axis to avoid overlap.
pub fn x_label_for(idx: usize, dates: &[String]) -> String {
    let len = dates.len();
    if idx >= len {
        return String::new();
    }
    let step = (len / 4).max(1);
    if idx == 0 || idx == len - 1 || idx % step == 0 {
        dates[idx].clone()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_y_axis_range() {
        assert_eq!(y_axis_range(&[]), (0.0, 1.0));
        let (min, max) = y_axis_range(&[10.0, 200.0, 50.0]);
        assert_eq!(min, 0.0);
        assert!(max > 200.0 && max < 230.0);
    }

    #[test]
    fn test_x_labels_thin_out() {
        let dates: Vec<String> = (1..=9).map(|d| format!("2024-01-0{}", d)).collect();
        assert_eq!(x_label_for(0, &dates), "2024-01-01");
        assert_eq!(x_label_for(8, &dates), "2024-01-09");
        assert_eq!(x_label_for(2, &dates), "2024-01-03");
        assert_eq!(x_label_for(3, &dates), "");
        assert_eq!(x_label_for(20, &dates), "");
    }

    #[test]
    fn test_label_threshold() {
        assert!(!show_point_labels(20.0));
        assert!(show_point_labels(50.0));
        assert!(show_point_labels(100.0));
    }
}
