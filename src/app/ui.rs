use egui::{Context, RichText, Ui};

use super::{App, LoadState};
use crate::plotting::{render_active_devs, show_point_labels, ChartStyle, ThemeTokens};
use crate::types::{RepoCategory, SortKey, TimeWindow};

const PROFILE_BASE: &str = "https://github.com/";

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    let tokens = app.theme();
    ctx.set_visuals(themed_visuals(tokens, app.theme_mode().is_dark()));

    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("Filters");
        ui.separator();

        ui.label("Time period:");
        let mut window = app.time_window();
        for option in TimeWindow::ALL {
            ui.selectable_value(&mut window, option, option.label());
        }
        if window != app.time_window() {
            app.set_time_window(window);
        }

        ui.separator();
        ui.label("Repositories:");
        let mut category = app.repo_category();
        for option in RepoCategory::ALL {
            ui.selectable_value(&mut category, option, option.label());
        }
        if category != app.repo_category() {
            app.set_repo_category(category);
        }

        ui.separator();
        let theme_label = if app.theme_mode().is_dark() { "Light mode" } else { "Dark mode" };
        if ui.button(theme_label).clicked() {
            app.toggle_theme();
        }
    });

    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(tokens.bg.to_color32()).inner_margin(12.0))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().id_salt("dashboard").show(ui, |ui| {
                ui.heading(RichText::new("Developer Activity").color(tokens.primary.to_color32()));
                ui.separator();
                draw_active_devs(app, ui, tokens);
                ui.separator();
                draw_leaderboard(app, ui, tokens);
                ui.separator();
                draw_detail_table(app, ui, tokens);
            });
        });

    // Update chart if needed
    if app.update_needed {
        refresh_chart(app, ctx);
        app.update_needed = false;
    }
}

fn draw_active_devs(app: &mut App, ui: &mut Ui, tokens: &ThemeTokens) {
    ui.label(RichText::new("Active Developers Chart").strong().color(tokens.primary.to_color32()));

    match &app.active_devs {
        LoadState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading data...");
            });
            return;
        }
        LoadState::Failed(message) => {
            ui.colored_label(egui::Color32::RED, message.as_str());
            return;
        }
        LoadState::Ready(_) => {}
    }

    if let Some(texture) = &app.chart_texture {
        ui.add(egui::Image::new(texture).max_width(ui.available_width()));
    }

    ui.label("Select date range:");
    let mut position = app.chart_position();
    ui.add(egui::Slider::new(&mut position, 0.0..=100.0).show_value(false));
    app.set_chart_position(position);

    if let Some(first) = app.visible_series().first() {
        ui.label(format!("Showing data from: {}", first.date.format("%Y-%m-%d")));
    }
    if !show_point_labels(app.chart_position()) {
        ui.label(RichText::new("Move slider to the right to see data labels").italics());
    }
}

fn draw_leaderboard(app: &mut App, ui: &mut Ui, tokens: &ThemeTokens) {
    ui.label(RichText::new("Developer Leaderboard").strong().color(tokens.primary.to_color32()));
    if !scope_ready(app, ui) {
        return;
    }

    let summary = app.summary();
    ui.label(
        RichText::new(format!(
            "{} developers, {} commits ({}, {})",
            summary.developers,
            summary.total_commits,
            app.time_window().label(),
            app.repo_category().label()
        ))
        .color(tokens.secondary.to_color32()),
    );

    ui.horizontal(|ui| {
        for entry in app.podium() {
            ui.vertical(|ui| {
                ui.label(RichText::new(format!("#{}", entry.rank)).strong().color(tokens.primary.to_color32()));
                ui.hyperlink_to(entry.developer.as_str(), format!("{}{}", PROFILE_BASE, entry.developer));
                ui.label(format!("{} commits", entry.total_commits));
            });
            ui.add_space(24.0);
        }
    });

    // The podium already shows the top three unless a search is narrowing the list
    let searching = !app.search().trim().is_empty();
    let rows = app.leaderboard();
    egui::ScrollArea::vertical()
        .id_salt("leaderboard")
        .max_height(240.0)
        .show(ui, |ui| {
            egui::Grid::new("leaderboard_grid").striped(true).show(ui, |ui| {
                ui.strong("Rank");
                ui.strong("Developer");
                ui.strong("Commits");
                ui.end_row();
                for entry in rows.iter().filter(|e| searching || e.rank > 3) {
                    ui.label(entry.rank.to_string());
                    ui.hyperlink_to(entry.developer.as_str(), format!("{}{}", PROFILE_BASE, entry.developer));
                    ui.label(entry.total_commits.to_string());
                    ui.end_row();
                }
            });
        });
}

fn draw_detail_table(app: &mut App, ui: &mut Ui, tokens: &ThemeTokens) {
    ui.label(
        RichText::new("Commits by Developer and Repository")
            .strong()
            .color(tokens.primary.to_color32()),
    );
    if !scope_ready(app, ui) {
        return;
    }

    ui.horizontal(|ui| {
        ui.label("Search developer:");
        let mut query = app.search().to_string();
        if ui.text_edit_singleline(&mut query).changed() {
            app.set_search(query);
        }
    });

    let sort = app.sort();
    let header = |key: SortKey, title: &str| {
        if sort.key == key {
            format!("{} {}", title, sort.order.arrow())
        } else {
            title.to_string()
        }
    };

    let rows = app.detail_rows();
    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt("detail")
        .max_height(360.0)
        .show(ui, |ui| {
            egui::Grid::new("detail_grid").striped(true).show(ui, |ui| {
                for (key, title) in [
                    (SortKey::Developer, "Developer"),
                    (SortKey::Repository, "Repository"),
                    (SortKey::Commits, "Commits"),
                ] {
                    let button = egui::Button::new(header(key, title)).fill(tokens.table_header.to_color32());
                    if ui.add(button).clicked() {
                        clicked = Some(key);
                    }
                }
                ui.end_row();

                for row in &rows {
                    ui.hyperlink_to(row.developer.as_str(), format!("{}{}", PROFILE_BASE, row.developer));
                    ui.hyperlink_to(row.repository.as_str(), format!("{}{}", PROFILE_BASE, row.repository));
                    ui.label(row.total_commits.to_string());
                    ui.end_row();
                }
            });
        });

    if let Some(key) = clicked {
        app.select_sort_key(key);
    }
}

/// Shows the ledger's loading or error state; true once data is available.
fn scope_ready(app: &App, ui: &mut Ui) -> bool {
    match &app.ledger {
        LoadState::Loading => {
            ui.label("Loading leaderboard data...");
            false
        }
        LoadState::Failed(message) => {
            ui.colored_label(egui::Color32::RED, message.as_str());
            false
        }
        LoadState::Ready(_) => true,
    }
}

/// egui visuals carrying the theme's panel, table and button colours.
fn themed_visuals(tokens: &ThemeTokens, dark: bool) -> egui::Visuals {
    let mut visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.override_text_color = Some(tokens.text.to_color32());
    visuals.hyperlink_color = tokens.primary.to_color32();
    visuals.panel_fill = tokens.controls_bg.to_color32();
    visuals.window_fill = tokens.bg.to_color32();
    // Text inputs sit on the even row colour, grid stripes on the odd one
    visuals.extreme_bg_color = tokens.table_row_even.to_color32();
    visuals.faint_bg_color = tokens.table_row_odd.to_color32();
    visuals.widgets.noninteractive.bg_stroke.color = tokens.table_border.to_color32();
    visuals.widgets.inactive.bg_fill = tokens.button_inactive.to_color32();
    visuals.widgets.inactive.weak_bg_fill = tokens.button_inactive.to_color32();
    visuals.selection.bg_fill = tokens.button_active.to_color32();
    visuals.selection.stroke.color = tokens.button_active_text.to_color32();
    visuals
}

fn refresh_chart(app: &mut App, ctx: &Context) {
    let points = app.visible_series();
    match render_active_devs(
        &points,
        app.theme(),
        &ChartStyle::default(),
        show_point_labels(app.chart_position()),
    ) {
        Ok(chart) => {
            let image = egui::ColorImage::from_rgb(chart.size, &chart.rgb);
            app.chart_texture = Some(ctx.load_texture("active_devs_chart", image, egui::TextureOptions::LINEAR));
        }
        Err(e) => log::error!("Plotting error: {}", e),
    }
}
