// app_ui.rs
use crate::app::{ChartState, ChartWindow, QuoteApp};
use crate::chart;
use crate::error::DataError;
use crate::picker::{DateSelection, TICKERS, YEARS};
use crate::quotes::Field;
use crate::settings::{self, ChartStyle, Messages};
use crate::surface::PainterSurface;
use eframe::{egui, Frame};
use std::time::Duration;

const TAB_BAR_HEIGHT: f32 = 40.0;

impl eframe::App for QuoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_charts();

        egui::CentralPanel::default().show(ctx, |ui| {
            date_row(ui, "Start Date", &mut self.start);
            date_row(ui, "End Date", &mut self.end);
            ui.add_space(20.0);

            ui.vertical_centered(|ui| {
                egui::ComboBox::from_id_salt("ticker")
                    .selected_text(TICKERS[self.ticker].name)
                    .width(360.0)
                    .show_ui(ui, |ui| {
                        for (i, ticker) in TICKERS.iter().enumerate() {
                            ui.selectable_value(&mut self.ticker, i, ticker.name);
                        }
                    });
                ui.add_space(20.0);
                if ui.button("OK").clicked() {
                    self.request_chart(ctx);
                }
            });

            let lifetime = Duration::from_secs(settings::STATUS_MESSAGE_LIFETIME_SECONDS);
            let fresh = self
                .status_messages_last_ts
                .is_some_and(|ts| ts.elapsed() < lifetime);
            if fresh {
                if let Some(last) = self.status_messages.last() {
                    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                        ui.small(last);
                    });
                }
            }
        });

        let style = &self.config.chart;
        let messages = &self.config.messages;
        for chart in self.charts.iter_mut() {
            let size = style.canvas_size() + egui::vec2(0.0, TAB_BAR_HEIGHT);
            let builder = egui::ViewportBuilder::default()
                .with_title(chart.title.as_str())
                .with_inner_size(size)
                .with_resizable(false);
            ctx.show_viewport_immediate(
                egui::ViewportId::from_hash_of(("chart", chart.id)),
                builder,
                |ctx, class| {
                    if class == egui::ViewportClass::Embedded {
                        // backend without multi-viewport support
                        let mut open = chart.open;
                        egui::Window::new(chart.title.as_str())
                            .id(egui::Id::new(("chart_window", chart.id)))
                            .open(&mut open)
                            .resizable(false)
                            .show(ctx, |ui| chart_ui(ui, chart, style, messages));
                        chart.open = open;
                        return;
                    }
                    egui::CentralPanel::default()
                        .frame(egui::Frame::NONE)
                        .show(ctx, |ui| chart_ui(ui, chart, style, messages));
                    if ctx.input(|i| i.viewport().close_requested()) {
                        chart.open = false;
                    }
                },
            );
        }
    }
}

fn date_row(ui: &mut egui::Ui, prompt: &str, date: &mut DateSelection) {
    ui.horizontal(|ui| {
        ui.label(format!("{}: ", prompt));

        ui.label("Year");
        let mut year = date.year();
        egui::ComboBox::from_id_salt((prompt, "year"))
            .selected_text(year.to_string())
            .show_ui(ui, |ui| {
                for y in YEARS {
                    ui.selectable_value(&mut year, y, y.to_string());
                }
            });
        if year != date.year() {
            date.set_year(year);
        }

        ui.label("Month");
        let mut month = date.month();
        egui::ComboBox::from_id_salt((prompt, "month"))
            .selected_text(month.to_string())
            .show_ui(ui, |ui| {
                for m in 1..=12 {
                    ui.selectable_value(&mut month, m, m.to_string());
                }
            });
        if month != date.month() {
            date.set_month(month);
        }

        ui.label("Day");
        let mut day = date.day();
        egui::ComboBox::from_id_salt((prompt, "day"))
            .selected_text(day.to_string())
            .show_ui(ui, |ui| {
                for d in 1..=date.days_in_month() {
                    ui.selectable_value(&mut day, d, d.to_string());
                }
            });
        if day != date.day() {
            date.set_day(day);
        }
    });
}

fn chart_ui(ui: &mut egui::Ui, chart: &mut ChartWindow, style: &ChartStyle, messages: &Messages) {
    ui.horizontal(|ui| {
        for field in Field::TABS {
            ui.selectable_value(&mut chart.tab, field, field.title());
        }
    });

    let (response, painter) = ui.allocate_painter(style.canvas_size(), egui::Sense::hover());
    let mut surface = PainterSurface::new(&painter, response.rect.min);
    match &chart.state {
        ChartState::Loading(_) => {
            chart::render_placeholder(&mut surface, &messages.loading, style)
        }
        ChartState::Failed(DataError::Empty) => {
            chart::render_placeholder(&mut surface, &messages.no_data, style)
        }
        ChartState::Failed(_) => {
            chart::render_placeholder(&mut surface, &messages.load_failed, style)
        }
        ChartState::Ready(data) => {
            chart::render(&mut surface, &data.series(chart.tab), data.range(chart.tab), style)
        }
    }
}
