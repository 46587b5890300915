// app.rs - application state: the picker form and the open chart windows
use crate::error::DataError;
use crate::loader::{ChartData, LoadRequest, PendingLoad};
use crate::picker::{DateSelection, TICKERS};
use crate::quotes::Field;
use crate::settings::{Config, STATUS_MESSAGE_MAX_COUNT};
use eframe::egui;
use std::time::Instant;

pub enum ChartState {
    Loading(PendingLoad),
    Ready(ChartData),
    Failed(DataError),
}

pub struct ChartWindow {
    pub id: u64,
    pub title: String,
    pub tab: Field,
    pub state: ChartState,
    pub open: bool,
}

impl ChartWindow {
    /// Moves a finished load into `Ready`/`Failed`. Returns a status line when it did.
    pub fn poll(&mut self) -> Option<String> {
        let ChartState::Loading(pending) = &self.state else {
            return None;
        };
        let outcome = pending.poll()?;
        let message = match &outcome {
            Ok(data) => format!("{}: {} rows", self.title, data.quotes.len()),
            Err(e) => format!("{}: {}", self.title, e),
        };
        self.state = match outcome {
            Ok(data) => ChartState::Ready(data),
            Err(e) => ChartState::Failed(e),
        };
        Some(message)
    }
}

pub struct QuoteApp {
    pub config: Config,
    pub ticker: usize,
    pub start: DateSelection,
    pub end: DateSelection,
    pub charts: Vec<ChartWindow>,
    next_chart_id: u64,
    pub status_messages: Vec<String>,
    pub status_messages_last_ts: Option<Instant>,
}

impl QuoteApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        tracing::info!("creating QuoteApp");
        // light theme: the chart paints black text on a light canvas
        let mut style = (*cc.egui_ctx.style()).clone();
        style.visuals = egui::Visuals::light();
        for font in style.text_styles.values_mut() {
            if font.size < config.picker.font_size {
                font.size = config.picker.font_size;
            }
        }
        cc.egui_ctx.set_style(style);

        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ticker: 0,
            start: DateSelection::default(),
            end: DateSelection::default(),
            charts: Vec::new(),
            next_chart_id: 0,
            status_messages: Vec::new(),
            status_messages_last_ts: None,
        }
    }

    pub fn message_add(&mut self, new_message: String) {
        self.status_messages.push(new_message);
        self.status_messages_last_ts = Some(Instant::now());
        if self.status_messages.len() > STATUS_MESSAGE_MAX_COUNT {
            self.status_messages.remove(0);
        }
    }

    pub fn load_request(&self) -> LoadRequest {
        LoadRequest {
            ticker: TICKERS[self.ticker].symbol.to_string(),
            start_date: self.start.to_string(),
            end_date: self.end.to_string(),
        }
    }

    /// Opens a chart window for the current form values and starts its download.
    pub fn request_chart(&mut self, ctx: &egui::Context) {
        let request = self.load_request();
        let id = self.next_chart_id;
        self.next_chart_id += 1;

        let title = format!("{} {} to {}", request.ticker, request.start_date, request.end_date);
        let path = self
            .config
            .fetch
            .download_dir
            .join(format!("{}_{}_{}.csv", request.ticker, std::process::id(), id));
        tracing::info!(%title, path = %path.display(), "requesting chart");

        let repaint = ctx.clone();
        let pending = PendingLoad::spawn(self.config.fetch.clone(), request, path, move || {
            repaint.request_repaint()
        });
        self.charts.push(ChartWindow {
            id,
            title: title.clone(),
            tab: Field::Close,
            state: ChartState::Loading(pending),
            open: true,
        });
        self.message_add(format!("Loading {}", title));
    }

    /// Picks up finished loads and forgets closed windows.
    pub fn poll_charts(&mut self) {
        let messages: Vec<String> = self.charts.iter_mut().filter_map(ChartWindow::poll).collect();
        for message in messages {
            self.message_add(message);
        }
        self.charts.retain(|c| c.open);
    }
}
