use crate::app::draw::DrawTool;
use geofence_editor::domain::{LatLng, SearchFilters};
use geofence_editor::error::Result;
use geofence_editor::session::{Completion, Layer, Outcome, Session, Ticket};
use std::fmt::Display;
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use tracing::debug;

/// Fraction of the visible span a shape moves per key press while editing.
const MOVE_STEP: f64 = 0.1;
const SPINNER_TICK: Duration = Duration::from_millis(100);
const IDLE_STATUS: &str = "Ready";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Map,
    Search,
    IdPrompt,
    FlyTo,
    Submit,
}

/// Detail of the world outline drawn under the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Basemap {
    #[default]
    Low,
    High,
}

impl Basemap {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "outline",
            Self::High => "detailed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    StoreId,
    MetroId,
    ZoneId,
    City,
    State,
}

impl SearchField {
    pub const ALL: [Self; 5] = [
        Self::StoreId,
        Self::MetroId,
        Self::ZoneId,
        Self::City,
        Self::State,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::StoreId => "Store ID",
            Self::MetroId => "Metro ID",
            Self::ZoneId => "Zone ID",
            Self::City => "City",
            Self::State => "State",
        }
    }

    pub const fn numeric(self) -> bool {
        matches!(self, Self::StoreId | Self::MetroId | Self::ZoneId)
    }
}

/// Raw text of the search form; parsed only when submitted.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub store_id: String,
    pub metro_id: String,
    pub zone_id: String,
    pub city: String,
    pub state: String,
    pub field_index: usize,
}

impl SearchForm {
    pub fn field(&self) -> SearchField {
        SearchField::ALL[self.field_index % SearchField::ALL.len()]
    }

    pub fn value(&self, field: SearchField) -> &str {
        match field {
            SearchField::StoreId => &self.store_id,
            SearchField::MetroId => &self.metro_id,
            SearchField::ZoneId => &self.zone_id,
            SearchField::City => &self.city,
            SearchField::State => &self.state,
        }
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.field() {
            SearchField::StoreId => &mut self.store_id,
            SearchField::MetroId => &mut self.metro_id,
            SearchField::ZoneId => &mut self.zone_id,
            SearchField::City => &mut self.city,
            SearchField::State => &mut self.state,
        }
    }

    pub fn to_filters(&self) -> Result<SearchFilters> {
        SearchFilters::from_form(
            &self.store_id,
            &self.metro_id,
            &self.zone_id,
            &self.city,
            &self.state,
        )
    }
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub session: Session,
    pub draw: DrawTool,
    pub search: SearchForm,
    pub prompt_input: String,
    pub status_message: String,
    pub status_is_error: bool,
    /// The status line describes a request that has not been answered yet.
    status_pending: bool,
    pub focused_result: usize,
    pub focused_shape: usize,
    pub basemap: Basemap,
    pub server_url: String,
    pub throbber_state: ThrobberState,
    pub last_frame: Instant,
    outbox: Vec<Ticket>,
    in_flight: usize,
}

impl App {
    pub fn new(session: Session, server_url: String) -> Self {
        Self {
            running: true,
            screen: AppScreen::Map,
            show_help: false,
            session,
            draw: DrawTool::default(),
            search: SearchForm::default(),
            prompt_input: String::new(),
            status_message: "Press F1 for help".to_string(),
            status_is_error: false,
            status_pending: false,
            focused_result: 0,
            focused_shape: 0,
            basemap: Basemap::default(),
            server_url,
            throbber_state: ThrobberState::default(),
            last_frame: Instant::now(),
            outbox: Vec::new(),
            in_flight: 0,
        }
    }

    /// Advances the spinner while requests are outstanding.
    pub fn update(&mut self) {
        if self.in_flight == 0 {
            return;
        }
        let now = Instant::now();
        if now.duration_since(self.last_frame) >= SPINNER_TICK {
            self.last_frame = now;
            self.throbber_state.calc_next();
        }
    }

    /// Queues a ticket for the dispatcher and shows `message` until a reply lands.
    pub fn queue(&mut self, ticket: Ticket, message: impl Into<String>) {
        debug!(seq = ticket.token.seq, "queued request");
        self.outbox.push(ticket);
        self.in_flight += 1;
        self.set_status(message);
        self.status_pending = true;
    }

    pub fn take_outbox(&mut self) -> Vec<Ticket> {
        std::mem::take(&mut self.outbox)
    }

    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let outcome = self.session.apply(completion);

        match &outcome {
            Outcome::Discarded { token } => {
                debug!(seq = token.seq, "stale response ignored");
                if self.in_flight == 0 && self.status_pending {
                    self.set_status(IDLE_STATUS);
                }
                return;
            }
            Outcome::Rendered { .. } | Outcome::Selected { .. } => self.focused_result = 0,
            Outcome::Submitted { .. } => {
                if self.screen == AppScreen::Submit {
                    self.screen = AppScreen::Map;
                }
            }
            Outcome::Failed(_) => {}
        }

        self.status_message = outcome.summary();
        self.status_is_error = outcome.is_failure();
        self.status_pending = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
        self.status_pending = false;
    }

    pub fn set_error(&mut self, error: impl Display) {
        self.status_message = format!("Error: {error}");
        self.status_is_error = true;
        self.status_pending = false;
    }

    /// The crosshair sits at the viewport center.
    pub const fn cursor(&self) -> LatLng {
        self.session.viewport().center()
    }

    pub fn focused_layer(&self) -> Option<&Layer> {
        self.session.store().layers().get(self.focused_result)
    }

    /// One editing step in degrees of (latitude, longitude).
    pub fn move_step(&self) -> (f64, f64) {
        let (lat_span, lng_span) = self.session.viewport().span();
        (lat_span * MOVE_STEP, lng_span * MOVE_STEP)
    }
}
