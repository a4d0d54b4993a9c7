// Editing session for geofence polygons.
// Keeps the selected record, the rendered results and the drawn shapes in step
// while lookups and submissions complete in any order.

pub mod dispatch;
pub mod layers;
pub mod navigation;
pub mod selection;
pub mod sequence;
pub mod submission;
pub mod viewport;

pub use dispatch::{execute, Dispatcher};
pub use layers::{DrawnItems, DrawnShape, GeometryStore, Layer, LayerId, ShapeId};
pub use selection::{CurrentRecord, Selection};
pub use sequence::{RequestClass, RequestToken, ResponseOrdering, Sequencer};
pub use submission::{DrawEvent, SubmitForm};
pub use viewport::Viewport;

use crate::api::InsertPolygon;
use crate::domain::{Feature, SearchFilters};
use crate::error::{EditorError, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Find(SearchFilters),
    FindById(i64),
    Submit(InsertPolygon),
}

impl Request {
    pub const fn class(&self) -> RequestClass {
        match self {
            Self::Find(_) | Self::FindById(_) => RequestClass::Query,
            Self::Submit(_) => RequestClass::Submit,
        }
    }
}

/// A request the session wants sent, stamped with its sequence token.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub token: RequestToken,
    pub request: Request,
}

#[derive(Debug)]
pub enum Response {
    Found(Vec<Feature>),
    FoundById { id: i64, features: Vec<Feature> },
    Submitted { id: i64, reply: Value },
}

#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub result: Result<Response>,
}

/// What applying a completion did, for the notification line.
#[derive(Debug)]
pub enum Outcome {
    Rendered { features: usize },
    Selected { id: i64, polygon: bool },
    Submitted { id: i64 },
    Discarded { token: RequestToken },
    Failed(EditorError),
}

impl Outcome {
    pub fn summary(&self) -> String {
        match self {
            Self::Rendered { features: 0 } => "No matching records".to_string(),
            Self::Rendered { features: 1 } => "Found 1 record".to_string(),
            Self::Rendered { features } => format!("Found {features} records"),
            Self::Selected { id, polygon: true } => format!("Record {id} (with polygon)"),
            Self::Selected { id, polygon: false } => format!("Record {id}"),
            Self::Submitted { id } => format!("Polygon saved for record {id}"),
            Self::Discarded { token } => format!("Ignored stale response #{}", token.seq),
            Self::Failed(error) => format!("Error: {error}"),
        }
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Default)]
pub struct Session {
    selection: Selection,
    store: GeometryStore,
    drawn: DrawnItems,
    viewport: Viewport,
    sequencer: Sequencer,
    ordering: ResponseOrdering,
    form: Option<SubmitForm>,
}

impl Session {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn store(&self) -> &GeometryStore {
        &self.store
    }

    pub const fn drawn(&self) -> &DrawnItems {
        &self.drawn
    }

    pub fn drawn_mut(&mut self) -> &mut DrawnItems {
        &mut self.drawn
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub const fn form(&self) -> Option<&SubmitForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut SubmitForm> {
        self.form.as_mut()
    }

    fn issue(&mut self, request: Request) -> Ticket {
        let token = self.sequencer.issue(request.class());
        debug!(seq = token.seq, ?request, "issuing request");
        Ticket { token, request }
    }

    /// Applies a completed request. Failures and stale replies leave every slot untouched.
    pub fn apply(&mut self, completion: Completion) -> Outcome {
        let Completion { token, result } = completion;

        if self.ordering == ResponseOrdering::LatestWins && !self.sequencer.is_latest(token) {
            debug!(
                seq = token.seq,
                latest = self.sequencer.latest(token.class),
                "discarding stale response"
            );
            return Outcome::Discarded { token };
        }

        match result {
            Err(error) => {
                warn!(seq = token.seq, %error, "request failed");
                Outcome::Failed(error)
            }
            Ok(Response::Found(features)) => self.render_results(features),
            Ok(Response::FoundById { id, features }) => self.render_record(id, features),
            Ok(Response::Submitted { id, reply }) => {
                info!(id, %reply, "polygon submitted");
                self.form = None;
                Outcome::Submitted { id }
            }
        }
    }
}
