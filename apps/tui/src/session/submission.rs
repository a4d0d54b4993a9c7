use crate::api::InsertPolygon;
use crate::domain::{parse_form_int, Geometry};
use crate::error::{EditorError, Result};
use crate::session::layers::ShapeId;
use crate::session::{Request, Session, Ticket};
use tracing::{debug, info};

/// The popup form shown after drawing or editing a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitForm {
    pub id_input: String,
    pub name: String,
    pub shape: ShapeId,
}

/// Events emitted by the drawing tool.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    Created(Geometry),
    Edited { shape: ShapeId, geometry: Geometry },
}

impl Session {
    /// Records a drawn or edited shape as the submit candidate and opens the form.
    ///
    /// An edit of a shape the drawn layer no longer holds is kept as a new shape.
    pub fn on_draw(&mut self, event: DrawEvent) -> ShapeId {
        let (shape, geometry) = match event {
            DrawEvent::Created(geometry) => (self.drawn.add(geometry.clone()), geometry),
            DrawEvent::Edited { shape, geometry } => {
                if self.drawn.replace(shape, geometry.clone()) {
                    (shape, geometry)
                } else {
                    debug!(?shape, "edited shape is gone, adding it again");
                    (self.drawn.add(geometry.clone()), geometry)
                }
            }
        };

        debug!(kind = geometry.type_name(), "captured drawn geometry");
        self.selection.capture(geometry);
        self.open_form(shape);
        shape
    }

    /// Clicking a drawn shape makes it the submit candidate again.
    pub fn click_drawn(&mut self, shape: ShapeId) -> bool {
        let Some(geometry) = self.drawn.get(shape).map(|drawn| drawn.geometry.clone()) else {
            return false;
        };
        self.selection.capture(geometry);
        self.open_form(shape);
        true
    }

    /// Builds the insert request for the captured geometry.
    pub fn submit_polygon(&mut self, id_input: &str) -> Result<Ticket> {
        if id_input.trim().is_empty() {
            return Err(EditorError::InvalidNumber {
                field: "id",
                value: id_input.to_string(),
            });
        }
        let id = parse_form_int("id", id_input)?;
        let polygon = self
            .selection
            .selected_geometry()
            .cloned()
            .ok_or(EditorError::NothingDrawn)?;

        info!(id, kind = polygon.type_name(), "submitting polygon");
        Ok(self.issue(Request::Submit(InsertPolygon { id, polygon })))
    }

    /// Deletes a drawn shape. The captured geometry stays the submit candidate.
    pub fn remove_drawn(&mut self, shape: ShapeId) -> bool {
        if self.drawn.remove(shape).is_none() {
            return false;
        }
        if self.form.as_ref().is_some_and(|form| form.shape == shape) {
            self.form = None;
        }
        info!(?shape, remaining = self.drawn.shapes().len(), "removed drawn shape");
        true
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    fn open_form(&mut self, shape: ShapeId) {
        let (id_input, name) = self
            .selection
            .current()
            .map(|current| (current.id.to_string(), current.name.clone()))
            .unwrap_or_default();
        self.form = Some(SubmitForm {
            id_input,
            name,
            shape,
        });
    }
}
