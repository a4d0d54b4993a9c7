use geofence_editor::domain::{Geometry, LatLng};
use geofence_editor::session::{DrawEvent, ShapeId};
use std::fmt;

/// Fewest vertices that make a polygon.
pub const MIN_VERTICES: usize = 3;

// States of the drawing tool
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing {
        vertices: Vec<LatLng>,
    },
    Editing {
        shape: ShapeId,
        geometry: Geometry,
    },
}

impl fmt::Display for DrawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Drawing { vertices } => write!(f, "Drawing({} vertices)", vertices.len()),
            Self::Editing { shape, .. } => write!(f, "Editing({shape:?})"),
        }
    }
}

// Inputs the map screen feeds the drawing tool
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInput {
    Start,
    Vertex(LatLng),
    Undo,
    Edit { shape: ShapeId, geometry: Geometry },
    Move { d_lat: f64, d_lng: f64 },
    Finish,
    Cancel,
}

impl fmt::Display for DrawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Vertex(at) => write!(f, "Vertex({:.5},{:.5})", at.lat, at.lng),
            Self::Undo => write!(f, "Undo"),
            Self::Edit { shape, .. } => write!(f, "Edit({shape:?})"),
            Self::Move { d_lat, d_lng } => write!(f, "Move({d_lat:.5},{d_lng:.5})"),
            Self::Finish => write!(f, "Finish"),
            Self::Cancel => write!(f, "Cancel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawTransitionError {
    from: String,
    input: String,
    reason: Option<&'static str>,
}

impl DrawTransitionError {
    fn new(from: &DrawState, input: &DrawInput) -> Self {
        Self {
            from: from.to_string(),
            input: input.to_string(),
            reason: None,
        }
    }

    fn because(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }
}

impl fmt::Display for DrawTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(reason) => write!(f, "{reason}"),
            None => write!(f, "Invalid transition from {} with {}", self.from, self.input),
        }
    }
}

impl std::error::Error for DrawTransitionError {}

// Result of one transition: the next state and the event handed to the session, if any
struct Transition {
    next: DrawState,
    emitted: Option<DrawEvent>,
}

impl Transition {
    const fn to(next: DrawState) -> Self {
        Self {
            next,
            emitted: None,
        }
    }

    const fn emit(next: DrawState, event: DrawEvent) -> Self {
        Self {
            next,
            emitted: Some(event),
        }
    }
}

impl TryFrom<(&DrawState, DrawInput)> for Transition {
    type Error = DrawTransitionError;

    fn try_from(value: (&DrawState, DrawInput)) -> Result<Self, Self::Error> {
        let (current, input) = value;

        match (current, input) {
            (DrawState::Idle, DrawInput::Start) => Ok(Self::to(DrawState::Drawing {
                vertices: Vec::new(),
            })),
            (DrawState::Idle, DrawInput::Edit { shape, geometry }) => {
                Ok(Self::to(DrawState::Editing { shape, geometry }))
            }
            (DrawState::Drawing { vertices }, DrawInput::Vertex(at)) => {
                let mut vertices = vertices.clone();
                vertices.push(at);
                Ok(Self::to(DrawState::Drawing { vertices }))
            }
            (DrawState::Drawing { vertices }, DrawInput::Undo) => {
                let mut vertices = vertices.clone();
                vertices.pop();
                Ok(Self::to(DrawState::Drawing { vertices }))
            }
            (DrawState::Drawing { vertices }, input @ DrawInput::Finish) => {
                if vertices.len() < MIN_VERTICES {
                    return Err(DrawTransitionError::new(current, &input)
                        .because("A polygon needs at least 3 vertices"));
                }
                let polygon = Geometry::polygon_from_vertices(vertices);
                Ok(Self::emit(DrawState::Idle, DrawEvent::Created(polygon)))
            }
            (DrawState::Editing { shape, geometry }, DrawInput::Move { d_lat, d_lng }) => {
                let mut geometry = geometry.clone();
                geometry.translate(d_lat, d_lng);
                Ok(Self::to(DrawState::Editing {
                    shape: *shape,
                    geometry,
                }))
            }
            (DrawState::Editing { shape, geometry }, DrawInput::Finish) => Ok(Self::emit(
                DrawState::Idle,
                DrawEvent::Edited {
                    shape: *shape,
                    geometry: geometry.clone(),
                },
            )),
            (DrawState::Drawing { .. } | DrawState::Editing { .. }, DrawInput::Cancel) => {
                Ok(Self::to(DrawState::Idle))
            }
            (_, input) => Err(DrawTransitionError::new(current, &input)),
        }
    }
}

/// Polygon drawing and shape editing on the map screen.
#[derive(Debug, Default)]
pub struct DrawTool {
    state: DrawState,
}

impl DrawTool {
    pub const fn state(&self) -> &DrawState {
        &self.state
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self.state, DrawState::Idle)
    }

    /// Applies one input. On error the state is unchanged.
    pub fn process(&mut self, input: DrawInput) -> Result<Option<DrawEvent>, DrawTransitionError> {
        let transition = Transition::try_from((&self.state, input))?;
        self.state = transition.next;
        Ok(transition.emitted)
    }

    /// Geometry to preview while a shape is being drawn or moved.
    pub fn preview(&self) -> Option<Geometry> {
        match &self.state {
            DrawState::Idle => None,
            DrawState::Drawing { vertices } if vertices.is_empty() => None,
            DrawState::Drawing { vertices } => Some(Geometry::LineString(
                vertices.iter().map(|vertex| vertex.to_position()).collect(),
            )),
            DrawState::Editing { geometry, .. } => Some(geometry.clone()),
        }
    }

    pub const fn editing(&self) -> Option<ShapeId> {
        match &self.state {
            DrawState::Editing { shape, .. } => Some(*shape),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofence_editor::session::Session;

    fn drawn_shape() -> ShapeId {
        let mut session = Session::default();
        session.on_draw(DrawEvent::Created(Geometry::Point([0.0, 0.0])))
    }

    #[test]
    fn drawing_emits_closed_polygon() -> Result<(), DrawTransitionError> {
        let mut tool = DrawTool::default();
        tool.process(DrawInput::Start)?;
        tool.process(DrawInput::Vertex(LatLng::new(0.0, 0.0)))?;
        tool.process(DrawInput::Vertex(LatLng::new(0.0, 1.0)))?;
        tool.process(DrawInput::Vertex(LatLng::new(9.0, 9.0)))?;
        tool.process(DrawInput::Undo)?;
        tool.process(DrawInput::Vertex(LatLng::new(1.0, 1.0)))?;

        let emitted = tool.process(DrawInput::Finish)?;
        assert_eq!(
            emitted,
            Some(DrawEvent::Created(Geometry::Polygon(vec![vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [0.0, 0.0],
            ]])))
        );
        assert!(tool.is_idle());
        Ok(())
    }

    #[test]
    fn finishing_too_early_keeps_drawing() -> Result<(), DrawTransitionError> {
        let mut tool = DrawTool::default();
        tool.process(DrawInput::Start)?;
        tool.process(DrawInput::Vertex(LatLng::new(0.0, 0.0)))?;

        let error = tool.process(DrawInput::Finish);
        assert!(error.is_err());
        assert!(matches!(tool.state(), DrawState::Drawing { vertices } if vertices.len() == 1));
        Ok(())
    }

    #[test]
    fn editing_moves_the_shape() -> Result<(), DrawTransitionError> {
        let shape = drawn_shape();
        let mut tool = DrawTool::default();
        tool.process(DrawInput::Edit {
            shape,
            geometry: Geometry::Point([1.0, 2.0]),
        })?;
        assert_eq!(tool.editing(), Some(shape));

        tool.process(DrawInput::Move {
            d_lat: 0.5,
            d_lng: -1.0,
        })?;
        let emitted = tool.process(DrawInput::Finish)?;
        assert_eq!(
            emitted,
            Some(DrawEvent::Edited {
                shape,
                geometry: Geometry::Point([0.0, 2.5]),
            })
        );
        Ok(())
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut tool = DrawTool::default();
        assert!(tool.process(DrawInput::Finish).is_err());
        assert!(tool.process(DrawInput::Vertex(LatLng::new(0.0, 0.0))).is_err());
        assert!(tool.process(DrawInput::Cancel).is_err());
        assert!(tool.is_idle());
    }

    #[test]
    fn cancel_discards_the_draft() -> Result<(), DrawTransitionError> {
        let mut tool = DrawTool::default();
        tool.process(DrawInput::Start)?;
        tool.process(DrawInput::Vertex(LatLng::new(0.0, 0.0)))?;
        assert!(tool.preview().is_some());

        tool.process(DrawInput::Cancel)?;
        assert!(tool.is_idle());
        assert_eq!(tool.preview(), None);
        Ok(())
    }
}
