use crate::domain::{Feature, LatLng, SearchFilters};
use crate::error::{EditorError, Result};
use crate::session::layers::LayerId;
use crate::session::viewport::{DEFAULT_CENTER, DEFAULT_ZOOM, FLY_TO_ZOOM, RECORD_ZOOM};
use crate::session::{Outcome, Request, Session, Ticket};
use tracing::{info, warn};

impl Session {
    /// Searches by filters. The current record is left alone.
    pub fn find(&mut self, filters: SearchFilters) -> Ticket {
        self.issue(Request::Find(filters))
    }

    pub fn find_by_id(&mut self, id: i64) -> Ticket {
        self.issue(Request::FindById(id))
    }

    /// Steps to the record after the current one, or to record 1 when nothing is selected.
    ///
    /// The viewport moves to the previous record right away; the lookup recenters
    /// again when (and if) its reply is applied.
    pub fn next(&mut self) -> Ticket {
        let target = self.selection.next_target();
        let previous = self.selection.current().map(|current| current.position);

        let ticket = self.find_by_id(target);
        if let Some(position) = previous {
            self.viewport.recenter(position, RECORD_ZOOM);
        }
        ticket
    }

    /// Steps back one record. At record 1 (or with nothing selected) record 1 is fetched again.
    pub fn prev(&mut self) -> Ticket {
        let target = self.selection.prev_target();
        let previous = self
            .selection
            .current()
            .filter(|current| current.id > 1)
            .map(|current| current.position);

        let ticket = self.find_by_id(target);
        if let Some(position) = previous {
            self.viewport.recenter(position, RECORD_ZOOM);
        }
        ticket
    }

    /// Click on a rendered result. Returns the id of the record now selected.
    pub fn click(&mut self, layer: LayerId) -> Option<i64> {
        let record = self
            .store
            .get(layer)
            .filter(|layer| layer.clickable)
            .and_then(|layer| layer.feature.properties.clone())?;

        self.viewport.recenter(record.position(), RECORD_ZOOM);
        self.selection.select(&record);
        Some(record.id)
    }

    /// Flies to typed coordinates and moves the single marker there.
    pub fn fly_to(&mut self, input: &str) -> Result<LatLng> {
        let target = LatLng::parse(input)?;
        self.viewport.recenter(target, FLY_TO_ZOOM);
        if let Some(replaced) = self.selection.place_marker(target) {
            info!(lat = replaced.lat, lng = replaced.lng, "removed previous marker");
        }
        Ok(target)
    }

    pub(crate) fn render_results(&mut self, features: Vec<Feature>) -> Outcome {
        self.store.clear();
        self.store.add_features(features);
        self.viewport.recenter(DEFAULT_CENTER, DEFAULT_ZOOM);
        info!(count = self.store.len(), "rendered search results");
        Outcome::Rendered {
            features: self.store.len(),
        }
    }

    pub(crate) fn render_record(&mut self, requested: i64, features: Vec<Feature>) -> Outcome {
        let Some(record) = features.first().map(|feature| feature.properties.clone()) else {
            return Outcome::Failed(EditorError::RecordNotFound(requested));
        };

        self.store.clear();
        self.store.add_features(features);

        let Some(record) = record else {
            warn!(requested, "lookup returned a feature without properties");
            return Outcome::Rendered {
                features: self.store.len(),
            };
        };

        self.selection.select(&record);
        self.viewport.recenter(record.position(), RECORD_ZOOM);

        let polygon = match record.embedded_polygon() {
            Ok(Some(geometry)) => {
                self.store
                    .add_feature(Feature::new(Some(record.clone()), Some(geometry)));
                true
            }
            Ok(None) => false,
            Err(error) => {
                warn!(%error, "skipping embedded polygon");
                false
            }
        };

        Outcome::Selected {
            id: record.id,
            polygon,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Feature, Geometry, LatLng, SearchFilters};
    use crate::session::tests::{feature, record};
    use crate::session::viewport::{DEFAULT_CENTER, DEFAULT_ZOOM, FLY_TO_ZOOM, RECORD_ZOOM};
    use crate::session::{Completion, Outcome, Request, Response, Session, Ticket};

    fn answer_lookup(session: &mut Session, ticket: &Ticket, features: Vec<Feature>) -> Outcome {
        let Request::FindById(id) = &ticket.request else {
            panic!("expected a lookup, got {:?}", ticket.request);
        };
        session.apply(Completion {
            token: ticket.token,
            result: Ok(Response::FoundById { id: *id, features }),
        })
    }

    fn answer_search(session: &mut Session, ticket: &Ticket, features: Vec<Feature>) -> Outcome {
        session.apply(Completion {
            token: ticket.token,
            result: Ok(Response::Found(features)),
        })
    }

    #[test]
    fn next_after_lookup_requests_following_id() {
        for id in [1, 2, 57, 1_000] {
            let mut session = Session::default();
            let ticket = session.find_by_id(id);
            answer_lookup(&mut session, &ticket, vec![feature(id, 30.0, -97.0)]);

            assert_eq!(session.next().request, Request::FindById(id + 1));
        }
    }

    #[test]
    fn prev_at_first_record_refetches_it() {
        let mut session = Session::default();
        let ticket = session.find_by_id(1);
        answer_lookup(&mut session, &ticket, vec![feature(1, 30.0, -97.0)]);

        assert_eq!(session.prev().request, Request::FindById(1));
    }

    #[test]
    fn prev_steps_back() {
        let mut session = Session::default();
        let ticket = session.find_by_id(8);
        answer_lookup(&mut session, &ticket, vec![feature(8, 30.0, -97.0)]);

        assert_eq!(session.prev().request, Request::FindById(7));
    }

    #[test]
    fn fresh_session_starts_at_first_record() {
        let mut session = Session::default();
        assert_eq!(session.next().request, Request::FindById(1));

        let mut session = Session::default();
        assert_eq!(session.prev().request, Request::FindById(1));
        assert_eq!(session.viewport().recenters(), 0);
    }

    #[test]
    fn next_recenters_on_previous_record_immediately() {
        let mut session = Session::default();
        let ticket = session.find_by_id(4);
        answer_lookup(&mut session, &ticket, vec![feature(4, 12.5, 45.25)]);
        let before = session.viewport().recenters();

        session.next();

        assert_eq!(session.viewport().recenters(), before + 1);
        assert_eq!(session.viewport().center(), LatLng::new(12.5, 45.25));
        assert_eq!(session.viewport().zoom(), RECORD_ZOOM);
    }

    #[test]
    fn search_replaces_results_and_keeps_current() {
        let mut session = Session::default();
        let lookup = session.find_by_id(3);
        answer_lookup(&mut session, &lookup, vec![feature(3, 1.0, 1.0)]);

        let search = session.find(SearchFilters::default());
        let outcome = answer_search(
            &mut session,
            &search,
            vec![feature(10, 2.0, 2.0), feature(11, 3.0, 3.0)],
        );

        assert!(matches!(outcome, Outcome::Rendered { features: 2 }));
        let ids: Vec<_> = session.store().features().filter_map(Feature::record_id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(session.selection().current().map(|c| c.id), Some(3));
        assert_eq!(session.viewport().center(), DEFAULT_CENTER);
        assert_eq!(session.viewport().zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn lookup_replaces_results_and_overlays_polygon() {
        let mut session = Session::default();
        let search = session.find(SearchFilters::default());
        answer_search(
            &mut session,
            &search,
            vec![feature(10, 2.0, 2.0), feature(11, 3.0, 3.0)],
        );

        let mut with_polygon = record(6, 30.0, -97.0);
        with_polygon.polygon = Some(
            r#"{"type":"Polygon","coordinates":[[[-97.1,30.0],[-97.0,30.1],[-96.9,30.0],[-97.1,30.0]]]}"#
                .to_string(),
        );
        let point = Feature::new(Some(with_polygon.clone()), Some(Geometry::Point([-97.0, 30.0])));

        let lookup = session.find_by_id(6);
        let outcome = answer_lookup(&mut session, &lookup, vec![point]);

        assert!(matches!(outcome, Outcome::Selected { id: 6, polygon: true }));
        let layers = session.store().layers();
        assert_eq!(layers.len(), 2);
        assert!(layers.iter().all(|layer| layer.feature.record_id() == Some(6)));
        assert_eq!(
            layers[1].feature.geometry.as_ref().map(Geometry::type_name),
            Some("Polygon")
        );
        assert_eq!(layers[1].feature.properties.as_ref(), Some(&with_polygon));
        assert_eq!(session.viewport().center(), LatLng::new(30.0, -97.0));
        assert_eq!(session.viewport().zoom(), RECORD_ZOOM);
    }

    #[test]
    fn broken_embedded_polygon_still_selects_record() {
        let mut session = Session::default();
        let mut broken = record(2, 1.0, 1.0);
        broken.polygon = Some("{oops".to_string());

        let lookup = session.find_by_id(2);
        let outcome = answer_lookup(
            &mut session,
            &lookup,
            vec![Feature::new(Some(broken), Some(Geometry::Point([1.0, 1.0])))],
        );

        assert!(matches!(outcome, Outcome::Selected { id: 2, polygon: false }));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn click_selects_exact_feature_and_recenters() {
        let mut session = Session::default();
        let search = session.find(SearchFilters {
            store_id: 12,
            ..SearchFilters::default()
        });
        answer_search(
            &mut session,
            &search,
            vec![feature(21, 2.0, 2.0), feature(35, 3.5, -4.5)],
        );

        let second = session.store().layers()[1].id;
        assert_eq!(session.click(second), Some(35));
        assert_eq!(session.selection().current().map(|c| c.id), Some(35));
        assert_eq!(session.viewport().center(), LatLng::new(3.5, -4.5));
        assert_eq!(session.viewport().zoom(), RECORD_ZOOM);

        assert_eq!(session.next().request, Request::FindById(36));
    }

    #[test]
    fn clicking_feature_without_properties_changes_nothing() {
        let mut session = Session::default();
        let search = session.find(SearchFilters::default());
        answer_search(
            &mut session,
            &search,
            vec![Feature::new(None, Some(Geometry::Point([0.0, 0.0])))],
        );
        let recenters = session.viewport().recenters();

        let layer = session.store().layers()[0].id;
        assert_eq!(session.click(layer), None);
        assert!(session.selection().current().is_none());
        assert_eq!(session.viewport().recenters(), recenters);
    }

    #[test]
    fn fly_to_replaces_marker() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        session.fly_to("40.0,-75.0")?;
        session.fly_to("41.5, -74.0")?;

        assert_eq!(session.selection().marker(), Some(LatLng::new(41.5, -74.0)));
        assert_eq!(session.viewport().zoom(), FLY_TO_ZOOM);

        let recenters = session.viewport().recenters();
        assert!(session.fly_to("north,east").is_err());
        assert_eq!(session.viewport().recenters(), recenters);
        assert_eq!(session.selection().marker(), Some(LatLng::new(41.5, -74.0)));
        Ok(())
    }
}
