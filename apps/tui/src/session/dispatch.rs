use crate::api::Transport;
use crate::error::Result;
use crate::session::{Completion, Request, Response, Ticket};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Runs a request against the backend without touching any session state.
pub async fn execute<T: Transport + ?Sized>(transport: &T, request: Request) -> Result<Response> {
    match request {
        Request::Find(filters) => transport.find(&filters).await.map(Response::Found),
        Request::FindById(id) => transport
            .find_by_id(id)
            .await
            .map(|features| Response::FoundById { id, features }),
        Request::Submit(insert) => transport
            .insert_polygon(&insert)
            .await
            .map(|reply| Response::Submitted {
                id: insert.id,
                reply,
            }),
    }
}

/// Sends tickets on background tasks. Completions come back on one channel,
/// so the owner of the session applies them one at a time.
pub struct Dispatcher<T: Transport> {
    transport: Arc<T>,
    completions: UnboundedSender<Completion>,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> (Self, UnboundedReceiver<Completion>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        (
            Self {
                transport: Arc::new(transport),
                completions,
            },
            receiver,
        )
    }

    pub fn dispatch(&self, ticket: Ticket) {
        let transport = Arc::clone(&self.transport);
        let completions = self.completions.clone();
        let Ticket { token, request } = ticket;
        debug!(seq = token.seq, "dispatching request");

        tokio::spawn(async move {
            let result = execute(transport.as_ref(), request).await;
            if completions.send(Completion { token, result }).is_err() {
                warn!(seq = token.seq, "completion dropped, receiver is gone");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InsertPolygon;
    use crate::domain::{Feature, Geometry, SearchFilters};
    use crate::error::EditorError;
    use crate::session::tests::feature;
    use crate::session::{Outcome, ResponseOrdering, Session};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// Lookups for gated ids wait until the test releases them.
    #[derive(Default)]
    struct GatedTransport {
        gates: Mutex<HashMap<i64, oneshot::Receiver<()>>>,
    }

    impl GatedTransport {
        fn gate(&self, id: i64) -> Option<oneshot::Sender<()>> {
            let (release, wait) = oneshot::channel();
            self.gates.lock().ok()?.insert(id, wait);
            Some(release)
        }
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn find(&self, _filters: &SearchFilters) -> Result<Vec<Feature>> {
            Ok(vec![feature(1, 1.0, 1.0)])
        }

        async fn find_by_id(&self, id: i64) -> Result<Vec<Feature>> {
            let gate = self.gates.lock().ok().and_then(|mut gates| gates.remove(&id));
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if id == 404 {
                return Err(EditorError::RecordNotFound(id));
            }
            Ok(vec![feature(id, 30.0, -97.0)])
        }

        async fn insert_polygon(&self, request: &InsertPolygon) -> Result<Value> {
            Ok(json!({"inserted": request.id}))
        }
    }

    #[tokio::test]
    async fn execute_maps_requests_to_responses() {
        let transport = GatedTransport::default();

        let found = execute(&transport, Request::Find(SearchFilters::default())).await;
        assert!(matches!(found, Ok(Response::Found(features)) if features.len() == 1));

        let missing = execute(&transport, Request::FindById(404)).await;
        assert!(matches!(missing, Err(EditorError::RecordNotFound(404))));

        let submitted = execute(
            &transport,
            Request::Submit(InsertPolygon {
                id: 9,
                polygon: Geometry::Point([0.0, 0.0]),
            }),
        )
        .await;
        assert!(matches!(submitted, Ok(Response::Submitted { id: 9, .. })));
    }

    #[tokio::test]
    async fn late_reply_to_older_lookup_is_discarded() {
        let transport = GatedTransport::default();
        let Some(release_slow) = transport.gate(1) else {
            panic!("gate lock poisoned");
        };
        let (dispatcher, mut completions) = Dispatcher::new(transport);
        let mut session = Session::new(ResponseOrdering::LatestWins);

        dispatcher.dispatch(session.find_by_id(1));
        dispatcher.dispatch(session.find_by_id(2));

        let Some(fast) = completions.recv().await else {
            panic!("channel closed");
        };
        assert!(matches!(session.apply(fast), Outcome::Selected { id: 2, .. }));

        let _ = release_slow.send(());
        let Some(slow) = completions.recv().await else {
            panic!("channel closed");
        };
        assert!(matches!(session.apply(slow), Outcome::Discarded { .. }));
        assert_eq!(session.selection().current().map(|c| c.id), Some(2));
    }

    #[tokio::test]
    async fn arrival_order_lets_the_late_reply_win() {
        let transport = GatedTransport::default();
        let Some(release_slow) = transport.gate(1) else {
            panic!("gate lock poisoned");
        };
        let (dispatcher, mut completions) = Dispatcher::new(transport);
        let mut session = Session::new(ResponseOrdering::Arrival);

        dispatcher.dispatch(session.find_by_id(1));
        dispatcher.dispatch(session.find_by_id(2));

        if let Some(fast) = completions.recv().await {
            session.apply(fast);
        }
        let _ = release_slow.send(());
        if let Some(slow) = completions.recv().await {
            session.apply(slow);
        }

        assert_eq!(session.selection().current().map(|c| c.id), Some(1));
    }
}
