use crate::api::models::InsertPolygon;
use crate::domain::{Feature, SearchFilters};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The three backend operations the editor relies on.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// `POST /poly/find`
    async fn find(&self, filters: &SearchFilters) -> Result<Vec<Feature>>;

    /// `GET /poly/find/{id}`. An unknown id is `EditorError::RecordNotFound`.
    async fn find_by_id(&self, id: i64) -> Result<Vec<Feature>>;

    /// `POST /insert/poly`. The reply body is returned undecoded.
    async fn insert_polygon(&self, request: &InsertPolygon) -> Result<Value>;
}
