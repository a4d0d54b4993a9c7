pub mod http;
pub mod models;
pub mod transport;

pub use http::HttpTransport;
pub use models::InsertPolygon;
pub use transport::Transport;
