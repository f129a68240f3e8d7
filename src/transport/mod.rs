mod discovery;
mod http;
pub mod pkt;

pub use discovery::{discover, fetch_pack, RemoteHead};
pub use http::HttpClient;
