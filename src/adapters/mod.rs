pub mod http;
pub mod storage;
pub mod summary;

pub use http::SteaClient;
pub use storage::LocalStorage;
pub use summary::SummaryCase;
