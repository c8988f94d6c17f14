pub mod api;
pub mod session;

pub use api::ApiClient;
pub use session::{MemoryTokenStore, SessionHolder, TokenStore};
