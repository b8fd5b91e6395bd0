mod auth;
mod state;
mod store;

pub use auth::OAUTH_STATE_KEY;
pub use auth::RETURN_URL_KEY;
pub use auth::TOKEN_KEY;
pub use auth::TOKEN_TIMESTAMP_KEY;
pub use auth::TokenManager;
pub use state::PipelineState;
pub use store::FileStore;
