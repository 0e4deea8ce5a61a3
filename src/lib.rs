pub mod app;
pub mod config;
pub mod dates;
pub mod dom;
pub mod errors;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod normalize;
pub mod pages;
pub mod shell;
pub mod state;
pub mod storage;

pub use app::router;
pub use config::SiteConfig;
pub use state::AppState;
pub use storage::DataSource;
