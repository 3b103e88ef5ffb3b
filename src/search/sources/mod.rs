mod app_local;
mod duckduckgo;
mod google;
mod wikipedia;

pub use app_local::AppLocalSource;
pub use duckduckgo::DuckDuckGoSource;
pub use google::GoogleSource;
pub use wikipedia::WikipediaSource;
