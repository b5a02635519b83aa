pub mod api;
pub mod error;
pub mod http;
pub mod itinerary;
pub mod preferences;
pub mod session;
pub mod storage;
pub mod token;
pub mod token_store;

pub use error::{Error, Result};
pub use http::ApiClient;
pub use itinerary::ScheduleBoard;
pub use preferences::Preferences;
pub use reqwest::StatusCode;
pub use session::{Navigator, Session, SessionState};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use token::Identity;
pub use token_store::TokenStore;
