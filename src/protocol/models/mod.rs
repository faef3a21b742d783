pub mod audio;
pub mod common;
pub mod session;
pub mod tools;

pub use audio::TurnDetection;
pub use common::{DEFAULT_MODEL, JsonSchema, Modality, Voice};
pub use session::{ClientSecret, SessionConfig, SessionCreated};
pub use tools::Tool;
