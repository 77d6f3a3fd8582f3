pub mod cli;
pub mod config;
pub mod host;
pub mod logging;
pub mod store;
pub mod tui;
pub mod utils;
pub mod widget;

pub use config::Config;
pub use host::{FieldFile, HostBinding, MemoryField};
pub use store::{Tag, TagId, TagStore, Visibility};
pub use utils::Profile;
pub use widget::{InputEvent, Outcome, TagWidget};
