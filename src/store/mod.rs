pub mod flash;
pub mod link_store;
mod resolver;
pub mod user_directory;

pub use flash::{FlashLevel, FlashMessage, FlashQueue};
pub use link_store::{LinkStore, LinkSummary};
pub use user_directory::UserDirectory;
