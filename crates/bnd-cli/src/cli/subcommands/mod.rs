mod config;
mod download;
mod modality;
mod rename;
mod sessions;
mod upload;
mod validate;

pub use config::ConfigCommands;
pub use download::DownloadCommands;
pub use modality::{ModalityFlags, RenameFlags};
pub use rename::RenameCommands;
pub use sessions::SessionsCommands;
pub use upload::UploadCommands;
pub use validate::ValidateCommands;
