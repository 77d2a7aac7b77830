//! Command dispatch: bridges CLI args -> data layer calls -> output formatting.

pub mod config_cmd;
pub mod remote;
pub mod tasks;

use std::sync::Arc;

use taskdeck_core::{CollectionKind, DataLayer, FileBackend};
use tracing::debug;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Open the data layer over the file-backed task store.
pub fn open_layer(settings: &Settings) -> Result<DataLayer, CliError> {
    debug!(data_dir = %settings.data_dir.display(), "opening data layer");
    let backend = Arc::new(FileBackend::new(&settings.data_dir));
    Ok(DataLayer::init(settings.core.clone(), backend)?)
}

/// Dispatch a data-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, settings: &Settings) -> Result<(), CliError> {
    let mut layer = open_layer(settings)?;
    let result = match cmd {
        Command::Tasks(args) => tasks::handle(&mut layer, args, settings),
        Command::Users(args) => {
            remote::handle(&mut layer, CollectionKind::Users, args, settings).await
        }
        Command::Posts(args) => {
            remote::handle(&mut layer, CollectionKind::Posts, args, settings).await
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    };
    layer.dispose().await;
    result
}
