//! Save file handling

use std::path::PathBuf;

use tokio::{fs, io};

use atomix::error::WrappedErr;
use atomix::Snapshot;


/// Store keeping the player's current game in a file
///
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {path: path.into()}
    }

    /// Load the saved game, if any
    ///
    /// A missing save file is not an error.
    ///
    pub async fn load(&self) -> Result<Option<Snapshot>, WrappedErr> {
        match fs::read_to_string(&self.path).await {
            Ok(data) => Snapshot::decode(&data)
                .map(Some)
                .map_err(|e| WrappedErr::new("Could not decode save file", e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WrappedErr::new("Could not read save file", e)),
        }
    }

    /// Replace the saved game
    ///
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), WrappedErr> {
        let data = snapshot.encode().map_err(|e| WrappedErr::new("Could not encode game", e))?;
        fs::write(&self.path, data).await.map_err(|e| WrappedErr::new("Could not write save file", e))?;
        log::debug!("Saved game to {}", self.path.display());
        Ok(())
    }
}


#[cfg(test)]
mod tests;
