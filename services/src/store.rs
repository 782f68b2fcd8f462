use std::{
    collections::HashSet,
    fs::{
        self,
        File,
    },
    io::{
        BufReader,
        ErrorKind,
    },
    path::Path,
};

use log::{
    debug,
    info,
};
use spotify_history_core::{
    PlayKey,
    PlayRecord,
};

use crate::{
    Error,
    PersistenceSource,
    Result,
};

/// How many of the newest plays go into the latest file
pub const LATEST_LEN: usize = 100;


/// Result of folding freshly fetched plays into a history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Newest first, unique by [`PlayKey`]
    pub history: Vec<PlayRecord>,
    pub added: usize,
}

impl MergeOutcome {
    #[inline]
    pub fn latest(&self) -> &[PlayRecord] { latest(&self.history) }

    #[inline]
    pub fn total(&self) -> usize { self.history.len() }
}

#[inline]
pub fn latest(history: &[PlayRecord]) -> &[PlayRecord] { &history[..history.len().min(LATEST_LEN)] }

/// Reads a history file, failing if it does not exist
pub fn read_history(path: &Path) -> Result<Vec<PlayRecord>> {
    let rdr = File::open(path).map(BufReader::new).map_err(|e| Error::persistence(path, e))?;
    serde_json::from_reader(rdr).map_err(|e| Error::persistence(path, e))
}

/// Reads a history file, treating a missing file as an empty history
pub fn load_history(path: &Path) -> Result<Vec<PlayRecord>> {
    match read_history(path) {
        Err(Error::Persistence {
            source: PersistenceSource::Io(e),
            ..
        }) if e.kind() == ErrorKind::NotFound => {
            info!("No history at {}; starting fresh", path.display());
            Ok(Vec::new())
        },
        res => res,
    }
}

/// Epoch milliseconds of the newest play, used as the lower bound for the next fetch
pub fn cursor(history: &[PlayRecord]) -> Option<i64> { history.iter().map(|r| r.played_at.unix_millis()).max() }

/// Appends plays whose key is not already present, then sorts newest first.
///
/// The sort is stable so plays sharing a timestamp keep their merge order.
pub fn merge(existing: Vec<PlayRecord>, fresh: impl IntoIterator<Item = PlayRecord>) -> MergeOutcome {
    let mut keys: HashSet<PlayKey> = existing.iter().map(PlayRecord::key).collect();
    let mut history = existing;
    let before = history.len();

    history.extend(fresh.into_iter().filter(|r| keys.insert(r.key())));
    let added = history.len() - before;

    history.sort_by(|a, b| b.played_at.time().cmp(&a.played_at.time()));
    MergeOutcome { history, added }
}

/// Overwrites both the full history and the latest slice from the same snapshot
pub fn save_history(history_path: &Path, latest_path: &Path, history: &[PlayRecord]) -> Result<()> {
    write_json(history_path, history)?;
    write_json(latest_path, latest(history))?;
    info!("Wrote {} plays to {}", history.len(), history_path.display());
    Ok(())
}

fn write_json(path: &Path, records: &[PlayRecord]) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(records).map_err(|e| Error::persistence(path, e))?;
    buf.push(b'\n');

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::persistence(dir, e))?;
    }
    debug!("Writing {} bytes to {}", buf.len(), path.display());
    fs::write(path, buf).map_err(|e| Error::persistence(path, e))
}
