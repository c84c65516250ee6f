//! Track definitions and the repository that serves them

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ChargenError, Result};
use crate::track::TrackId;

/// Track table shipped with the crate
const BUILTIN_TRACKS: &str = include_str!("../../data/tracks.json");

/// Target a yearly survival roll must meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSurvivability", into = "RawSurvivability")]
pub enum Survivability {
    Fixed(i32),
    /// Rolled when the track is taken (d8, rerolling fives)
    Rolled,
}

/// Wire form: an integer, or the string "rolled"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSurvivability {
    Fixed(i32),
    Keyword(String),
}

impl TryFrom<RawSurvivability> for Survivability {
    type Error = String;

    fn try_from(raw: RawSurvivability) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawSurvivability::Fixed(target) => Ok(Survivability::Fixed(target)),
            RawSurvivability::Keyword(word) if word.trim().eq_ignore_ascii_case("rolled") => {
                Ok(Survivability::Rolled)
            }
            RawSurvivability::Keyword(word) => Err(format!(
                "survivability must be an integer or \"rolled\", got \"{}\"",
                word
            )),
        }
    }
}

impl From<Survivability> for RawSurvivability {
    fn from(value: Survivability) -> Self {
        match value {
            Survivability::Fixed(target) => RawSurvivability::Fixed(target),
            Survivability::Rolled => RawSurvivability::Keyword("rolled".to_string()),
        }
    }
}

/// One row of the track table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDefinition {
    pub id: TrackId,
    /// Human-readable acceptance requirements
    pub requirements: String,
    pub survivability: Survivability,
    /// Skills by table position; the first two are the starting skills
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TrackDocument {
    tracks: Vec<TrackDefinition>,
}

type TrackTable = AHashMap<TrackId, Arc<TrackDefinition>>;

/// Where a repository reads its table from
#[derive(Debug, Clone)]
enum TrackSource {
    Builtin,
    File(PathBuf),
    Inline(String),
    Definitions(Vec<TrackDefinition>),
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSource::Builtin => write!(f, "builtin"),
            TrackSource::File(path) => write!(f, "{}", path.display()),
            TrackSource::Inline(_) => write!(f, "inline json"),
            TrackSource::Definitions(_) => write!(f, "definitions"),
        }
    }
}

impl TrackSource {
    fn read(&self) -> Result<Vec<TrackDefinition>> {
        match self {
            TrackSource::Builtin => parse_document(BUILTIN_TRACKS),
            TrackSource::File(path) => parse_document(&std::fs::read_to_string(path)?),
            TrackSource::Inline(json) => parse_document(json),
            TrackSource::Definitions(definitions) => Ok(definitions.clone()),
        }
    }
}

fn parse_document(json: &str) -> Result<Vec<TrackDefinition>> {
    let document: TrackDocument = serde_json::from_str(json)?;
    Ok(document.tracks)
}

/// Check a table is complete and build the lookup map
fn build_table(definitions: Vec<TrackDefinition>) -> Result<TrackTable> {
    let mut table = TrackTable::with_capacity(TrackId::ALL.len());

    for definition in definitions {
        if definition.skills.is_empty() {
            return Err(ChargenError::InvalidTrackData(format!(
                "track {} has no skills",
                definition.id
            )));
        }
        let id = definition.id;
        if table.insert(id, Arc::new(definition)).is_some() {
            return Err(ChargenError::InvalidTrackData(format!(
                "track {} is defined more than once",
                id
            )));
        }
    }

    if let Some(missing) = TrackId::ALL.iter().find(|id| !table.contains_key(*id)) {
        return Err(ChargenError::InvalidTrackData(format!(
            "track {} is missing from the table",
            missing
        )));
    }

    Ok(table)
}

/// Read-only track table with an explicit reload.
///
/// Construct once and share (it is `Send + Sync`); `reload` swaps the whole
/// table at once, so readers see either the old or the new table.
#[derive(Debug)]
pub struct TrackRepository {
    source: TrackSource,
    tracks: RwLock<Arc<TrackTable>>,
}

impl TrackRepository {
    fn from_source(source: TrackSource) -> Result<Self> {
        let table = build_table(source.read()?)?;
        tracing::info!(source = %source, tracks = table.len(), "loaded track table");
        Ok(Self {
            source,
            tracks: RwLock::new(Arc::new(table)),
        })
    }

    /// The table compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_source(TrackSource::Builtin)
    }

    /// Load a table from a JSON file; `reload` re-reads the same file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_source(TrackSource::File(path.as_ref().to_path_buf()))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_source(TrackSource::Inline(json.to_string()))
    }

    pub fn from_definitions(definitions: Vec<TrackDefinition>) -> Result<Self> {
        Self::from_source(TrackSource::Definitions(definitions))
    }

    /// Re-read the source. On failure the current table stays in place.
    pub fn reload(&self) -> Result<()> {
        let table = build_table(self.source.read()?)?;
        let count = table.len();
        *self.tracks.write() = Arc::new(table);
        tracing::info!(source = %self.source, tracks = count, "reloaded track table");
        Ok(())
    }

    pub fn get(&self, id: TrackId) -> Result<Arc<TrackDefinition>> {
        self.tracks
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| ChargenError::TrackNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tracks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of the backing file, if the table came from disk
    pub fn source_path(&self) -> Option<&Path> {
        match &self.source {
            TrackSource::File(path) => Some(path),
            _ => None,
        }
    }
}
