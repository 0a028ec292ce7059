//! Movie record model.
//!
//! A `MovieRecord` is what lives in each folder's `tags.json`. Core fields are
//! typed; anything else found in the file is carried in `extra` so it survives
//! a save and stays visible to the filter engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Sentinel for a field that is intentionally empty.
pub const SENTINEL: &str = "-";

/// Sentinel for an unparseable year.
pub const UNKNOWN_YEAR: &str = "unknown";

/// Name of the per-folder image directory.
pub const IMAGES_DIR: &str = "images";

/// Fixed poster file name inside the image directory.
pub const POSTER_FILE: &str = "poster.jpg";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

/// Release year, or the `unknown` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYear", into = "RawYear")]
pub enum Year {
    Known(u16),
    #[default]
    Unknown,
}

impl Year {
    /// The numeric year, if known.
    pub fn value(&self) -> Option<u16> {
        match self {
            Year::Known(y) => Some(*y),
            Year::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Year::Known(_))
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Year::Known(y) => write!(f, "{}", y),
            Year::Unknown => write!(f, "{}", UNKNOWN_YEAR),
        }
    }
}

/// On-disk shape of a year: an integer or a string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawYear {
    Number(u64),
    Text(String),
}

impl TryFrom<RawYear> for Year {
    type Error = String;

    fn try_from(raw: RawYear) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawYear::Number(n) => u16::try_from(n)
                .map(Year::Known)
                .map_err(|_| format!("year out of range: {}", n)),
            RawYear::Text(s) if s == UNKNOWN_YEAR => Ok(Year::Unknown),
            // Older files stored the year as a digit string.
            RawYear::Text(s) => s
                .trim()
                .parse::<u16>()
                .map(Year::Known)
                .map_err(|_| format!("invalid year: {:?}", s)),
        }
    }
}

impl From<Year> for RawYear {
    fn from(year: Year) -> Self {
        match year {
            Year::Known(y) => RawYear::Number(u64::from(y)),
            Year::Unknown => RawYear::Text(UNKNOWN_YEAR.to_string()),
        }
    }
}

/// Binary gender category attached to cast members.
///
/// TMDB code 2 maps to `Male`; every other code maps to `Female`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_provider_code(code: Option<u8>) -> Self {
        if code == Some(2) {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

/// A billed cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    /// Character played.
    #[serde(rename = "as", default)]
    pub role: String,
    pub gender: Gender,
}

/// Identifiers and references obtained from the metadata provider.
///
/// Present only once the search step has matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Provider (TMDB) movie id.
    pub id: u64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// External cross-reference (IMDB) id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
}

/// One catalogued movie folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    #[serde(default)]
    pub year: Year,
    #[serde(default = "sentinel")]
    pub resolution: String,
    pub path: PathBuf,
    #[serde(
        default,
        deserialize_with = "dash_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub director: Option<String>,
    #[serde(
        default,
        deserialize_with = "dash_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub screenplay: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "dash_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub cast: Option<Vec<CastMember>>,
    #[serde(
        rename = "api",
        default,
        deserialize_with = "dash_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_metadata: Option<ProviderMetadata>,
    /// Keys this crate does not model, kept as found.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn sentinel() -> String {
    SENTINEL.to_string()
}

/// Treat a missing value, `null` or `"-"` as unset.
fn dash_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s == SENTINEL => Ok(None),
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl MovieRecord {
    /// Create an unenriched record.
    pub fn new(title: impl Into<String>, year: Year, resolution: impl Into<String>, path: PathBuf) -> Self {
        Self {
            title: title.into(),
            year,
            resolution: resolution.into(),
            path,
            director: None,
            screenplay: None,
            cast: None,
            provider_metadata: None,
            extra: BTreeMap::new(),
        }
    }

    /// Provider id from a successful search, if any.
    pub fn provider_id(&self) -> Option<u64> {
        self.provider_metadata.as_ref().map(|m| m.id)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.path.join(IMAGES_DIR)
    }

    pub fn poster_path(&self) -> PathBuf {
        self.images_dir().join(POSTER_FILE)
    }

    pub fn has_poster(&self) -> bool {
        self.poster_path().is_file()
    }

    /// Image to show for this movie: the poster, else the first frame sample.
    pub fn image_path(&self) -> Option<PathBuf> {
        let poster = self.poster_path();
        if poster.is_file() {
            return Some(poster);
        }
        first_image_in(&self.images_dir())
    }

    /// Generic attribute view used by the filter engine.
    ///
    /// Unset enrichment fields show up as `"-"`.
    pub fn attributes(&self) -> Map<String, Value> {
        let mut map = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                tracing::warn!("Cannot build attributes for {}: {}", self.title, e);
                Map::new()
            }
        };
        for key in ["director", "screenplay", "cast"] {
            map.entry(key)
                .or_insert_with(|| Value::String(SENTINEL.to_string()));
        }
        map
    }
}

fn first_image_in(dir: &Path) -> Option<PathBuf> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    images.sort();
    images.into_iter().next()
}
