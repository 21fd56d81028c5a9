use crate::model::structures::map_record::MapRecord;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf}
};
use thiserror::Error;
use tracing::{debug, info};

/// Mapper used in link keys for maps made by the pool curator
pub const CURATOR_MAPPER: &str = "twon";

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum LinksError {
    #[error("Failed to read image links: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse image links: {0}")]
    Serialization(#[from] serde_json::Error)
}

/// Where a presented map's image comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource<'a> {
    /// Hosted image matched by map name and mapper
    Linked(&'a str),
    /// The pool's own background column
    Background(&'a str),
    Missing
}

/// Lookup table from `{map}_{mapper}` keys to hosted image URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageLinks(HashMap<String, String>);

/// `"{map}_{mapper}"` with every run of whitespace replaced by `_`
pub fn normalize_key(map_name: &str, mapper: &str) -> String {
    let mut key = String::with_capacity(map_name.len() + mapper.len() + 1);
    let mut in_whitespace = false;

    for c in format!("{map_name}_{mapper}").chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push('_');
            }
            in_whitespace = true;
        } else {
            key.push(c);
            in_whitespace = false;
        }
    }

    key
}

impl ImageLinks {
    pub fn new(links: HashMap<String, String>) -> Self {
        ImageLinks(links)
    }

    /// Reads a JSON object of key to URL
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LinksError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let links: ImageLinks = serde_json::from_str(&raw)?;

        info!(path = %path.as_ref().display(), links = links.len(), "Loaded image links");
        Ok(links)
    }

    /// Builds links for every image file in `dir`, keyed by file stem and
    /// pointing at `{base_url}/{file name}`
    pub fn from_dir(dir: impl AsRef<Path>, base_url: &str) -> Result<Self, LinksError> {
        let mut links = HashMap::new();

        for entry in fs::read_dir(dir.as_ref())? {
            let path: PathBuf = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()));

            let (Some(stem), Some(file_name)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.file_name().and_then(|s| s.to_str())
            ) else {
                continue;
            };

            if is_image {
                links.insert(
                    stem.trim().to_string(),
                    format!("{}/{}", base_url.trim_end_matches('/'), file_name)
                );
            }
        }

        debug!(dir = %dir.as_ref().display(), links = links.len(), "Collected image links");
        Ok(ImageLinks(links))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LinksError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Image for `map`: the hosted link under its name and mapper, then under the
    /// curator's name if the map has no mapper, then the pool's background column.
    pub fn resolve<'a>(&'a self, map: &'a MapRecord) -> ImageSource<'a> {
        let mut link = self.0.get(&normalize_key(&map.name, &map.mapper));

        if link.is_none() && map.mapper.trim().is_empty() {
            link = self.0.get(&normalize_key(&map.name, CURATOR_MAPPER));
        }

        match (link, map.image.as_deref()) {
            (Some(url), _) => ImageSource::Linked(url),
            (None, Some(image)) if !image.is_empty() => ImageSource::Background(image),
            _ => ImageSource::Missing
        }
    }
}
