use crate::model::structures::map_record::MapRecord;
use csv::{ReaderBuilder, StringRecord};
use std::{
    fs,
    path::{Path, PathBuf}
};
use thiserror::Error;
use tracing::{debug, info};

const NAME_HEADER: &str = "Maps";
const MAPPER_HEADER: &str = "Mapper";
const VARIANT_HEADER: &str = "Difficulty";
const URL_HEADER: &str = "Ø";
const IMAGE_HEADER: &str = "Background";
const DIFFICULTY_HEADER: &str = "Difficulty Level";

// Positional fallbacks used when a named column is missing or blank
const MAPPER_COLUMN: usize = 1;
const VARIANT_COLUMN: usize = 2;
const URL_COLUMN: usize = 3;

const BEATMAPSET_URL_PREFIX: &str = "https://osu.ppy.sh/beatmapsets/";

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Failed to read map pool: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse map pool: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not find header row in map pool")]
    MissingHeader
}

/// Source of the map pool snapshot the engine selects from
pub trait PoolProvider {
    fn load_pool(&self) -> Result<Vec<MapRecord>, PoolError>;
}

/// Map pool exported as CSV from the curation spreadsheet
pub struct CsvPool {
    path: PathBuf
}

impl CsvPool {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        CsvPool {
            path: path.as_ref().to_path_buf()
        }
    }
}

impl PoolProvider for CsvPool {
    fn load_pool(&self) -> Result<Vec<MapRecord>, PoolError> {
        let data = fs::read_to_string(&self.path)?;
        let pool = parse_pool(&data)?;

        info!(path = %self.path.display(), maps = pool.len(), "Loaded map pool");
        Ok(pool)
    }
}

/// Pool already resolved in memory
pub struct StaticPool(pub Vec<MapRecord>);

impl PoolProvider for StaticPool {
    fn load_pool(&self) -> Result<Vec<MapRecord>, PoolError> {
        Ok(self.0.clone())
    }
}

/// Parses the spreadsheet export.
///
/// The sheet may have title rows above the header, so the header is the first
/// row with both a "maps" and a "difficulty level" cell. Rows without a numeric
/// difficulty are dropped.
pub fn parse_pool(data: &str) -> Result<Vec<MapRecord>, PoolError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes());

    let rows = reader.records().collect::<Result<Vec<StringRecord>, csv::Error>>()?;

    let header_idx = rows.iter().position(is_header_row).ok_or(PoolError::MissingHeader)?;
    let headers: Vec<String> = rows[header_idx].iter().map(|h| h.trim().to_string()).collect();
    debug!(?headers, row = header_idx, "Detected map pool headers");

    let column = |name: &str| headers.iter().position(|h| h.to_lowercase() == name.to_lowercase());
    let name_col = column(NAME_HEADER);
    let mapper_col = column(MAPPER_HEADER);
    let variant_col = column(VARIANT_HEADER);
    let url_col = column(URL_HEADER);
    let image_col = column(IMAGE_HEADER);
    let difficulty_col = column(DIFFICULTY_HEADER);

    let mut pool = Vec::new();
    for (offset, row) in rows.iter().enumerate().skip(header_idx + 1) {
        let difficulty = match parse_difficulty(cell(row, difficulty_col)) {
            Some(d) => d,
            None => {
                debug!(row = offset, "Skipping map pool row without a difficulty level");
                continue;
            }
        };

        let image = cell(row, image_col);

        pool.push(MapRecord {
            name: cell(row, name_col).to_string(),
            mapper: first_non_empty(&[cell(row, mapper_col), cell(row, Some(MAPPER_COLUMN))]).to_string(),
            variant_name: first_non_empty(&[cell(row, variant_col), cell(row, Some(VARIANT_COLUMN))]).to_string(),
            difficulty,
            url: first_non_empty(&[cell(row, url_col), cell(row, Some(URL_COLUMN))]).to_string(),
            image: (!image.is_empty()).then(|| image.to_string())
        });
    }

    Ok(pool)
}

fn is_header_row(row: &StringRecord) -> bool {
    let has = |needle: &str| row.iter().any(|h| h.to_lowercase().contains(needle));

    has("maps") && has("difficulty level")
}

fn cell(row: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| row.get(i)).map(str::trim).unwrap_or("")
}

fn first_non_empty<'a>(values: &[&'a str]) -> &'a str {
    values.iter().copied().find(|v| !v.is_empty()).unwrap_or("")
}

/// Reads the leading number of a cell, so annotated values such as
/// "7.85 (est)" still count
fn parse_difficulty(value: &str) -> Option<f64> {
    numeric_prefix(value.trim())
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

fn numeric_prefix(value: &str) -> &str {
    let bytes = value.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |n| start + n)
    };

    let mut end = if matches!(bytes.first(), Some(b'+' | b'-')) { 1 } else { 0 };
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }

    // Exponent only counts if digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &value[..end]
}

/// Link to show for `map`. Rows without an absolute URL borrow the beatmapset
/// link of another row for the same beatmap, if the pool has one.
pub fn canonical_url(pool: &[MapRecord], map: &MapRecord) -> String {
    if map.url.to_lowercase().starts_with("http") {
        return map.url.clone();
    }

    pool.iter()
        .filter(|m| m.same_beatmap(map))
        .find(|m| m.url.starts_with(BEATMAPSET_URL_PREFIX))
        .map(|m| m.url.clone())
        .unwrap_or_else(|| {
            if map.url.is_empty() {
                "#".to_string()
            } else {
                map.url.clone()
            }
        })
}
