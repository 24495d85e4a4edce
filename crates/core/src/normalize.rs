//! Upstream payload normalization.
//!
//! The gallery webhook returns groups from two generations of the
//! processing pipeline, discriminated by a `type` field that is not
//! always well-formed. All schema discrimination happens here: the rest
//! of the crate only ever sees [`ProductGroup`]. A group that cannot be
//! normalized is reported as skipped with a reason instead of failing
//! the whole feed, so one malformed upstream row never blanks the
//! gallery.

use serde::Deserialize;
use serde_json::Value;

use crate::group::{ImageAsset, ProductGroup, SidePair};
use crate::Timestamp;

/// Discriminator value for old-pipeline groups.
pub const SYSTEM_OLD: &str = "old";
/// Discriminator value for new-pipeline groups.
pub const SYSTEM_NEW: &str = "new";

/// Why a raw group could not be normalized.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The `type` discriminator is absent. Upstream has been observed to
    /// drop it; we never guess which schema was meant.
    #[error("group has no 'type' discriminator")]
    MissingSystemTag,

    /// The `type` discriminator is neither `old` nor `new`.
    #[error("unknown system tag '{0}'")]
    UnknownSystemTag(String),

    /// A required scalar field is absent.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// An asset slot that must hold an image is null or absent.
    #[error("missing asset '{0}'")]
    MissingAsset(&'static str),

    /// The category value is outside the known set.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// The upload date could not be parsed.
    #[error("invalid upload date '{0}'")]
    InvalidUploadDate(String),

    /// The group payload does not have the expected JSON shape.
    #[error("malformed group payload: {0}")]
    Malformed(String),
}

/// A gallery group as it arrives from the webhook, before any schema
/// decisions. Every field is optional so deserialization itself almost
/// never fails; [`normalize`] decides what is actually required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub system: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
    /// Old system: a single asset object. New system: a front/back pair.
    #[serde(default)]
    pub original: Value,
    /// Old system only.
    #[serde(default)]
    pub variations: Option<Value>,
    /// New system only.
    #[serde(default)]
    pub processed: Value,
}

/// Flags for new-system groups that arrived without a whole side
/// category. Such groups stay in the gallery so clients can render
/// placeholders, but the viewer refuses to open them when there is
/// nothing to compare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteSides {
    pub missing_original: bool,
    pub missing_processed: bool,
}

/// A successfully normalized group plus its degradation flags.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGroup {
    pub group: ProductGroup,
    /// `Some` only for new-system groups missing an entire side category.
    pub incomplete: Option<IncompleteSides>,
}

/// A group dropped during batch normalization, with enough context to log.
#[derive(Debug)]
pub struct SkippedGroup {
    /// The upstream id when the payload carried one.
    pub group_id: Option<String>,
    pub reason: NormalizeError,
}

/// Result of normalizing a whole webhook payload.
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub groups: Vec<NormalizedGroup>,
    pub skipped: Vec<SkippedGroup>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Normalize one raw JSON group.
pub fn normalize_value(raw: &Value) -> Result<NormalizedGroup, NormalizeError> {
    let raw: RawGroup = serde_json::from_value(raw.clone())
        .map_err(|e| NormalizeError::Malformed(e.to_string()))?;
    normalize(raw)
}

/// Normalize every group in a webhook payload, collecting failures as
/// skipped entries instead of aborting.
pub fn normalize_all(raws: Vec<Value>) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();
    for raw in raws {
        let group_id = raw
            .get("id")
            .and_then(Value::as_str)
            .map(|s| s.to_string());
        match normalize_value(&raw) {
            Ok(group) => outcome.groups.push(group),
            Err(reason) => outcome.skipped.push(SkippedGroup { group_id, reason }),
        }
    }
    outcome
}

/// Normalize a pre-deserialized [`RawGroup`].
pub fn normalize(raw: RawGroup) -> Result<NormalizedGroup, NormalizeError> {
    let system = raw.system.as_deref().ok_or(NormalizeError::MissingSystemTag)?;

    let id = raw.id.ok_or(NormalizeError::MissingField("id"))?;
    let name = raw.name.ok_or(NormalizeError::MissingField("name"))?;
    let category = raw
        .category
        .as_deref()
        .ok_or(NormalizeError::MissingField("category"))?
        .parse()
        .map_err(|_| NormalizeError::UnknownCategory(raw.category.clone().unwrap_or_default()))?;
    let upload_date = parse_upload_date(
        raw.upload_date
            .as_deref()
            .ok_or(NormalizeError::MissingField("uploadDate"))?,
    )?;

    match system {
        SYSTEM_OLD => {
            let original = parse_asset(&raw.original, "original")?;
            let variations = raw
                .variations
                .ok_or(NormalizeError::MissingField("variations"))?;
            let variations: Vec<ImageAsset> = serde_json::from_value(variations)
                .map_err(|e| NormalizeError::Malformed(format!("variations: {e}")))?;

            Ok(NormalizedGroup {
                group: ProductGroup::Old {
                    id,
                    name,
                    category,
                    upload_date,
                    original,
                    variations,
                },
                incomplete: None,
            })
        }
        SYSTEM_NEW => {
            let original = parse_side_pair(&raw.original, "original")?;
            let processed = parse_side_pair(&raw.processed, "processed")?;

            let flags = IncompleteSides {
                missing_original: original.is_empty(),
                missing_processed: processed.is_empty(),
            };
            let incomplete =
                (flags.missing_original || flags.missing_processed).then_some(flags);

            Ok(NormalizedGroup {
                group: ProductGroup::New {
                    id,
                    name,
                    category,
                    upload_date,
                    original,
                    processed,
                },
                incomplete,
            })
        }
        other => Err(NormalizeError::UnknownSystemTag(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Parse a required single-asset slot (old-system `original`).
fn parse_asset(value: &Value, slot: &'static str) -> Result<ImageAsset, NormalizeError> {
    if value.is_null() {
        return Err(NormalizeError::MissingAsset(slot));
    }
    serde_json::from_value(value.clone())
        .map_err(|e| NormalizeError::Malformed(format!("{slot}: {e}")))
}

/// Parse a front/back pair slot (new-system `original` / `processed`).
/// A null or absent slot is an empty pair, not an error; the caller
/// flags it via [`IncompleteSides`].
fn parse_side_pair(value: &Value, slot: &'static str) -> Result<SidePair, NormalizeError> {
    if value.is_null() {
        return Ok(SidePair::default());
    }
    serde_json::from_value(value.clone())
        .map_err(|e| NormalizeError::Malformed(format!("{slot}: {e}")))
}

/// Parse the upstream upload date.
///
/// The webhook usually sends RFC 3339, but older rows carry bare
/// datetimes or plain dates; those are read as UTC.
fn parse_upload_date(raw: &str) -> Result<Timestamp, NormalizeError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&chrono::Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(NormalizeError::InvalidUploadDate(raw.to_string()))
}
