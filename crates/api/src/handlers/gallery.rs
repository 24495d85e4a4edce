//! Handlers for the gallery listing, batch export, and download plans.
//!
//! Every request here re-fetches the feed from the n8n gallery webhook:
//! the workflow owns the data, this service owns normalization,
//! filtering, and presentation. Groups that fail normalization are
//! logged and counted, never fatal to the listing.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use lookbook_core::category::Category;
use lookbook_core::error::CoreError;
use lookbook_core::filter::{self, DateFilter, GalleryFilter};
use lookbook_core::format::format_file_size;
use lookbook_core::group::{GalleryStats, NormalizedView, SystemKind};
use lookbook_core::normalize::{self, IncompleteSides, NormalizedGroup};
use lookbook_core::plan::DownloadPlan;
use lookbook_core::Timestamp;

use crate::error::{AppError, AppResult};
use crate::export::{build_zip, BatchDownloader, HttpAssetFetcher, LogProgress};
use crate::handlers::validate_body;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fetch the upstream feed and normalize every raw group.
///
/// Returns the admitted groups plus the number of skipped entries;
/// each skip is logged at warn with its id and reason.
async fn fetch_normalized(state: &AppState) -> AppResult<(Vec<NormalizedGroup>, usize)> {
    let feed = state.n8n.fetch_gallery().await?;
    let outcome = normalize::normalize_all(feed.image_groups);

    for skip in &outcome.skipped {
        tracing::warn!(
            group_id = ?skip.group_id,
            reason = %skip.reason,
            "Skipped malformed gallery group"
        );
    }

    Ok((outcome.groups, outcome.skipped.len()))
}

/// Resolve one group by product id from a fresh feed fetch.
async fn find_group(state: &AppState, product_id: &str) -> AppResult<NormalizedGroup> {
    let (groups, _) = fetch_normalized(state).await?;
    groups
        .into_iter()
        .find(|g| g.group.id() == product_id)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                id: product_id.to_string(),
            })
        })
}

// ---------------------------------------------------------------------------
// GET /gallery
// ---------------------------------------------------------------------------

/// Query parameters for the gallery listing.
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
    pub date: Option<String>,
    pub search: Option<String>,
}

/// One gallery entry, ready to render: the normalized view plus the
/// metadata the grid shows on each card.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub system: SystemKind,
    pub upload_date: Timestamp,
    /// Human-readable size of the baseline original, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_size: Option<String>,
    pub view: NormalizedView,
    /// Present only for new-system groups missing a whole side category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<IncompleteSides>,
}

impl GroupSummary {
    fn from_normalized(g: &NormalizedGroup) -> Self {
        let view = g.group.derive_view();
        let original_size = view
            .original
            .as_ref()
            .map(|o| format_file_size(o.file_size));
        Self {
            id: g.group.id().to_string(),
            name: g.group.name().to_string(),
            category: g.group.category(),
            system: g.group.system_kind(),
            upload_date: g.group.upload_date(),
            original_size,
            view,
            incomplete: g.incomplete,
        }
    }
}

/// Payload of the gallery listing response.
#[derive(Debug, Serialize)]
pub struct GalleryData {
    pub groups: Vec<GroupSummary>,
    pub stats: GalleryStats,
    /// Upstream groups dropped during normalization (details in logs).
    pub skipped: usize,
}

/// Parse raw query values into a [`GalleryFilter`].
///
/// `category=all` and `date=all` are accepted as "no filter" because
/// that is what the filter bar sends for its default options.
fn parse_filter(query: GalleryQuery) -> AppResult<GalleryFilter> {
    let category = match query.category.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(raw.parse::<Category>().map_err(AppError::Core)?),
    };

    let date = match query.date.as_deref() {
        None | Some("") => DateFilter::All,
        Some(raw) => raw.parse::<DateFilter>().map_err(AppError::Core)?,
    };

    Ok(GalleryFilter {
        category,
        date,
        search: query.search.unwrap_or_default(),
    })
}

/// List the gallery, filtered and with per-category stats.
pub async fn list_gallery(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> AppResult<impl IntoResponse> {
    let gallery_filter = parse_filter(query)?;

    let (groups, skipped) = fetch_normalized(&state).await?;
    let total_fetched = groups.len();

    let filtered = filter::apply(groups, &gallery_filter, Utc::now());
    let stats = filter::compute_stats(&filtered);

    tracing::debug!(
        fetched = total_fetched,
        shown = filtered.len(),
        skipped,
        "Gallery listing assembled"
    );

    let summaries: Vec<GroupSummary> = filtered.iter().map(GroupSummary::from_normalized).collect();

    Ok(Json(DataResponse {
        data: GalleryData {
            groups: summaries,
            stats,
            skipped,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /gallery/export
// ---------------------------------------------------------------------------

/// Request body for a batch export.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[validate(length(min = 1, message = "productId must not be empty"))]
    pub product_id: String,
}

/// Fetch every image of a group sequentially and return a zip archive
/// named after the group.
pub async fn export_group(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ExportRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&input)?;

    let group = find_group(&state, &input.product_id).await?;
    let plan = DownloadPlan::for_group(&group.group);

    tracing::info!(
        product_id = %group.group.id(),
        items = plan.total(),
        user = %user.email,
        "Starting batch export"
    );

    let downloader = BatchDownloader::new(HttpAssetFetcher::new(state.http.clone()))
        .with_item_delay(state.config.export.item_delay);
    let items = downloader.run(&plan, &mut LogProgress).await?;
    let archive = build_zip(&items)?;

    tracing::info!(
        product_id = %group.group.id(),
        items = items.len(),
        bytes = archive.len(),
        "Export archive assembled"
    );

    let disposition = format!("attachment; filename=\"{}.zip\"", group.group.name());
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive,
    ))
}

// ---------------------------------------------------------------------------
// GET /gallery/{id}/download-plan
// ---------------------------------------------------------------------------

/// Return the ordered download plan for a group, so a thin client can
/// drive browser-side saves with the same naming the zip export uses.
pub async fn download_plan(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let group = find_group(&state, &id).await?;
    let plan = DownloadPlan::for_group(&group.group);
    Ok(Json(DataResponse { data: plan }))
}
