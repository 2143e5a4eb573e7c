//! Handlers for the `/sections` resource.
//!
//! A section belongs to one actor or scene and holds items of a single
//! content kind. Section names are unique per owner and kind.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use voxcat_core::error::CoreError;
use voxcat_core::history::{
    create_message, delete_message, duplicates_warning, update_message, EntityKind,
};
use voxcat_core::provider::{resolve_settings, ContentKind, ProviderSettingsMap, VoiceSettings};
use voxcat_core::types::EntityId;
use voxcat_db::cascade::CascadePlan;
use voxcat_db::models::section::{CreateSections, Section, UpdateSection};
use voxcat_db::repositories::{CatalogRepo, SectionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{diff_entities, partition_batch, record_snapshot};
use crate::middleware::project::ActiveProject;
use crate::query::OwnerParams;
use crate::response::{BatchCreated, DataResponse};

/// Where a section's effective provider settings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSource {
    Section,
    Owner,
    /// Neither section nor owner customizes this kind.
    ProviderDefault,
}

#[derive(Debug, Serialize)]
pub struct EffectiveSettings {
    pub section_id: EntityId,
    pub content_kind: ContentKind,
    pub source: SettingsSource,
    pub settings: Option<VoiceSettings>,
}

/// GET /api/v1/sections?owner_id=
pub async fn list(
    ActiveProject(ctx): ActiveProject,
    Query(params): Query<OwnerParams>,
) -> AppResult<Json<DataResponse<Vec<Section>>>> {
    let mut sections = SectionRepo::list(&ctx).await?;
    if let Some(owner_id) = params.owner_id {
        sections.retain(|s| s.owner_id == owner_id);
    }
    Ok(Json(DataResponse { data: sections }))
}

/// POST /api/v1/sections
///
/// Creates one section per name in the comma-separated `name`, all under
/// the same owner and content kind.
pub async fn create(
    ActiveProject(ctx): ActiveProject,
    Json(input): Json<CreateSections>,
) -> AppResult<(StatusCode, Json<DataResponse<BatchCreated<Section>>>)> {
    let before = CatalogRepo::read(&ctx).await;
    let owner = input.owner();
    before.require_owner(owner)?;

    let partition = partition_batch(
        &input.name,
        before
            .sections_of(owner)
            .filter(|s| s.content_kind == input.content_kind)
            .map(|s| s.name.as_str()),
    )?;

    let sections = partition
        .new
        .iter()
        .map(|name| {
            let section = Section::new(
                owner,
                input.content_kind,
                name.as_str(),
                input.provider_settings.clone(),
            );
            section.check().map(|()| section)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let labels: Vec<String> = sections.iter().map(|s| before.section_label(s)).collect();
    let message = create_message(EntityKind::Section, &labels);
    record_snapshot(&ctx, &message, &before).await;
    SectionRepo::insert_many(&ctx, &sections).await?;

    tracing::info!(
        project = ctx.name(),
        owner_id = %owner.owner_id,
        content_kind = %input.content_kind,
        created = sections.len(),
        skipped = partition.duplicates.len(),
        "Sections created"
    );

    let warning = (!partition.duplicates.is_empty()).then(|| {
        duplicates_warning(EntityKind::Section, sections.len(), &partition.duplicates)
    });
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: BatchCreated {
                created: sections,
                duplicates_skipped: partition.duplicates,
                warning,
            },
        }),
    ))
}

/// GET /api/v1/sections/{id}
pub async fn get_by_id(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<Section>>> {
    let section = SectionRepo::find_by_id(&ctx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Section", id))?;
    Ok(Json(DataResponse { data: section }))
}

/// PUT /api/v1/sections/{id}
pub async fn update(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<DataResponse<Section>>> {
    let before = CatalogRepo::read(&ctx).await;
    let current = before
        .section(id)
        .cloned()
        .ok_or_else(|| CoreError::not_found("Section", id))?;
    before.require_owner(current.owner())?;

    let updated = current.apply(&input);
    updated.check()?;

    if !updated.name.eq_ignore_ascii_case(&current.name)
        && before.sections_of(current.owner()).any(|s| {
            s.id != id
                && s.content_kind == current.content_kind
                && s.name.eq_ignore_ascii_case(&updated.name)
        })
    {
        return Err(CoreError::DuplicateName {
            names: vec![updated.name],
        }
        .into());
    }

    let changes = diff_entities(&current, &updated)?;
    let path = before.section_label(&current);
    if let Some(message) = update_message(
        &path,
        Some((current.name.as_str(), updated.name.as_str())),
        &changes,
    ) {
        record_snapshot(&ctx, &message, &before).await;
    }

    if !SectionRepo::update(&ctx, &updated).await? {
        return Err(AppError::Core(CoreError::not_found("Section", id)));
    }
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/sections/{id}
///
/// Removes the section, its items and their takes.
pub async fn delete(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let before = CatalogRepo::read(&ctx).await;
    let section = before
        .section(id)
        .ok_or_else(|| CoreError::not_found("Section", id))?;

    let plan = CascadePlan::for_section(&before, id);
    let message = delete_message(EntityKind::Section, &before.section_label(section));
    record_snapshot(&ctx, &message, &before).await;

    let report = plan.commit(&ctx).await?;
    tracing::info!(
        project = ctx.name(),
        %id,
        items = report.items,
        takes = report.takes,
        "Section deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sections/{id}/effective-settings
///
/// The section's own custom settings, else the owner's custom settings for
/// the section's kind, else none (provider defaults).
pub async fn effective_settings(
    ActiveProject(ctx): ActiveProject,
    Path(id): Path<EntityId>,
) -> AppResult<Json<DataResponse<EffectiveSettings>>> {
    let catalog = CatalogRepo::read(&ctx).await;
    let section = catalog
        .section(id)
        .ok_or_else(|| CoreError::not_found("Section", id))?;

    let no_overrides = ProviderSettingsMap::new();
    let owner_map = catalog
        .owner_settings(section.owner())
        .unwrap_or(&no_overrides);
    let settings = resolve_settings(section.content_kind, &section.provider_settings, owner_map);

    let source = if !section.provider_settings.is_inherit() {
        SettingsSource::Section
    } else if settings.is_some() {
        SettingsSource::Owner
    } else {
        SettingsSource::ProviderDefault
    };
    let settings = settings.cloned();

    Ok(Json(DataResponse {
        data: EffectiveSettings {
            section_id: id,
            content_kind: section.content_kind,
            source,
            settings,
        },
    }))
}
