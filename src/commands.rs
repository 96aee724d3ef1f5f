// Operations exposed to the frontend. Errors come back as user-facing notices.

use crate::models::{
    BrandContext, ContextField, Generation, GenerationRequest, ImportSummary, ProviderSettings,
    Template, TemplateField,
};
use crate::state::AppState;
use crate::studio::GenerateParams;
use std::path::{Path, PathBuf};

/// Notice shown when an import file cannot be read or parsed.
pub const IMPORT_FAILED_NOTICE: &str = "Could not read the file";

// --- Templates ---

pub async fn list_templates(state: &AppState) -> Vec<Template> {
    log::debug!("Frontend requested to list templates");
    state.studio.lock().await.templates().to_vec()
}

pub async fn active_template(state: &AppState) -> Option<Template> {
    state.studio.lock().await.active_template().cloned()
}

pub async fn create_template(state: &AppState) -> Template {
    log::info!("Frontend requested a new template");
    state.studio.lock().await.create_template().await
}

pub async fn duplicate_template(state: &AppState, template_id: String) -> Result<Template, String> {
    log::info!("Frontend requested to duplicate template ID: {}", template_id);
    let mut studio = state.studio.lock().await;
    match studio.duplicate_template(&template_id).await {
        Ok(copy) => Ok(copy),
        Err(e) => {
            log::error!("Failed to duplicate template {}: {:?}", template_id, e);
            Err(format!("Failed to duplicate template: {}", e))
        }
    }
}

pub async fn delete_template(state: &AppState, template_id: String) -> Result<(), String> {
    log::warn!("[CMD] Frontend requested to delete template ID: {}", template_id);
    let mut studio = state.studio.lock().await;
    match studio.delete_template(&template_id).await {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("[CMD] Failed to delete template {}: {:?}", template_id, e);
            Err(format!("Failed to delete template: {}", e))
        }
    }
}

pub async fn select_template(state: &AppState, template_id: String) -> Result<(), String> {
    let mut studio = state.studio.lock().await;
    studio
        .select_template(&template_id)
        .map_err(|e| format!("Failed to select template: {}", e))
}

pub async fn toggle_details(state: &AppState) -> bool {
    state.studio.lock().await.toggle_details()
}

/// Edits one field of template `template_id`. Unknown ids are ignored.
pub async fn update_template_field(state: &AppState, template_id: String, field: TemplateField) {
    let mut studio = state.studio.lock().await;
    if !studio.update_template_field(&template_id, field).await {
        log::warn!("Field update ignored, no template with ID: {}", template_id);
    }
}

/// Edits one field of the active template, if any.
pub async fn update_active_field(state: &AppState, field: TemplateField) {
    let mut studio = state.studio.lock().await;
    if !studio.update_active_field(field).await {
        log::warn!("Field update ignored, no active template");
    }
}

// --- Context and provider ---

pub async fn get_context(state: &AppState) -> BrandContext {
    state.studio.lock().await.context().clone()
}

pub async fn update_context_field(state: &AppState, field: ContextField) -> BrandContext {
    let mut studio = state.studio.lock().await;
    studio.update_context_field(field).await;
    studio.context().clone()
}

pub async fn get_provider_settings(state: &AppState) -> ProviderSettings {
    state.studio.lock().await.provider_settings().clone()
}

pub async fn set_provider_settings(state: &AppState, settings: ProviderSettings) {
    state.studio.lock().await.set_provider_settings(settings).await;
}

// --- Generation ---

pub async fn list_generations(state: &AppState) -> Vec<Generation> {
    log::debug!("Frontend requested generation history");
    state.studio.lock().await.generations().to_vec()
}

/// Generates ideas from the active template.
pub async fn generate_ideas(state: &AppState, params: GenerateParams) -> Result<Generation, String> {
    log::info!("Frontend requested {} ideas", params.n_ideas);
    let mut studio = state.studio.lock().await;
    match studio.generate_from_active(params).await {
        Ok(generation) => Ok(generation),
        Err(e) => {
            log::error!("Failed to generate ideas: {:?}", e);
            Err(format!("Failed to generate ideas: {}", e))
        }
    }
}

/// Generates ideas for an explicit request.
pub async fn generate(state: &AppState, request: GenerationRequest) -> Result<Generation, String> {
    let mut studio = state.studio.lock().await;
    studio.generate(request).await.map_err(|e| {
        log::error!("Failed to generate ideas: {:?}", e);
        format!("Failed to generate ideas: {}", e)
    })
}

pub async fn clear_history(state: &AppState) {
    log::warn!("[CMD] Frontend requested to clear history");
    state.studio.lock().await.clear_history().await;
}

// --- Export / import ---

pub async fn export_json(state: &AppState) -> Result<String, String> {
    state
        .studio
        .lock()
        .await
        .export_json()
        .map_err(|e| format!("Failed to export: {}", e))
}

/// Writes the export file to `path`.
pub async fn export_state(state: &AppState, path: &Path) -> Result<(), String> {
    log::info!("Exporting studio data to {}", path.display());
    let json = export_json(state).await?;
    tokio::fs::write(path, json).await.map_err(|e| {
        log::error!("Failed to write export file {}: {:?}", path.display(), e);
        format!("Failed to write {}: {}", path.display(), e)
    })
}

/// Writes the export file as `file_name` inside `dir` and returns its path.
pub async fn export_state_to_dir(
    state: &AppState,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, String> {
    let path = dir.join(file_name);
    export_state(state, &path).await?;
    Ok(path)
}

/// Applies import `text`. State is untouched when it does not parse.
pub async fn import_json(state: &AppState, text: &str) -> Result<ImportSummary, String> {
    let mut studio = state.studio.lock().await;
    match studio.import_json(text).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            log::error!("Import rejected: {:?}", e);
            Err(format!("{}: {}", IMPORT_FAILED_NOTICE, e))
        }
    }
}

/// Reads and applies the import file at `path`.
pub async fn import_state(state: &AppState, path: &Path) -> Result<ImportSummary, String> {
    log::info!("Importing studio data from {}", path.display());
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to read import file {}: {:?}", path.display(), e);
            return Err(format!("{}: {}", IMPORT_FAILED_NOTICE, e));
        }
    };
    import_json(state, &text).await
}
