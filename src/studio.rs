//! In-memory studio state and the operations that mutate it.
//!
//! [`Studio`] owns the persisted [`Envelope`] plus the transient selection.
//! Every operation that changes the envelope finishes by writing the whole
//! envelope back through the [`StorageManager`]. A failed write is logged and
//! the in-memory change is kept.

use std::collections::HashSet;
use std::sync::Arc;

use crate::api::IdeaProvider;
use crate::error::{Result, StudioError};
use crate::models::{
    new_id, BrandContext, ContextField, Cta, Envelope, ExportBundle, Generation,
    GenerationRequest, ImportBundle, ImportSummary, Length, ProviderSettings, Template,
    TemplateField,
};
use crate::storage::StorageManager;

/// User-chosen generation parameters; the template comes from the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    pub n_ideas: i64,
    pub length: Length,
    pub cta: Cta,
    pub angle: String,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            n_ideas: 6,
            length: Length::Short,
            cta: Cta::None,
            angle: String::new(),
        }
    }
}

pub struct Studio {
    storage: StorageManager,
    provider: Arc<dyn IdeaProvider>,
    envelope: Envelope,
    selected_id: Option<String>,
    details_open: bool,
}

impl Studio {
    /// Loads persisted state (or defaults) from `storage` and writes it straight
    /// back, so default template ids survive a restart and a corrupt record is replaced.
    pub async fn load(storage: StorageManager, provider: Arc<dyn IdeaProvider>) -> Self {
        let envelope = storage.load().await;
        let studio = Self::from_envelope(storage, provider, envelope);
        studio.persist().await;
        studio
    }

    pub fn from_envelope(
        storage: StorageManager,
        provider: Arc<dyn IdeaProvider>,
        envelope: Envelope,
    ) -> Self {
        Self {
            storage,
            provider,
            envelope,
            selected_id: None,
            details_open: false,
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.envelope.templates
    }

    /// Generation history, newest first.
    pub fn generations(&self) -> &[Generation] {
        &self.envelope.gens
    }

    pub fn context(&self) -> &BrandContext {
        &self.envelope.context
    }

    pub fn provider_settings(&self) -> &ProviderSettings {
        &self.envelope.provider
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn details_open(&self) -> bool {
        self.details_open
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.envelope.templates.iter().find(|t| t.id == id)
    }

    /// The selected template, or the first template when nothing valid is selected.
    pub fn active_template(&self) -> Option<&Template> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.template(id))
            .or_else(|| self.envelope.templates.first())
    }

    /// Ideas of the most recent generation.
    pub fn latest_ideas(&self) -> Option<&[String]> {
        self.envelope.gens.first().map(|g| g.ideas.as_slice())
    }

    async fn persist(&self) {
        if let Err(e) = self.storage.save(&self.envelope).await {
            log::error!("Failed to persist studio state: {:?}", e);
        }
    }

    // --- Templates ---

    /// Inserts a blank template at the front, selects it and opens its details.
    pub async fn create_template(&mut self) -> Template {
        let template = Template::blank();
        log::info!("Creating template {}", template.id);
        self.envelope.templates.insert(0, template.clone());
        self.selected_id = Some(template.id.clone());
        self.details_open = true;
        self.persist().await;
        template
    }

    /// Inserts a copy of template `id` at the front. The selection is unchanged.
    pub async fn duplicate_template(&mut self, id: &str) -> Result<Template> {
        let copy = self
            .template(id)
            .ok_or_else(|| StudioError::TemplateNotFound(id.to_string()))?
            .duplicate();
        log::info!("Duplicated template {} as {}", id, copy.id);
        self.envelope.templates.insert(0, copy.clone());
        self.persist().await;
        Ok(copy)
    }

    /// Removes template `id`. Deleting the active template clears the
    /// selection and closes the details view. History keeps its references.
    pub async fn delete_template(&mut self, id: &str) -> Result<Template> {
        let index = self
            .envelope
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StudioError::TemplateNotFound(id.to_string()))?;
        let was_active = self.active_template().is_some_and(|t| t.id == id);

        let removed = self.envelope.templates.remove(index);
        log::warn!("Deleted template {} ({})", removed.id, removed.name);
        if was_active {
            self.selected_id = None;
            self.details_open = false;
        }
        self.persist().await;
        Ok(removed)
    }

    pub fn select_template(&mut self, id: &str) -> Result<()> {
        if self.template(id).is_none() {
            return Err(StudioError::TemplateNotFound(id.to_string()));
        }
        log::debug!("Selected template {}", id);
        self.selected_id = Some(id.to_string());
        Ok(())
    }

    pub fn toggle_details(&mut self) -> bool {
        self.details_open = !self.details_open;
        self.details_open
    }

    /// Applies `field` to template `id`. Returns false, changing nothing, when no template matches.
    pub async fn update_template_field(&mut self, id: &str, field: TemplateField) -> bool {
        let Some(template) = self.envelope.templates.iter_mut().find(|t| t.id == id) else {
            log::debug!("Ignoring field update for unknown template {}", id);
            return false;
        };
        field.apply(template);
        self.persist().await;
        true
    }

    /// Applies `field` to the active template, if there is one.
    pub async fn update_active_field(&mut self, field: TemplateField) -> bool {
        let Some(id) = self.active_template().map(|t| t.id.clone()) else {
            return false;
        };
        self.update_template_field(&id, field).await
    }

    // --- Context and provider ---

    pub async fn update_context_field(&mut self, field: ContextField) {
        field.apply(&mut self.envelope.context);
        self.persist().await;
    }

    /// Replaces the provider settings. Generation does not consult them.
    pub async fn set_provider_settings(&mut self, settings: ProviderSettings) {
        log::info!(
            "Updating provider settings (endpoint: '{}', model: '{}', mock: {})",
            settings.endpoint,
            settings.model,
            settings.use_mock
        );
        self.envelope.provider = settings;
        self.persist().await;
    }

    // --- Generation history ---

    /// Generates ideas for `request` and prepends the record to the history.
    pub async fn generate(&mut self, request: GenerationRequest) -> Result<Generation> {
        let template = self
            .template(&request.template_id)
            .ok_or_else(|| StudioError::TemplateNotFound(request.template_id.clone()))?;
        log::info!(
            "Generating {} ideas from template '{}' via {}",
            request.clamped_count(),
            template.name,
            self.provider.name()
        );
        let ideas = self
            .provider
            .generate_ideas(&request, template, &self.envelope.context)
            .await
            .map_err(StudioError::Provider)?;

        let generation = Generation::new(request, ideas);
        self.envelope.gens.insert(0, generation.clone());
        self.persist().await;
        Ok(generation)
    }

    /// Generates from the active template with the given parameters.
    pub async fn generate_from_active(&mut self, params: GenerateParams) -> Result<Generation> {
        let template_id = self
            .active_template()
            .map(|t| t.id.clone())
            .ok_or(StudioError::NoActiveTemplate)?;
        let angle = Some(params.angle).filter(|a| !a.is_empty());
        let request = GenerationRequest {
            template_id,
            n_ideas: params.n_ideas,
            length: params.length,
            cta: params.cta,
            angle,
        };
        self.generate(request).await
    }

    pub async fn clear_history(&mut self) {
        log::warn!("Clearing {} generations", self.envelope.gens.len());
        self.envelope.gens.clear();
        self.persist().await;
    }

    // --- Export / import ---

    pub fn export_bundle(&self) -> ExportBundle<'_> {
        ExportBundle {
            templates: &self.envelope.templates,
            gens: &self.envelope.gens,
            context: &self.envelope.context,
        }
    }

    /// Pretty-printed export of templates, history and context.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.export_bundle())
            .map_err(|e| StudioError::Storage(e.into()))
    }

    /// Parses `text` and applies every section it contains. On a parse
    /// failure nothing is applied.
    pub async fn import_json(&mut self, text: &str) -> Result<ImportSummary> {
        let bundle: ImportBundle = serde_json::from_str(text)?;
        Ok(self.import_bundle(bundle).await)
    }

    pub async fn import_bundle(&mut self, bundle: ImportBundle) -> ImportSummary {
        let mut summary = ImportSummary::default();
        if let Some(mut templates) = bundle.templates {
            let mut seen = HashSet::new();
            for template in &mut templates {
                if !seen.insert(template.id.clone()) {
                    let fresh = new_id();
                    log::warn!(
                        "Imported template '{}' repeats id {}, assigning {}",
                        template.name,
                        template.id,
                        fresh
                    );
                    template.id = fresh.clone();
                    seen.insert(fresh);
                }
            }
            self.envelope.templates = templates;
            summary.templates = true;
        }
        if let Some(gens) = bundle.gens {
            self.envelope.gens = gens;
            summary.gens = true;
        }
        if let Some(context) = bundle.context {
            self.envelope.context = context;
            summary.context = true;
        }
        log::info!("Imported studio data: {:?}", summary);
        self.persist().await;
        summary
    }
}
