use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fresh identifier for templates and generations.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Publishing channel a template is written for
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Channel {
    LinkedIn,
    Facebook,
    Instagram,
    YouTube,
    #[default]
    Any,
}

// Requested length of each idea
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Length {
    #[default]
    Short,
    Medium,
    Long,
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Length::Short => "Short",
            Length::Medium => "Medium",
            Length::Long => "Long",
        };
        f.write_str(label)
    }
}

// Call-to-action category attached to a generation request
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cta {
    #[default]
    None,
    Soft,
    Trial,
    LeadGen,
    Community,
}

impl fmt::Display for Cta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Cta::None => "None",
            Cta::Soft => "Soft",
            Cta::Trial => "Trial",
            Cta::LeadGen => "LeadGen",
            Cta::Community => "Community",
        };
        f.write_str(label)
    }
}

// A reusable prompt archetype used to parameterize generation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default = "new_id")] // Older exports may lack ids
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub formats: String,
    #[serde(default)]
    pub guardrails: String,
    #[serde(default)]
    pub base_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub channel: Channel,
}

impl Template {
    /// A blank template as produced by the "new template" action.
    pub fn blank() -> Self {
        Self {
            id: new_id(),
            name: "New template".to_string(),
            purpose: String::new(),
            tone: String::new(),
            audience: String::new(),
            formats: String::new(),
            guardrails: String::new(),
            base_prompt: String::new(),
            examples: Some(String::new()),
            tags: Vec::new(),
            channel: Channel::Any,
        }
    }

    /// Copy of this template under a new id with the name suffixed.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            name: format!("{} (copy)", self.name),
            ..self.clone()
        }
    }
}

/// Single-field edit of a template. Ids are immutable, so there is no id variant.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateField {
    Name(String),
    Purpose(String),
    Tone(String),
    Audience(String),
    Formats(String),
    Guardrails(String),
    BasePrompt(String),
    Examples(String),
    Tags(Vec<String>),
    Channel(Channel),
}

impl TemplateField {
    /// Tags entered as comma-separated text. Entries are trimmed, blanks dropped.
    pub fn tags_from_text(text: &str) -> Self {
        let tags = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        TemplateField::Tags(tags)
    }

    pub fn apply(self, template: &mut Template) {
        match self {
            TemplateField::Name(v) => template.name = v,
            TemplateField::Purpose(v) => template.purpose = v,
            TemplateField::Tone(v) => template.tone = v,
            TemplateField::Audience(v) => template.audience = v,
            TemplateField::Formats(v) => template.formats = v,
            TemplateField::Guardrails(v) => template.guardrails = v,
            TemplateField::BasePrompt(v) => template.base_prompt = v,
            TemplateField::Examples(v) => template.examples = Some(v),
            TemplateField::Tags(v) => template.tags = v,
            TemplateField::Channel(v) => template.channel = v,
        }
    }
}

// Parameters of one generation call; embedded into the resulting Generation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub template_id: String,
    #[serde(deserialize_with = "count_from_number")]
    pub n_ideas: i64, // Stored as given; clamped only when generating
    pub length: Length,
    pub cta: Cta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
}

// Counts typed into a number field may arrive fractional; keep the whole part.
fn count_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_nan() {
        return Ok(0);
    }
    Ok(value.trunc() as i64)
}

impl GenerationRequest {
    pub const MIN_IDEAS: i64 = 1;
    pub const MAX_IDEAS: i64 = 20;

    /// Requested count clamped to `[MIN_IDEAS, MAX_IDEAS]`.
    pub fn clamped_count(&self) -> usize {
        self.n_ideas.clamp(Self::MIN_IDEAS, Self::MAX_IDEAS) as usize
    }

    /// The angle, if one was given and is not blank.
    pub fn angle(&self) -> Option<&str> {
        self.angle.as_deref().filter(|a| !a.is_empty())
    }
}

// One immutable record of a past generation call
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    #[serde(default = "new_id")]
    pub id: String,
    pub template_id: String, // Weak reference; may outlive the template
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub request: GenerationRequest,
    pub ideas: Vec<String>,
}

impl Generation {
    pub fn new(request: GenerationRequest, ideas: Vec<String>) -> Self {
        Self {
            id: new_id(),
            template_id: request.template_id.clone(),
            created_at: Utc::now().trunc_subsecs(3), // Stored as epoch milliseconds
            request,
            ideas,
        }
    }

    /// Ideas joined with a blank line, ready for pasting elsewhere.
    pub fn clipboard_text(&self) -> String {
        self.ideas.join("\n\n")
    }
}

// Singleton description of the brand
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandContext {
    pub brand_voice: String,
    pub mission: String,
    pub differentiator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContextField {
    BrandVoice(String),
    Mission(String),
    Differentiator(String),
    About(String),
}

impl ContextField {
    pub fn apply(self, context: &mut BrandContext) {
        match self {
            ContextField::BrandVoice(v) => context.brand_voice = v,
            ContextField::Mission(v) => context.mission = v,
            ContextField::Differentiator(v) => context.differentiator = v,
            ContextField::About(v) => context.about = Some(v),
        }
    }
}

// Remote provider configuration. Persisted, but generation always takes the mock path.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub use_mock: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            model: String::new(),
            use_mock: true,
        }
    }
}

/// The single persisted record holding all studio state.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Envelope {
    pub templates: Vec<Template>,
    #[serde(default)]
    pub gens: Vec<Generation>,
    #[serde(default)]
    pub provider: ProviderSettings,
    pub context: BrandContext,
}

// Export file shape; provider settings are intentionally left out
#[derive(Serialize, Debug)]
pub struct ExportBundle<'a> {
    pub templates: &'a [Template],
    pub gens: &'a [Generation],
    pub context: &'a BrandContext,
}

// Import file shape; every section is optional and applied independently
#[derive(Deserialize, Debug, Default)]
pub struct ImportBundle {
    #[serde(default)]
    pub templates: Option<Vec<Template>>,
    #[serde(default)]
    pub gens: Option<Vec<Generation>>,
    #[serde(default)]
    pub context: Option<BrandContext>,
}

/// Which sections an import replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub templates: bool,
    pub gens: bool,
    pub context: bool,
}
