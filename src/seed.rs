// Starter data used when no persisted record can be loaded

use crate::models::{new_id, BrandContext, Channel, Envelope, ProviderSettings, Template};

pub fn default_context() -> BrandContext {
    BrandContext {
        brand_voice: "Witty/funny, profesjonell, teknisk når nødvendig, men relatable. Norsk, kort og tydelig.".to_string(),
        mission: "Bli #1 app for internkontroll og drift i hotell- og serveringsbransjen i Skandinavia og UK.".to_string(),
        differentiator: "Enkel, morsom, god UX. Mattrygghet og drift (HACCP, avvik, onboarding, inspeksjon).".to_string(),
        about: Some(String::new()),
    }
}

#[allow(clippy::too_many_arguments)]
fn starter(
    name: &str,
    purpose: &str,
    tone: &str,
    audience: &str,
    formats: &str,
    guardrails: &str,
    base_prompt: &str,
    examples: &str,
    tags: &[&str],
) -> Template {
    Template {
        id: new_id(),
        name: name.to_string(),
        purpose: purpose.to_string(),
        tone: tone.to_string(),
        audience: audience.to_string(),
        formats: formats.to_string(),
        guardrails: guardrails.to_string(),
        base_prompt: base_prompt.to_string(),
        examples: Some(examples.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        channel: Channel::Any,
    }
}

/// The seven starter templates, each with a fresh id.
pub fn default_templates() -> Vec<Template> {
    vec![
        starter(
            "Dagens kaffeprat",
            "Lavterskel miniprater fra kontoret om drift, rutiner og gjesteopplevelse.",
            "Lett, nysgjerrig, hyggelig.",
            "Daglige ledere og restaurantsjefer i Norge.",
            "Reels 20-45s, LinkedIn tekst + bilde, YouTube Shorts",
            "Ingen teknisk sjargong. Ingen em-dash. Spør publikum på slutten.",
            "Lag konkrete kort-idéer som er TEMAFORSLAG til serien. Avslutt gjerne med et spørsmål.",
            "Hva er den største tabben restauranter gjør?; Hva skjer når Mattilsynet kommer på besøk?; Hva kan en typisk HMS-tabbe være?",
            &["serie", "kaffe", "kontor"],
        ),
        starter(
            "Nye funksjoner",
            "Presenter nye funksjoner og hvorfor de betyr noe for brukeren.",
            "Optimistisk, konkret, uten hype.",
            "Eksisterende og potensielle kunder.",
            "Karusell 4-6 slides, 20-40s skjermopptak, LinkedIn post",
            "Vis, ikke skryt. Et konkret før/etter. Ingen em-dash.",
            "Beskriv problemet, vis løsningen kort, og en enkel call-to-action til slutt.",
            "",
            &["produkt", "release"],
        ),
        starter(
            "Tips og triks i Runwell",
            "Små lifehacks i appen som sparer tid.",
            "Hjelpsom, vennlig, effektiv.",
            "Kjøkken- og driftspersonell, ledere.",
            "Reels 15-30s, skjermopptak, GIF",
            "Ett tips per post. Vis steg. Ingen em-dash.",
            "Gi klare steg-for-steg med 1 konkret gevinst.",
            "",
            &["howto", "tips"],
        ),
        starter(
            "Fun fact fra serveringsbransjen",
            "Underholdende innsikter som trigger deling og samtale.",
            "Lett og nerde-vennlig.",
            "Alle i bransjen.",
            "Karusell, kortvideo, statisk post",
            "Sjekk fakta. Ingen em-dash. Unngå pekefinger.",
            "En morsom/overraskende fact med kort forklaring og hvorfor det betyr noe i praksis.",
            "",
            &["funfact", "deling"],
        ),
        starter(
            "FAQ",
            "Svar på vanlige spørsmål om Runwell kort og tydelig.",
            "Tydelig, trygg, kort.",
            "Potensielle kunder og nye brukere.",
            "Tekstpost, kortvideo Q&A",
            "Ett spørsmål per post. Ingen em-dash.",
            "Gi svaret i 2–4 setninger + ett eksempel.",
            "",
            &["faq", "support"],
        ),
        starter(
            "Ny kunde",
            "Kundeannounce som fremhever kundens styrker og hvorfor de valgte Runwell.",
            "Varm, respektfull, kundefokusert.",
            "Hele nettverket.",
            "Foto + tekst, kortvideo, LinkedIn post",
            "Ikke salgspreget. Vis sitat om mulig. Ingen em-dash.",
            "Fortell om kunden, hva de er gode på, og én konkret forbedring Runwell hjelper med.",
            "",
            &["kunde", "suksess"],
        ),
        starter(
            "Ny partner",
            "Fremhev samarbeid og felles verdi for brukerne.",
            "Proff, positiv, konkret.",
            "Kunder, partnere, kandidater.",
            "Foto + tekst, karusell, kortvideo",
            "Ikke buzzwords. Vis hva brukerne faktisk får. Ingen em-dash.",
            "Hva gjør partneren, hvorfor passer vi sammen, og hva er første gevinst for kunden?",
            "",
            &["partner", "økosystem"],
        ),
    ]
}

/// Fallback record: starter templates, empty history, mock provider, default context.
pub fn default_envelope() -> Envelope {
    Envelope {
        templates: default_templates(),
        gens: Vec::new(),
        provider: ProviderSettings::default(),
        context: default_context(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_envelope_shape() {
        let envelope = default_envelope();
        assert_eq!(envelope.templates.len(), 7);
        assert!(envelope.gens.is_empty());
        assert!(envelope.provider.use_mock);
        assert!(envelope.provider.endpoint.is_empty());

        let ids: HashSet<_> = envelope.templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 7);
        assert!(envelope.templates.iter().any(|t| t.name == "FAQ"));
    }
}
