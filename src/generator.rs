//! Mock idea generation.
//!
//! Ideas are drawn from a fixed pool of themes: the pool is shuffled with the
//! supplied random source and the first `clamped_count` themes are kept. The
//! pool has ten themes, so asking for more than ten yields ten.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{BrandContext, Cta, GenerationRequest, Template};

pub const IDEA_THEMES: [&str; 10] = [
    "Hva er den største tabben restauranter gjør?",
    "Hva skjer når Mattilsynet kommer på besøk?",
    "Typiske HMS-tabber og hvordan unngå dem",
    "Før/etter – en rutine som sparer tid",
    "Myte vs. virkelighet i drift",
    "Ukas rutine – en ting som sparer tid",
    "Sitat fra kunde/partner + læring",
    "3 steg for bedre internkontroll",
    "Vanlige avvik og raske fiks",
    "Sjekkliste før rush",
];

/// Trace suffix embedded in every idea, e.g. `FAQ · Short · CTA:Trial`.
pub fn describe(request: &GenerationRequest, template: &Template) -> String {
    let mut base = format!("{} · {}", template.name, request.length);
    if request.cta != Cta::None {
        base.push_str(&format!(" · CTA:{}", request.cta));
    }
    if let Some(angle) = request.angle() {
        base.push_str(&format!(" · Vinkel:{}", angle));
    }
    base
}

/// Produces ideas for `request` without contacting any provider.
///
/// The brand context is accepted for parity with a real provider but does not
/// influence the mock output.
pub fn mock_ideas<R: Rng + ?Sized>(
    request: &GenerationRequest,
    template: &Template,
    _context: &BrandContext,
    rng: &mut R,
) -> Vec<String> {
    let base = describe(request, template);
    let mut pool: Vec<String> = IDEA_THEMES
        .iter()
        .map(|theme| format!("Tema: {} ({})", theme, base))
        .collect();
    pool.shuffle(rng);
    pool.truncate(request.clamped_count());
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Length;
    use crate::seed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn faq() -> Template {
        Template {
            name: "FAQ".to_string(),
            ..Template::blank()
        }
    }

    fn request(n_ideas: i64, cta: Cta, angle: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            template_id: "t1".to_string(),
            n_ideas,
            length: Length::Short,
            cta,
            angle: angle.map(str::to_string),
        }
    }

    #[test]
    fn test_describe_omits_none_cta_and_empty_angle() {
        let template = faq();
        assert_eq!(describe(&request(3, Cta::None, None), &template), "FAQ · Short");
        assert_eq!(describe(&request(3, Cta::None, Some("")), &template), "FAQ · Short");
        assert_eq!(
            describe(&request(3, Cta::Trial, Some("jul")), &template),
            "FAQ · Short · CTA:Trial · Vinkel:jul"
        );
    }

    #[test]
    fn test_three_distinct_faq_ideas() {
        let mut rng = StdRng::seed_from_u64(7);
        let ideas = mock_ideas(&request(3, Cta::None, None), &faq(), &seed::default_context(), &mut rng);

        assert_eq!(ideas.len(), 3);
        let unique: HashSet<_> = ideas.iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(ideas.iter().all(|idea| idea.contains("FAQ · Short")));
    }

    #[test]
    fn test_count_is_clamped() {
        let context = seed::default_context();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(mock_ideas(&request(0, Cta::None, None), &faq(), &context, &mut rng).len(), 1);
        assert_eq!(mock_ideas(&request(-3, Cta::None, None), &faq(), &context, &mut rng).len(), 1);
        assert_eq!(mock_ideas(&request(10, Cta::None, None), &faq(), &context, &mut rng).len(), 10);
    }

    #[test]
    fn test_count_above_pool_yields_whole_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        let ideas = mock_ideas(&request(20, Cta::None, None), &faq(), &seed::default_context(), &mut rng);
        assert_eq!(ideas.len(), IDEA_THEMES.len());

        let unique: HashSet<_> = ideas.iter().collect();
        assert_eq!(unique.len(), IDEA_THEMES.len());
    }

    #[test]
    fn test_ideas_come_from_the_theme_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        let ideas = mock_ideas(&request(5, Cta::Soft, None), &faq(), &seed::default_context(), &mut rng);
        for idea in &ideas {
            assert!(IDEA_THEMES.iter().any(|theme| idea == &format!("Tema: {} (FAQ · Short · CTA:Soft)", theme)));
        }
    }

    #[test]
    fn test_same_seed_same_ideas() {
        let context = seed::default_context();
        let req = request(4, Cta::None, None);
        let first = mock_ideas(&req, &faq(), &context, &mut StdRng::seed_from_u64(42));
        let second = mock_ideas(&req, &faq(), &context, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
