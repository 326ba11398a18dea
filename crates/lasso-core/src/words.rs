use lasso_types::geometry::{Rect, Size};
use lasso_types::observation::TextRegion;

use crate::mapper;

/// One selectable word, derived from a [`TextRegion`] and the current
/// viewport. `global_index` is a dense 0-based sequence in region emission
/// order, so a contiguous index span reads naturally left-to-right,
/// top-to-bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableWord {
    pub text: String,
    pub normalized_rect: Rect,
    pub screen_rect: Rect,
    pub global_index: usize,
    pub source_region: usize,
}

/// Rebuild the word list from a region snapshot. Regions holding several
/// words are split on whitespace, apportioning the x extent by character
/// count with one character's worth of gap between words.
pub fn build_words(regions: &[TextRegion], viewport: Size) -> Vec<SelectableWord> {
    let mut words = Vec::new();
    for (source_region, region) in regions.iter().enumerate() {
        let parts: Vec<&str> = region.text.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        let total_chars = parts.iter().map(|w| w.chars().count()).sum::<usize>() + parts.len() - 1;
        let mut cursor = 0usize;
        for part in parts {
            let chars = part.chars().count();
            let x = region.rect.x + region.rect.width * cursor as f32 / total_chars as f32;
            let width = region.rect.width * chars as f32 / total_chars as f32;
            let normalized_rect = Rect::new(x, region.rect.y, width, region.rect.height);
            words.push(SelectableWord {
                text: part.to_string(),
                normalized_rect,
                screen_rect: mapper::to_screen(normalized_rect, viewport),
                global_index: words.len(),
                source_region,
            });
            cursor += chars + 1;
        }
    }
    words
}
