use crate::catalog::{Catalog, Category, Prompt};
use crate::favorites::Favorites;
use crate::feedback::CopyFeedback;
use crate::selection::{Filter, Selection};

/// A prompt as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPrompt {
    pub id: String,
    pub category: Category,
    pub protocol: String,
    pub text: String,
    pub is_favorite: bool,
    pub just_copied: bool,
}

/// Prompts matching the active filter, in catalog order.
///
/// Favorite ids that are not in the catalog are ignored.
pub fn project<'a>(catalog: &'a Catalog, favorites: &Favorites, selection: &Selection) -> Vec<&'a Prompt> {
    catalog
        .prompts()
        .iter()
        .filter(|prompt| matches_filter(prompt, favorites, &selection.filter))
        .collect()
}

/// [`project`] enriched with the per-prompt favorite and copied flags.
pub fn project_view(
    catalog: &Catalog,
    favorites: &Favorites,
    selection: &Selection,
    feedback: &CopyFeedback,
) -> Vec<ProjectedPrompt> {
    project(catalog, favorites, selection)
        .into_iter()
        .map(|prompt| ProjectedPrompt {
            id: prompt.id.clone(),
            category: prompt.category,
            protocol: prompt.protocol.clone(),
            text: prompt.text.clone(),
            is_favorite: favorites.contains(&prompt.id),
            just_copied: feedback.is_copied(&prompt.id),
        })
        .collect()
}

/// Number of prompts each filter would show.
pub fn count(catalog: &Catalog, favorites: &Favorites, filter: &Filter) -> usize {
    catalog
        .prompts()
        .iter()
        .filter(|prompt| matches_filter(prompt, favorites, filter))
        .count()
}

fn matches_filter(prompt: &Prompt, favorites: &Favorites, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Favorites => favorites.contains(&prompt.id),
        Filter::Category(category) => prompt.category == *category,
    }
}
