//! Transient filter and layout selection. Reset on every start.

use crate::catalog::Category;

pub const ALL_LABEL: &str = "All";
pub const FAVORITES_LABEL: &str = "Favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Favorites,
    Category(Category),
}

impl Filter {
    /// Every option in display order: All, Favorites, then the categories.
    pub fn options() -> Vec<Filter> {
        let mut options = vec![Filter::All, Filter::Favorites];
        options.extend(Category::all().into_iter().map(Filter::Category));
        options
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => ALL_LABEL,
            Filter::Favorites => FAVORITES_LABEL,
            Filter::Category(category) => category.as_str(),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case(ALL_LABEL) {
            Some(Filter::All)
        } else if label.eq_ignore_ascii_case(FAVORITES_LABEL) {
            Some(Filter::Favorites)
        } else {
            Category::from_label(label).map(Filter::Category)
        }
    }

    /// Next option in display order, wrapping around.
    pub fn next(&self) -> Self {
        let options = Self::options();
        let idx = options.iter().position(|f| f == self).unwrap_or(0);
        options[(idx + 1) % options.len()]
    }

    pub fn prev(&self) -> Self {
        let options = Self::options();
        let idx = options.iter().position(|f| f == self).unwrap_or(0);
        options[(idx + options.len() - 1) % options.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::Table,
            ViewMode::Table => ViewMode::Cards,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::Table => "table",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub filter: Filter,
    pub view_mode: ViewMode,
}

impl Selection {
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selection = Selection::default();
        assert_eq!(selection.filter, Filter::All);
        assert_eq!(selection.view_mode, ViewMode::Cards);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Filter::from_label("All"), Some(Filter::All));
        assert_eq!(Filter::from_label("favorites"), Some(Filter::Favorites));
        assert_eq!(
            Filter::from_label("Lend & Borrow"),
            Some(Filter::Category(Category::LendBorrow))
        );
        assert_eq!(Filter::from_label("Perps"), None);
    }

    #[test]
    fn test_every_option_round_trips_through_label() {
        for option in Filter::options() {
            assert_eq!(Filter::from_label(option.label()), Some(option));
        }
    }

    #[test]
    fn test_cycling_wraps() {
        let options = Filter::options();
        let last = *options.last().unwrap();
        assert_eq!(last.next(), Filter::All);
        assert_eq!(Filter::All.prev(), last);
        assert_eq!(Filter::All.next(), Filter::Favorites);
    }

    #[test]
    fn test_view_mode_toggle() {
        let mut selection = Selection::default();
        selection.set_view_mode(selection.view_mode.toggled());
        assert_eq!(selection.view_mode, ViewMode::Table);
        selection.set_view_mode(selection.view_mode.toggled());
        assert_eq!(selection.view_mode, ViewMode::Cards);
    }
}
