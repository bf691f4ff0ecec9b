use super::App;
use crate::gallery::Filter;

impl App {
    /// Filter buttons in display order: All, categories, Favorites.
    pub fn filter_buttons(&self) -> Vec<Filter> {
        self.config.filter_buttons(&self.gallery)
    }

    fn filter_categories(&self) -> Vec<String> {
        self.config.filter_categories(&self.gallery)
    }

    /// Switch filter and re-render from the top of the new view.
    pub fn set_filter(&mut self, filter: Filter) {
        tracing::debug!(filter = %filter, "filter changed");
        self.gallery.set_filter(filter);
        self.selection.cursor = 0;
        self.selection.scroll_row = 0;
    }

    pub fn next_filter(&mut self) {
        let next = self.gallery.filter().next(&self.filter_categories());
        self.set_filter(next);
    }

    pub fn prev_filter(&mut self) {
        let prev = self.gallery.filter().prev(&self.filter_categories());
        self.set_filter(prev);
    }

    /// Select the n-th filter button (0 = All).
    pub fn select_filter_button(&mut self, n: usize) {
        if let Some(filter) = self.filter_buttons().into_iter().nth(n) {
            self.set_filter(filter);
        }
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(Filter::All);
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{app_with, image};
    use crate::gallery::{Filter, ImageId};

    #[test]
    fn test_filter_buttons_order() {
        let app = app_with(vec![image(1, "hot")]);
        assert_eq!(
            app.filter_buttons(),
            vec![
                Filter::All,
                Filter::category("hot"),
                Filter::category("nature"),
                Filter::Favorites,
            ]
        );
    }

    #[test]
    fn test_uncategorized_button_appears_and_cycles() {
        let mut app = app_with(vec![image(1, "hot"), image(2, "")]);
        assert_eq!(
            app.filter_buttons(),
            vec![
                Filter::All,
                Filter::category("hot"),
                Filter::category("nature"),
                Filter::category(""),
                Filter::Favorites,
            ]
        );

        app.select_filter_button(3);
        let view: Vec<ImageId> = app.gallery.filtered_view().iter().map(|i| i.id).collect();
        assert_eq!(view, vec![ImageId(2)]);

        app.next_filter();
        assert_eq!(app.gallery.filter(), &Filter::Favorites);
        app.prev_filter();
        assert_eq!(app.gallery.filter(), &Filter::category(""));
    }

    #[test]
    fn test_set_filter_resets_cursor_but_not_lightbox() {
        let mut app = app_with(vec![image(1, "hot"), image(2, "hot"), image(3, "nature")]);
        app.selection.cursor = 2;
        app.open_lightbox();
        app.set_filter(Filter::category("hot"));

        assert_eq!(app.selection.cursor, 0);
        assert!(app.gallery.lightbox().is_open());
        assert_eq!(app.selected_image().unwrap().id, ImageId(1));
    }

    #[test]
    fn test_next_filter_cycles_back_to_all() {
        let mut app = app_with(vec![image(1, "hot")]);
        let mut seen = Vec::new();
        for _ in 0..4 {
            app.next_filter();
            seen.push(app.gallery.filter().clone());
        }
        assert_eq!(seen.last(), Some(&Filter::All));
        app.prev_filter();
        assert_eq!(app.gallery.filter(), &Filter::Favorites);
    }

    #[test]
    fn test_select_filter_button_out_of_range_is_ignored() {
        let mut app = app_with(vec![image(1, "hot")]);
        app.select_filter_button(1);
        assert_eq!(app.gallery.filter(), &Filter::category("hot"));
        app.select_filter_button(42);
        assert_eq!(app.gallery.filter(), &Filter::category("hot"));
    }
}
