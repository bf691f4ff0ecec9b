use super::Image;
use std::fmt;
use std::str::FromStr;

/// Active gallery filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every image, in collection order
    #[default]
    All,
    /// Images whose category equals the given name exactly. The empty name
    /// selects uncategorized images.
    Category(String),
    /// Images marked as favorite
    Favorites,
}

impl Filter {
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Check whether an image belongs to this filter's view.
    pub fn matches(&self, image: &Image) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(name) if name.is_empty() => image.is_uncategorized(),
            Filter::Category(name) => image.category == *name,
            Filter::Favorites => image.favorite,
        }
    }

    /// Return human-readable display name for this filter.
    pub fn display_name(&self) -> String {
        match self {
            Filter::All => "All".to_string(),
            Filter::Category(name) if name.is_empty() => "Uncategorized".to_string(),
            Filter::Category(name) => crate::utils::capitalize(name),
            Filter::Favorites => "Favorites".to_string(),
        }
    }

    /// Cycle to the next filter button: All, then each category, then Favorites.
    ///
    /// An active category that is no longer listed falls back to Favorites so
    /// the cycle still terminates at All.
    pub fn next(&self, categories: &[String]) -> Self {
        match self {
            Filter::All => categories
                .first()
                .map(|c| Filter::Category(c.clone()))
                .unwrap_or(Filter::Favorites),
            Filter::Category(current) => match categories.iter().position(|c| c == current) {
                Some(pos) if pos + 1 < categories.len() => {
                    Filter::Category(categories[pos + 1].clone())
                }
                _ => Filter::Favorites,
            },
            Filter::Favorites => Filter::All,
        }
    }

    /// Cycle to the previous filter button.
    pub fn prev(&self, categories: &[String]) -> Self {
        match self {
            Filter::All => Filter::Favorites,
            Filter::Favorites => categories
                .last()
                .map(|c| Filter::Category(c.clone()))
                .unwrap_or(Filter::All),
            Filter::Category(current) => match categories.iter().position(|c| c == current) {
                Some(pos) if pos > 0 => Filter::Category(categories[pos - 1].clone()),
                _ => Filter::All,
            },
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Category(name) => write!(f, "{}", name),
            Filter::Favorites => write!(f, "favorites"),
        }
    }
}

impl FromStr for Filter {
    type Err = std::convert::Infallible;

    /// `all` and `favorites` (or `fav`/`favs`) are reserved; anything else
    /// names a category verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_lowercase().as_str() {
            "all" | "*" => Filter::All,
            "favorites" | "favourites" | "favs" | "fav" => Filter::Favorites,
            _ => Filter::Category(trimmed.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::ImageId;

    fn cats() -> Vec<String> {
        vec!["hot".to_string(), "nature".to_string()]
    }

    #[test]
    fn test_matches() {
        let img = Image::new(ImageId(1), "a", "a.jpg", "hot").with_favorite(true);
        assert!(Filter::All.matches(&img));
        assert!(Filter::category("hot").matches(&img));
        assert!(!Filter::category("Hot").matches(&img));
        assert!(Filter::Favorites.matches(&img));

        let plain = Image::new(ImageId(2), "b", "b.jpg", "");
        assert!(!Filter::Favorites.matches(&plain));
        assert!(Filter::category("").matches(&plain));

        let blank = Image::new(ImageId(3), "c", "c.jpg", "  ");
        assert!(Filter::category("").matches(&blank));
        assert!(!Filter::category("").matches(&img));
    }

    #[test]
    fn test_parse_reserved_names() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("ALL".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("favorites".parse::<Filter>().unwrap(), Filter::Favorites);
        assert_eq!("fav".parse::<Filter>().unwrap(), Filter::Favorites);
        assert_eq!(
            " Nature ".parse::<Filter>().unwrap(),
            Filter::category("Nature")
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for filter in [Filter::All, Filter::Favorites, Filter::category("urban")] {
            assert_eq!(filter.to_string().parse::<Filter>().unwrap(), filter);
        }
    }

    #[test]
    fn test_next_cycles_through_buttons() {
        let cats = cats();
        let mut filter = Filter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.next(&cats);
            seen.push(filter.clone());
        }
        assert_eq!(
            seen,
            vec![
                Filter::category("hot"),
                Filter::category("nature"),
                Filter::Favorites,
                Filter::All,
            ]
        );
    }

    #[test]
    fn test_prev_is_inverse_of_next() {
        let cats = cats();
        for filter in [
            Filter::All,
            Filter::category("hot"),
            Filter::category("nature"),
            Filter::Favorites,
        ] {
            assert_eq!(filter.next(&cats).prev(&cats), filter);
        }
    }

    #[test]
    fn test_next_without_categories() {
        assert_eq!(Filter::All.next(&[]), Filter::Favorites);
        assert_eq!(Filter::Favorites.next(&[]), Filter::All);
        assert_eq!(Filter::category("gone").next(&[]), Filter::Favorites);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Filter::category("urban").display_name(), "Urban");
        assert_eq!(Filter::category("").display_name(), "Uncategorized");
        assert_eq!(Filter::Favorites.display_name(), "Favorites");
    }
}
