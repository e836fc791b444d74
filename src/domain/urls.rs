//! Canonical detail-page addresses
//!
//! Each addressable record knows the named route of its detail page and
//! builds its own address from its identity.

/// Named detail routes served by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailRoute {
    Genre,
    Book,
    Author,
}

impl DetailRoute {
    pub fn name(self) -> &'static str {
        match self {
            DetailRoute::Genre => "genre-detail",
            DetailRoute::Book => "book-detail",
            DetailRoute::Author => "author-detail",
        }
    }

    fn segment(self) -> &'static str {
        match self {
            DetailRoute::Genre => "genre",
            DetailRoute::Book => "book",
            DetailRoute::Author => "author",
        }
    }

    /// Router pattern with a single `:id` parameter
    pub fn pattern(self) -> String {
        format!("/catalog/{}/:id/", self.segment())
    }

    /// Resolve the route for one identity
    pub fn reverse(self, id: impl ToString) -> String {
        format!("/catalog/{}/{}/", self.segment(), id.to_string())
    }
}

/// Records with a canonical detail page.
pub trait AbsoluteUrl {
    const ROUTE: DetailRoute;

    fn url_id(&self) -> String;

    fn get_absolute_url(&self) -> String {
        Self::ROUTE.reverse(self.url_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_ends_with_identity() {
        assert_eq!(DetailRoute::Book.reverse(42), "/catalog/book/42/");
        assert!(DetailRoute::Genre.reverse(7).ends_with("/7/"));
    }

    #[test]
    fn route_names_are_distinct() {
        assert_eq!(DetailRoute::Genre.name(), "genre-detail");
        assert_eq!(DetailRoute::Book.name(), "book-detail");
        assert_eq!(DetailRoute::Author.name(), "author-detail");
    }

    #[test]
    fn pattern_matches_reverse_shape() {
        assert_eq!(DetailRoute::Author.pattern(), "/catalog/author/:id/");
    }
}
