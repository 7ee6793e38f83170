//! Screens the client can show.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    SearchResults,
    ListingDetail(String),
    Favorites,
    Messages,
    Conversation(String),
    SavedSearches,
    Profile,
    Analytics,
    Login,
    Register,
}

impl View {
    /// Whether a signed-in user is needed to open this view.
    pub const fn requires_auth(&self) -> bool {
        match self {
            Self::Favorites
            | Self::Messages
            | Self::Conversation(_)
            | Self::SavedSearches
            | Self::Profile
            | Self::Analytics => true,
            Self::Home
            | Self::SearchResults
            | Self::ListingDetail(_)
            | Self::Login
            | Self::Register => false,
        }
    }

    /// Phrase for "Please login to ..." toasts.
    pub const fn auth_action(&self) -> &'static str {
        match self {
            Self::Favorites => "view favorites",
            Self::Messages | Self::Conversation(_) => "view messages",
            Self::SavedSearches => "view saved searches",
            Self::Profile => "view your profile",
            Self::Analytics => "view analytics",
            Self::Home
            | Self::SearchResults
            | Self::ListingDetail(_)
            | Self::Login
            | Self::Register => "continue",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::SearchResults => "Search results",
            Self::ListingDetail(_) => "Listing",
            Self::Favorites => "Favorites",
            Self::Messages => "Messages",
            Self::Conversation(_) => "Conversation",
            Self::SavedSearches => "Saved searches",
            Self::Profile => "Profile",
            Self::Analytics => "Analytics",
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListingDetail(id) | Self::Conversation(id) => {
                write!(f, "{} ({id})", self.label())
            }
            _ => f.write_str(self.label()),
        }
    }
}
