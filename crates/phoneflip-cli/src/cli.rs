use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use phoneflip_core::api::LoginMethod;
use phoneflip_core::filters::{FilterSnapshot, Filters, SortBy};
use phoneflip_core::models::{Condition, UserType};

#[derive(Parser)]
#[command(name = "phoneflip")]
#[command(about = "Buy, sell and trade phones from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Backend URL for this invocation (overrides profile and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign in, register or sign out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Show cities, brands, storage and condition options
    Reference {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse listings
    #[command(alias = "ls")]
    Listings {
        #[command(flatten)]
        filters: FilterArgs,
        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Free-text search
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show model suggestions for partial input
    Suggest {
        /// Partial model name
        input: Vec<String>,
        /// Use the backend's brand catalog instead of the built-in one
        #[arg(long)]
        live: bool,
    },
    /// Manage favorite listings
    #[command(alias = "fav")]
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Read and send messages
    #[command(alias = "msg")]
    Messages {
        #[command(subcommand)]
        command: MessagesCommands,
    },
    /// Manage saved searches
    SavedSearches {
        #[command(subcommand)]
        command: SavedSearchCommands,
    },
    /// Read and write seller reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Show or edit the signed-in account's profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Show seller analytics for the signed-in account
    Analytics {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Listing criteria shared by `listings` and `saved-searches save`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Brand, e.g. Apple
    #[arg(long)]
    pub brand: Option<String>,
    /// Seller city
    #[arg(long)]
    pub city: Option<String>,
    /// Condition: new, like-new, excellent, good, fair, poor
    #[arg(long)]
    pub condition: Option<Condition>,
    /// Free-text search
    #[arg(long, short = 'q')]
    pub search: Option<String>,
    /// Minimum price
    #[arg(long, value_name = "AMOUNT")]
    pub min_price: Option<i64>,
    /// Maximum price
    #[arg(long, value_name = "AMOUNT")]
    pub max_price: Option<i64>,
    /// Sort order: recent, price-low, price-high, popular
    #[arg(long, default_value = "recent")]
    pub sort: SortBy,
}

impl FilterArgs {
    pub fn to_filters(&self) -> Filters {
        let mut filters = Filters::default();
        filters.merge(FilterSnapshot {
            brand: self.brand.clone(),
            city: self.city.clone(),
            condition: self.condition.map(|condition| condition.as_str().to_string()),
            search: self.search.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            sort_by: Some(self.sort),
        });
        filters
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum AccountType {
    Individual,
    Shop,
}

impl From<AccountType> for UserType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Individual => Self::Individual,
            AccountType::Shop => Self::Shop,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SocialProvider {
    Google,
    Facebook,
    Apple,
}

impl From<SocialProvider> for LoginMethod {
    fn from(value: SocialProvider) -> Self {
        match value {
            SocialProvider::Google => Self::Google,
            SocialProvider::Facebook => Self::Facebook,
            SocialProvider::Apple => Self::Apple,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// PhoneFlip backend URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Login with email or phone and store the token in the keychain
    Login {
        /// Account email
        #[arg(long, value_name = "EMAIL", conflicts_with = "phone")]
        email: Option<String>,
        /// Account phone number
        #[arg(long, value_name = "PHONE")]
        phone: Option<String>,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        city: String,
        #[arg(long, value_enum, default_value_t = AccountType::Individual)]
        account_type: AccountType,
        /// Shop name (shop accounts)
        #[arg(long)]
        shop_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        #[arg(long, value_name = "PASSWORD")]
        confirm_password: String,
    },
    /// Exchange a provider token for a PhoneFlip session
    SocialLogin {
        #[arg(long, value_enum)]
        provider: SocialProvider,
        /// Token issued by the provider
        #[arg(long)]
        token: String,
        /// Email reported by the provider
        #[arg(long)]
        email: String,
        /// Display name reported by the provider
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Show auth status for profile
    Status,
    /// Logout profile and clear stored token
    Logout,
}

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List favorite listings
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add or remove a listing from favorites
    Toggle {
        /// Listing ID
        listing_id: String,
    },
}

#[derive(Subcommand)]
pub enum MessagesCommands {
    /// List conversations
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one conversation
    Show {
        /// Conversation ID
        conversation_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Send a message about a listing
    Send {
        /// Receiver user ID
        #[arg(long)]
        to: String,
        /// Listing ID
        #[arg(long)]
        listing: String,
        /// Make a price offer
        #[arg(long, value_name = "AMOUNT")]
        offer: Option<i64>,
        /// Message text
        #[arg(required = true)]
        content: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum SavedSearchCommands {
    /// List saved searches
    List {
        #[arg(long)]
        json: bool,
    },
    /// Save the given criteria under a name
    Save {
        /// Saved search name
        name: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Run a saved search
    Apply {
        /// Saved search ID
        id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the signed-in account
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change profile fields; omitted fields stay as they are
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Shop name shown on listings of shop accounts
        #[arg(long)]
        shop_name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Show a seller's profile and reviews
    List {
        /// Seller user ID
        user_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Review a seller for a listing
    Add {
        /// Seller user ID
        user_id: String,
        /// Listing ID
        #[arg(long)]
        listing: String,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,
        /// Review text
        #[arg(long, default_value = "")]
        comment: String,
    },
}
