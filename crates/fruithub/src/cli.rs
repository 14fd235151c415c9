//! Clap derive structures for the `fruithub` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use fruithub_core::{EntityKind, ProductStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fruithub -- manage a Fruithub CMS backend from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "fruithub",
    version,
    about = "Manage Fruithub CMS catalog data from the command line",
    long_about = "Lists and edits products, categories and administrators of a\n\
        Fruithub CMS backend. Collections are cached on disk per profile and\n\
        reconciled against the backend on every load.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "FRUITHUB_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, short = 'u', env = "FRUITHUB_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FRUITHUB_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "FRUITHUB_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Keep snapshots in memory only for this invocation
    #[arg(long, global = true)]
    pub no_cache: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage catalog products
    #[command(alias = "prod", alias = "p")]
    Products(ProductsArgs),

    /// Manage product categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Manage administrator accounts
    Admins(AdminsArgs),

    /// Show the dashboard statistics bundle
    Stats,

    /// Verify credentials against the backend
    Login(LoginArgs),

    /// Inspect or clear persisted snapshots
    Cache(CacheArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRODUCTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products (archived and deleted ones are hidden by default)
    #[command(alias = "ls")]
    List {
        /// Include archived and deleted products
        #[arg(long, short = 'a')]
        include_archived: bool,

        /// Case-insensitive match on title or category name
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show a single product
    Get {
        /// Product ID
        id: String,
    },

    /// Create a product
    Add {
        #[arg(long)]
        title: String,

        /// URL slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        price: f64,

        #[arg(long, default_value = "0")]
        stock: u32,

        /// Category ID
        #[arg(long)]
        category: String,

        #[arg(long)]
        description: Option<String>,

        /// Image URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,

        #[arg(long, value_enum)]
        status: Option<ProductStatusArg>,
    },

    /// Update fields of a product
    Update {
        /// Product ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        stock: Option<u32>,

        /// Category ID
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_enum)]
        status: Option<ProductStatusArg>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProductStatusArg {
    Active,
    LowStock,
    OutOfStock,
    Archived,
}

impl From<ProductStatusArg> for ProductStatus {
    fn from(arg: ProductStatusArg) -> Self {
        match arg {
            ProductStatusArg::Active => Self::Active,
            ProductStatusArg::LowStock => Self::LowStock,
            ProductStatusArg::OutOfStock => Self::OutOfStock,
            ProductStatusArg::Archived => Self::Archived,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATEGORIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    #[command(alias = "ls")]
    List,

    /// Create a category
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Update fields of a category
    Update {
        /// Category ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a category
    #[command(alias = "rm")]
    Delete {
        /// Category ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMINS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminsArgs {
    #[command(subcommand)]
    pub command: AdminsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminsCommand {
    /// List administrator accounts
    #[command(alias = "ls")]
    List,

    /// Create an administrator (prompts for the initial password)
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "admin")]
        role: String,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Create without setting a password
        #[arg(long)]
        no_password: bool,
    },

    /// Update fields of an administrator
    Update {
        /// Admin ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Prompt for a new password
        #[arg(long)]
        reset_password: bool,
    },

    /// Delete an administrator
    #[command(alias = "rm")]
    Delete {
        /// Admin ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOGIN / CACHE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login email (defaults to the profile's email)
    #[arg(long, short = 'e')]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Show where snapshots for the active profile are stored
    Path,

    /// Drop persisted snapshots (all collections unless one is named)
    Clear {
        #[arg(value_enum)]
        collection: Option<CollectionArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollectionArg {
    Products,
    Categories,
    Admins,
    Stats,
}

impl From<CollectionArg> for EntityKind {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Products => Self::Product,
            CollectionArg::Categories => Self::Category,
            CollectionArg::Admins => Self::Admin,
            CollectionArg::Stats => Self::Stat,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive profile setup
    Init,

    /// Show the current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Set a value on the active profile
    Set {
        /// Key: base_url, email, password_env, cache, cache_dir, timeout
        key: String,
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// Store the login password in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
