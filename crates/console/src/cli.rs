use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use varejo_core::{DEFAULT_PAGE_SIZE, PageRequest};

#[derive(Parser, Debug)]
#[command(name = "varejo", version, about = "Command-line client for the Varejo ERP backend")]
pub struct Cli {
    /// Backend base URL; overrides API_BASE_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the session tokens are kept.
    #[arg(long, global = true, env = "VAREJO_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Session(SessionCommand),
    #[command(subcommand)]
    Products(ProductCommand),
    /// List categories.
    Categories {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    #[command(subcommand)]
    Customers(CustomerCommand),
    /// List suppliers.
    Suppliers {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List system users (administrators only).
    Users {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Employee headcount and payroll of one page.
    Employees {
        #[arg(long)]
        departamento: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Promotions with per-status counts.
    Promotions {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    #[command(subcommand)]
    Sales(SaleCommand),
    #[command(subcommand)]
    Stock(StockCommand),
    #[command(subcommand)]
    Reports(ReportCommand),
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Log in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "VAREJO_PASSWORD", hide_env_values = true)]
        senha: String,
    },
    /// End the session (local data is cleared even if the backend fails).
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Force a token refresh.
    Refresh,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

impl PageArgs {
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PeriodArgs {
    /// First day, `YYYY-MM-DD`.
    #[arg(long)]
    pub from: NaiveDate,
    /// Last day, `YYYY-MM-DD`.
    #[arg(long)]
    pub to: NaiveDate,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// List products.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        categoria: Option<i64>,
        /// Only active (`true`) or inactive (`false`) products.
        #[arg(long)]
        active: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Stock statistics of one page of products.
    Stats {
        #[command(flatten)]
        page: PageArgs,
    },
    /// One page of products as CSV.
    Export {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Audit trail of a product.
    History { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    Stats {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SaleCommand {
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        cliente: Option<i64>,
        #[command(flatten)]
        page: PageArgs,
    },
    Cancel {
        id: i64,
        #[arg(long)]
        motivo: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum StockCommand {
    /// Movement log, optionally of one product.
    Movements {
        #[arg(long)]
        produto: Option<i64>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Products at or below their minimum stock.
    Low,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    Dashboard,
    Summary {
        #[command(flatten)]
        period: PeriodArgs,
    },
    Top {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Sales CSV of the period.
    Export {
        #[command(flatten)]
        period: PeriodArgs,
    },
}
