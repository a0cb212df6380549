//! Wiring: configuration, session storage and one service per resource, all
//! sharing a single gateway.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use varejo_auth::{AuthService, UserService};
use varejo_employees::EmployeeService;
use varejo_gateway::{ApiConfig, FileStorage, Gateway, SessionStorage, StorageTokenProvider};
use varejo_inventory::StockService;
use varejo_parties::{CustomerService, SupplierService};
use varejo_products::{CategoryService, ProductService};
use varejo_promotions::PromotionService;
use varejo_reports::ReportService;
use varejo_sales::SaleService;

/// `<data dir>/varejo/session.json`, or `./varejo/session.json` on platforms
/// without a data directory.
pub fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("varejo")
        .join("session.json")
}

/// `--api-url` replaces the configured base URL but keeps the timeout.
pub fn resolve_config(api_url: Option<&str>, from_env: ApiConfig) -> ApiConfig {
    match api_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => {
            let config = ApiConfig::new(url);
            match from_env.timeout() {
                Some(timeout) => config.with_timeout(timeout),
                None => config,
            }
        }
        None => from_env,
    }
}

pub struct AppContext {
    pub auth: AuthService,
    pub users: UserService,
    pub products: ProductService,
    pub categories: CategoryService,
    pub customers: CustomerService,
    pub suppliers: SupplierService,
    pub employees: EmployeeService,
    pub promotions: PromotionService,
    pub sales: SaleService,
    pub stock: StockService,
    pub reports: ReportService,
}

impl AppContext {
    pub fn build(config: ApiConfig, session_file: &Path) -> anyhow::Result<Self> {
        let storage: Arc<dyn SessionStorage> = Arc::new(
            FileStorage::open(session_file).with_context(|| {
                format!("failed to open session file {}", session_file.display())
            })?,
        );
        let tokens = Arc::new(StorageTokenProvider::new(storage.clone()));

        tracing::debug!(
            base_url = config.base_url(),
            session_file = %session_file.display(),
            "building services"
        );
        let gateway = Gateway::new(config, tokens).context("failed to build HTTP client")?;

        Ok(Self {
            auth: AuthService::new(gateway.clone(), storage),
            users: UserService::new(gateway.clone()),
            products: ProductService::new(gateway.clone()),
            categories: CategoryService::new(gateway.clone()),
            customers: CustomerService::new(gateway.clone()),
            suppliers: SupplierService::new(gateway.clone()),
            employees: EmployeeService::new(gateway.clone()),
            promotions: PromotionService::new(gateway.clone()),
            sales: SaleService::new(gateway.clone()),
            stock: StockService::new(gateway.clone()),
            reports: ReportService::new(gateway),
        })
    }
}
