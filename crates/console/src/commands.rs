use anyhow::{Context as _, bail};
use chrono::{Duration, Local};
use serde::Serialize;

use varejo_auth::{AuthError, UserFilter};
use varejo_core::{CategoryId, CustomerId, ProductId, SaleId};
use varejo_employees::{EmployeeFilter, compute_employee_stats};
use varejo_inventory::{StockFilter, StockLevel};
use varejo_parties::{CustomerFilter, SupplierFilter, compute_customer_stats};
use varejo_products::{
    CategoryFilter, ProductFilter, ProductStatus, compute_product_stats, fill_category_names,
    products_to_csv,
};
use varejo_promotions::{PromotionFilter, compute_promotion_stats};
use varejo_reports::ReportPeriod;
use varejo_sales::{SaleFilter, compute_sales_stats};

use crate::cli::{
    Command, CustomerCommand, PeriodArgs, ProductCommand, ReportCommand, SaleCommand,
    SessionCommand, StockCommand,
};
use crate::context::AppContext;

/// Tokens expiring within this window are refreshed before a command runs.
const REFRESH_SKEW_SECS: i64 = 60;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

fn period(args: &PeriodArgs) -> anyhow::Result<ReportPeriod> {
    Ok(ReportPeriod::new(args.from, args.to)?)
}

async fn ensure_session(ctx: &AppContext) -> anyhow::Result<()> {
    match ctx
        .auth
        .ensure_fresh_token(Duration::seconds(REFRESH_SKEW_SECS))
        .await
    {
        Ok(true) => tracing::info!("session refreshed"),
        Ok(false) => {}
        Err(AuthError::NotAuthenticated) => bail!("not logged in; run `varejo login` first"),
        // Opaque tokens carry no expiry; the backend decides.
        Err(AuthError::Token(e)) => tracing::debug!(error = %e, "token expiry not readable"),
        Err(e) => return Err(e).context("failed to refresh the session"),
    }
    Ok(())
}

pub async fn run(ctx: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Session(cmd) => session(ctx, cmd).await,
        other => {
            ensure_session(ctx).await?;
            run_authenticated(ctx, other).await
        }
    }
}

async fn session(ctx: &AppContext, cmd: SessionCommand) -> anyhow::Result<()> {
    match cmd {
        SessionCommand::Login { email, senha } => {
            let user = ctx.auth.login(&email, &senha).await.context("login failed")?;
            println!("Logged in as {} ({})", user.nome, user.perfil);
            Ok(())
        }
        SessionCommand::Logout => {
            ctx.auth
                .logout()
                .await
                .context("backend logout failed; local session cleared")?;
            println!("Logged out");
            Ok(())
        }
        SessionCommand::Whoami => match ctx.auth.current_user() {
            Some(user) if ctx.auth.is_authenticated() => print_json(&user),
            _ => bail!("not logged in"),
        },
        SessionCommand::Refresh => {
            ctx.auth.refresh().await.context("refresh failed")?;
            println!("Session refreshed");
            Ok(())
        }
    }
}

async fn run_authenticated(ctx: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Products(cmd) => products(ctx, cmd).await,
        Command::Categories { search, page } => {
            let filter = CategoryFilter {
                page: page.request(),
                search,
            };
            print_json(&ctx.categories.list(&filter).await?)
        }
        Command::Customers(cmd) => customers(ctx, cmd).await,
        Command::Suppliers { search, page } => {
            let filter = SupplierFilter {
                page: page.request(),
                search,
                ..SupplierFilter::default()
            };
            print_json(&ctx.suppliers.list(&filter).await?)
        }
        Command::Users { search, page } => {
            let filter = UserFilter {
                page: page.request(),
                search,
                ..UserFilter::default()
            };
            print_json(&ctx.users.list(&filter).await?)
        }
        Command::Employees { departamento, page } => {
            let filter = EmployeeFilter {
                page: page.request(),
                departamento,
                ..EmployeeFilter::default()
            };
            let employees = ctx.employees.list(&filter).await?;
            print_json(&compute_employee_stats(&employees.content))
        }
        Command::Promotions { search, page } => {
            let filter = PromotionFilter {
                page: page.request(),
                search,
                ..PromotionFilter::default()
            };
            let promotions = ctx.promotions.list(&filter).await?;
            print_json(&promotions)?;
            print_json(&compute_promotion_stats(
                &promotions.content,
                Local::now().date_naive(),
            ))
        }
        Command::Sales(cmd) => sales(ctx, cmd).await,
        Command::Stock(cmd) => stock(ctx, cmd).await,
        Command::Reports(cmd) => reports(ctx, cmd).await,
        Command::Session(cmd) => session(ctx, cmd).await,
    }
}

async fn products(ctx: &AppContext, cmd: ProductCommand) -> anyhow::Result<()> {
    match cmd {
        ProductCommand::List {
            search,
            categoria,
            active,
            page,
        } => {
            let filter = ProductFilter {
                page: page.request(),
                search,
                categoria_id: categoria.map(CategoryId::new),
                status: active.map(ProductStatus::from_active),
            };
            let mut page = ctx.products.list(&filter).await?;
            let categories = ctx.categories.all().await?;
            fill_category_names(&mut page.content, &categories);
            print_json(&page)
        }
        ProductCommand::Stats { page } => {
            let filter = ProductFilter {
                page: page.request(),
                ..ProductFilter::default()
            };
            let products = ctx.products.list(&filter).await?;
            print_json(&compute_product_stats(&products.content))
        }
        ProductCommand::Export { search, page } => {
            let filter = ProductFilter {
                page: page.request(),
                search,
                ..ProductFilter::default()
            };
            let products = ctx.products.list(&filter).await?;
            print!("{}", products_to_csv(&products.content));
            Ok(())
        }
        ProductCommand::History { id } => {
            print_json(&ctx.products.history(ProductId::new(id)).await?)
        }
    }
}

async fn customers(ctx: &AppContext, cmd: CustomerCommand) -> anyhow::Result<()> {
    match cmd {
        CustomerCommand::List {
            search,
            active,
            page,
        } => {
            let filter = CustomerFilter {
                page: page.request(),
                search,
                active,
                ..CustomerFilter::default()
            };
            print_json(&ctx.customers.list(&filter).await?)
        }
        CustomerCommand::Stats { page } => {
            let filter = CustomerFilter {
                page: page.request(),
                ..CustomerFilter::default()
            };
            let customers = ctx.customers.list(&filter).await?;
            print_json(&compute_customer_stats(
                &customers.content,
                Local::now().date_naive(),
            ))
        }
    }
}

async fn sales(ctx: &AppContext, cmd: SaleCommand) -> anyhow::Result<()> {
    match cmd {
        SaleCommand::List {
            from,
            to,
            cliente,
            page,
        } => {
            let filter = SaleFilter {
                page: page.request(),
                data_inicio: from,
                data_fim: to,
                cliente_id: cliente.map(CustomerId::new),
                ..SaleFilter::default()
            };
            let sales = ctx.sales.list(&filter).await?;
            print_json(&sales)?;
            print_json(&compute_sales_stats(&sales.content))
        }
        SaleCommand::Cancel { id, motivo } => {
            let sale = ctx
                .sales
                .cancel(SaleId::new(id), &motivo)
                .await
                .with_context(|| format!("failed to cancel sale {id}"))?;
            print_json(&sale)
        }
    }
}

async fn stock(ctx: &AppContext, cmd: StockCommand) -> anyhow::Result<()> {
    match cmd {
        StockCommand::Movements { produto, page } => {
            let filter = StockFilter {
                page: page.request(),
                produto_id: produto.map(ProductId::new),
                ..StockFilter::default()
            };
            print_json(&ctx.stock.movements(&filter).await?)
        }
        StockCommand::Low => {
            for product in ctx.stock.low_stock().await? {
                println!(
                    "{:>6}  {:<40} {:>6}/{:<6} {}",
                    product.id_produto,
                    product.nome,
                    product.estoque,
                    product.estoque_minimo,
                    StockLevel::of(&product)
                );
            }
            Ok(())
        }
    }
}

async fn reports(ctx: &AppContext, cmd: ReportCommand) -> anyhow::Result<()> {
    match cmd {
        ReportCommand::Dashboard => {
            let kpis = ctx.reports.dashboard_kpis().await?;
            print_json(&kpis)?;
            let progress = kpis.monthly_progress();
            println!("Monthly goal: {}%", progress.percentage);
            Ok(())
        }
        ReportCommand::Summary { period: args } => {
            print_json(&ctx.reports.sales_summary(&period(&args)?).await?)
        }
        ReportCommand::Top { limit } => print_json(&ctx.reports.top_products(limit).await?),
        ReportCommand::Export { period: args } => {
            print!("{}", ctx.reports.export_sales(&period(&args)?).await?);
            Ok(())
        }
    }
}
