use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use eduke::logging::{LogConfig, init_tracing};
use eduke::views::{DashboardData, DashboardView};
use eduke::{init_app_state, navigation_for_role};
use eduke_cache::Freshness;
use eduke_core::{Authorizer, Role, StaticAuthorizer};
use eduke_models::{BranchId, DateRange};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "eduke")]
#[command(about = "Eduke client tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the permissions a role holds
    Permissions {
        /// Role tag, e.g. branch_admin
        #[arg(short, long)]
        role: Role,
    },
    /// List the navigation entries a role sees
    Nav {
        /// Role tag, e.g. staff
        #[arg(short, long)]
        role: Role,
    },
    /// Load the dashboard for the configured session
    Dashboard {
        /// Date range: today, 30days or quarter
        #[arg(long)]
        range: Option<DateRange>,

        /// Branch filter (ignored for branch-pinned sessions)
        #[arg(long)]
        branch: Option<i64>,
    },
}

#[derive(Serialize)]
struct DashboardOutput {
    freshness: Freshness,
    date_range: DateRange,
    branch: Option<BranchId>,
    data: Option<DashboardData>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing(&LogConfig::from_env())?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Permissions { role } => {
            let authorizer = StaticAuthorizer::standard();
            print_json(&authorizer.permissions_for(Some(role)))
        }
        Commands::Nav { role } => {
            let authorizer = StaticAuthorizer::standard();
            print_json(&navigation_for_role(Some(role), &authorizer))
        }
        Commands::Dashboard { range, branch } => handle_dashboard(range, branch).await,
    }
}

async fn handle_dashboard(range: Option<DateRange>, branch: Option<i64>) -> anyhow::Result<()> {
    let state = init_app_state().await?;
    let view = DashboardView::new(state);
    view.load().await;

    if let Some(branch) = branch {
        if !view.set_branch(Some(BranchId::new(branch))).await {
            tracing::warn!(branch, "Session is pinned to its own branch, ignoring --branch");
        }
    }
    if let Some(range) = range {
        view.set_date_range(range).await;
    }
    view.refresh().await;

    let state = view.state().await;
    print_json(&DashboardOutput {
        freshness: state.freshness(),
        date_range: view.date_range().await,
        branch: view.selected_branch().await,
        data: state.data().cloned(),
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
