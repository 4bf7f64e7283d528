//! authz-check - evaluate authorization decisions against a YAML snapshot
//!
//! Exit status is 0 when the checked action is allowed, 1 when it is denied
//! and 2 on errors.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use inventory_authz::utils::{LogFormat, init_logging};
use inventory_authz::{
    Authorizer, Capability, Config, Decision, GrantAdmin, GrantStore, GrantWriter, ObjectAction,
    ObjectRef, PrincipalId, RoleHierarchy, RoleName, Snapshot, WarehouseAction, WarehouseId,
    cache_from_config,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "authz-check", version, about = "Evaluate authorization decisions offline")]
struct Cli {
    /// YAML snapshot of principals, roles, grants and stock
    #[arg(long, env = "AUTHZ_SNAPSHOT")]
    snapshot: PathBuf,

    /// Engine configuration file; `AUTHZ_*` variables are used when omitted
    #[arg(long, env = "AUTHZ_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format (pretty or json)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check view, edit or manage_stock on a warehouse
    CheckWarehouse {
        #[arg(long)]
        principal: u64,
        #[arg(long)]
        warehouse: u64,
        #[arg(long)]
        action: String,
    },
    /// Check view, edit or delete on a domain object
    CheckObject {
        #[arg(long)]
        principal: u64,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        id: u64,
        #[arg(long)]
        action: String,
    },
    /// Check a named capability
    CheckCapability {
        #[arg(long)]
        principal: u64,
        #[arg(long)]
        capability: String,
    },
    /// List every role a role inherits from
    Ancestors {
        #[arg(long)]
        role: String,
    },
    /// List object grants whose validity window has ended
    ReviewExpired {
        /// Delete the expired grants from the loaded snapshot and print the result
        #[arg(long)]
        purge: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_format, "warn") {
        eprintln!("Error: {}", e);
        return ExitCode::from(2);
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    let snapshot = Snapshot::from_file(&cli.snapshot)
        .await
        .with_context(|| format!("loading snapshot {}", cli.snapshot.display()))?;
    let stores = snapshot.into_stores()?;
    let grants = Arc::new(stores.grants);

    let cache = cache_from_config(&config.authz.cache)
        .await
        .context("creating decision cache")?;
    let authorizer = Authorizer::builder(Arc::new(stores.directory), grants.clone())
        .stock(Arc::new(stores.stock))
        .cache(cache)
        .config(config.authz)
        .build()?;

    match cli.command {
        Command::CheckWarehouse {
            principal,
            warehouse,
            action,
        } => {
            let action: WarehouseAction = action.parse()?;
            let decision = authorizer
                .check_warehouse(PrincipalId::new(principal), WarehouseId::new(warehouse), action)
                .await;
            Ok(report(&decision))
        }
        Command::CheckObject {
            principal,
            kind,
            id,
            action,
        } => {
            let action: ObjectAction = action.parse()?;
            let decision = authorizer
                .check_object(PrincipalId::new(principal), &ObjectRef::new(kind, id), action)
                .await;
            Ok(report(&decision))
        }
        Command::CheckCapability {
            principal,
            capability,
        } => {
            let decision = authorizer
                .check_capability(PrincipalId::new(principal), &Capability::new(capability))
                .await;
            Ok(report(&decision))
        }
        Command::Ancestors { role } => {
            let hierarchy = RoleHierarchy::new();
            let graph = hierarchy.reload(&*grants).await?;
            let mut ancestors: Vec<RoleName> =
                graph.ancestors_of(&RoleName::new(role)).into_iter().collect();
            ancestors.sort();
            for ancestor in ancestors {
                println!("{}", ancestor);
            }
            Ok(true)
        }
        Command::ReviewExpired { purge } => {
            let writer: Arc<dyn GrantWriter> = grants.clone();
            let admin = GrantAdmin::new(writer, authorizer);
            let expired = admin.expired_object_grants().await?;
            for grant in &expired {
                println!(
                    "{} on {} expired at {}",
                    grant.subject,
                    grant.target,
                    grant
                        .window
                        .valid_until
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_default()
                );
            }

            if purge {
                let removed = admin.purge_expired_object_grants().await?;
                let remaining = Snapshot {
                    object_grants: grants.object_grants().await?,
                    ..Default::default()
                };
                println!("# removed {} expired grants; remaining object grants:", removed);
                print!("{}", remaining.to_yaml()?);
            }
            Ok(expired.is_empty())
        }
    }
}

fn report(decision: &Decision) -> bool {
    println!(
        "{}: {}",
        if decision.allowed { "ALLOW" } else { "DENY" },
        decision.reason
    );
    decision.allowed
}
