//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ListArgs};
use crate::config::{ClientConfig, DEFAULT_CREDENTIALS_FILE};
use crate::error::{Result, ResultExt};
use crate::usage::{
    ResourceUsageAccountRequest, ResourceUsageOrgRequest, ResourceUsageQuery,
    ResourceUsageResourceGroupRequest, UsageListOptions, UsageReportsClient,
};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Totals of one listing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    /// Records written
    pub records: usize,
    /// Pages fetched
    pub pages: usize,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing records to stdout
    pub async fn run(&self) -> Result<()> {
        let client = UsageReportsClient::new(&self.load_config()?)?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(&client, &mut out).await?;
        Ok(())
    }

    /// Run the CLI command against `client`, writing records to `out`
    pub async fn run_with<W: Write>(
        &self,
        client: &UsageReportsClient,
        out: &mut W,
    ) -> Result<ListSummary> {
        match &self.cli.command {
            Commands::Account {
                list,
                resource_group_id,
                organization_id,
            } => {
                let mut request =
                    ResourceUsageAccountRequest::new(&list.account_id, &list.billing_month)
                        .with_options(list_options(list));
                request.resource_group_id.clone_from(resource_group_id);
                request.organization_id.clone_from(organization_id);
                Self::list(client, request, list, out).await
            }
            Commands::ResourceGroup {
                list,
                resource_group_id,
            } => {
                let request = ResourceUsageResourceGroupRequest::new(
                    &list.account_id,
                    resource_group_id,
                    &list.billing_month,
                )
                .with_options(list_options(list));
                Self::list(client, request, list, out).await
            }
            Commands::Org {
                list,
                organization_id,
            } => {
                let request = ResourceUsageOrgRequest::new(
                    &list.account_id,
                    organization_id,
                    &list.billing_month,
                )
                .with_options(list_options(list));
                Self::list(client, request, list, out).await
            }
        }
    }

    /// Load client settings
    ///
    /// A YAML config wins over a credentials file. Without either, the
    /// default credentials file is used when present, then the environment.
    fn load_config(&self) -> Result<ClientConfig> {
        if let Some(path) = &self.cli.config {
            debug!("Loading config from {}", path.display());
            return ClientConfig::from_yaml_file(path);
        }
        if let Some(path) = &self.cli.credentials {
            debug!("Loading credentials from {}", path.display());
            return ClientConfig::from_credentials_file(path);
        }
        if Path::new(DEFAULT_CREDENTIALS_FILE).exists() {
            debug!("Loading credentials from {DEFAULT_CREDENTIALS_FILE}");
            return ClientConfig::from_credentials_file(DEFAULT_CREDENTIALS_FILE);
        }
        ClientConfig::from_env()
    }

    async fn list<R: ResourceUsageQuery, W: Write>(
        client: &UsageReportsClient,
        request: R,
        args: &ListArgs,
        out: &mut W,
    ) -> Result<ListSummary> {
        let operation = request.operation();
        let started = Instant::now();
        let mut pager = client.pager(request)?;
        let mut summary = ListSummary::default();

        if args.all {
            let records = pager.get_all().await?;
            write_records(out, &records)?;
            summary.records = records.len();
        } else {
            while pager.has_next() && args.max_pages.map_or(true, |max| summary.pages < max) {
                let records = pager.get_next().await?;
                write_records(out, &records)?;
                summary.records += records.len();
                summary.pages += 1;
            }
        }
        summary.pages = pager.pages_fetched();
        out.flush().context("Failed to flush output")?;

        info!(
            "{}: {} records in {} pages ({:.2}s)",
            operation,
            summary.records,
            summary.pages,
            started.elapsed().as_secs_f64()
        );
        Ok(summary)
    }
}

fn list_options(args: &ListArgs) -> UsageListOptions {
    UsageListOptions {
        names: args.names.then_some(true),
        tags: args.tags.then_some(true),
        accept_language: args.accept_language.clone(),
        limit: args.limit,
        resource_instance_id: args.resource_instance_id.clone(),
        resource_id: args.resource_id.clone(),
        plan_id: args.plan_id.clone(),
        region: args.region.clone(),
    }
}

fn write_records<W: Write>(out: &mut W, records: &[serde_json::Value]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record).context("Failed to write record")?;
        out.write_all(b"\n").context("Failed to write record")?;
    }
    Ok(())
}
