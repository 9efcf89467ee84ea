use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{RuleId, RuleRequest, RuleType, SearchQuery, StatusFilter};

#[derive(Parser, Debug)]
#[command(
    name = "fraudboard",
    version,
    about = "Review flagged transactions and manage fraud-detection rules"
)]
pub struct Cli {
    /// Config file (default: <config dir>/fraudboard/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Admin API base URL; overrides the config file and FRAUDBOARD_API_URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate counters and the most recent transactions
    Dashboard {
        /// Number of recent transactions to show
        #[arg(long)]
        limit: Option<u32>,
    },
    /// One page of transactions
    Transactions {
        /// all, processing, processed, alerted or reviewed
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Full details of one transaction
    Transaction { id: String },
    /// Mark an ALERTED transaction as reviewed
    Review { id: String },
    /// Search transactions
    Search(SearchArgs),
    /// Manage rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// Valid transaction statuses
    Statuses,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    List {
        /// Only enabled (true) or disabled (false) rules
        #[arg(long)]
        enabled: Option<bool>,
    },
    Show { id: RuleId },
    Create(RuleArgs),
    Update {
        id: RuleId,
        #[command(flatten)]
        fields: RuleArgs,
    },
    /// Flip a rule between enabled and disabled
    Toggle { id: RuleId },
    Delete { id: RuleId },
    /// Audit trail of a rule
    History { id: RuleId },
    /// Valid rule types
    Types,
}

/// Rule form fields; unset fields keep their current (or default) value.
#[derive(Args, Debug, Default)]
pub struct RuleArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "type", value_name = "TYPE")]
    pub rule_type: Option<RuleType>,
    /// JSON configuration
    #[arg(long)]
    pub configuration: Option<String>,
    #[arg(long)]
    pub enabled: Option<bool>,
    #[arg(long)]
    pub priority: Option<i32>,
    /// 1 (low) to 5
    #[arg(long)]
    pub severity: Option<u8>,
}

impl RuleArgs {
    pub fn apply(self, mut form: RuleRequest) -> RuleRequest {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(rule_type) = self.rule_type {
            form.rule_type = rule_type;
        }
        if let Some(configuration) = self.configuration {
            form.configuration = configuration;
        }
        if let Some(enabled) = self.enabled {
            form.enabled = enabled;
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(severity) = self.severity {
            form.severity = severity;
        }
        form
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(long)]
    pub correlation_id: Option<String>,
    /// Source account
    #[arg(long)]
    pub from: Option<String>,
    /// Destination account
    #[arg(long)]
    pub to: Option<String>,
    /// ISO-8601 date-time
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub size: u32,
}

impl From<SearchArgs> for SearchQuery {
    fn from(args: SearchArgs) -> Self {
        SearchQuery {
            correlation_id: args.correlation_id,
            from: args.from,
            to: args.to,
            start_date: args.start_date,
            end_date: args.end_date,
            page: args.page,
            size: args.size,
        }
    }
}
