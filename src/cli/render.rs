//! Plain-text rendering of view state.

use std::fmt::Write;

use crate::model::{Page, Rule, RuleChangeHistory, Transaction, TransactionDetails};
use crate::ui::dashboard::DashboardState;
use crate::ui::notifications::{Notice, NoticeLevel};
use crate::ui::transactions::TransactionsState;

pub fn dashboard(state: &DashboardState) -> String {
    let mut out = String::new();
    if let Some(stats) = &state.stats {
        let _ = writeln!(out, "Processed:     {}", stats.total_processed);
        let _ = writeln!(out, "Alerted:       {}", stats.total_alerted);
        let _ = writeln!(out, "Reviewed:      {}", stats.total_reviewed);
        let _ = writeln!(out, "Processing:    {}", stats.total_processing);
        let _ = writeln!(out, "Active rules:  {}", stats.active_rules_count);
    }
    out.push('\n');
    out.push_str("Recent transactions\n");
    out.push_str(&transaction_table(&state.recent_transactions));
    out
}

pub fn transactions(state: &TransactionsState) -> String {
    let mut out = transaction_table(&state.transactions);
    let _ = writeln!(
        out,
        "\nPage {} of {} ({} total, filter: {})",
        state.current_page + 1,
        state.total_pages.max(1),
        state.total_elements,
        state.status_filter.label()
    );
    out
}

pub fn search_results(page: &Page<Transaction>) -> String {
    let mut out = transaction_table(&page.content);
    let _ = writeln!(
        out,
        "\nPage {} of {} ({} total)",
        page.page + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    out
}

pub fn transaction_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<38} {:>12} {:<14} {:<14} {:<12} {:<11} {}",
        "ID", "AMOUNT", "FROM", "TO", "TYPE", "STATUS", "TIMESTAMP"
    );
    for tx in transactions {
        let _ = writeln!(
            out,
            "{:<38} {:>12.2} {:<14} {:<14} {:<12} {:<11} {}",
            tx.id, tx.amount, tx.from, tx.to, tx.kind, tx.status, tx.timestamp
        );
    }
    out
}

pub fn transaction_details(details: &TransactionDetails) -> String {
    let tx = &details.transaction;
    let mut out = String::new();
    let _ = writeln!(out, "ID:             {}", tx.id);
    let _ = writeln!(out, "Correlation ID: {}", tx.correlation_id);
    let _ = writeln!(out, "Status:         {}", tx.status);
    let _ = writeln!(out, "Amount:         {:.2}", tx.amount);
    let _ = writeln!(out, "From:           {}", tx.from);
    let _ = writeln!(out, "To:             {}", tx.to);
    let _ = writeln!(out, "Type:           {}", tx.kind);
    let _ = writeln!(out, "Timestamp:      {}", tx.timestamp);

    let scores = [
        ("ML score", details.ml_score),
        ("Spending deviation", details.spending_deviation_score),
        ("Velocity", details.velocity_score),
        ("Geo anomaly", details.geo_anomaly_score),
    ];
    for (label, score) in scores {
        if let Some(score) = score {
            let _ = writeln!(out, "{:<16}{:.3}", format!("{}:", label), score);
        }
    }

    let context = [
        ("IP address", &details.ip_address),
        ("Device", &details.device_id),
        ("Location", &details.location),
        ("Merchant", &details.merchant_category),
        ("Channel", &details.payment_channel),
        ("Fraud type", &details.fraud_type),
    ];
    for (label, value) in context {
        if let Some(value) = value {
            let _ = writeln!(out, "{:<16}{}", format!("{}:", label), value);
        }
    }

    if !details.alert_reasons.is_empty() {
        out.push_str("Alert reasons:\n");
        for reason in &details.alert_reasons {
            let _ = writeln!(out, "  - {}", reason);
        }
    }
    if let Some(analysis) = &details.ai_analysis {
        let _ = writeln!(out, "Analysis:\n  {}", analysis);
    }
    out
}

pub fn rules(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "No rules found\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5} {:<30} {:<12} {:>8} {:<8} {:<8} {:>10} {:>8}",
        "ID", "NAME", "TYPE", "PRIORITY", "SEVERITY", "STATUS", "EXECUTIONS", "ALERTS"
    );
    for rule in rules {
        let _ = writeln!(
            out,
            "{:>5} {:<30} {:<12} {:>8} {:<8} {:<8} {:>10} {:>8}",
            rule.id,
            rule.name,
            rule.rule_type,
            rule.priority,
            rule.severity_level().label(),
            if rule.enabled { "enabled" } else { "disabled" },
            rule.execution_count,
            rule.alert_count
        );
    }
    out
}

pub fn rule(rule: &Rule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:            {}", rule.id);
    let _ = writeln!(out, "Name:          {}", rule.name);
    if let Some(description) = &rule.description {
        let _ = writeln!(out, "Description:   {}", description);
    }
    let _ = writeln!(out, "Type:          {}", rule.rule_type);
    let _ = writeln!(out, "Enabled:       {}", rule.enabled);
    let _ = writeln!(out, "Priority:      {}", rule.priority);
    let _ = writeln!(
        out,
        "Severity:      {} ({})",
        rule.severity,
        rule.severity_level().label()
    );
    let _ = writeln!(out, "Configuration: {}", rule.configuration);
    let _ = writeln!(
        out,
        "Executions:    {} ({} alerts)",
        rule.execution_count, rule.alert_count
    );
    out
}

pub fn history(entries: &[RuleChangeHistory]) -> String {
    if entries.is_empty() {
        return "No changes recorded\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {:<10} by {}",
            entry.changed_at,
            entry.action,
            entry.changed_by.as_deref().unwrap_or("unknown")
        );
    }
    out
}

pub fn lines(values: &[String]) -> String {
    values.iter().fold(String::new(), |mut out, value| {
        let _ = writeln!(out, "{}", value);
        out
    })
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✓ {}", notice.message),
        NoticeLevel::Error => format!("✗ {}", notice.message),
    }
}
