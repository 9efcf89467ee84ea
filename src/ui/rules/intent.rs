use crate::model::{Rule, RuleId};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum RulesIntent {
    /// Full replace, order kept as given.
    SetRules(Vec<Rule>),
    SetSelectedRule(Option<Rule>),
    SetLoading(bool),
    SetError(Option<String>),
    AddRule(Rule),
    /// Replace the entry with the same id; no-op if absent.
    UpdateRule(Rule),
    DeleteRule(RuleId),
}

impl Intent for RulesIntent {}
