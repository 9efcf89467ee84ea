use crate::model::Rule;
use crate::ui::mvi::UiState;

/// Local copy of the rule collection.
///
/// Fed from the rules query; may briefly differ from the cached query
/// result until the next invalidation-triggered refetch is synced in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RulesState {
    pub rules: Vec<Rule>,
    pub selected_rule: Option<Rule>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UiState for RulesState {}
