use crate::ui::mvi::Reducer;
use crate::ui::rules::intent::RulesIntent;
use crate::ui::rules::state::RulesState;

pub struct RulesReducer;

impl Reducer for RulesReducer {
    type State = RulesState;
    type Intent = RulesIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RulesIntent::SetRules(rules) => RulesState { rules, ..state },
            RulesIntent::SetSelectedRule(selected_rule) => RulesState {
                selected_rule,
                ..state
            },
            RulesIntent::SetLoading(loading) => RulesState { loading, ..state },
            RulesIntent::SetError(error) => RulesState { error, ..state },
            RulesIntent::AddRule(rule) => {
                let mut rules = state.rules;
                rules.push(rule);
                RulesState { rules, ..state }
            }
            RulesIntent::UpdateRule(rule) => {
                let mut rules = state.rules;
                if let Some(slot) = rules.iter_mut().find(|r| r.id == rule.id) {
                    *slot = rule;
                }
                RulesState { rules, ..state }
            }
            RulesIntent::DeleteRule(id) => {
                let mut rules = state.rules;
                rules.retain(|r| r.id != id);
                RulesState { rules, ..state }
            }
        }
    }
}
