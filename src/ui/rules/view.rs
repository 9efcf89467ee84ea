//! Rules page: the rules query projected into the rule store, plus the
//! confirm-then-sync writes behind the create/edit form and row actions.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::model::{Rule, RuleChangeHistory, RuleId, RuleRequest};
use crate::query::{keys, QueryCache, QueryState, QuerySubscription};
use crate::ui::mvi::Store;
use crate::ui::notifications::Notifications;
use crate::ui::rules::intent::RulesIntent;
use crate::ui::rules::reducer::RulesReducer;

/// Intents that bring the rule store in line with the rules query.
pub fn project(rules: &QueryState<Vec<Rule>>) -> Vec<RulesIntent> {
    let mut intents = Vec::with_capacity(3);
    if let Some(data) = &rules.data {
        intents.push(RulesIntent::SetRules(data.as_ref().clone()));
    }
    intents.push(RulesIntent::SetLoading(rules.is_loading));
    intents.push(RulesIntent::SetError(
        rules.error.as_ref().map(|e| e.to_string()),
    ));
    intents
}

pub struct RulesView {
    cache: QueryCache,
    api: ApiClient,
    store: Store<RulesReducer>,
    notifications: Notifications,
    rules: QuerySubscription<Vec<Rule>>,
}

impl RulesView {
    /// Mount the rule list, optionally restricted to enabled/disabled rules.
    pub fn mount(
        cache: &QueryCache,
        api: &ApiClient,
        store: Store<RulesReducer>,
        notifications: Notifications,
        enabled: Option<bool>,
    ) -> Self {
        let list_api = api.clone();
        let rules = cache.subscribe(keys::rules(enabled), move || {
            let api = list_api.clone();
            async move { api.list_rules(enabled).await }
        });

        let view = Self {
            cache: cache.clone(),
            api: api.clone(),
            store,
            notifications,
            rules,
        };
        view.sync();
        view
    }

    pub async fn load(&self) {
        self.rules.ensure_fresh().await;
        self.sync();
    }

    /// Wait for the rules query to change and sync. Returns `false` once no
    /// further change can arrive.
    pub async fn next_change(&mut self) -> bool {
        let alive = self.rules.changed().await;
        self.sync();
        alive
    }

    pub fn sync(&self) {
        for intent in project(&self.rules.state()) {
            self.store.dispatch(intent);
        }
    }

    pub fn store(&self) -> &Store<RulesReducer> {
        &self.store
    }

    pub fn rules(&self) -> Vec<Rule> {
        self.store.select(|state| state.rules.clone())
    }

    /// Select a listed rule for editing. Returns `false` if it is not listed.
    pub fn select(&self, id: RuleId) -> bool {
        let rule = self
            .store
            .select(|state| state.rules.iter().find(|r| r.id == id).cloned());
        let found = rule.is_some();
        if found {
            self.store.dispatch(RulesIntent::SetSelectedRule(rule));
        }
        found
    }

    pub fn clear_selection(&self) {
        self.store.dispatch(RulesIntent::SetSelectedRule(None));
    }

    /// Form contents for the current selection, or a blank create form.
    pub fn form(&self) -> RuleRequest {
        self.store.select(|state| {
            state
                .selected_rule
                .as_ref()
                .map(RuleRequest::from_rule)
                .unwrap_or_default()
        })
    }

    pub async fn create(&self, request: &RuleRequest) -> Result<Rule, ApiError> {
        self.check(request)?;
        let notifications = &self.notifications;
        let result = self
            .cache
            .mutation()
            .invalidates(keys::rules(None))
            .invalidates(keys::dashboard_stats())
            .on_success(move |rule: &Rule| {
                tracing::info!(rule_id = rule.id, "rule created");
                notifications.success("Rule created successfully");
            })
            .on_error(move |_| {
                notifications.error("Failed to create rule");
            })
            .run(self.api.create_rule(request))
            .await;
        self.after_write(result)
    }

    pub async fn update(&self, id: RuleId, request: &RuleRequest) -> Result<Rule, ApiError> {
        self.check(request)?;
        let notifications = &self.notifications;
        let result = self
            .cache
            .mutation()
            .invalidates(keys::rules(None))
            .invalidates(keys::rule_history(id))
            .on_success(move |_: &Rule| {
                tracing::info!(rule_id = id, "rule updated");
                notifications.success("Rule updated successfully");
            })
            .on_error(move |_| {
                notifications.error("Failed to update rule");
            })
            .run(self.api.update_rule(id, request))
            .await;
        self.after_write(result)
    }

    pub async fn toggle(&self, id: RuleId) -> Result<Rule, ApiError> {
        let notifications = &self.notifications;
        let result = self
            .cache
            .mutation()
            .invalidates(keys::rules(None))
            .invalidates(keys::rule_history(id))
            .invalidates(keys::dashboard_stats())
            .on_success(move |rule: &Rule| {
                tracing::info!(rule_id = id, enabled = rule.enabled, "rule toggled");
                notifications.success("Rule toggled successfully");
            })
            .on_error(move |_| {
                notifications.error("Failed to toggle rule");
            })
            .run(self.api.toggle_rule(id))
            .await;
        self.after_write(result)
    }

    pub async fn delete(&self, id: RuleId) -> Result<(), ApiError> {
        let notifications = &self.notifications;
        let result = self
            .cache
            .mutation()
            .invalidates(keys::rules(None))
            .invalidates(keys::rule_history(id))
            .invalidates(keys::dashboard_stats())
            .on_success(move |_: &()| {
                tracing::info!(rule_id = id, "rule deleted");
                notifications.success("Rule deleted successfully");
            })
            .on_error(move |_| {
                notifications.error("Failed to delete rule");
            })
            .run(self.api.delete_rule(id))
            .await;
        if result.is_ok() {
            let selected = self
                .store
                .select(|state| state.selected_rule.as_ref().map(|r| r.id));
            if selected == Some(id) {
                self.clear_selection();
            }
        }
        self.after_write(result)
    }

    /// Valid rule types as reported by the server.
    pub async fn rule_types(&self) -> Result<Arc<Vec<String>>, ApiError> {
        let api = self.api.clone();
        self.cache
            .query(keys::rule_types(), move || {
                let api = api.clone();
                async move { api.rule_types().await }
            })
            .await
            .into_result()
    }

    pub async fn rule(&self, id: RuleId) -> Result<Arc<Rule>, ApiError> {
        let api = self.api.clone();
        self.cache
            .query(keys::rule(id), move || {
                let api = api.clone();
                async move { api.rule(id).await }
            })
            .await
            .into_result()
    }

    pub async fn history(&self, id: RuleId) -> Result<Arc<Vec<RuleChangeHistory>>, ApiError> {
        let api = self.api.clone();
        self.cache
            .query(keys::rule_history(id), move || {
                let api = api.clone();
                async move { api.rule_history(id).await }
            })
            .await
            .into_result()
    }

    fn check(&self, request: &RuleRequest) -> Result<(), ApiError> {
        request.validate().map_err(|err| {
            self.notifications.error(err.to_string());
            ApiError::from(err)
        })
    }

    fn after_write<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        self.sync();
        result
    }
}
