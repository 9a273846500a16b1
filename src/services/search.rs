//! Settings search
//!
//! Answers `SearchSettings` actions by matching translated setting labels
//! against the search terms and publishing the hits as a category change.

use crate::i18n::{SharedTranslator, Translate};
use crate::model::action::{Action, ActionBus, ActionKind, CategoryChange};
use crate::model::category::{CategoryRegistry, SettingDescriptor};
use crate::model::subscription::Subscription;
use std::collections::HashSet;
use std::rc::Rc;

/// Split search text into lowercase terms
pub fn search_terms(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Settings whose translated label contains every term, in registry order
pub fn search_settings(
    registry: &CategoryRegistry,
    translator: &dyn Translate,
    terms: &[String],
) -> Vec<SettingDescriptor> {
    if terms.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    registry
        .settings()
        .filter(|setting| {
            let label = translator.get_translation(&setting.label).to_lowercase();
            terms.iter().all(|term| label.contains(term.as_str()))
        })
        .filter(|setting| seen.insert(setting.name.clone()))
        .cloned()
        .collect()
}

/// Bus service answering `SearchSettings`
pub struct SearchService {
    _subscription: Subscription,
}

impl SearchService {
    pub fn mount(
        bus: &ActionBus,
        registry: Rc<CategoryRegistry>,
        translator: SharedTranslator,
    ) -> Self {
        let publisher = bus.clone();
        let subscription = bus.subscribe(ActionKind::SearchSettings, move |action| {
            let Action::SearchSettings(text) = action else {
                return;
            };
            let terms = search_terms(text);
            let results = search_settings(&registry, translator.as_ref(), &terms);
            tracing::debug!("Search {:?} matched {} settings", terms, results.len());
            publisher.publish(Action::SetCategory(CategoryChange::SearchPerformed {
                terms,
                results,
            }));
        });

        Self {
            _subscription: subscription,
        }
    }
}
