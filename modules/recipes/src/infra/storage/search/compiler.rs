use sea_orm::Condition;
use tracing::debug;

use super::{builder_for, sort::SortPlan, SearchBuildError, SearchContext, SearchResult};
use crate::contract::search::SearchRequest;

/// A request reduced to one predicate and one ordering plan.
#[derive(Debug, Clone)]
pub struct CompiledSearch {
    pub predicate: Condition,
    pub sort: SortPlan,
}

/// AND every filter's condition together. Fails on the first filter whose
/// operator is not supported by its key, before anything touches the store.
pub fn compile(request: &SearchRequest) -> SearchResult<CompiledSearch> {
    let ctx = SearchContext {
        user_id: request.user_id,
    };

    let mut predicate = Condition::all();
    for filter in &request.filters {
        let builder = builder_for(filter.key);
        if !builder.supports(filter.operator) {
            return Err(SearchBuildError::UnsupportedOperator {
                key: filter.key,
                operator: filter.operator,
            });
        }
        let fragment = builder.build(filter, &ctx)?;
        debug!(
            key = %filter.key,
            operator = %filter.operator,
            applied = fragment.is_some(),
            "Compiled search filter"
        );
        if let Some(cond) = fragment {
            predicate = predicate.add(cond);
        }
    }

    Ok(CompiledSearch {
        predicate,
        sort: SortPlan::resolve(request.sort.as_ref()),
    })
}
