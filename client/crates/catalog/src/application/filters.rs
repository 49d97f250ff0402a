//! Filter State
//!
//! The filter the presentation layer is currently showing. Changing it does
//! not fetch; [`CatalogStore::visible_problems`] gives instant feedback on
//! the cached list until the caller refreshes.

use crate::application::store::CatalogStore;
use crate::domain::entities::Problem;
use crate::domain::value_objects::ProblemFilter;

impl<G> CatalogStore<G> {
    pub fn filter(&self) -> ProblemFilter {
        self.state.borrow().filter.clone()
    }

    pub fn set_filter(&self, filter: ProblemFilter) {
        self.state.send_if_modified(|state| {
            if state.filter == filter {
                return false;
            }
            state.filter = filter;
            true
        });
    }

    pub fn clear_filters(&self) {
        self.set_filter(ProblemFilter::default());
    }

    /// Cached problems matching the stored filter, in server order
    pub fn visible_problems(&self) -> Vec<Problem> {
        let state = self.state.borrow();
        state
            .problems
            .iter()
            .filter(|problem| state.filter.matches(problem))
            .cloned()
            .collect()
    }
}
