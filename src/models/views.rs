//! Response documents returned in place of rendered pages.
//!
//! Transient notices and errors travel inside these values instead of any
//! ambient per-request state.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ListQuery;
use crate::validation::FieldErrors;

/// Filter-chip counters shown above a list.
#[derive(Debug, Clone, Serialize)]
pub struct ListCounts {
    pub total: u64,
    pub active: Option<u64>,
    pub inactive: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub counts: ListCounts,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

impl<T> ListPage<T> {
    /// Echo the query back next to the results so filters can be redrawn.
    pub fn new(items: Vec<T>, counts: ListCounts, query: ListQuery) -> Self {
        Self {
            items,
            counts,
            search: query.search,
            status: query.status,
            sort: query.sort,
        }
    }
}

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: i32,
    pub text: String,
    pub selected: bool,
}

/// Build a dropdown, marking `selected` when it matches an option.
pub fn select_list<I>(options: I, selected: Option<i32>) -> Vec<SelectOption>
where
    I: IntoIterator<Item = (i32, String)>,
{
    options
        .into_iter()
        .map(|(value, text)| SelectOption {
            value,
            text,
            selected: selected == Some(value),
        })
        .collect()
}

/// A create/edit form: the values to show, its dropdowns and any messages.
#[derive(Debug, Clone, Serialize)]
pub struct FormPage<F> {
    pub form: F,
    pub selections: BTreeMap<&'static str, Vec<SelectOption>>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub field_errors: FieldErrors,
}

impl<F> FormPage<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            selections: BTreeMap::new(),
            error: None,
            notice: None,
            field_errors: FieldErrors::new(),
        }
    }

    pub fn with_selection(mut self, field: &'static str, options: Vec<SelectOption>) -> Self {
        self.selections.insert(field, options);
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    pub fn with_field_errors(mut self, field_errors: FieldErrors) -> Self {
        self.field_errors = field_errors;
        self
    }
}

/// Body sent alongside a `303 See Other` after a successful write.
#[derive(Debug, Clone, Serialize)]
pub struct Redirect {
    pub redirect: String,
    pub notice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_list_marks_the_chosen_option() {
        let list = select_list(vec![(1, "A".into()), (2, "B".into())], Some(2));
        assert!(!list[0].selected);
        assert!(list[1].selected);

        let none = select_list(vec![(1, "A".into())], Some(9));
        assert!(none.iter().all(|o| !o.selected));
    }
}
