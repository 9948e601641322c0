//! Question routing: ordered, first-match-wins substring policies.
//!
//! Both tables are matched against the lower-cased question with plain
//! substring search, so "Segmentation" selects `segment`. Ties are resolved
//! by table order, never by specificity.

use cdpdocs_shared::{ProductEntry, Task};

/// Ordered product keyword → documentation URL table.
#[derive(Debug, Clone)]
pub struct ProductTable {
    entries: Vec<ProductEntry>,
}

impl ProductTable {
    /// Build a table, lower-casing keywords so lookups only lower-case the question.
    pub fn new(entries: impl IntoIterator<Item = ProductEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| ProductEntry {
                keyword: entry.keyword.trim().to_lowercase(),
                url: entry.url,
            })
            .collect();
        Self { entries }
    }

    /// First entry whose keyword occurs in an already lower-cased question.
    pub fn match_question(&self, lowered: &str) -> Option<&ProductEntry> {
        self.entries
            .iter()
            .find(|entry| lowered.contains(entry.keyword.as_str()))
    }

    /// Entries in matching order.
    pub fn entries(&self) -> &[ProductEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First task whose phrase occurs in an already lower-cased question.
pub fn match_task(lowered: &str) -> Option<Task> {
    Task::ALL
        .into_iter()
        .find(|task| lowered.contains(task.phrase()))
}

/// What a question resolved to before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    /// The selected product.
    pub product: &'a ProductEntry,
    /// The selected task, if the question names one.
    pub task: Option<Task>,
}

/// Resolve a question against the product table and task list.
///
/// Returns `None` when no product keyword occurs in the question.
pub fn route<'a>(products: &'a ProductTable, question: &str) -> Option<Route<'a>> {
    let lowered = question.to_lowercase();
    let product = products.match_question(&lowered)?;
    Some(Route {
        product,
        task: match_task(&lowered),
    })
}
