use serde::Serialize;

use crate::{
    contact::Contact,
    controller::{Action, Form},
    repository::ContactRepository,
    theme::Theme,
};

/// Everything the UI surface needs to draw the page.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub form: FormView,
    pub list: ListView,
    pub search: String,
    pub message: Option<&'static str>,
    /// Prompt naming the contact whose deletion awaits confirmation.
    pub confirm: Option<String>,
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    /// Identifier of the contact being edited.
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Form,
    pub action_label: &'static str,
    pub cancel_visible: bool,
}

impl FormView {
    pub fn new(fields: Form, editing: Option<&str>) -> Self {
        Self {
            id: editing.map(ToOwned::to_owned),
            fields,
            action_label: if editing.is_some() { "Update" } else { "Save" },
            cancel_visible: editing.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub rows: Vec<Row>,
    /// Whether the empty-state indicator replaces the list.
    pub empty: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub contact: Contact,
    pub edit: Action,
    pub delete: Action,
}

/// Rebuilds the list from scratch, so repeated calls always reflect the current order.
pub fn render(repository: &ContactRepository, term: &str) -> ListView {
    let rows = repository
        .search(term)
        .into_iter()
        .map(|contact| Row {
            edit: Action::RequestEdit(contact.id.clone()),
            delete: Action::RequestDelete(contact.id.clone()),
            contact,
        })
        .collect::<Vec<_>>();

    let empty = rows.is_empty();

    ListView { rows, empty }
}
