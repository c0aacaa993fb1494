use std::mem::replace;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::{
    config::Config,
    contact::Contact,
    message::{Message, ScheduledClear},
    presenter::{render, FormView, View},
    repository::ContactRepository,
    storage::Storage,
    store::Store,
    theme::Theme,
    validator::Field,
};

const ADDED: &str = "Contact added.";
const UPDATED: &str = "Contact updated.";
const DELETED: &str = "Deleted contact.";
const INVALID: &str = "Fix validation errors before saving.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Action {
    Input { field: Field, value: String },
    Submit,
    Cancel,
    RequestEdit(String),
    RequestDelete(String),
    ConfirmDelete,
    DeclineDelete,
    Search(String),
    ToggleTheme,
    ClearMessage(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Editing(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub value: String,
    /// Inline message if the last validation of this field failed.
    pub error: Option<&'static str>,
}

impl FieldState {
    fn check(&mut self, field: Field) -> bool {
        let valid = field.validate(self.value.trim());

        self.error = if valid {
            None
        } else {
            Some(field.error_message())
        };

        valid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Form {
    pub name: FieldState,
    pub phone: FieldState,
    pub email: FieldState,
}

impl Form {
    fn load(contact: &Contact) -> Self {
        let field = |value: &str| FieldState {
            value: value.to_owned(),
            error: None,
        };

        Self {
            name: field(&contact.name),
            phone: field(&contact.phone),
            email: field(&contact.email),
        }
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
        }
    }

    /// Checks every field so that all failures are flagged at once.
    fn validate(&mut self) -> bool {
        Field::ALL
            .into_iter()
            .fold(true, |valid, field| self.field_mut(field).check(field) && valid)
    }

    fn trimmed(&self) -> (String, String, String) {
        (
            self.name.value.trim().to_owned(),
            self.phone.value.trim().to_owned(),
            self.email.value.trim().to_owned(),
        )
    }
}

/// Result of dispatching a single action.
#[derive(Debug)]
pub struct Update {
    pub view: View,
    /// Must be fed back as [`Action::ClearMessage`] once its delay has elapsed.
    pub clear: Option<ScheduledClear>,
}

pub struct Controller<S> {
    storage: S,
    store: Store,
    repository: ContactRepository,
    mode: Mode,
    form: Form,
    search: String,
    message: Message,
    message_duration: Duration,
    pending_delete: Option<String>,
    theme: Theme,
    theme_slot: String,
}

impl<S> Controller<S>
where
    S: Storage,
{
    pub fn open(storage: S, config: &Config) -> Self {
        let store = Store::new(config.contacts_slot.clone());
        let repository = ContactRepository::new(store.load(&storage));
        let theme = Theme::read(&storage, &config.theme_slot);

        Self {
            storage,
            store,
            repository,
            mode: Mode::Idle,
            form: Form::default(),
            search: String::new(),
            message: Message::default(),
            message_duration: config.message_duration(),
            pending_delete: None,
            theme,
            theme_slot: config.theme_slot.clone(),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn repository(&self) -> &ContactRepository {
        &self.repository
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message.text()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Update> {
        tracing::trace!("Dispatching {:?}", action);

        let clear = match action {
            Action::Input { field, value } => {
                let state = self.form.field_mut(field);
                state.value = value;
                state.check(field);

                None
            }
            Action::Submit => Some(self.submit()?),
            Action::Cancel => {
                if let Mode::Editing(id) = replace(&mut self.mode, Mode::Idle) {
                    tracing::debug!("Cancelled editing contact {}", id);

                    self.form = Form::default();
                }

                None
            }
            Action::RequestEdit(id) => {
                match self.repository.get(&id) {
                    Some(contact) => {
                        self.form = Form::load(contact);
                        self.mode = Mode::Editing(id);
                    }
                    None => tracing::debug!("Cannot edit missing contact {}", id),
                }

                None
            }
            Action::RequestDelete(id) => {
                if self.repository.get(&id).is_some() {
                    self.pending_delete = Some(id);
                } else {
                    tracing::debug!("Cannot delete missing contact {}", id);
                }

                None
            }
            Action::ConfirmDelete => self.confirm_delete()?,
            Action::DeclineDelete => {
                self.pending_delete = None;

                None
            }
            Action::Search(term) => {
                self.search = term;

                None
            }
            Action::ToggleTheme => {
                let theme = self.theme.toggle();
                theme.write(&self.storage, &self.theme_slot)?;
                self.theme = theme;

                None
            }
            Action::ClearMessage(version) => {
                self.message.clear(version);

                None
            }
        };

        Ok(Update {
            view: self.view(),
            clear,
        })
    }

    /// Changes only take effect once they have been persisted.
    fn submit(&mut self) -> Result<ScheduledClear> {
        if !self.form.validate() {
            return Ok(self.message.show(INVALID, self.message_duration));
        }

        let (name, phone, email) = self.form.trimmed();

        let mut repository = self.repository.clone();

        let text = match &self.mode {
            Mode::Idle => {
                let contact = repository.add(name, phone, email);

                tracing::debug!("Added contact {}", contact.id);

                ADDED
            }
            Mode::Editing(id) => {
                if !repository.update(id, name, phone, email) {
                    tracing::debug!("Contact {} vanished before it could be updated", id);
                }

                UPDATED
            }
        };

        self.store.save(&self.storage, repository.contacts())?;

        self.repository = repository;
        self.mode = Mode::Idle;
        self.form = Form::default();

        Ok(self.message.show(text, self.message_duration))
    }

    fn confirm_delete(&mut self) -> Result<Option<ScheduledClear>> {
        let id = match &self.pending_delete {
            Some(id) => id,
            None => return Ok(None),
        };

        let mut repository = self.repository.clone();

        if let Some(contact) = repository.remove(id) {
            tracing::debug!("Deleted contact {}", contact.id);
        }

        self.store.save(&self.storage, repository.contacts())?;

        self.repository = repository;
        self.pending_delete = None;

        Ok(Some(self.message.show(DELETED, self.message_duration)))
    }

    pub fn view(&self) -> View {
        let editing = match &self.mode {
            Mode::Idle => None,
            Mode::Editing(id) => Some(id.as_str()),
        };

        let confirm = self
            .pending_delete
            .as_deref()
            .and_then(|id| self.repository.get(id))
            .map(|contact| format!("Delete {}?", contact.name));

        View {
            form: FormView::new(self.form.clone(), editing),
            list: render(&self.repository, &self.search),
            search: self.search.clone(),
            message: self.message.text(),
            confirm,
            theme: self.theme,
        }
    }
}
