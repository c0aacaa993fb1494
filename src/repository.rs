use crate::contact::Contact;

/// Contacts ordered most-recent-first.
#[derive(Debug, Default, Clone)]
pub struct ContactRepository {
    contacts: Vec<Contact>,
}

impl ContactRepository {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn add(&mut self, name: String, phone: String, email: String) -> Contact {
        let contact = Contact::new(name, phone, email);

        self.contacts.insert(0, contact.clone());

        contact
    }

    pub fn update(&mut self, id: &str, name: String, phone: String, email: String) -> bool {
        match self.contacts.iter_mut().find(|contact| contact.id == id) {
            Some(contact) => {
                contact.name = name;
                contact.phone = phone;
                contact.email = email;

                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Contact> {
        let pos = self.contacts.iter().position(|contact| contact.id == id)?;

        Some(self.contacts.remove(pos))
    }

    pub fn search(&self, term: &str) -> Vec<Contact> {
        let term = term.trim().to_lowercase();

        if term.is_empty() {
            return self.contacts.clone();
        }

        self.contacts
            .iter()
            .filter(|contact| contact.matches(&term))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(contacts: &[Contact]) -> Vec<&str> {
        contacts
            .iter()
            .map(|contact| contact.name.as_str())
            .collect()
    }

    fn repository() -> ContactRepository {
        let mut repository = ContactRepository::default();

        repository.add("Bob".to_owned(), "555 0100 100".to_owned(), String::new());
        repository.add(
            "Ann".to_owned(),
            "555 0100 200".to_owned(),
            "ann@Example.org".to_owned(),
        );

        repository
    }

    #[test]
    fn add_inserts_at_front_with_unique_ids() {
        let repository = repository();

        assert_eq!(names(repository.contacts()), ["Ann", "Bob"]);
        assert_ne!(repository.contacts()[0].id, repository.contacts()[1].id);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut repository = repository();
        let id = repository.contacts()[1].id.clone();

        let updated = repository.update(
            &id,
            "Robert".to_owned(),
            "555 0100 101".to_owned(),
            "bob@example.org".to_owned(),
        );

        assert!(updated);
        assert_eq!(names(repository.contacts()), ["Ann", "Robert"]);
        assert_eq!(repository.contacts()[1].id, id);
        assert_eq!(repository.get(&id).unwrap().email, "bob@example.org");
    }

    #[test]
    fn update_of_missing_id_is_missed() {
        let mut repository = repository();

        let updated = repository.update(
            "missing",
            "Carl".to_owned(),
            "555 0100 300".to_owned(),
            String::new(),
        );

        assert!(!updated);
        assert_eq!(names(repository.contacts()), ["Ann", "Bob"]);
    }

    #[test]
    fn remove_ignores_missing_id() {
        let mut repository = repository();
        let id = repository.contacts()[0].id.clone();

        assert_eq!(repository.remove(&id).unwrap().name, "Ann");
        assert!(repository.remove(&id).is_none());
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn search_matches_all_fields_case_insensitively() {
        let repository = repository();

        assert_eq!(names(&repository.search("bob")), ["Bob"]);
        assert_eq!(names(&repository.search("0100 2")), ["Ann"]);
        assert_eq!(names(&repository.search("EXAMPLE")), ["Ann"]);
        assert_eq!(names(&repository.search("555")), ["Ann", "Bob"]);
        assert!(repository.search("nobody").is_empty());
    }

    #[test]
    fn empty_search_is_idempotent() {
        let repository = repository();

        let first = repository.search("");
        let second = repository.search("  ");

        assert_eq!(first, repository.contacts());
        assert_eq!(second, first);
        assert_eq!(repository.len(), 2);
    }
}
