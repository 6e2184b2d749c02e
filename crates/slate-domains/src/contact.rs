//! Contact management.

use serde::{Deserialize, Serialize};

use slate_core::validate::required;
use slate_core::{Fields, Filter, Placement, Record, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Fields for Contact {
    const STORAGE_KEY: &'static str = "contacts";

    // The address book keeps creation order.
    const PLACEMENT: Placement = Placement::Back;

    type Patch = ContactPatch;

    fn apply(&mut self, patch: ContactPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.email = self.email.trim().to_string();
    }

    fn validate(&self, errors: &mut ValidationError) {
        required(errors, "name", "Name", &self.name);
        required(errors, "phone", "Phone", &self.phone);
        if required(errors, "email", "Email", &self.email) && !self.email.contains('@') {
            errors.push("email", "Email must be a valid address");
        }
    }
}

/// Search criteria for the contact list.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Matched case-insensitively against name and email, and verbatim
    /// against phone.
    pub search: Option<String>,
}

impl ContactFilter {
    pub fn into_filter(self) -> Filter<Contact> {
        let term = self.search.as_deref().unwrap_or_default().trim().to_string();
        if term.is_empty() {
            return Filter::all();
        }

        let needle = term.to_lowercase();
        Filter::all().matching(move |record: &Record<Contact>| {
            let contact = &record.fields;
            contact.name.to_lowercase().contains(&needle)
                || contact.phone.contains(&term)
                || contact.email.to_lowercase().contains(&needle)
        })
    }
}
