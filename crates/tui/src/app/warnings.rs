//! Per-field warning flags and their tab badges.
//!
//! Responsibilities:
//! - Remember which fields carry a warning (stored value no longer valid,
//!   or rejected by validation).
//! - Derive the badge of a tab from the fields on it.
//!
//! Invariants:
//! - A tab badge is the OR over warnings of its visible fields and is never
//!   shown for a tab whose fields are all hidden.
//! - Focusing or editing a field clears its own warning only.

use std::collections::BTreeSet;

use crate::app::form::{FIELD_ORDER, FormTab, ServerForm, fields_on};

/// Warning flags of one server form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningState {
    fields: BTreeSet<&'static str>,
}

impl WarningState {
    /// Flag every field whose stored value is outside its allowed choices.
    pub fn from_form(form: &ServerForm) -> Self {
        let mut state = Self::default();
        for desc in FIELD_ORDER.iter() {
            let Some(field) = form.field(desc.param) else {
                continue;
            };
            let Some(value) = field.value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            if !field.choices.is_empty() && !field.choices.iter().any(|c| c == value) {
                state.fields.insert(desc.param);
            }
        }
        state
    }

    pub fn set_warning(&mut self, param: &str) {
        if let Some(desc) = FIELD_ORDER.iter().find(|d| d.param == param) {
            self.fields.insert(desc.param);
        }
    }

    pub fn has_warning(&self, param: &str) -> bool {
        self.fields.contains(param)
    }

    /// The user focused or edited `param`.
    pub fn on_field_focus(&mut self, param: &str) {
        self.fields.remove(param);
    }

    /// The user switched tabs: drop warnings of fields that are not shown.
    pub fn on_tab_click(&mut self, form: &ServerForm) {
        self.fields.retain(|param| !form.is_hidden(param));
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Badge state of `tab`.
    pub fn tab_warning(&self, tab: FormTab, form: &ServerForm) -> bool {
        if tab_disabled(tab, form) {
            return false;
        }
        fields_on(tab).any(|d| !form.is_hidden(d.param) && self.fields.contains(d.param))
    }

    pub fn any(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// A tab is disabled when none of its fields is shown.
pub fn tab_disabled(tab: FormTab, form: &ServerForm) -> bool {
    fields_on(tab).all(|d| form.is_hidden(d.param))
}
