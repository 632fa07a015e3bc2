//! Server configuration form and its serializers.
//!
//! Responsibilities:
//! - Hold the values of the configuration fields of one server.
//! - Serialize them into a spawn query string or a `UserOptions` mapping.
//! - Load values back from a stored option set.
//!
//! Does NOT handle:
//! - Validation (see `app::validation`).
//! - Warning badges (see `app::warnings`).
//!
//! Invariants:
//! - Fields are always serialized in `FIELD_ORDER`.
//! - A hidden field never contributes to either serialization.
//! - The query string drops empty and unset values; the mapping drops only
//!   unset values, so an empty select stays as `""`.
//! - `resource_Runtime` is entered in minutes and serialized in seconds.

use std::collections::BTreeMap;

use hub_client::endpoints::encode_query_component;
use hub_client::{OptionValue, UserOptions};
use hub_config::constants::{DEFAULT_SERVICE, RUNTIME_SECONDS_PER_MINUTE};

/// Option key of the active virtual organization.
pub const VO_KEY: &str = "vo_active_input";
/// Option key of the requested service.
pub const SERVICE_KEY: &str = "service_input";
/// Option key of the runtime in seconds.
pub const RUNTIME_KEY: &str = "resource_Runtime";

/// Tab of the configuration panel a field lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FormTab {
    #[default]
    Service,
    Options,
    Resources,
    Reservation,
}

impl FormTab {
    pub const ALL: [FormTab; 4] = [
        FormTab::Service,
        FormTab::Options,
        FormTab::Resources,
        FormTab::Reservation,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Options => "options",
            Self::Resources => "resources",
            Self::Reservation => "reservation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Options => "Options",
            Self::Resources => "Resources",
            Self::Reservation => "Reservation",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Static description of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Short field name used in key bindings and lookups.
    pub param: &'static str,
    /// Option key the value is serialized under.
    pub target_key: &'static str,
    /// Free-text input rather than a select.
    pub is_input: bool,
    pub tab: FormTab,
}

impl FieldDescriptor {
    const fn select(param: &'static str, target_key: &'static str, tab: FormTab) -> Self {
        Self {
            param,
            target_key,
            is_input: false,
            tab,
        }
    }

    const fn input(param: &'static str, target_key: &'static str, tab: FormTab) -> Self {
        Self {
            param,
            target_key,
            is_input: true,
            tab,
        }
    }
}

/// Serialization order of the configuration fields.
pub const FIELD_ORDER: [FieldDescriptor; 9] = [
    FieldDescriptor::select("type", "options_input", FormTab::Service),
    FieldDescriptor::select("system", "system_input", FormTab::Options),
    FieldDescriptor::select("account", "account_input", FormTab::Options),
    FieldDescriptor::select("project", "project_input", FormTab::Options),
    FieldDescriptor::select("partition", "partition_input", FormTab::Options),
    FieldDescriptor::select("reservation", "reservation_input", FormTab::Reservation),
    FieldDescriptor::input("nodes", "resource_Nodes", FormTab::Resources),
    FieldDescriptor::input("gpus", "resource_GPUS", FormTab::Resources),
    FieldDescriptor::input("runtime", RUNTIME_KEY, FormTab::Resources),
];

/// Look up a field by its short name.
pub fn descriptor(param: &str) -> Option<&'static FieldDescriptor> {
    FIELD_ORDER.iter().find(|d| d.param == param)
}

/// Option key a field edit is compared against.
///
/// Unknown fields fall back to `{param}_input`.
pub fn option_key(param: &str) -> String {
    match param {
        "type" => "options_input".to_string(),
        "nodes" => "resource_Nodes".to_string(),
        "gpus" => "resource_GPUS".to_string(),
        "runtime" => RUNTIME_KEY.to_string(),
        other => format!("{}_input", other),
    }
}

/// Fields shown on `tab`, in serialization order.
pub fn fields_on(tab: FormTab) -> impl Iterator<Item = &'static FieldDescriptor> {
    FIELD_ORDER.iter().filter(move |d| d.tab == tab)
}

/// Convert a runtime in minutes to the stored seconds value.
///
/// An empty input counts as zero. Non-numeric input yields `None`.
pub fn runtime_seconds(raw: &str) -> Option<OptionValue> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(OptionValue::Integer(0));
    }
    let minutes: f64 = raw.parse().ok()?;
    if !minutes.is_finite() {
        return None;
    }
    let seconds = minutes * RUNTIME_SECONDS_PER_MINUTE as f64;
    if seconds.fract() == 0.0 && seconds.abs() < i64::MAX as f64 {
        Some(OptionValue::Integer(seconds as i64))
    } else {
        Some(OptionValue::Float(seconds))
    }
}

/// Format a stored runtime in seconds as minutes for the input field.
pub fn runtime_minutes(stored: &OptionValue) -> String {
    match stored.as_f64() {
        Some(seconds) => {
            OptionValue::Float(seconds / RUNTIME_SECONDS_PER_MINUTE as f64).to_string()
        }
        None => stored.to_string(),
    }
}

/// State of one field in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    /// Current value. `None` is an unselected select.
    pub value: Option<String>,
    /// The field's row is not displayed.
    pub hidden: bool,
    pub required: bool,
    /// Allowed values of a select; empty means unrestricted.
    pub choices: Vec<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FormField {
    fn for_descriptor(desc: &FieldDescriptor) -> Self {
        let (required, min) = match desc.param {
            "type" | "system" => (true, None),
            "nodes" | "runtime" => (false, Some(1.0)),
            "gpus" => (false, Some(0.0)),
            _ => (false, None),
        };
        Self {
            value: if desc.is_input { Some(String::new()) } else { None },
            hidden: false,
            required,
            choices: Vec::new(),
            min,
            max: None,
        }
    }
}

/// Values shown in the system, partition and project columns of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCells {
    pub system: String,
    pub partition: String,
    pub project: String,
}

/// Configuration form of one server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerForm {
    fields: BTreeMap<&'static str, FormField>,
}

impl Default for ServerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerForm {
    /// Empty form with every field shown.
    pub fn new() -> Self {
        let fields = FIELD_ORDER
            .iter()
            .map(|d| (d.param, FormField::for_descriptor(d)))
            .collect();
        Self { fields }
    }

    /// Form seeded from a stored option set.
    ///
    /// Resource inputs missing from `options` do not apply to the server's
    /// partition and start hidden.
    pub fn from_options(options: &UserOptions) -> Self {
        let mut form = Self::new();
        form.set_values(options);
        for desc in FIELD_ORDER.iter().filter(|d| d.is_input) {
            if !options.contains_key(desc.target_key) {
                form.set_hidden(desc.param, true);
            }
        }
        form
    }

    pub fn field(&self, param: &str) -> Option<&FormField> {
        self.fields.get(param)
    }

    pub fn value(&self, param: &str) -> Option<&str> {
        self.fields.get(param).and_then(|f| f.value.as_deref())
    }

    /// Set a field value. Returns false for unknown fields.
    pub fn set_value(&mut self, param: &str, value: Option<String>) -> bool {
        match self.fields.get_mut(param) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }

    pub fn set_hidden(&mut self, param: &str, hidden: bool) {
        if let Some(field) = self.fields.get_mut(param) {
            field.hidden = hidden;
        }
    }

    pub fn is_hidden(&self, param: &str) -> bool {
        self.fields.get(param).is_some_and(|f| f.hidden)
    }

    pub fn set_choices(&mut self, param: &str, choices: Vec<String>) {
        if let Some(field) = self.fields.get_mut(param) {
            field.choices = choices;
        }
    }

    /// Replace field values with those stored in `options`.
    ///
    /// Visibility is left untouched.
    pub fn set_values(&mut self, options: &UserOptions) {
        for desc in FIELD_ORDER.iter() {
            let value = match options.get(desc.target_key) {
                Some(stored) if desc.target_key == RUNTIME_KEY => Some(runtime_minutes(stored)),
                Some(stored) => Some(stored.to_string()),
                None if desc.is_input => Some(String::new()),
                None => None,
            };
            self.set_value(desc.param, value);
        }
    }

    /// Serialized value of a field, or `None` when it contributes nothing.
    fn serialized(&self, desc: &FieldDescriptor) -> Option<OptionValue> {
        let field = self.fields.get(desc.param)?;
        if field.hidden {
            return None;
        }
        let raw = field.value.as_deref()?;
        if desc.target_key == RUNTIME_KEY {
            runtime_seconds(raw)
        } else {
            Some(OptionValue::Text(raw.to_string()))
        }
    }

    /// Query string for the spawn URL.
    pub fn to_query_string(&self, vo: Option<&str>) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(vo) = vo {
            pairs.push((VO_KEY, vo.to_string()));
        }
        pairs.push((SERVICE_KEY, DEFAULT_SERVICE.to_string()));

        for desc in FIELD_ORDER.iter() {
            let raw_is_empty = self
                .value(desc.param)
                .is_none_or(|raw| raw.trim().is_empty());
            if raw_is_empty {
                continue;
            }
            if let Some(value) = self.serialized(desc) {
                pairs.push((desc.target_key, value.to_string()));
            }
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_query_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Option set sent with start and update requests.
    pub fn to_user_options(&self, vo: Option<&str>) -> UserOptions {
        let mut options = UserOptions::new();
        if let Some(vo) = vo {
            options.insert(VO_KEY.to_string(), OptionValue::from(vo));
        }
        options.insert(SERVICE_KEY.to_string(), OptionValue::from(DEFAULT_SERVICE));

        for desc in FIELD_ORDER.iter() {
            if let Some(value) = self.serialized(desc) {
                options.insert(desc.target_key.to_string(), value);
            }
        }
        options
    }

    pub fn cells(&self) -> TableCells {
        let cell = |param: &str| self.value(param).unwrap_or_default().to_string();
        TableCells {
            system: cell("system"),
            partition: cell("partition"),
            project: cell("project"),
        }
    }

    /// True if the field's current value differs from the stored one.
    pub fn field_differs(&self, param: &str, snapshot: &UserOptions) -> bool {
        let Some(desc) = descriptor(param) else {
            return false;
        };
        let current = self.serialized(desc).filter(|v| v.to_string() != "");
        let stored = snapshot
            .get(&option_key(param))
            .filter(|v| v.to_string() != "");
        match (current, stored) {
            (None, None) => false,
            (Some(a), Some(b)) => !a.loosely_eq(b),
            _ => true,
        }
    }

    /// True if any visible field differs from the stored option set.
    pub fn differs_from(&self, snapshot: &UserOptions) -> bool {
        FIELD_ORDER
            .iter()
            .any(|d| !self.is_hidden(d.param) && self.field_differs(d.param, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab_form() -> ServerForm {
        let mut form = ServerForm::new();
        form.set_value("type", Some("JupyterLab - 3.6".to_string()));
        form.set_value("system", Some("sys-a".to_string()));
        form.set_value("project", Some("".to_string()));
        form.set_value("nodes", Some("2".to_string()));
        form.set_value("runtime", Some("30".to_string()));
        form
    }

    #[test]
    fn test_option_key_mapping() {
        assert_eq!(option_key("type"), "options_input");
        assert_eq!(option_key("nodes"), "resource_Nodes");
        assert_eq!(option_key("gpus"), "resource_GPUS");
        assert_eq!(option_key("runtime"), "resource_Runtime");
        assert_eq!(option_key("partition"), "partition_input");
        assert_eq!(option_key("anything"), "anything_input");
    }

    #[test]
    fn test_option_key_matches_descriptors() {
        for desc in FIELD_ORDER.iter() {
            assert_eq!(option_key(desc.param), desc.target_key);
        }
    }

    #[test]
    fn test_only_resources_are_free_text() {
        let inputs: Vec<&str> = FIELD_ORDER
            .iter()
            .filter(|d| d.is_input)
            .map(|d| d.param)
            .collect();
        assert_eq!(inputs, vec!["nodes", "gpus", "runtime"]);
        assert!(fields_on(FormTab::Resources).all(|d| d.is_input));
        assert_eq!(
            descriptor("reservation").map(|d| d.tab),
            Some(FormTab::Reservation)
        );
    }

    #[test]
    fn test_runtime_seconds() {
        assert_eq!(runtime_seconds("30"), Some(OptionValue::Integer(1800)));
        assert_eq!(runtime_seconds(""), Some(OptionValue::Integer(0)));
        assert_eq!(runtime_seconds("0.5"), Some(OptionValue::Integer(30)));
        assert_eq!(runtime_seconds("abc"), None);
    }

    #[test]
    fn test_runtime_minutes() {
        assert_eq!(runtime_minutes(&OptionValue::Integer(1800)), "30");
        assert_eq!(runtime_minutes(&OptionValue::Text("90".to_string())), "1.5");
    }

    #[test]
    fn test_query_string_order_and_empty_values() {
        let query = lab_form().to_query_string(Some("myvo"));
        assert_eq!(
            query,
            "vo_active_input=myvo&service_input=JupyterLab&options_input=JupyterLab%20-%203.6\
             &system_input=sys-a&resource_Nodes=2&resource_Runtime=1800"
        );
    }

    #[test]
    fn test_mapping_keeps_empty_select() {
        let options = lab_form().to_user_options(Some("myvo"));
        assert_eq!(options["project_input"], OptionValue::Text(String::new()));
        assert!(!options.contains_key("account_input"));
        assert_eq!(options["resource_Runtime"], OptionValue::Integer(1800));
        assert_eq!(options["resource_Nodes"], OptionValue::Text("2".to_string()));
        assert_eq!(options["service_input"], OptionValue::from("JupyterLab"));
        assert_eq!(options["vo_active_input"], OptionValue::from("myvo"));
    }

    #[test]
    fn test_empty_runtime_is_zero_in_mapping_only() {
        let mut form = lab_form();
        form.set_value("runtime", Some(String::new()));
        assert_eq!(
            form.to_user_options(None)["resource_Runtime"],
            OptionValue::Integer(0)
        );
        assert!(!form.to_query_string(None).contains("resource_Runtime"));
    }

    #[test]
    fn test_hidden_field_is_skipped() {
        let mut form = lab_form();
        form.set_hidden("nodes", true);
        form.set_hidden("system", true);
        let options = form.to_user_options(None);
        assert!(!options.contains_key("resource_Nodes"));
        assert!(!options.contains_key("system_input"));
        let query = form.to_query_string(None);
        assert!(!query.contains("resource_Nodes"));
        assert!(!query.contains("system_input"));
    }

    #[test]
    fn test_without_vo() {
        let query = ServerForm::new().to_query_string(None);
        assert_eq!(query, "service_input=JupyterLab");
    }

    #[test]
    fn test_from_options_hides_missing_inputs() {
        let mut options = UserOptions::new();
        options.insert("system_input".to_string(), "sys-a".into());
        options.insert("resource_Runtime".to_string(), OptionValue::Integer(3600));

        let form = ServerForm::from_options(&options);
        assert_eq!(form.value("system"), Some("sys-a"));
        assert_eq!(form.value("runtime"), Some("60"));
        assert!(form.is_hidden("nodes"));
        assert!(form.is_hidden("gpus"));
        assert!(!form.is_hidden("runtime"));
        assert_eq!(form.value("partition"), None);
    }

    #[test]
    fn test_change_tracking() {
        let snapshot = lab_form().to_user_options(Some("myvo"));
        let mut form = ServerForm::from_options(&snapshot);
        assert!(!form.differs_from(&snapshot));

        form.set_value("nodes", Some("4".to_string()));
        assert!(form.differs_from(&snapshot));
        assert!(form.field_differs("nodes", &snapshot));

        form.set_value("nodes", Some("2".to_string()));
        assert!(!form.differs_from(&snapshot));
    }

    #[test]
    fn test_change_tracking_runtime_compares_seconds() {
        let snapshot = lab_form().to_user_options(None);
        let mut form = ServerForm::from_options(&snapshot);
        assert_eq!(form.value("runtime"), Some("30"));
        form.set_value("runtime", Some("31".to_string()));
        assert!(form.field_differs("runtime", &snapshot));
        form.set_value("runtime", Some("30".to_string()));
        assert!(!form.field_differs("runtime", &snapshot));
    }

    #[test]
    fn test_cells() {
        let cells = lab_form().cells();
        assert_eq!(cells.system, "sys-a");
        assert_eq!(cells.partition, "");
        assert_eq!(cells.project, "");
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(FormTab::Service.next(), FormTab::Options);
        assert_eq!(FormTab::Reservation.next(), FormTab::Service);
        assert_eq!(FormTab::Service.previous(), FormTab::Reservation);
    }
}
