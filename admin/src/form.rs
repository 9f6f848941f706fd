use std::{collections::HashMap, sync::Mutex};

/// Something holding selection fields whose options can be replaced.
pub trait OptionSink {
    /// Replace the whole option markup of `field_id`.
    fn replace_options(&self, field_id: &str, html: String);
}

/// In-memory form: field id to current option markup.
#[derive(Debug, Default)]
pub struct Form {
    fields: Mutex<HashMap<String, String>>,
}

impl Form {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_field(self, field_id: impl Into<String>, html: impl Into<String>) -> Self {
        self.lock().insert(field_id.into(), html.into());
        self
    }

    pub fn field(&self, field_id: &str) -> Option<String> {
        self.lock().get(field_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map still holds whole field values
        self.fields.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OptionSink for Form {
    fn replace_options(&self, field_id: &str, html: String) {
        self.lock().insert(field_id.to_owned(), html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_overwrites_only_the_named_field() {
        let form = Form::new()
            .with_field("id_contract", "old contracts")
            .with_field("id_sales", "old sales");
        form.replace_options("id_contract", "new".to_owned());

        assert_eq!(form.field("id_contract").as_deref(), Some("new"));
        assert_eq!(form.field("id_sales").as_deref(), Some("old sales"));
    }

    #[test]
    fn missing_field() {
        assert_eq!(Form::new().field("id_contract"), None);
    }
}
