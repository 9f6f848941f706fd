use crm_api::RelatedRecord;

pub const PLACEHOLDER: &str = r#"<option value="" selected="">---------</option>"#;

/// Option markup for a selection field: the empty placeholder, then one
/// option per record in the order given.
pub fn render_options(records: &[RelatedRecord]) -> String {
    let mut html = String::from(PLACEHOLDER);
    for record in records {
        html.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            record.id,
            escape(&record.name)
        ));
    }
    html
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
