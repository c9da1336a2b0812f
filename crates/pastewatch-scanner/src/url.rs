use pastewatch_core::PasteId;

/// Expand the raw-content URL template for a paste.
///
/// The template carries an `{id}` placeholder, validated at
/// configuration-load time.
#[must_use]
pub fn build_raw_url(template: &str, id: &PasteId) -> String {
    template.replace("{id}", id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_raw_url_from_template() {
        let id = PasteId::new("dR7wq2Lx").expect("valid paste id");
        let url = build_raw_url("https://pastebin.com/raw/{id}", &id);
        assert_eq!(url, "https://pastebin.com/raw/dR7wq2Lx");
    }

    #[test]
    fn test_placeholder_position_is_flexible() {
        let id = PasteId::new("dR7wq2Lx").expect("valid paste id");
        let url = build_raw_url("https://mirror.example/{id}/raw", &id);
        assert_eq!(url, "https://mirror.example/dR7wq2Lx/raw");
    }
}
