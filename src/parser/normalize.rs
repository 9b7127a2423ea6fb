/// Cosmetic markup the workflow service sprinkles over its text output.
const STRIP: &[&str] = &["**", "🟢", "\r"];

/// Remove bold markers, the status glyph and carriage returns, then trim.
/// A missing payload normalizes to an empty string.
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };
    let mut text = raw.to_string();
    for pattern in STRIP {
        if text.contains(pattern) {
            text = text.replace(pattern, "");
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty() {
        assert_eq!(normalize(None::<&str>), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \r\n "), "");
    }

    #[test]
    fn strips_markup() {
        assert_eq!(normalize("**Система:** Кожа\r\n"), "Система: Кожа");
        assert_eq!(normalize("🟢 Услуга: ЭКГ"), "Услуга: ЭКГ");
    }

    #[test]
    fn keeps_inner_newlines() {
        assert_eq!(normalize("\n a\r\nb \n"), "a\nb");
    }
}
