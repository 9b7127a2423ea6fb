/// Human-readable yearly frequency.
///
/// Two cases only: exactly one, and everything else. Counts like 2–4 or 5+
/// share the same phrase; there is no full numeral agreement.
pub fn freq_label(n: Option<u64>) -> String {
    match n {
        None | Some(0) => String::new(),
        Some(1) => "1 раз в год".to_string(),
        Some(n) => format!("{} раза в год", n),
    }
}
