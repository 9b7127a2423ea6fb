use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    System,
    StudyType,
    Risk,
    Service,
    Goal,
    Frequency,
    NmuCode,
    NmuName,
}

/// A classified line with its captured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    System(&'a str),
    StudyType(&'a str),
    Risk(&'a str),
    Service(&'a str),
    Goal(&'a str),
    Frequency(u64),
    NmuCode(&'a str),
    NmuName(&'a str),
}

pub struct Label {
    pub kind: LabelKind,
    re: Regex,
}

impl Label {
    fn new(kind: LabelKind, text: &'static str) -> Self {
        let value = match kind {
            LabelKind::Frequency => r"(\d+)\s*",
            _ => r"(.+)",
        };
        let pattern = format!(r"^\s*{}:\s*{}$", regex::escape(text), value);
        Label {
            kind,
            re: Regex::new(&pattern).unwrap(),
        }
    }

    /// Trimmed remainder after the label, if this label heads the line.
    /// `Услуга: ` yields an empty value; a bare `Услуга:` does not match.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.re.captures(line)?;
        Some(caps.get(1)?.as_str().trim())
    }

    fn classify<'a>(&self, line: &'a str) -> Option<Line<'a>> {
        let value = self.capture(line)?;
        let classified = match self.kind {
            LabelKind::System => Line::System(value),
            LabelKind::StudyType => Line::StudyType(value),
            LabelKind::Risk => Line::Risk(value),
            LabelKind::Service => Line::Service(value),
            LabelKind::Goal => Line::Goal(value),
            LabelKind::Frequency => Line::Frequency(value.parse().ok()?),
            LabelKind::NmuCode => Line::NmuCode(value),
            LabelKind::NmuName => Line::NmuName(value),
        };
        Some(classified)
    }
}

/// Label table in priority order: the four headers first, then the fields.
pub static LABELS: LazyLock<Vec<Label>> = LazyLock::new(|| {
    vec![
        Label::new(LabelKind::System, "Система"),
        Label::new(LabelKind::StudyType, "Вид исследования"),
        Label::new(LabelKind::Risk, "Риск"),
        Label::new(LabelKind::Service, "Услуга"),
        Label::new(LabelKind::Goal, "Цель"),
        Label::new(LabelKind::Frequency, "Частота в год"),
        Label::new(LabelKind::NmuCode, "Код НМУ"),
        Label::new(LabelKind::NmuName, "Название по НМУ"),
    ]
});

/// Classify one normalized line; first matching label wins.
pub fn classify_line(line: &str) -> Option<Line<'_>> {
    LABELS.iter().find_map(|label| label.classify(line))
}
