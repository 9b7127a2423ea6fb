//! Plain-text report for the terminal.

use crate::freq::freq_label;
use crate::guidelines::{GuidelinePayload, Recommendation};
use crate::model::{Service, Systems};

const NO_DATA: &str = "Нет данных";
const NO_DIAGNOSES: &str = "Нет диагнозов в клинических рекомендациях";
const NO_RECOMMENDATIONS: &str = "Нет рекомендаций для данного диагноза";

/// Render parsed systems as cards grouped per system.
///
/// With `show_risk_headers`, a risk banner precedes the first service of each
/// run of services sharing a risk category.
pub fn render_systems(title: &str, systems: &Systems, show_risk_headers: bool) -> String {
    let mut out = format!("## {}\n", title);
    if systems.is_empty() {
        out.push_str(NO_DATA);
        out.push('\n');
        return out;
    }

    for entry in systems {
        out.push_str(&format!("\n### {}\n", entry.name));
        let mut last_risk: Option<&str> = None;
        for service in &entry.services {
            if show_risk_headers {
                if let Some(risk) = service.risk.as_deref() {
                    if last_risk != Some(risk) {
                        out.push_str(&format!("  ▌ {}\n", risk));
                        last_risk = Some(risk);
                    }
                }
            }
            write_service(&mut out, service);
        }
    }
    out
}

fn write_service(out: &mut String, service: &Service) {
    let mut tags = Vec::new();
    if let Some(study) = &service.study_type {
        tags.push(study.clone());
    }
    let freq = freq_label(service.freq_per_year);
    if !freq.is_empty() {
        tags.push(freq);
    }
    if let Some(code) = &service.nmu_code {
        tags.push(format!("НМУ {}", code));
    }
    write_card(
        out,
        &service.name,
        service.nmu_name.as_deref(),
        &service.goal,
        &tags,
    );
}

/// Render the clinical-guideline payload, one banner per diagnosis.
pub fn render_guidelines(payload: &GuidelinePayload) -> String {
    let mut out = String::from("## Клинические рекомендации\n");
    if payload.is_empty() {
        out.push_str(NO_DIAGNOSES);
        out.push('\n');
        return out;
    }

    for diagnosis in &payload.diagnoses {
        if let Some(name) = &diagnosis.name {
            out.push_str(&format!("\n  ▌ Диагноз: {}\n", name));
        }
        if diagnosis.recommendations.is_empty() {
            out.push_str(&format!("  {}\n", NO_RECOMMENDATIONS));
            continue;
        }
        for rec in &diagnosis.recommendations {
            write_recommendation(&mut out, rec);
        }
    }
    out
}

fn write_recommendation(out: &mut String, rec: &Recommendation) {
    let mut tags = Vec::new();
    if let Some(study) = &rec.study_type {
        tags.push(study.clone());
    }
    if let Some(code) = &rec.code {
        tags.push(format!("НМУ {}", code));
    }
    write_card(
        out,
        rec.name.as_deref().unwrap_or(""),
        None,
        rec.comment.as_deref().unwrap_or(""),
        &tags,
    );
}

fn write_card(out: &mut String, title: &str, note: Option<&str>, body: &str, tags: &[String]) {
    match note {
        Some(note) => out.push_str(&format!("  • {} (ℹ {})\n", title, note)),
        None => out.push_str(&format!("  • {}\n", title)),
    }
    if !body.is_empty() {
        out.push_str(&format!("    {}\n", body));
    }
    if !tags.is_empty() {
        let tags: Vec<_> = tags.iter().map(|t| format!("[{}]", t)).collect();
        out.push_str(&format!("    {}\n", tags.join(" ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn empty_systems() {
        let out = render_systems("Общие рекомендации по здоровью", &Systems::default(), false);
        assert_eq!(out, "## Общие рекомендации по здоровью\nНет данных\n");
    }

    #[test]
    fn service_card() {
        let systems = parse(
            "Система: Сердце\nВид исследования: Инструментальное\nУслуга: ЭКГ\n\
             Цель: профилактика\nЧастота в год: 2\nКод НМУ: A05.10.006\n\
             Название по НМУ: Регистрация электрокардиограммы",
        );
        let out = render_systems("Риски", &systems, false);
        assert!(out.contains("### Сердце"));
        assert!(out.contains("  • ЭКГ (ℹ Регистрация электрокардиограммы)\n"));
        assert!(out.contains("    профилактика\n"));
        assert!(out.contains("    [Инструментальное] [2 раза в год] [НМУ A05.10.006]\n"));
    }

    #[test]
    fn risk_banner_on_change_only() {
        let md = std::fs::read_to_string("tests/fixtures/risks.txt").unwrap();
        let systems = parse(md.as_str());
        let out = render_systems("Рекомендации по рискам", &systems, true);
        assert_eq!(out.matches("▌ Артериальная гипертензия").count(), 1);
        // once in each system
        assert_eq!(out.matches("▌ Курение").count(), 2);

        let plain = render_systems("Рекомендации по рискам", &systems, false);
        assert!(!plain.contains('▌'));
    }

    #[test]
    fn zero_frequency_has_no_tag() {
        let systems = parse("Система: Сердце\nУслуга: ЭКГ\nЧастота в год: 0");
        let out = render_systems("t", &systems, false);
        assert!(!out.contains("в год"));
    }

    #[test]
    fn guidelines_without_diagnoses() {
        let payload = GuidelinePayload::from_json(r#"{"diagnoses": []}"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            render_guidelines(&payload),
            format!("## Клинические рекомендации\n{}\n", NO_DIAGNOSES)
        );
    }

    #[test]
    fn guidelines_fixture() {
        let raw = std::fs::read_to_string("tests/fixtures/guidelines.json").unwrap();
        let payload = GuidelinePayload::from_json(&raw).unwrap().unwrap();
        let out = render_guidelines(&payload);
        assert!(out.contains("▌ Диагноз: I10 Эссенциальная гипертензия"));
        assert!(out.contains("  • Регистрация электрокардиограммы\n"));
        assert!(out.contains("    [функциональное] [НМУ A05.10.006]\n"));
        assert!(out.contains(NO_RECOMMENDATIONS));
    }
}
