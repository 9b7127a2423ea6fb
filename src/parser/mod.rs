pub mod labels;
pub mod normalize;
pub mod tracker;

use tracing::debug;

use crate::model::Systems;
pub use labels::{classify_line, LabelKind, Line};
pub use normalize::normalize;
use tracker::Tracker;

/// Single pass: normalize → split lines → classify → fold into the tracker.
///
/// Never fails. Unlabelled lines are skipped, services outside a system are
/// dropped and field lines without an open service are ignored.
pub fn parse<'a>(text: impl Into<Option<&'a str>>) -> Systems {
    let text = normalize(text);
    let mut tracker = Tracker::new();
    for line in text.split('\n') {
        if let Some(classified) = classify_line(line) {
            tracker.apply(classified);
        }
    }
    let systems = tracker.finish();
    debug!(
        systems = systems.len(),
        services = systems.service_count(),
        "parsed recommendation text"
    );
    systems
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Service;

    #[test]
    fn no_headers_is_empty() {
        assert!(parse("просто текст\nещё строка\nЦель: без услуги").is_empty());
        assert!(parse("").is_empty());
        assert!(parse(None::<&str>).is_empty());
    }

    #[test]
    fn lone_system_header() {
        let systems = parse("Система: Сердце");
        assert_eq!(systems.len(), 1);
        assert_eq!(systems.get("Сердце"), Some(&[][..]));
    }

    #[test]
    fn deterministic() {
        let md = std::fs::read_to_string("tests/fixtures/risks.txt").unwrap();
        assert_eq!(parse(md.as_str()), parse(md.as_str()));
    }

    #[test]
    fn scenario_single_service() {
        let systems =
            parse("Система: Сердце\nУслуга: ЭКГ\nЦель: профилактика\nЧастота в год: 1\n");
        let expected = Service {
            name: "ЭКГ".into(),
            goal: "профилактика".into(),
            freq_per_year: Some(1),
            ..Default::default()
        };
        assert_eq!(systems.get("Сердце"), Some(&[expected][..]));

        let json = serde_json::to_value(&systems).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Сердце": [{
                    "service": "ЭКГ",
                    "study": null,
                    "goal": "профилактика",
                    "freq": 1,
                    "nmu_code": null,
                    "nmu_name": null,
                    "risk": null
                }]
            })
        );
    }

    #[test]
    fn risk_before_system_carries_over() {
        let systems = parse("Риск: Курение\nСистема: Лёгкие\nУслуга: Спирометрия");
        let service = &systems.get("Лёгкие").unwrap()[0];
        assert_eq!(service.risk.as_deref(), Some("Курение"));
    }

    #[test]
    fn study_and_risk_persist_across_systems() {
        let text = "Система: Сердце\nВид исследования: Инструментальное\nРиск: Гипертония\n\
                    Услуга: ЭКГ\nСистема: Почки\nУслуга: УЗИ почек";
        let systems = parse(text);
        let kidney = &systems.get("Почки").unwrap()[0];
        assert_eq!(kidney.study_type.as_deref(), Some("Инструментальное"));
        assert_eq!(kidney.risk.as_deref(), Some("Гипертония"));
    }

    #[test]
    fn service_before_system_dropped() {
        let systems = parse("Услуга: ЭКГ\nЦель: потерянная\nСистема: Сердце\nЦель: тоже");
        assert_eq!(systems.len(), 1);
        assert!(systems.get("Сердце").unwrap().is_empty());
        let json = serde_json::to_string(&systems).unwrap();
        assert!(!json.contains("ЭКГ"));
        assert!(!json.contains("потерянная"));
    }

    #[test]
    fn bold_markup_and_carriage_returns() {
        let systems = parse("**Система:** Кожа\r\n**Услуга:** Дерматоскопия\r\n");
        let names: Vec<_> = systems.names().collect();
        assert_eq!(names, vec!["Кожа"]);
        assert_eq!(systems.get("Кожа").unwrap()[0].name, "Дерматоскопия");
    }

    #[test]
    fn empty_service_header_closes_previous_service() {
        let systems = parse(
            "Система: Сердце\nУслуга: ЭКГ\nЦель: профилактика\nУслуга: \n\
             Цель: чужая цель\nЧастота в год: 4",
        );
        let heart = systems.get("Сердце").unwrap();
        assert_eq!(heart.len(), 2);
        assert_eq!(heart[0].goal, "профилактика");
        assert_eq!(heart[0].freq_per_year, None);
        assert_eq!(heart[1].name, "");
        assert_eq!(heart[1].goal, "чужая цель");
        assert_eq!(heart[1].freq_per_year, Some(4));
    }

    #[test]
    fn empty_system_header_opens_its_own_entry() {
        let systems = parse("Система: Сердце\nУслуга: ЭКГ\nСистема: \nУслуга: УЗИ");
        let names: Vec<_> = systems.names().collect();
        assert_eq!(names, vec!["Сердце", ""]);
        assert_eq!(systems.get("Сердце").unwrap().len(), 1);
        assert_eq!(systems.get("").unwrap()[0].name, "УЗИ");
    }

    #[test]
    fn malformed_frequency_leaves_field_unset() {
        let systems = parse("Система: Сердце\nУслуга: ЭКГ\nЧастота в год: ежегодно");
        assert_eq!(systems.get("Сердце").unwrap()[0].freq_per_year, None);
    }

    #[test]
    fn risks_fixture() {
        let md = std::fs::read_to_string("tests/fixtures/risks.txt").unwrap();
        let systems = parse(md.as_str());
        let names: Vec<_> = systems.names().collect();
        assert_eq!(names, vec!["Сердечно-сосудистая система", "Эндокринная система"]);

        let heart = systems.get("Сердечно-сосудистая система").unwrap();
        let services: Vec<_> = heart.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(services, vec!["Липидный профиль", "Электрокардиография", "Консультация кардиолога"]);
        assert_eq!(heart[0].risk.as_deref(), Some("Артериальная гипертензия"));
        assert_eq!(heart[0].study_type.as_deref(), Some("Лабораторное"));
        assert_eq!(heart[0].nmu_code.as_deref(), Some("B03.016.005"));
        assert_eq!(heart[1].study_type.as_deref(), Some("Инструментальное"));
        assert_eq!(heart[1].freq_per_year, Some(2));
        assert_eq!(heart[2].risk.as_deref(), Some("Курение"));

        // risk and study type leak into the next system until overwritten
        let endo = systems.get("Эндокринная система").unwrap();
        assert_eq!(endo[0].risk.as_deref(), Some("Курение"));
        assert_eq!(endo[0].study_type.as_deref(), Some("Консультация"));
        assert_eq!(endo[1].study_type.as_deref(), Some("Лабораторное"));
    }

    #[test]
    fn general_fixture() {
        let md = std::fs::read_to_string("tests/fixtures/general.txt").unwrap();
        let systems = parse(md.as_str());
        assert_eq!(systems.len(), 3);
        assert!(systems.iter().all(|e| e.services.iter().all(|s| s.risk.is_none())));
        let skin = systems.get("Кожа").unwrap();
        assert_eq!(skin.len(), 1);
        assert_eq!(skin[0].goal, "Раннее выявление новообразований кожи");
        assert_eq!(skin[0].nmu_name.as_deref(), Some("Дерматоскопия"));
    }
}
