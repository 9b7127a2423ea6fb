use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One recommended study, test or consultation.
///
/// Serialized keys follow the workflow service vocabulary (`service`, `study`,
/// `freq`, `nmu_code`, ...) so the JSON output can be fed to the same
/// consumers that read the raw recommendation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Service {
    #[serde(rename = "service")]
    pub name: String,
    #[serde(rename = "study")]
    pub study_type: Option<String>,
    pub goal: String,
    /// Any non-negative count that fits in `u64`; longer digit runs leave it unset.
    #[serde(rename = "freq")]
    pub freq_per_year: Option<u64>,
    pub nmu_code: Option<String>,
    pub nmu_name: Option<String>,
    pub risk: Option<String>,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        study_type: Option<String>,
        risk: Option<String>,
    ) -> Self {
        Service {
            name: name.into(),
            study_type,
            risk,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemEntry {
    pub name: String,
    pub services: Vec<Service>,
}

/// Ordered mapping of system name -> services, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Systems {
    entries: Vec<SystemEntry>,
    index: HashMap<String, usize>,
}

impl Systems {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&[Service]> {
        self.index
            .get(name)
            .map(|&idx| self.entries[idx].services.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn service_count(&self) -> usize {
        self.entries.iter().map(|e| e.services.len()).sum()
    }

    /// Position of `name`, registering it with an empty list when unseen.
    pub(crate) fn register(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(SystemEntry {
            name: name.to_string(),
            services: Vec::new(),
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Append to the system at `system` and return the service's position in it.
    pub(crate) fn push_service(&mut self, system: usize, service: Service) -> usize {
        let services = &mut self.entries[system].services;
        services.push(service);
        services.len() - 1
    }

    pub(crate) fn service_mut(&mut self, system: usize, service: usize) -> Option<&mut Service> {
        self.entries.get_mut(system)?.services.get_mut(service)
    }
}

impl<'a> IntoIterator for &'a Systems {
    type Item = &'a SystemEntry;
    type IntoIter = std::slice::Iter<'a, SystemEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Systems {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.services)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_keeps_first_seen_order() {
        let mut systems = Systems::default();
        assert_eq!(systems.register("Сердце"), 0);
        assert_eq!(systems.register("Кожа"), 1);
        assert_eq!(systems.register("Сердце"), 0);
        let names: Vec<_> = systems.names().collect();
        assert_eq!(names, vec!["Сердце", "Кожа"]);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut systems = Systems::default();
        let zeta = systems.register("Я");
        systems.register("А");
        systems.push_service(zeta, Service::new("ЭКГ", None, None));

        let json = serde_json::to_string(&systems).unwrap();
        assert!(json.starts_with(r#"{"Я":[{"service":"ЭКГ""#), "got {}", json);
        assert!(json.ends_with(r#""А":[]}"#), "got {}", json);
    }

    #[test]
    fn service_mut_out_of_range() {
        let mut systems = Systems::default();
        let idx = systems.register("Кожа");
        assert!(systems.service_mut(idx, 0).is_none());
        assert!(systems.service_mut(7, 0).is_none());
    }
}
