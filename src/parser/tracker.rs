use tracing::trace;

use super::labels::Line;
use crate::model::{Service, Systems};

/// Running scope while scanning recommendation text.
///
/// Study type and risk category are deliberately left alone on a new system
/// header: they keep applying until a header of the same kind replaces them.
#[derive(Debug, Default)]
pub struct Tracker {
    systems: Systems,
    current_system: Option<usize>,
    current_study: Option<String>,
    current_risk: Option<String>,
    /// (system position, service position) of the open service.
    current_service: Option<(usize, usize)>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, line: Line<'_>) {
        match line {
            Line::System(name) => {
                self.current_system = Some(self.systems.register(name));
                self.current_service = None;
            }
            Line::StudyType(study) => self.current_study = Some(study.to_string()),
            Line::Risk(risk) => self.current_risk = Some(risk.to_string()),
            Line::Service(name) => self.open_service(name),
            Line::Goal(goal) => {
                if let Some(service) = self.open() {
                    service.goal = goal.to_string();
                }
            }
            Line::Frequency(freq) => {
                if let Some(service) = self.open() {
                    service.freq_per_year = Some(freq);
                }
            }
            Line::NmuCode(code) => {
                if let Some(service) = self.open() {
                    service.nmu_code = Some(code.to_string());
                }
            }
            Line::NmuName(name) => {
                if let Some(service) = self.open() {
                    service.nmu_name = Some(name.to_string());
                }
            }
        }
    }

    /// Consume the tracker, dropping scan state and keeping the mapping.
    pub fn finish(self) -> Systems {
        self.systems
    }

    fn open_service(&mut self, name: &str) {
        let Some(system) = self.current_system else {
            trace!(service = name, "service before any system header, dropped");
            return;
        };
        let service = Service::new(name, self.current_study.clone(), self.current_risk.clone());
        let idx = self.systems.push_service(system, service);
        self.current_service = Some((system, idx));
    }

    fn open(&mut self) -> Option<&mut Service> {
        let (system, service) = self.current_service?;
        self.systems.service_mut(system, service)
    }
}
