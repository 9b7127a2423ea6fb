use clap::ValueEnum;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Label the workflow expects.
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Мужской",
            Sex::Female => "Женский",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgeBand {
    #[value(name = "0-4")]
    Infant,
    #[value(name = "5-11")]
    Child,
    #[value(name = "12-17")]
    Teen,
    #[value(name = "18-24")]
    YoungAdult,
    #[value(name = "25-39")]
    Adult,
    #[value(name = "40-49")]
    MidAdult,
    #[value(name = "50-64")]
    Senior,
    #[value(name = "65-74")]
    Elderly,
    #[value(name = "75+")]
    Aged,
}

impl AgeBand {
    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Infant => "0-4",
            AgeBand::Child => "5-11",
            AgeBand::Teen => "12-17",
            AgeBand::YoungAdult => "18-24",
            AgeBand::Adult => "25-39",
            AgeBand::MidAdult => "40-49",
            AgeBand::Senior => "50-64",
            AgeBand::Elderly => "65-74",
            AgeBand::Aged => "75+",
        }
    }
}

/// What the doctor enters about the patient.
#[derive(Debug, Clone)]
pub struct PatientInput {
    pub sex: Sex,
    pub age: AgeBand,
    /// Free-text risks / complaints.
    pub risk: String,
    /// Comma-separated МКБ-10 codes.
    pub mkb: String,
}

impl PatientInput {
    pub fn risk_inputs(&self) -> Value {
        json!({
            "sex": self.sex.label(),
            "age": self.age.label(),
            "risk": self.risk,
        })
    }

    /// Inputs for the guideline workflow; `None` when no codes were entered.
    pub fn guideline_inputs(&self) -> Option<Value> {
        let mkb = self.mkb.trim();
        if mkb.is_empty() {
            None
        } else {
            Some(json!({ "MKB": mkb }))
        }
    }
}
