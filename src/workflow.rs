use tracing::info;

use crate::client::{output_text, Outputs, WorkflowClient};
use crate::error::ClientError;
use crate::guidelines::GuidelinePayload;
use crate::model::Systems;
use crate::parser::parse;
use crate::patient::PatientInput;
use crate::settings::Settings;

const GENERAL_KEY: &str = "result1";
const RISKS_KEY: &str = "result2";
const GUIDELINES_KEY: &str = "result";

/// Everything the report needs for one patient.
#[derive(Debug, Clone, Default)]
pub struct Recommendations {
    /// Present only when МКБ-10 codes were entered and the workflow returned a payload.
    pub guidelines: Option<GuidelinePayload>,
    pub risks: Systems,
    pub general: Systems,
}

impl Recommendations {
    /// Each text output goes through its own parse.
    pub fn from_outputs(
        risk_outputs: &Outputs,
        guideline_outputs: Option<&Outputs>,
    ) -> Result<Self, ClientError> {
        let guidelines = match guideline_outputs {
            Some(outputs) => GuidelinePayload::from_json(output_text(outputs, GUIDELINES_KEY))?,
            None => None,
        };
        Ok(Recommendations {
            guidelines,
            risks: parse(output_text(risk_outputs, RISKS_KEY)),
            general: parse(output_text(risk_outputs, GENERAL_KEY)),
        })
    }
}

/// Call the risk workflow and, when codes are given, the guideline workflow concurrently.
pub async fn fetch(
    client: &WorkflowClient,
    settings: &Settings,
    patient: &PatientInput,
) -> Result<Recommendations, ClientError> {
    let risk_key = settings
        .risk_app_key
        .as_deref()
        .ok_or(ClientError::MissingKey { app: "risk" })?;

    let guideline_call = fetch_guidelines(client, settings, patient);
    let risk_call = client.run(risk_key, patient.risk_inputs());

    let (guideline_outputs, risk_outputs) = tokio::try_join!(guideline_call, risk_call)?;
    let recs = Recommendations::from_outputs(&risk_outputs, guideline_outputs.as_ref())?;
    info!(
        risk_systems = recs.risks.len(),
        general_systems = recs.general.len(),
        diagnoses = recs.guidelines.as_ref().map_or(0, |g| g.diagnoses.len()),
        "Recommendations ready"
    );
    Ok(recs)
}

async fn fetch_guidelines(
    client: &WorkflowClient,
    settings: &Settings,
    patient: &PatientInput,
) -> Result<Option<Outputs>, ClientError> {
    let Some(inputs) = patient.guideline_inputs() else {
        return Ok(None);
    };
    let key = settings
        .kr_app_key
        .as_deref()
        .ok_or(ClientError::MissingKey {
            app: "clinical guideline",
        })?;
    client.run(key, inputs).await.map(Some)
}
