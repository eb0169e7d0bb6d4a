#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use mairis_prime::collaborator::{
    CollaboratorError, Credentials, ModelRequest, ModelTransport, Operation, ResearchCollaborator,
};
use mairis_prime::db::Database;
use mairis_prime::models::RocketKnowledgeState;
use mairis_prime::orchestrator::{Orchestrator, OrchestratorConfig};
use mairis_prime::store::{KnowledgeStore, STORAGE_KEY};

#[derive(Clone)]
pub enum Reply {
    Text(String),
    Unauthorized,
    ServerError,
}

/// A [`ModelTransport`] answering each operation from a fixed script.
///
/// Every call is recorded. An optional gate holds topic discovery until
/// released, which keeps a cycle in flight for as long as a test needs.
/// Individual operations can also be slowed by a fixed latency.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<Operation, Reply>>,
    calls: Mutex<Vec<Operation>>,
    latency: HashMap<Operation, Duration>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    /// A script that completes a full cycle and raises thermal to 20.
    pub fn happy() -> Self {
        let transport = Self::default();
        transport.reply(Operation::DiscoverTopics, topics());
        transport.reply(Operation::SynthesizeLiterature, "Plasma confinement trends.");
        transport.reply(Operation::GenerateHypotheses, hypotheses());
        transport.reply(Operation::GenerateSimulationTelemetry, telemetry());
        transport.reply(Operation::GenerateVisual, "data:image/png;base64,AAAA");
        transport.reply(Operation::RunCodeLab, code_lab());
        transport.reply(Operation::VerifyHypothesis, verification(0.8));
        transport.reply(Operation::PublishJournal, journal(false));
        transport.reply(Operation::UpdateKnowledgeState, update_raising("thermal", 20));
        transport.reply(Operation::RunMetaAnalysis, bot_report());
        transport
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn slowed(mut self, operation: Operation, latency: Duration) -> Self {
        self.latency.insert(operation, latency);
        self
    }

    pub fn reply(&self, operation: Operation, body: impl Into<String>) {
        self.set(operation, Reply::Text(body.into()));
    }

    pub fn set(&self, operation: Operation, reply: Reply) {
        self.replies.lock().unwrap().insert(operation, reply);
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.calls().into_iter().filter(|op| *op == operation).count()
    }
}

#[async_trait]
impl ModelTransport for ScriptedTransport {
    async fn generate(&self, request: &ModelRequest) -> Result<String, CollaboratorError> {
        self.calls.lock().unwrap().push(request.operation);

        if let Some(latency) = self.latency.get(&request.operation) {
            tokio::time::sleep(*latency).await;
        }

        if request.operation == Operation::DiscoverTopics {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }

        let reply = self.replies.lock().unwrap().get(&request.operation).cloned();
        match reply {
            Some(Reply::Text(body)) => Ok(body),
            Some(Reply::Unauthorized) => Err(CollaboratorError::Unauthorized(
                "Requested entity was not found.".to_string(),
            )),
            Some(Reply::ServerError) | None => Err(CollaboratorError::Api {
                status: 500,
                body: "internal".to_string(),
            }),
        }
    }
}

pub struct Lab {
    pub orchestrator: Orchestrator,
    pub transport: Arc<ScriptedTransport>,
    pub store: KnowledgeStore,
    pub db: Database,
    pub credentials: Credentials,
}

impl Lab {
    /// The raw stored state document, if any.
    pub fn persisted(&self) -> Option<String> {
        self.db.get_document(STORAGE_KEY).unwrap()
    }
}

pub fn lab(transport: ScriptedTransport) -> Lab {
    lab_with(transport, Duration::from_secs(60))
}

pub fn lab_with(transport: ScriptedTransport, autonomous_delay: Duration) -> Lab {
    let db = Database::open_memory().unwrap();
    db.migrate().unwrap();
    let store = KnowledgeStore::new(db.clone());
    let transport = Arc::new(transport);
    let credentials = Credentials::new(Some("test-key".to_string()));
    let orchestrator = Orchestrator::new(
        ResearchCollaborator::new(transport.clone()),
        store.clone(),
        credentials.clone(),
        OrchestratorConfig { autonomous_delay },
    );
    Lab {
        orchestrator,
        transport,
        store,
        db,
        credentials,
    }
}

/// Poll until `f` holds, panicking after two seconds.
pub async fn wait_for(mut f: impl FnMut() -> bool) {
    for _ in 0..200 {
        if f() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

// ============================================================
// Model response fixtures
// ============================================================

pub fn topics() -> String {
    json!([{
        "title": "Regenerative cooling channels",
        "description": "Channel geometry for the ablative shield replacement.",
        "noveltyScore": 0.7,
        "gapIdentified": "No active cooling",
        "optimizationPotential": 0.6,
        "feasibilityRisk": "Medium"
    }])
    .to_string()
}

pub fn hypotheses() -> String {
    json!([{
        "title": "Regenerative cooling loop",
        "statement": "Routing fuel through wall channels cuts peak wall temperature by 30%.",
        "supportingEvidence": "Heat flux models",
        "methodology": "Conjugate heat transfer",
        "expectedContribution": "Thermal margin",
        "verificationAnalysis": { "confidence": 0.6, "dataAdequacy": "moderate" },
        "isOptimizationFocus": true
    }])
    .to_string()
}

pub fn telemetry() -> String {
    json!({
        "plasmaPressure": 1.2e5,
        "fuelFlowRate": 42.0,
        "neutronFlux": 3.1e12,
        "containmentStability": 0.91,
        "thermalGradient": 120.5,
        "mhdConvergence": true
    })
    .to_string()
}

pub fn code_lab() -> String {
    json!([{
        "filename": "cooling.py",
        "language": "python",
        "code": "import numpy as np\nprint('ok')\n",
        "testResults": "converged",
        "status": "PASSED"
    }])
    .to_string()
}

fn reviewer(name: &str) -> Value {
    json!({
        "agentName": name,
        "role": "Reviewer",
        "verdict": "VALIDATED",
        "rationale": "Sound.",
        "feasibilityRating": 7.5
    })
}

pub fn verification(confidence: f64) -> String {
    json!({
        "physicsReview": reviewer("Physicist"),
        "materialReview": reviewer("Materials Scientist"),
        "engineeringReview": reviewer("Engineer"),
        "manufacturingReview": reviewer("Manufacturing Lead"),
        "overallConfidence": confidence,
        "practicalityScore": 72,
        "readinessLevel": 4
    })
    .to_string()
}

pub fn journal(breakthrough: bool) -> String {
    json!({
        "journalName": "Journal of Advanced Propulsion",
        "literatureReview": "Prior work on ablative shields.",
        "methodology": "Conjugate heat transfer simulation.",
        "formalProof": "q = h (T_w - T_c)",
        "resultsPreview": "Wall temperature down 28%.",
        "conclusion": "Regenerative cooling is viable.",
        "evidenceData": [{ "label": "Wall temp", "value": -28.0, "trend": "falling" }],
        "chartData": { "label": "Temp", "points": [{ "x": 1, "y": 900.0 }, { "x": "B", "y": 650.0 }], "color": "#3b82f6" },
        "isBreakthrough": breakthrough
    })
    .to_string()
}

/// A knowledge update equal to genesis except `key` set to `status`.
pub fn update_raising(key: &str, status: u8) -> String {
    let mut subsystems = serde_json::to_value(RocketKnowledgeState::genesis().subsystems).unwrap();
    subsystems[key]["status"] = json!(status);
    subsystems[key]["lastUpdate"] = json!("Cycle 1");
    json!({
        "subsystems": subsystems,
        "masterDesignDoc": "Regenerative cooling adopted.",
        "breakthroughs": []
    })
    .to_string()
}

pub fn bot_report() -> String {
    json!({
        "timestamp": "2026-01-01T00:00:00Z",
        "systemHealth": 88,
        "agentEfficiency": 74,
        "observations": [{
            "category": "Latency",
            "severity": "low",
            "finding": "Verification is slow.",
            "suggestedAction": "Cache reviews."
        }],
        "performanceMetrics": [{ "label": "Cycle time", "value": 41.0 }],
        "summary": "Nominal."
    })
    .to_string()
}
