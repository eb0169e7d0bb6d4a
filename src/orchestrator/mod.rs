//! The cycle orchestrator.
//!
//! Drives one research cycle at a time through the fixed stage sequence in
//! [`ResearchStage::CYCLE`], feeding each collaborator result into the next
//! call and folding the published report into the knowledge state at the
//! end. All shared lab state (knowledge, stage, flags, log) lives in the
//! [`Orchestrator`] context; clones share it.
//!
//! Failure handling follows one rule set:
//! - malformed output from topic discovery, hypothesis generation, telemetry
//!   and the code lab degrades to an empty/default value and the cycle goes on;
//! - malformed output from verification and publication aborts the cycle;
//! - any transport error aborts the cycle and switches autonomous mode off,
//!   and an authentication failure additionally closes the credential gate.
//!
//! An aborted cycle leaves the knowledge state untouched.

mod integration;
mod logbook;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use integration::integrate;
pub use logbook::LogBook;

use crate::collaborator::{
    self, CollaboratorError, Credentials, Parsed, ResearchCollaborator, VisualMode,
};
use crate::models::*;
use crate::store::{self, ImportError, KnowledgeStore};

/// Number of log entries handed to the meta-analysis.
const META_ANALYSIS_LOG_WINDOW: usize = 20;

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Pause between a completed cycle and the next autonomous one.
    pub autonomous_delay: Duration,
}

impl OrchestratorConfig {
    /// Load from `MAIRIS_AUTONOMOUS_DELAY_SECS` (default 5).
    pub fn from_env() -> Self {
        let secs = std::env::var("MAIRIS_AUTONOMOUS_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5);
        Self {
            autonomous_delay: Duration::from_secs(secs),
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Why a cycle (or a meta-analysis) stopped.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("{operation} returned malformed output: {reason}")]
    Malformed {
        operation: &'static str,
        reason: String,
    },

    #[error("No hypothesis was generated; nothing to test")]
    NoHypothesis,

    #[error("Failed to persist knowledge state: {0}")]
    Persistence(anyhow::Error),

    #[error("A research cycle is already in progress")]
    Busy,

    #[error("A model API credential must be selected first")]
    CredentialsRequired,
}

impl CycleError {
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Collaborator(e) => e.is_auth_failure(),
            Self::CredentialsRequired => true,
            _ => false,
        }
    }
}

/// Errors from state-level operations (import, reset).
#[derive(Debug, Error)]
pub enum StateError {
    #[error("A research cycle is in progress")]
    Busy,

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Failed to persist knowledge state: {0}")]
    Persistence(anyhow::Error),
}

/// How a call to [`Orchestrator::run_cycle`] ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CycleOutcome {
    #[serde(rename_all = "camelCase")]
    Completed {
        report_id: String,
        is_breakthrough: bool,
    },
    /// Another cycle was in flight; nothing was done.
    Busy,
    /// The credential gate is closed; nothing was done.
    CredentialsRequired,
    Aborted {
        stage: ResearchStage,
        reason: String,
    },
}

/// Result of asking for a cycle to start in the background.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CycleStart {
    Started,
    Busy,
    CredentialsRequired,
}

/// Intermediate products of the latest cycle, for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSnapshot {
    pub target: Option<SubsystemKey>,
    pub topics: Vec<ResearchTopic>,
    pub synthesis: Option<String>,
    pub hypotheses: Vec<Hypothesis>,
    pub telemetry: Option<SimulationTelemetry>,
    pub code_results: Vec<CodeVerification>,
    pub report: Option<ResearchReport>,
    pub bot_report: Option<BotReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabStatus {
    pub stage: ResearchStage,
    pub busy: bool,
    pub autonomous: bool,
    pub credentials_required: bool,
    pub priority_override: Option<SubsystemKey>,
    pub priority_target: SubsystemKey,
    pub cycle_count: u32,
}

struct Inner {
    collaborator: ResearchCollaborator,
    store: KnowledgeStore,
    credentials: Credentials,
    logs: LogBook,
    config: OrchestratorConfig,
    knowledge: Mutex<RocketKnowledgeState>,
    stage: Mutex<ResearchStage>,
    pipeline: Mutex<PipelineSnapshot>,
    priority_override: Mutex<Option<SubsystemKey>>,
    busy: AtomicBool,
    autonomous: AtomicBool,
    /// Set while an autonomous cycle is waiting to start.
    next_queued: AtomicBool,
}

/// Holds the busy flag for the lifetime of one cycle.
///
/// Dropping it returns the stage to `Idle` and clears the flag, whichever
/// way the cycle ended.
struct BusyGuard {
    inner: Arc<Inner>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        *self.inner.stage.lock().expect("stage lock poisoned") = ResearchStage::Idle;
        self.inner.busy.store(false, Ordering::SeqCst);
    }
}

/// The lab's application context and cycle state machine.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    /// Build the context, loading the knowledge state from `store`.
    pub fn new(
        collaborator: ResearchCollaborator,
        store: KnowledgeStore,
        credentials: Credentials,
        config: OrchestratorConfig,
    ) -> Self {
        let knowledge = store.load();
        Self {
            inner: Arc::new(Inner {
                collaborator,
                store,
                credentials,
                logs: LogBook::new(),
                config,
                knowledge: Mutex::new(knowledge),
                stage: Mutex::new(ResearchStage::Idle),
                pipeline: Mutex::new(PipelineSnapshot::default()),
                priority_override: Mutex::new(None),
                busy: AtomicBool::new(false),
                autonomous: AtomicBool::new(false),
                next_queued: AtomicBool::new(false),
            }),
        }
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn stage(&self) -> ResearchStage {
        *self.inner.stage.lock().expect("stage lock poisoned")
    }

    pub fn is_busy(&self) -> bool {
        self.inner.busy.load(Ordering::SeqCst)
    }

    pub fn is_autonomous(&self) -> bool {
        self.inner.autonomous.load(Ordering::SeqCst)
    }

    pub fn knowledge(&self) -> RocketKnowledgeState {
        self.inner
            .knowledge
            .lock()
            .expect("knowledge lock poisoned")
            .clone()
    }

    pub fn logs(&self) -> Vec<AgentLog> {
        self.inner.logs.snapshot()
    }

    pub fn pipeline(&self) -> PipelineSnapshot {
        self.inner
            .pipeline
            .lock()
            .expect("pipeline lock poisoned")
            .clone()
    }

    pub fn priority_override(&self) -> Option<SubsystemKey> {
        *self
            .inner
            .priority_override
            .lock()
            .expect("priority lock poisoned")
    }

    /// The subsystem the next cycle would target.
    pub fn priority_target(&self) -> SubsystemKey {
        store::select_priority_target(&self.knowledge(), self.priority_override())
    }

    pub fn credentials_required(&self) -> bool {
        self.inner.credentials.is_required()
    }

    pub fn status(&self) -> LabStatus {
        let knowledge = self.knowledge();
        let priority_override = self.priority_override();
        LabStatus {
            stage: self.stage(),
            busy: self.is_busy(),
            autonomous: self.is_autonomous(),
            credentials_required: self.credentials_required(),
            priority_override,
            priority_target: store::select_priority_target(&knowledge, priority_override),
            cycle_count: knowledge.cycle_count,
        }
    }

    pub fn report(&self, id: &str) -> Option<ResearchReport> {
        self.inner
            .knowledge
            .lock()
            .expect("knowledge lock poisoned")
            .find_report(id)
            .cloned()
    }

    pub fn report_summaries(&self) -> Vec<ReportSummary> {
        self.inner
            .knowledge
            .lock()
            .expect("knowledge lock poisoned")
            .past_reports
            .iter()
            .map(ReportSummary::from)
            .collect()
    }

    // ============================================================
    // Controls
    // ============================================================

    /// Pin (or with `None`, unpin) the subsystem future cycles target.
    ///
    /// The pin stays in place across cycles until changed.
    pub fn set_priority(&self, key: Option<SubsystemKey>) {
        *self
            .inner
            .priority_override
            .lock()
            .expect("priority lock poisoned") = key;
        match key {
            Some(key) => self.log(
                "Orchestrator",
                format!("Priority pinned to {}.", key.as_str().to_uppercase()),
                LogKind::Info,
            ),
            None => self.log(
                "Orchestrator",
                "Priority override cleared; targeting weakest subsystem.",
                LogKind::Info,
            ),
        }
    }

    /// Switch autonomous mode. Enabling it while idle starts a cycle; while
    /// busy, a cycle is queued for once the lab frees up.
    ///
    /// Disabling only prevents the next scheduled cycle; a cycle already in
    /// flight runs to its end.
    pub fn set_autonomous(&self, enabled: bool) -> Option<CycleStart> {
        self.inner.autonomous.store(enabled, Ordering::SeqCst);
        if !enabled {
            self.log("Orchestrator", "Autonomous mode disengaged.", LogKind::Info);
            return None;
        }
        self.log("Orchestrator", "Autonomous mode engaged.", LogKind::Info);
        let start = self.start_cycle();
        if start == CycleStart::Busy {
            self.schedule_next();
        }
        Some(start)
    }

    /// Install a credential without waiting for the API to confirm it.
    pub fn select_credential(&self, key: impl Into<String>) {
        self.inner.credentials.select(key);
        self.log("System", "Key linked. Resuming engine access.", LogKind::Success);
    }

    /// Re-evaluate the credential gate against the held key. Returns `true`
    /// when a credential is still required.
    pub fn check_credentials(&self) -> bool {
        let required = self.inner.credentials.check();
        if required {
            self.log(
                "System",
                "No API key linked. Select one to resume research.",
                LogKind::Warning,
            );
        }
        required
    }

    /// Replace the knowledge state with an imported document.
    pub fn import_state(&self, document: &str) -> Result<RocketKnowledgeState, StateError> {
        let Some(_guard) = self.try_acquire() else {
            self.log("System", "Import refused: a cycle is in progress.", LogKind::Error);
            return Err(StateError::Busy);
        };

        match self.inner.store.import(document) {
            Ok(state) => {
                *self.inner.knowledge.lock().expect("knowledge lock poisoned") = state.clone();
                self.log("System", "Blueprint state imported.", LogKind::Success);
                Ok(state)
            }
            Err(e) => {
                self.log("System", e.to_string(), LogKind::Error);
                Err(e.into())
            }
        }
    }

    /// Purge all research history and return to genesis.
    pub fn reset(&self) -> Result<RocketKnowledgeState, StateError> {
        let Some(_guard) = self.try_acquire() else {
            self.log("System", "Reset refused: a cycle is in progress.", LogKind::Error);
            return Err(StateError::Busy);
        };

        let genesis = self.inner.store.reset().map_err(StateError::Persistence)?;
        *self.inner.knowledge.lock().expect("knowledge lock poisoned") = genesis.clone();
        *self.inner.pipeline.lock().expect("pipeline lock poisoned") = PipelineSnapshot::default();
        self.inner.autonomous.store(false, Ordering::SeqCst);
        self.log(
            "System",
            "CORE DATA PURGE: SYSTEM RESET TO GENESIS.",
            LogKind::Warning,
        );
        Ok(genesis)
    }

    /// Pretty JSON of the full knowledge state.
    pub fn export_state(&self) -> anyhow::Result<String> {
        let json = store::export(&self.knowledge())?;
        self.log("System", "Global state trace exported.", LogKind::Success);
        Ok(json)
    }

    // ============================================================
    // Cycle
    // ============================================================

    /// Run one full cycle and wait for it.
    ///
    /// A no-op returning `Busy` if another cycle is in flight, or
    /// `CredentialsRequired` while the credential gate is closed. Never
    /// returns an error: failures are logged and reported as `Aborted`.
    pub async fn run_cycle(&self) -> CycleOutcome {
        if self.gate_closed() {
            return CycleOutcome::CredentialsRequired;
        }
        let Some(guard) = self.try_acquire() else {
            tracing::debug!("Cycle already in flight; run request ignored");
            return CycleOutcome::Busy;
        };
        self.drive_cycle(guard).await
    }

    /// Start a cycle on a background task.
    pub fn start_cycle(&self) -> CycleStart {
        if self.gate_closed() {
            return CycleStart::CredentialsRequired;
        }
        let Some(guard) = self.try_acquire() else {
            return CycleStart::Busy;
        };
        let this = self.clone();
        tokio::spawn(async move {
            this.drive_cycle(guard).await;
        });
        CycleStart::Started
    }

    fn gate_closed(&self) -> bool {
        let closed = self.inner.credentials.is_required();
        if closed {
            self.log(
                "System",
                "Cycle blocked: select an API key first.",
                LogKind::Warning,
            );
        }
        closed
    }

    fn try_acquire(&self) -> Option<BusyGuard> {
        self.inner
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        Some(BusyGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    async fn drive_cycle(&self, guard: BusyGuard) -> CycleOutcome {
        let result = self.execute_cycle().await;
        let stage = self.stage();
        drop(guard);

        match result {
            Ok(report) => {
                if self.is_autonomous() {
                    self.schedule_next();
                }
                CycleOutcome::Completed {
                    report_id: report.id,
                    is_breakthrough: report.is_breakthrough,
                }
            }
            Err(e) => {
                self.report_failure(&e);
                self.inner.autonomous.store(false, Ordering::SeqCst);
                CycleOutcome::Aborted {
                    stage,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Queue the next autonomous cycle after the configured delay.
    ///
    /// The flag is read again when the delay elapses, so turning autonomous
    /// mode off in between cancels the queued cycle. If the lab is busy at
    /// that moment (a meta-analysis, say) the wait is re-armed. At most one
    /// cycle is queued at a time.
    fn schedule_next(&self) {
        if self.inner.next_queued.swap(true, Ordering::SeqCst) {
            return;
        }
        let this = self.clone();
        let delay = self.inner.config.autonomous_delay;
        tracing::debug!("Next autonomous cycle in {:?}", delay);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(delay).await;
                if !this.is_autonomous() || this.gate_closed() {
                    this.inner.next_queued.store(false, Ordering::SeqCst);
                    return;
                }
                let Some(guard) = this.try_acquire() else {
                    tracing::debug!("Lab busy; next autonomous cycle in {:?}", delay);
                    continue;
                };
                this.inner.next_queued.store(false, Ordering::SeqCst);
                this.drive_cycle(guard).await;
                return;
            }
        });
    }

    fn report_failure(&self, error: &CycleError) {
        if error.is_auth_failure() {
            self.inner.credentials.mark_required();
            self.log(
                "System",
                "API key invalid. Re-selection required.",
                LogKind::Error,
            );
        } else {
            self.log(
                "Orchestrator",
                format!("Fault Detected: {}", error),
                LogKind::Error,
            );
        }
    }

    async fn execute_cycle(&self) -> Result<ResearchReport, CycleError> {
        let collaborator = &self.inner.collaborator;
        let knowledge = self.knowledge();
        let target = store::select_priority_target(&knowledge, self.priority_override());

        self.update_pipeline(|p| {
            *p = PipelineSnapshot {
                target: Some(target),
                bot_report: p.bot_report.take(),
                ..Default::default()
            }
        });
        self.log(
            "Orchestrator",
            format!(
                "Recursion initiated: mapping delta for {}.",
                target.as_str().to_uppercase()
            ),
            LogKind::Info,
        );

        self.advance_to(ResearchStage::TopicDiscovery);
        let topics = self.degrade(
            "Discovery Engine",
            collaborator.discover_topics(&knowledge, target).await?,
        );
        self.log(
            "Discovery Engine",
            format!("Found {} potential innovation gaps.", topics.len()),
            LogKind::Success,
        );
        self.update_pipeline(|p| p.topics = topics.clone());

        self.advance_to(ResearchStage::LiteratureSynthesis);
        let papers = collaborator::papers();
        let synthesis = collaborator.synthesize_literature(&papers).await?;
        self.log(
            "Synthesis Agent",
            "Cross-correlation of findings complete.",
            LogKind::Success,
        );
        self.update_pipeline(|p| p.synthesis = Some(synthesis.clone()));

        self.advance_to(ResearchStage::HypothesisGeneration);
        let hypotheses = self.degrade(
            "Hypothesis Generator",
            collaborator
                .generate_hypotheses(&synthesis, &knowledge, topics.first())
                .await?,
        );
        self.log(
            "Hypothesis Generator",
            format!("Formulated {} testable conjectures.", hypotheses.len()),
            LogKind::Success,
        );
        self.update_pipeline(|p| p.hypotheses = hypotheses.clone());
        let hypothesis = hypotheses
            .into_iter()
            .next()
            .ok_or(CycleError::NoHypothesis)?;

        self.advance_to(ResearchStage::MhdSimulation);
        let telemetry = self.degrade(
            "MHD Simulator",
            collaborator.generate_simulation_telemetry(&hypothesis).await?,
        );
        self.log(
            "MHD Simulator",
            format!(
                "Containment stability {:.2}, MHD convergence {}.",
                telemetry.containment_stability,
                if telemetry.mhd_convergence { "achieved" } else { "not reached" }
            ),
            LogKind::Sim,
        );
        self.update_pipeline(|p| p.telemetry = Some(telemetry.clone()));

        self.advance_to(ResearchStage::FuelDynamicsCfd);
        let visual = collaborator
            .generate_visual(&hypothesis.statement, VisualMode::Fuel)
            .await?;
        self.log(
            "CFD Renderer",
            if visual.is_some() {
                "Fuel injection streamlines rendered."
            } else {
                "No fuel dynamics render produced."
            },
            LogKind::Vis,
        );

        self.advance_to(ResearchStage::CodeVerification);
        let code_results = self.degrade(
            "Code Lab",
            collaborator.run_code_lab(&hypothesis).await?,
        );
        self.log(
            "Code Lab",
            format!(
                "First-principles simulations complete ({} scripts).",
                code_results.len()
            ),
            LogKind::Success,
        );
        self.update_pipeline(|p| p.code_results = code_results.clone());

        self.advance_to(ResearchStage::ScientificVerification);
        let mut verification = require(
            "verifyHypothesis",
            collaborator
                .verify_hypothesis(&hypothesis, &code_results)
                .await?,
        )?;
        verification.code_lab_results = code_results;
        self.log(
            "Verification Suite",
            format!(
                "Peer-level audit reached a verdict: confidence {:.0}%, TRL {}.",
                verification.overall_confidence * 100.0,
                verification.readiness_level
            ),
            LogKind::Success,
        );

        self.advance_to(ResearchStage::JournalPublication);
        let draft = require(
            "publishJournal",
            collaborator.publish_journal(&hypothesis, &verification).await?,
        )?;
        let report = build_report(hypothesis, verification, draft, &telemetry, visual);
        self.log(
            "Journal Editor",
            "Formal scientific report published.",
            LogKind::Success,
        );
        self.update_pipeline(|p| p.report = Some(report.clone()));

        self.advance_to(ResearchStage::KnowledgeIntegration);
        let update = match collaborator.update_knowledge_state(&knowledge, &report).await? {
            Parsed::Valid(update) => Some(update),
            Parsed::Malformed { reason } => {
                self.log(
                    "Learning Engine",
                    format!("Blueprint update unreadable ({}); subsystems unchanged.", reason),
                    LogKind::Warning,
                );
                None
            }
        };
        let next = integrate(
            &knowledge,
            update,
            &report,
            Some(telemetry),
            papers.len() as u32,
        );
        self.inner
            .store
            .save(&next)
            .map_err(CycleError::Persistence)?;
        *self.inner.knowledge.lock().expect("knowledge lock poisoned") = next;
        self.log(
            "Learning Engine",
            "Master Rocket Blueprint updated.",
            LogKind::Success,
        );

        self.advance_to(ResearchStage::Completed);
        self.log(
            "Orchestrator",
            "Cycle Complete: Integration successful.",
            LogKind::Success,
        );
        Ok(report)
    }

    // ============================================================
    // Meta-analysis
    // ============================================================

    /// Audit the lab itself. Runs outside the cycle, under the same busy flag.
    ///
    /// A malformed audit is a hard failure.
    pub async fn run_meta_analysis(&self) -> Result<BotReport, CycleError> {
        if self.inner.credentials.is_required() {
            return Err(CycleError::CredentialsRequired);
        }
        let Some(guard) = self.try_acquire() else {
            return Err(CycleError::Busy);
        };

        self.enter(ResearchStage::BotAnalysis);
        self.log("Observatory", "Meta-analysis initiated.", LogKind::Info);
        let knowledge = self.knowledge();
        let recent = self.inner.logs.recent(META_ANALYSIS_LOG_WINDOW);
        let result = match self
            .inner
            .collaborator
            .run_meta_analysis(&knowledge, &recent)
            .await
        {
            Ok(parsed) => require("runMetaAnalysis", parsed),
            Err(e) => Err(e.into()),
        };
        drop(guard);

        match result {
            Ok(report) => {
                self.log(
                    "Observatory",
                    format!("Audit complete: system health {:.0}%.", report.system_health),
                    LogKind::Success,
                );
                self.update_pipeline(|p| p.bot_report = Some(report.clone()));
                Ok(report)
            }
            Err(e) => {
                self.report_failure(&e);
                Err(e)
            }
        }
    }

    // ============================================================
    // Helpers
    // ============================================================

    fn enter(&self, stage: ResearchStage) {
        tracing::debug!(stage = stage.as_str(), "Entering stage");
        *self.inner.stage.lock().expect("stage lock poisoned") = stage;
    }

    /// Step the cycle forward. Stages are never skipped.
    fn advance_to(&self, stage: ResearchStage) {
        let mut current = self.inner.stage.lock().expect("stage lock poisoned");
        debug_assert_eq!(
            current.next(),
            Some(stage),
            "illegal stage transition from {}",
            *current
        );
        tracing::debug!(stage = stage.as_str(), "Entering stage");
        *current = stage;
    }

    fn log(&self, agent: &str, message: impl Into<String>, kind: LogKind) {
        self.inner.logs.push(agent, message, kind);
    }

    fn update_pipeline(&self, f: impl FnOnce(&mut PipelineSnapshot)) {
        f(&mut self.inner.pipeline.lock().expect("pipeline lock poisoned"));
    }

    /// Soft handling: a malformed response becomes the default value.
    fn degrade<T: Default>(&self, agent: &str, parsed: Parsed<T>) -> T {
        match parsed {
            Parsed::Valid(value) => value,
            Parsed::Malformed { reason } => {
                self.log(
                    agent,
                    format!("Response unreadable ({}); continuing with no data.", reason),
                    LogKind::Warning,
                );
                T::default()
            }
        }
    }
}

/// Hard handling: a malformed response stops the cycle.
fn require<T>(operation: &'static str, parsed: Parsed<T>) -> Result<T, CycleError> {
    match parsed {
        Parsed::Valid(value) => Ok(value),
        Parsed::Malformed { reason } => Err(CycleError::Malformed { operation, reason }),
    }
}

fn build_report(
    hypothesis: Hypothesis,
    verification: VerificationSuiteResults,
    draft: JournalDraft,
    telemetry: &SimulationTelemetry,
    visual_url: Option<String>,
) -> ResearchReport {
    let simulation_summary = draft.simulation_summary.or_else(|| {
        Some(SimulationSummary {
            plasma_stability: telemetry.containment_stability,
            fuel_throughput: telemetry.fuel_flow_rate,
            thermal_gradient: format!("{:.1} K/m", telemetry.thermal_gradient),
            mhd_convergence: telemetry.mhd_convergence,
        })
    });

    ResearchReport {
        id: format!("rep-{}", Uuid::new_v4().simple()),
        title: hypothesis.title.clone(),
        timestamp: Utc::now(),
        journal_name: draft.journal_name,
        hypothesis,
        verification_suite: Some(verification),
        literature_review: draft.literature_review,
        methodology: draft.methodology,
        formal_proof: draft.formal_proof,
        results_preview: draft.results_preview,
        conclusion: draft.conclusion,
        evidence_data: draft.evidence_data,
        chart_data: draft.chart_data,
        simulation_summary,
        is_breakthrough: draft.is_breakthrough,
        visual_url,
    }
}
