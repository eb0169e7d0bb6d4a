//! MCP server for driving the research lab from an AI assistant.

mod types;

pub use types::*;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;

use crate::export::render_report;
use crate::models::*;
use crate::orchestrator::{CycleError, CycleOutcome, Orchestrator};

#[derive(Clone)]
pub struct McpServer {
    lab: Orchestrator,
    tool_router: ToolRouter<Self>,
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

impl McpServer {
    pub fn new(lab: Orchestrator) -> Self {
        Self {
            lab,
            tool_router: Self::tool_router(),
        }
    }

    fn parse_subsystem(s: &str) -> Result<SubsystemKey, McpError> {
        SubsystemKey::from_str(s).ok_or_else(|| {
            McpError::invalid_params(
                format!(
                    "Unknown subsystem '{}'. Valid: propulsion, thermal, structural, avionics, fuel",
                    s
                ),
                None,
            )
        })
    }

    // ============================================================
    // Test helpers - expose tool logic for testing
    // ============================================================

    pub fn test_get_lab_status(&self) -> LabStatusResponse {
        let status = self.lab.status();
        let knowledge = self.lab.knowledge();
        LabStatusResponse {
            stage: status.stage.as_str().to_string(),
            busy: status.busy,
            autonomous: status.autonomous,
            credentials_required: status.credentials_required,
            priority_override: status.priority_override.map(|k| k.as_str().to_string()),
            priority_target: status.priority_target.as_str().to_string(),
            cycle_count: status.cycle_count,
            subsystems: knowledge
                .subsystems
                .iter()
                .map(|(key, s)| SubsystemInfo {
                    key: key.as_str().to_string(),
                    name: s.name.clone(),
                    status: s.status,
                    specifications: s.specifications.clone(),
                })
                .collect(),
        }
    }

    pub fn test_set_priority_subsystem(
        &self,
        subsystem: Option<&str>,
    ) -> Result<LabStatusResponse, McpError> {
        let key = subsystem.map(Self::parse_subsystem).transpose()?;
        self.lab.set_priority(key);
        Ok(self.test_get_lab_status())
    }

    pub fn test_list_reports(&self) -> ReportListResponse {
        ReportListResponse {
            reports: self
                .lab
                .report_summaries()
                .into_iter()
                .map(|r| ReportInfo {
                    id: r.id,
                    title: r.title,
                    timestamp: r.timestamp.to_rfc3339(),
                    is_breakthrough: r.is_breakthrough,
                    overall_confidence: r.overall_confidence,
                })
                .collect(),
        }
    }

    pub fn test_export_report(&self, report_id: &str) -> Result<String, McpError> {
        self.lab
            .report(report_id)
            .map(|r| render_report(&r))
            .ok_or_else(|| McpError::invalid_params("Report not found", None))
    }

    pub async fn test_run_cycle(&self) -> CycleOutcome {
        self.lab.run_cycle().await
    }
}

#[tool_router]
impl McpServer {
    #[tool(
        description = "Get the lab's current state: pipeline stage, whether a cycle is running, autonomous mode, whether an API credential is needed, the pinned and effective priority subsystem, cycle count, and readiness (0-100) of each engine subsystem."
    )]
    async fn get_lab_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.test_get_lab_status())
    }

    #[tool(
        description = "Get the full knowledge state: subsystems with specifications and optimization history, the master design document, counters, breakthroughs and past reports (most recent first)."
    )]
    async fn get_knowledge_state(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.lab.knowledge())
    }

    #[tool(
        description = "Run one full research cycle and wait for it to finish. Targets the pinned subsystem, or the weakest one. Returns the outcome: completed (with report id), busy (another cycle is running), credentialsRequired, or aborted (with the failing stage and reason). Side effect: on success the knowledge state is updated and persisted."
    )]
    async fn run_cycle(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.test_run_cycle().await)
    }

    #[tool(
        description = "Pin the subsystem future cycles focus on, or clear the pin. The pin persists across cycles until changed."
    )]
    async fn set_priority_subsystem(
        &self,
        params: Parameters<SetPrioritySubsystemRequest>,
    ) -> Result<CallToolResult, McpError> {
        let status = self.test_set_priority_subsystem(params.0.subsystem.as_deref())?;
        json_result(&status)
    }

    #[tool(
        description = "Turn autonomous mode on or off. When on, a new cycle starts a few seconds after each successful one; any failure turns it off."
    )]
    async fn set_autonomous(
        &self,
        params: Parameters<SetAutonomousRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.lab.set_autonomous(params.0.enabled);
        json_result(&self.test_get_lab_status())
    }

    #[tool(description = "List past research reports, most recent first.")]
    async fn list_reports(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.test_list_reports())
    }

    #[tool(
        description = "Render a past report as plain text: hypothesis, formal proof, methodology, conclusion, verification scores and simulation code."
    )]
    async fn export_report(
        &self,
        params: Parameters<ExportReportRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.test_export_report(&params.0.report_id)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Run the observatory meta-analysis: an audit of system health and agent efficiency over the recent activity log. Fails if a cycle is running."
    )]
    async fn run_meta_analysis(&self) -> Result<CallToolResult, McpError> {
        match self.lab.run_meta_analysis().await {
            Ok(report) => json_result(&report),
            Err(e @ (CycleError::Busy | CycleError::CredentialsRequired)) => {
                Err(McpError::invalid_request(e.to_string(), None))
            }
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "mairis-prime".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"MAIRIS PRIME is an autonomous research lab iterating on a rocket engine design.

Five subsystems (propulsion, thermal, structural, avionics, fuel) each carry a
readiness score from 0 to 100. A research cycle picks a target subsystem,
discovers topics, synthesizes literature, forms a hypothesis, simulates and
verifies it, publishes a report and folds the result back into the design.

WORKFLOW:
1. get_lab_status to see readiness and what the next cycle will target
2. Optionally set_priority_subsystem to focus on one subsystem
3. run_cycle to run one cycle, or set_autonomous to keep cycling
4. list_reports and export_report to read the results

Only one cycle runs at a time. If credentialsRequired is true, a model API key
must be provided to the server before cycles can run."#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(lab: Orchestrator) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(lab);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
