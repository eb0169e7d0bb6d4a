use serde::{Deserialize, Serialize};

/// Where the lab currently is in its research cycle.
///
/// A cycle walks [`ResearchStage::CYCLE`] in order, one stage per
/// collaborator call, then passes through `Completed` back to `Idle`.
/// `BotAnalysis` sits outside the cycle and is entered only by a
/// meta-analysis run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResearchStage {
    #[default]
    Idle,
    TopicDiscovery,
    LiteratureSynthesis,
    HypothesisGeneration,
    MhdSimulation,
    FuelDynamicsCfd,
    CodeVerification,
    ScientificVerification,
    JournalPublication,
    KnowledgeIntegration,
    Completed,
    BotAnalysis,
}

impl ResearchStage {
    /// The working stages of one cycle, in execution order.
    pub const CYCLE: [ResearchStage; 9] = [
        Self::TopicDiscovery,
        Self::LiteratureSynthesis,
        Self::HypothesisGeneration,
        Self::MhdSimulation,
        Self::FuelDynamicsCfd,
        Self::CodeVerification,
        Self::ScientificVerification,
        Self::JournalPublication,
        Self::KnowledgeIntegration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::TopicDiscovery => "TOPIC_DISCOVERY",
            Self::LiteratureSynthesis => "LITERATURE_SYNTHESIS",
            Self::HypothesisGeneration => "HYPOTHESIS_GENERATION",
            Self::MhdSimulation => "MHD_SIMULATION",
            Self::FuelDynamicsCfd => "FUEL_DYNAMICS_CFD",
            Self::CodeVerification => "CODE_VERIFICATION",
            Self::ScientificVerification => "SCIENTIFIC_VERIFICATION",
            Self::JournalPublication => "JOURNAL_PUBLICATION",
            Self::KnowledgeIntegration => "KNOWLEDGE_INTEGRATION",
            Self::Completed => "COMPLETED",
            Self::BotAnalysis => "BOT_ANALYSIS",
        }
    }

    /// The stage that follows this one within a cycle.
    pub fn next(&self) -> Option<ResearchStage> {
        match self {
            Self::Idle => Some(Self::TopicDiscovery),
            Self::KnowledgeIntegration => Some(Self::Completed),
            Self::Completed => Some(Self::Idle),
            Self::BotAnalysis => Some(Self::Idle),
            stage => {
                let pos = Self::CYCLE.iter().position(|s| s == stage)?;
                Self::CYCLE.get(pos + 1).copied()
            }
        }
    }
}

impl std::fmt::Display for ResearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
