//! Architecture proposal generation.

use refactorium_core::{AnalysisResult, ArchitectureProposal, ProposalId};
use refactorium_narrative::Narrator;
use tracing::{debug, info};

use crate::current_stack;
use crate::effort;
use crate::phases::phases;
use crate::stack::propose;

/// Builds modernization proposals from finished analyses.
#[derive(Clone, Default)]
pub struct ProposalGenerator {
    narrator: Narrator,
}

impl ProposalGenerator {
    /// Create a generator narrating through `narrator`.
    pub fn new(narrator: Narrator) -> Self {
        Self { narrator }
    }

    /// Generate a proposal. Has no filesystem dependency.
    pub async fn generate(&self, analysis: &AnalysisResult) -> ArchitectureProposal {
        let current_stack = current_stack::extract(analysis);
        let names: Vec<String> = current_stack.iter().map(|item| item.name.clone()).collect();

        let (ecosystem, proposed_stack) = propose(&names);
        debug!("Current stack: {}", names.join(", "));
        debug!("Proposed {} stack: {}", ecosystem, proposed_stack.join(", "));

        let migration_strategy = self.narrator.narrate(&names, &proposed_stack).await;

        let proposal = ArchitectureProposal {
            id: ProposalId::new(),
            analysis_id: analysis.id.clone(),
            ecosystem,
            current_stack,
            proposed_stack,
            migration_strategy,
            phases: phases(ecosystem),
            estimated_effort: effort::estimate(&analysis.metrics).to_string(),
        };
        info!(
            "Generated proposal {} for {} ({}, {})",
            proposal.id, proposal.analysis_id, proposal.ecosystem, proposal.estimated_effort
        );
        proposal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refactorium_core::{
        AnalysisId, CodebaseId, DetectedTechnology, Ecosystem, Priority, SeverityLevel,
    };

    fn analysis_with(technologies: Vec<DetectedTechnology>) -> AnalysisResult {
        let mut analysis = AnalysisResult::placeholder(AnalysisId::new(), CodebaseId::new());
        analysis.ghostly_dependencies = technologies.iter().filter(|t| t.deprecated).cloned().collect();
        analysis.technologies = technologies;
        analysis
    }

    #[tokio::test]
    async fn test_java_proposal_is_consistent() {
        let analysis = analysis_with(vec![DetectedTechnology::clean("Java")]);
        let proposal = ProposalGenerator::default().generate(&analysis).await;

        assert_eq!(proposal.analysis_id, analysis.id);
        assert_eq!(proposal.ecosystem, Ecosystem::Java);
        assert_eq!(proposal.proposed_stack[0], "Java 21 LTS");
        assert_eq!(proposal.phases.len(), 3);
        assert_eq!(proposal.phases[0].tasks[0], "Update to Java 21 LTS");
        assert_eq!(proposal.phases[2].priority, Priority::Medium);
        assert!(proposal.migration_strategy.contains("Java to Spring Boot"));
        assert_eq!(proposal.estimated_effort, "2-4 weeks");
        assert!(proposal.id.0.starts_with("arch_"));
    }

    #[tokio::test]
    async fn test_legacy_frontend_proposal() {
        let analysis = analysis_with(vec![
            DetectedTechnology {
                name: "jquery".to_string(),
                version: Some("1.12.4".to_string()),
                deprecated: true,
                last_update: None,
                severity: SeverityLevel::Cursed,
            },
            DetectedTechnology::clean("express"),
        ]);
        let proposal = ProposalGenerator::default().generate(&analysis).await;

        assert_eq!(proposal.ecosystem, Ecosystem::JavaScript);
        assert_eq!(proposal.current_stack[0].name, "jquery");
        assert!(proposal.proposed_stack.contains(&"Express".to_string()));
        assert!(proposal.migration_strategy.contains("jQuery to React"));
        assert_eq!(proposal.phases[0].description, "Prepare the new project structure and tooling");
    }

    #[tokio::test]
    async fn test_empty_analysis_proposal() {
        let analysis = analysis_with(Vec::new());
        let proposal = ProposalGenerator::default().generate(&analysis).await;
        assert_eq!(proposal.current_stack[0].name, "Legacy Code");
        assert_eq!(proposal.ecosystem, Ecosystem::JavaScript);
        assert!(!proposal.migration_strategy.is_empty());
    }
}
