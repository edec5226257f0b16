//! Phase 1: Persona generation
//!
//! Generates a diverse set of personas for the hearing theme. The persona list
//! order fixes the interview order used in Phase 3.

use anyhow::{Context, Result};
use persona_hearing_sdk::{log_info, log_phase_start_console, log_task_complete, log_task_start};

use crate::hearing::agents;
use crate::hearing::prompts::{PersonaPrompt, PromptContext};
use crate::hearing::types::PersonaSet;
use crate::workflow_utils::agent::{AgentInvocation, TextGenerator};

/// Generate `num_personas` personas for `theme`
pub async fn generate_personas(
    generator: &dyn TextGenerator,
    theme: &str,
    num_personas: usize,
    verbose: bool,
) -> Result<PersonaSet> {
    let task_id = "generate_personas";

    if verbose {
        log_phase_start_console!(
            1,
            "Persona Generation",
            format!("Generating {} personas", num_personas)
        );
    }
    log_task_start!(1, task_id, format!("Generating {} personas", num_personas));

    let prompt = PersonaPrompt {
        theme,
        num_personas,
    }
    .render();

    let personas = agents::persona_generator()
        .run(
            generator,
            AgentInvocation::new(task_id, "Generating personas", prompt),
        )
        .await
        .context("Persona generation failed")?;

    if personas.personas.len() != num_personas {
        tracing::warn!(
            requested = num_personas,
            generated = personas.personas.len(),
            "persona count differs from the requested count"
        );
    }

    if verbose {
        log_info!("Generated {} personas", personas.personas.len());
        for (i, persona) in personas.personas.iter().enumerate() {
            println!(
                "   {}. {} ({}, {})",
                i + 1,
                persona.name,
                persona.age,
                persona.occupation
            );
        }
        println!();
    }

    log_task_complete!(
        task_id,
        format!("Generated {} personas", personas.personas.len())
    );

    Ok(personas)
}
