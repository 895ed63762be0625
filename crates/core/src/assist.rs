//! Scripted production-data assistant.
//!
//! Answers common production questions (next shoot, scene status,
//! responsibilities, locations, schedules, actor assignments) from an
//! in-memory board. Serves as the offline fallback when no upstream AI
//! provider is configured.

/// One scene on the board.
#[derive(Debug, Clone)]
pub struct SceneCard {
    pub name: String,
    pub location: String,
    pub time: String,
    pub status: String,
    pub responsible: String,
    pub actors: Vec<String>,
}

/// One actor's current assignment.
#[derive(Debug, Clone)]
pub struct ActorAssignment {
    pub name: String,
    pub current_scene: String,
    pub next_scene: String,
    pub schedule: String,
}

/// Today's production state, as the assistant sees it.
#[derive(Debug, Clone, Default)]
pub struct ProductionBoard {
    pub scenes: Vec<SceneCard>,
    pub actors: Vec<ActorAssignment>,
}

impl ProductionBoard {
    /// Produce a reply for one user message. Always returns something; the
    /// final arm lists what the assistant can answer.
    pub fn respond(&self, message: &str) -> String {
        let lower = message.to_lowercase();

        if lower.contains("next shoot") || lower.contains("next scene") {
            if let Some(scene) = self.scenes.first() {
                return format!(
                    "The next shoot is the {} at {} at {} with {}.",
                    scene.name,
                    scene.location,
                    scene.time,
                    scene.actors.join(" and ")
                );
            }
        }

        if lower.contains("scene status") || lower.contains("scenes left") {
            let mut lines = vec!["Today's scenes:".to_string()];
            for scene in &self.scenes {
                lines.push(format!("- {} ({}) - {}", scene.name, scene.time, scene.status));
            }
            return lines.join("\n");
        }

        if lower.contains("responsible") || lower.contains("in charge") {
            for scene in &self.scenes {
                let key = scene.name.to_lowercase();
                let first_word = key.split_whitespace().next().unwrap_or(&key);
                if lower.contains(first_word) {
                    return format!("{} is responsible for the {}.", scene.responsible, scene.name);
                }
            }
            return "Please specify which scene you're asking about.".to_string();
        }

        if lower.contains("location") || lower.contains("where") {
            if lower.contains("next") {
                if let Some(scene) = self.scenes.first() {
                    return format!(
                        "The next shooting location is {} for the {}.",
                        scene.location, scene.name
                    );
                }
            }
            let mut lines = vec!["Today's locations:".to_string()];
            for scene in &self.scenes {
                lines.push(format!("- {} ({})", scene.location, scene.name));
            }
            return lines.join("\n");
        }

        if lower.contains("schedule") || lower.contains("timing") {
            let mut lines = vec!["Today's schedule:".to_string()];
            for scene in &self.scenes {
                lines.push(format!(
                    "{} - {} ({})",
                    scene.time,
                    scene.name,
                    scene.actors.join(", ")
                ));
            }
            return lines.join("\n");
        }

        if let Some(actor) = self
            .actors
            .iter()
            .find(|a| lower.contains(&a.name.to_lowercase()))
        {
            return format!(
                "{} is currently assigned to {} at {}. Their next scene will be {}.",
                actor.name, actor.current_scene, actor.schedule, actor.next_scene
            );
        }

        "I can help you with:\n- Next shoot details\n- Scene status\n- Scene responsibilities\n\
         - Shooting locations\n- Actor schedules\nPlease ask me about any of these topics!"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> ProductionBoard {
        crate::sample::production_board()
    }

    #[test]
    fn answers_next_shoot() {
        let reply = board().respond("When is the next shoot?");
        assert!(reply.contains("Desert Chase Scene"));
        assert!(reply.contains("Al Qudra Desert"));
    }

    #[test]
    fn answers_scene_responsibility_by_scene_name() {
        let reply = board().respond("Who is responsible for the market scene?");
        assert!(reply.contains("Mohammed"));

        let vague = board().respond("Who is responsible?");
        assert!(vague.contains("specify"));
    }

    #[test]
    fn answers_actor_assignment() {
        let reply = board().respond("What is Dana working on?");
        assert!(reply.contains("Dana"));
        assert!(reply.contains("Market Scene"));
        assert!(reply.contains("Palace Interior"));
    }

    #[test]
    fn unknown_questions_get_the_help_menu() {
        let reply = board().respond("What's the catering budget?");
        assert!(reply.contains("I can help you with"));
    }
}
