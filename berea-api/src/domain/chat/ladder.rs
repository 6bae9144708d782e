//! Model fallback ladder as an explicit state machine.
//!
//! Strictly sequential, at most three attempts. The ladder advances on
//! exactly two transitions: a primary attempt that succeeds but hits the
//! length limit, and a secondary attempt that fails outright. Every other
//! outcome terminates, including a length-limited response from a fallback
//! model, which is accepted rather than retried further.

/// Models attempted in order.
#[derive(Debug, Clone)]
pub struct ModelLadder {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
}

impl ModelLadder {
    pub fn model(&self, stage: LadderStage) -> &str {
        match stage {
            LadderStage::Primary => &self.primary,
            LadderStage::Secondary => &self.secondary,
            LadderStage::Tertiary => &self.tertiary,
        }
    }
}

impl Default for ModelLadder {
    fn default() -> Self {
        Self {
            primary: "gemini-2.5-flash".to_string(),
            secondary: "gemini-2.0-flash".to_string(),
            tertiary: "gemini-1.5-flash".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderStage {
    Primary,
    Secondary,
    Tertiary,
}

/// Classification of one completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Success status with a non-length-limit finish.
    Completed,
    /// Success status, but the output hit the length ceiling.
    LengthLimited,
    /// Success status with an empty candidate list.
    NoCandidates,
    /// Non-success status or transport failure.
    Failed,
}

impl LadderStage {
    /// Next stage to attempt, or `None` when the ladder terminates and the
    /// current attempt's result (success or failure) stands.
    pub fn next(self, outcome: AttemptOutcome) -> Option<LadderStage> {
        match (self, outcome) {
            (LadderStage::Primary, AttemptOutcome::LengthLimited) => Some(LadderStage::Secondary),
            (
                LadderStage::Secondary,
                AttemptOutcome::Failed | AttemptOutcome::NoCandidates,
            ) => Some(LadderStage::Tertiary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_retries_only_on_length_limit() {
        assert_eq!(
            LadderStage::Primary.next(AttemptOutcome::LengthLimited),
            Some(LadderStage::Secondary)
        );
        assert_eq!(LadderStage::Primary.next(AttemptOutcome::Completed), None);
        assert_eq!(LadderStage::Primary.next(AttemptOutcome::Failed), None);
        assert_eq!(LadderStage::Primary.next(AttemptOutcome::NoCandidates), None);
    }

    #[test]
    fn secondary_retries_only_on_outright_failure() {
        assert_eq!(
            LadderStage::Secondary.next(AttemptOutcome::Failed),
            Some(LadderStage::Tertiary)
        );
        assert_eq!(
            LadderStage::Secondary.next(AttemptOutcome::NoCandidates),
            Some(LadderStage::Tertiary)
        );
        // A fallback attempt that hits the length limit is accepted.
        assert_eq!(
            LadderStage::Secondary.next(AttemptOutcome::LengthLimited),
            None
        );
        assert_eq!(LadderStage::Secondary.next(AttemptOutcome::Completed), None);
    }

    #[test]
    fn tertiary_always_terminates() {
        for outcome in [
            AttemptOutcome::Completed,
            AttemptOutcome::LengthLimited,
            AttemptOutcome::NoCandidates,
            AttemptOutcome::Failed,
        ] {
            assert_eq!(LadderStage::Tertiary.next(outcome), None);
        }
    }
}
