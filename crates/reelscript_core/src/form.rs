/// Longest prompt the backend accepts, counted in characters after trimming.
pub const MAX_PROMPT_CHARS: usize = 500;

/// Raw form contents as the user left them. Nothing here is validated yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub prompt: String,
    pub video_type: String,
    /// Selected duration as text, e.g. `"30"`.
    pub duration: String,
    pub generate_storyboard: bool,
}

/// A validated submission, ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub video_type: String,
    pub duration_secs: u32,
    pub generate_storyboard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing prompt")]
    MissingPrompt,
    #[error("missing video type")]
    MissingVideoType,
    #[error("missing duration")]
    MissingDuration,
    #[error("prompt too long (max {max} characters)")]
    PromptTooLong { max: usize },
}

impl FormSnapshot {
    /// Checks the required fields in form order, then the prompt length,
    /// and returns the first problem found.
    pub fn validate(&self) -> Result<GenerationRequest, ValidationError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::MissingPrompt);
        }
        let video_type = self.video_type.trim();
        if video_type.is_empty() {
            return Err(ValidationError::MissingVideoType);
        }

        let duration_secs = parse_duration(&self.duration).ok_or(ValidationError::MissingDuration)?;

        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(ValidationError::PromptTooLong {
                max: MAX_PROMPT_CHARS,
            });
        }

        Ok(GenerationRequest {
            prompt: prompt.to_string(),
            video_type: video_type.to_string(),
            duration_secs,
            generate_storyboard: self.generate_storyboard,
        })
    }
}

fn parse_duration(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|secs| *secs > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormSnapshot {
        FormSnapshot {
            prompt: "  morning coffee routine ".to_string(),
            video_type: "entertaining".to_string(),
            duration: "30".to_string(),
            generate_storyboard: true,
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let request = filled().validate().unwrap();
        assert_eq!(request.prompt, "morning coffee routine");
        assert_eq!(request.duration_secs, 30);
        assert!(request.generate_storyboard);
    }

    #[test]
    fn zero_and_garbage_durations_are_missing() {
        for raw in ["", "0", "abc", "-5", " "] {
            let form = FormSnapshot {
                duration: raw.to_string(),
                ..filled()
            };
            assert_eq!(form.validate(), Err(ValidationError::MissingDuration), "{raw:?}");
        }
    }

    #[test]
    fn prompt_length_counts_chars_not_bytes() {
        let form = FormSnapshot {
            prompt: "я".repeat(MAX_PROMPT_CHARS),
            ..filled()
        };
        assert!(form.validate().is_ok());

        let form = FormSnapshot {
            prompt: "я".repeat(MAX_PROMPT_CHARS + 1),
            ..filled()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::PromptTooLong {
                max: MAX_PROMPT_CHARS
            })
        );
    }
}
