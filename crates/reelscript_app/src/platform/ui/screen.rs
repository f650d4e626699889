use std::io::{self, Write};

use reelscript_core::SUBMIT_CAPTION;

use super::constants::{ERROR_CLEARED_TEXT, HEADING_SCRIPT, HEADING_STORYBOARD, LOADING_TEXT};
use super::render::ScreenCommand;

#[derive(Debug, PartialEq, Eq)]
struct Shown {
    submit: (bool, &'static str),
    loading: bool,
    result: Option<String>,
    storyboard: Option<String>,
    error: Option<String>,
}

impl Default for Shown {
    fn default() -> Self {
        Self {
            submit: (true, SUBMIT_CAPTION),
            loading: false,
            result: None,
            storyboard: None,
            error: None,
        }
    }
}

/// Line-oriented terminal surface. Remembers what each section currently
/// shows and writes only the sections that change.
pub struct Screen<W: Write> {
    out: W,
    shown: Shown,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown: Shown::default(),
        }
    }

    pub fn apply(&mut self, cmds: Vec<ScreenCommand>) -> io::Result<()> {
        for cmd in cmds {
            match cmd {
                ScreenCommand::SetSubmitControl { enabled, label } => {
                    if self.shown.submit != (enabled, label) {
                        let suffix = if enabled { "" } else { " (disabled)" };
                        writeln!(self.out, "[{label}]{suffix}")?;
                        self.shown.submit = (enabled, label);
                    }
                }
                ScreenCommand::SetLoading(visible) => {
                    if visible && !self.shown.loading {
                        writeln!(self.out, "{LOADING_TEXT}")?;
                    }
                    self.shown.loading = visible;
                }
                ScreenCommand::ShowResult { script } => {
                    if self.shown.result.as_deref() != Some(script.as_str()) {
                        writeln!(self.out, "{HEADING_SCRIPT}\n{script}")?;
                        self.shown.result = Some(script);
                    }
                }
                ScreenCommand::HideResult => self.shown.result = None,
                ScreenCommand::ShowStoryboard { text } => {
                    if self.shown.storyboard.as_deref() != Some(text.as_str()) {
                        writeln!(self.out, "{HEADING_STORYBOARD}\n{text}")?;
                        self.shown.storyboard = Some(text);
                    }
                }
                ScreenCommand::HideStoryboard => self.shown.storyboard = None,
                ScreenCommand::ShowError { text } => {
                    if self.shown.error.as_deref() != Some(text.as_str()) {
                        writeln!(self.out, "{text}")?;
                        self.shown.error = Some(text);
                    }
                }
                ScreenCommand::HideError => {
                    if self.shown.error.take().is_some() {
                        writeln!(self.out, "{ERROR_CLEARED_TEXT}")?;
                    }
                }
            }
        }
        self.out.flush()
    }

    /// Writes text outside of any section (help, parse errors).
    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelscript_core::SUBMIT_BUSY_CAPTION;

    fn output(cmds_per_frame: Vec<Vec<ScreenCommand>>) -> String {
        let mut screen = Screen::new(Vec::new());
        for cmds in cmds_per_frame {
            screen.apply(cmds).unwrap();
        }
        String::from_utf8(screen.into_inner()).unwrap()
    }

    fn busy() -> Vec<ScreenCommand> {
        vec![
            ScreenCommand::SetSubmitControl {
                enabled: false,
                label: SUBMIT_BUSY_CAPTION,
            },
            ScreenCommand::SetLoading(true),
            ScreenCommand::HideResult,
            ScreenCommand::HideStoryboard,
            ScreenCommand::HideError,
        ]
    }

    fn done(script: &str, error: Option<&str>) -> Vec<ScreenCommand> {
        vec![
            ScreenCommand::SetSubmitControl {
                enabled: true,
                label: SUBMIT_CAPTION,
            },
            ScreenCommand::SetLoading(false),
            if error.is_none() {
                ScreenCommand::ShowResult {
                    script: script.to_string(),
                }
            } else {
                ScreenCommand::HideResult
            },
            ScreenCommand::HideStoryboard,
            match error {
                Some(text) => ScreenCommand::ShowError {
                    text: text.to_string(),
                },
                None => ScreenCommand::HideError,
            },
        ]
    }

    #[test]
    fn resting_state_prints_nothing() {
        assert_eq!(output(vec![done("", None)[..2].to_vec()]), "");
    }

    #[test]
    fn success_cycle_prints_each_change_once() {
        let text = output(vec![busy(), done("S", None), done("S", None)]);
        assert_eq!(
            text,
            format!(
                "[Generating...] (disabled)\n{LOADING_TEXT}\n[Generate video]\n{HEADING_SCRIPT}\nS\n"
            )
        );
    }

    #[test]
    fn error_is_printed_then_cleared() {
        let text = output(vec![
            busy(),
            done("", Some("Error: boom")),
            done("", None)[..2]
                .iter()
                .cloned()
                .chain([
                    ScreenCommand::HideResult,
                    ScreenCommand::HideStoryboard,
                    ScreenCommand::HideError,
                ])
                .collect(),
        ]);
        assert!(text.contains("Error: boom\n"));
        assert!(text.ends_with(&format!("{ERROR_CLEARED_TEXT}\n")));
    }
}
