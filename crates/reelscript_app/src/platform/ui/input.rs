use reelscript_core::Msg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Send(Msg),
    Help,
    Quit,
}

/// Parses one line typed in interactive mode. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Result<InputCommand, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "prompt" => Ok(InputCommand::Send(Msg::PromptChanged(rest.to_string()))),
        "type" => Ok(InputCommand::Send(Msg::VideoTypeChanged(rest.to_string()))),
        "duration" => Ok(InputCommand::Send(Msg::DurationChanged(rest.to_string()))),
        "storyboard" => match rest.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "" => Ok(InputCommand::Send(Msg::StoryboardToggled(true))),
            "off" | "no" | "false" => Ok(InputCommand::Send(Msg::StoryboardToggled(false))),
            other => Err(format!("storyboard expects on or off, got '{other}'")),
        },
        "submit" | "generate" => Ok(InputCommand::Send(Msg::SubmitClicked)),
        "help" | "?" => Ok(InputCommand::Help),
        "quit" | "exit" => Ok(InputCommand::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    };
    Some(command)
}
