pub const HEADING_SCRIPT: &str = "=== Script ===";
pub const HEADING_STORYBOARD: &str = "=== Storyboard ===";
pub const LOADING_TEXT: &str = "Generating, this can take up to a minute...";
pub const ERROR_CLEARED_TEXT: &str = "(error cleared)";
pub const INPUT_PROMPT: &str = "> ";

pub const HELP_TEXT: &str = "\
Commands:
  prompt <text>        set the video description
  type <value>         set the video type (e.g. entertaining, educational)
  duration <seconds>   set the video length
  storyboard on|off    also generate a storyboard
  submit               send the form
  help                 show this list
  quit                 leave";
