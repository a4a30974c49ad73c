use dialoguer::Select;
use sf_session::{EnvironmentPrompt, Result, SfError};

/// Arrow key selection on the terminal.
pub struct TerminalPrompt;

impl EnvironmentPrompt for TerminalPrompt {
    fn select(&self, options: &[&str]) -> Result<String> {
        // Esc gives Ok(None), a missing terminal gives Err
        let selection = Select::new()
            .with_prompt("Select environment")
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(|e| SfError::SelectionAborted(e.to_string()))?;

        selection
            .and_then(|index| options.get(index))
            .map(|option| option.to_string())
            .ok_or_else(|| SfError::SelectionAborted("no environment selected".into()))
    }
}
