//! Shared UI primitives for contactbook
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `name: `
//! - Absent values display as `-`
//! - Feedback: single word when possible: `Saved.`

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, Confirm, InquireError, Select, Text};
use std::io::{self, Write};

/// Placeholder shown for absent values.
pub const EMPTY_VALUE: &str = "-";

/// Result of a form prompt: a value, or the user backed out.
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Clear the screen and move cursor to top-left
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Number of rows a selection list may use, leaving room for the prompt.
pub fn visible_lines() -> usize {
    let height = crossterm::terminal::size()
        .map(|(_, h)| h as usize)
        .unwrap_or(24);
    height.saturating_sub(4).max(5)
}

/// Display a selection menu and return the chosen index.
/// Labels are prefixed with their position so duplicates stay distinct.
pub fn select<T: ToString>(prompt: &str, options: &[T]) -> Result<Option<usize>> {
    if options.is_empty() {
        return Ok(None);
    }

    let items: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}. {}", i + 1, o.to_string()))
        .collect();

    let result = Select::new(prompt, items.clone())
        .with_render_config(minimal_render_config())
        .with_page_size(visible_lines())
        .with_vim_mode(true)
        .prompt_skippable()?;

    Ok(result.and_then(|selected| items.iter().position(|item| *item == selected)))
}

/// Prompt for free text. `None` when skipped with Escape.
pub fn text_input(prompt: &str) -> Result<Option<String>> {
    let result = Text::new(prompt)
        .with_render_config(minimal_render_config())
        .prompt_skippable()?;
    Ok(result.map(|s| s.trim().to_string()))
}

/// Prompt for an optional field (returns empty string if skipped).
/// `initial` pre-fills the input when editing an existing value.
pub fn prompt_field_optional(field: &str, initial: Option<&str>) -> Result<FormResult<String>> {
    let prompt = format!("{}: ", field);

    let mut text = Text::new(&prompt).with_render_config(minimal_render_config());
    if let Some(initial) = initial {
        text = text.with_initial_value(initial);
    }
    let result = text.prompt();

    match result {
        Ok(input) => Ok(FormResult::Value(input.trim().to_string())),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt for yes/no confirmation (default: no)
pub fn confirm(prompt: &str) -> Result<bool> {
    match Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt()
    {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Wait for user to press enter to continue
pub fn wait_for_continue() {
    println!();
    let _ = Text::new("[enter]")
        .with_render_config(minimal_render_config())
        .prompt_skippable();
}

/// Value or the `-` placeholder.
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => EMPTY_VALUE,
    }
}

/// Print a status message to stdout
#[inline]
pub fn status(msg: &str) {
    println!("{}", msg);
}

/// Print an error message to stderr
#[inline]
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Print a warning message to stderr
#[inline]
pub fn warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}
