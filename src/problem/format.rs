use std::path::Path;

use markup::config::ConfigError;
use markup::language::LoadingError;
use markup::rendering::RenderError;
use markup::scanning::Diagnostic;

/// Format an encoding diagnostic as a single line, positioned by line and
/// column in the raw input.
pub fn concise_diagnostic(diagnostic: &Diagnostic, filename: &Path, input: &[u8]) -> String {
    let offset = diagnostic.offset();
    let i = calculate_line_number(input, offset);
    let j = calculate_column_number(input, offset);
    let line = i + 1;
    let column = j + 1;

    format!(
        "warning: {}:{}:{} {}",
        filename.to_string_lossy(),
        line,
        column,
        diagnostic.message(),
    )
}

/// Format a diagnostic with the offending line and a marker beneath the
/// position.
pub fn full_diagnostic(diagnostic: &Diagnostic, filename: &Path, input: &[u8]) -> String {
    let offset = diagnostic.offset();
    let i = calculate_line_number(input, offset);
    let j = calculate_column_number(input, offset);

    let code = String::from_utf8_lossy(input);
    let code = code
        .lines()
        .nth(i)
        .unwrap_or("?");
    let line = i + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
warning: {}:{}:{} {}

{:width$} |
{:width$} | {}
{:width$} | {:>column$}
        "#,
        filename.to_string_lossy(),
        line,
        column,
        diagnostic.message(),
        ' ',
        line,
        code,
        ' ',
        '^',
    )
    .trim_ascii()
    .to_string()
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError) -> String {
    format!(
        "error: {}: {}",
        error
            .filename
            .display(),
        error.problem
    )
}

pub fn concise_config_error(error: &ConfigError, filename: &Path) -> String {
    match error {
        ConfigError::ReadError(error) => concise_loading_error(error),
        _ => format!("error: {}: {}", filename.display(), error),
    }
}

pub fn concise_render_error(error: &RenderError, filename: &Path) -> String {
    format!("error: {}: {}", filename.display(), error)
}

// Helper functions for line/column calculation
fn calculate_line_number(content: &[u8], offset: usize) -> usize {
    let offset = offset.min(content.len());
    content[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

fn calculate_column_number(content: &[u8], offset: usize) -> usize {
    let offset = offset.min(content.len());
    let before = &content[..offset];
    let start = match before
        .iter()
        .rposition(|&b| b == b'\n')
    {
        Some(start) => start + 1,
        None => 0,
    };
    String::from_utf8_lossy(&content[start..offset])
        .chars()
        .count()
}
