use tally_core::LedgerError;

pub fn render_error(error: &LedgerError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use tally_core::LedgerError;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = LedgerError::submission_format("sale/oops");

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    submission_format"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. Use five `/`-separated fields"));
    }

    #[test]
    fn falls_back_to_a_generic_step_when_none_provided() {
        let error = LedgerError::internal_serialization("boom");
        let rendered = render_error(&error);
        assert!(rendered.contains("  1. Retry the command."));
    }
}
