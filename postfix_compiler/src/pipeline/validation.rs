/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;

    let source_codes = [
        crate::logging::codes::source::FILE_NOT_FOUND,
        crate::logging::codes::source::IO_ERROR,
        crate::logging::codes::listing::OUTPUT_WRITE_FAILURE,
    ];
    for code in &source_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Error code {} not registered", code.as_str()));
        }
    }

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "profile" => crate::config::build_info::profile()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_validates() {
        assert!(validate_pipeline().is_ok());
    }
}
