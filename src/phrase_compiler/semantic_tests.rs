// Semantic analysis tests

#[cfg(test)]
mod tests {
    use crate::phrase_compiler::error::CompilerError;
    use crate::phrase_compiler::parser::PhrasePackParser;
    use crate::phrase_compiler::semantic::SemanticAnalyzer;
    use crate::phrase_compiler::token::BankId;

    fn analyze(sources: &[(&str, &str)], primary: &str) -> Result<BankId, CompilerError> {
        let pack = PhrasePackParser::new().parse_sources(sources).unwrap();
        SemanticAnalyzer::new(&pack).analyze(primary)
    }

    #[test]
    fn test_primary_bank_found() {
        let primary = analyze(&[("greet", "world\n"), ("primary", "hello {greet}\n")], "primary");
        assert_eq!(primary, Ok(BankId(1)));
    }

    #[test]
    fn test_missing_primary_bank() {
        let result = analyze(&[("greet", "world\n")], "primary");
        assert_eq!(
            result,
            Err(CompilerError::MissingPrimaryBank("primary".to_string()))
        );
    }

    #[test]
    fn test_configured_entry_bank() {
        let result = analyze(&[("greet", "world\n"), ("start", "{greet}\n")], "start");
        assert_eq!(result, Ok(BankId(1)));
    }

    #[test]
    fn test_shared_bank_is_not_a_cycle() {
        // diamond: primary -> a -> shared, primary -> b -> shared
        let result = analyze(
            &[
                ("primary", "{a} {b}\n{shared}\n"),
                ("a", "{shared}\n"),
                ("b", "x {shared}\n"),
                ("shared", "y\n"),
            ],
            "primary",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let result = analyze(&[("primary", "very\nvery {primary}\n")], "primary");
        assert_eq!(
            result,
            Err(CompilerError::CycleDetected(vec![
                "primary".to_string(),
                "primary".to_string()
            ]))
        );
    }

    #[test]
    fn test_indirect_cycle_names_the_chain() {
        let result = analyze(
            &[
                ("primary", "start {a}\n"),
                ("a", "{b}\n"),
                ("b", "end\nloop {a}\n"),
            ],
            "primary",
        );
        match result {
            Err(CompilerError::CycleDetected(chain)) => {
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("expected CycleDetected, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_unreachable_from_primary_still_rejected() {
        let result = analyze(
            &[("primary", "hi\n"), ("x", "{y}\n"), ("y", "{x}\n")],
            "primary",
        );
        assert!(matches!(result, Err(CompilerError::CycleDetected(_))));
    }
}
