//! Interpret command implementation.

use crate::cli::InterpretArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use claimguard_domain::{ClassificationResult, Prediction};
use claimguard_interpreter::FraudInterpreter;
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};

/// Execute the interpret command.
pub fn execute_interpret(args: InterpretArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either a FILE or --stdin".to_string(),
        ));
    };

    let result = parse_classification(&json_data)?;
    let interpreter = FraudInterpreter::new(config.interpreter.clone())?;
    let verdict = interpreter.interpret(&result);

    println!("{}", formatter.format_verdict(&verdict)?);

    Ok(())
}

/// Classifier output as accepted on input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationInput {
    Result(ClassificationResult),
    Bare(Vec<Prediction>),
}

/// Parse a classification result, or a bare array of predictions.
pub fn parse_classification(json: &str) -> Result<ClassificationResult> {
    let input: ClassificationInput = serde_json::from_str(json).map_err(|e| {
        CliError::InvalidInput(format!(
            "Expected {{\"predictions\": [...]}} or a prediction array: {}",
            e
        ))
    })?;

    Ok(match input {
        ClassificationInput::Result(result) => result,
        ClassificationInput::Bare(predictions) => ClassificationResult::new(predictions),
    })
}
