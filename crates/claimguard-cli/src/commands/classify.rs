//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use claimguard_domain::traits::ImageClassifier;
use claimguard_interpreter::FraudInterpreter;
use claimguard_vision::CustomVisionClassifier;
use std::fs;

/// Execute the classify command.
pub async fn execute_classify(
    args: ClassifyArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let vision = config.vision.clone().ok_or_else(|| {
        CliError::Config("No [vision] section in the configuration file".to_string())
    })?;

    let image = fs::read(&args.image)?;
    let classifier = CustomVisionClassifier::new(vision)?;
    let interpreter = FraudInterpreter::new(config.interpreter.clone())?;

    println!(
        "{}",
        classify_image(&classifier, &interpreter, &image, formatter).await?
    );

    Ok(())
}

/// Classify `image` and render the predictions and verdict
///
/// A classifier failure is not an error: the output is a warning that
/// validation was skipped.
pub async fn classify_image<C: ImageClassifier>(
    classifier: &C,
    interpreter: &FraudInterpreter,
    image: &[u8],
    formatter: &Formatter,
) -> Result<String> {
    if image.is_empty() {
        return Err(CliError::InvalidInput("Image file is empty".to_string()));
    }

    match classifier.classify(image).await {
        Ok(result) => {
            let verdict = interpreter.interpret(&result);
            formatter.format_classification(&result, &verdict)
        }
        Err(e) => Ok(formatter.warning(&format!("Automated validation skipped: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use claimguard_domain::Prediction;
    use claimguard_vision::MockClassifier;

    #[tokio::test]
    async fn test_classify_prints_verdict() {
        let classifier = MockClassifier::new(vec![
            Prediction::new("front", 0.85),
            Prediction::new("NOT_demaged", 0.05),
        ]);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let output = classify_image(
            &classifier,
            &FraudInterpreter::default_config(),
            b"jpeg",
            &formatter,
        )
        .await
        .unwrap();

        assert_eq!(output, "ok");
        assert_eq!(classifier.call_count(), 1);
    }

    #[tokio::test]
    async fn test_classifier_failure_is_a_warning() {
        let classifier = MockClassifier::failing("connection refused");
        let formatter = Formatter::new(OutputFormat::Table, false);

        let output = classify_image(
            &classifier,
            &FraudInterpreter::default_config(),
            b"jpeg",
            &formatter,
        )
        .await
        .unwrap();

        assert!(output.starts_with("⚠ Automated validation skipped"));
    }

    #[tokio::test]
    async fn test_empty_image_rejected() {
        let classifier = MockClassifier::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = classify_image(
            &classifier,
            &FraudInterpreter::default_config(),
            b"",
            &formatter,
        )
        .await;

        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_vision_section() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = ClassifyArgs {
            image: "car.jpg".to_string(),
        };

        let result = execute_classify(args, &Config::default(), &formatter).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
