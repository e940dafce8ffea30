//! PIN validator - main evaluation logic.

use std::collections::HashSet;
use std::sync::LazyLock;

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::database::{PatternDatabase, StaticPatternDatabase};
use crate::sections::{
    SectionInput, SectionResult, common_pin_section, demographic_section, keypad_section,
    sequence_section,
};
use crate::types::{Demographics, PinLength, PinScore, ReasonCode, ValidationResult};

/// Lowest composite score a PIN can get.
pub const SCORE_FLOOR: i64 = 0;

const BASE_SCORE_MIN: i64 = 40;
const BASE_SCORE_SPAN: i64 = 60;

static BUILTIN_DATABASE: LazyLock<StaticPatternDatabase> =
    LazyLock::new(StaticPatternDatabase::builtin);

/// Base score from digit variety: 40 when a single digit is repeated,
/// 100 when every digit is distinct.
pub fn base_score(pin: &str) -> i64 {
    let distinct = pin.chars().collect::<HashSet<_>>().len() as i64;
    let span = pin.chars().count() as i64 - 1;
    if span <= 0 {
        return BASE_SCORE_MIN;
    }
    BASE_SCORE_MIN + BASE_SCORE_SPAN * (distinct - 1) / span
}

/// Collects reason codes and penalties while sections run.
#[derive(Debug, Clone)]
pub struct ScoreAccumulator {
    base: i64,
    penalty: i64,
    reasons: Vec<ReasonCode>,
}

impl ScoreAccumulator {
    pub fn new(base: i64) -> Self {
        Self {
            base,
            penalty: 0,
            reasons: Vec::new(),
        }
    }

    /// Records a reason once; repeated codes add no further penalty.
    pub fn record(&mut self, reason: ReasonCode) {
        if self.reasons.contains(&reason) {
            return;
        }
        self.penalty += reason.penalty();
        self.reasons.push(reason);
    }

    pub fn score(&self) -> i64 {
        (self.base - self.penalty).max(SCORE_FLOOR)
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            score: Some(PinScore::new(self.score())),
            reasons: self.reasons,
        }
    }
}

/// Validates PINs against an injected pattern database.
#[derive(Debug, Clone, Default)]
pub struct PinValidator<D = StaticPatternDatabase> {
    database: D,
}

impl<D: PatternDatabase> PinValidator<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    /// Evaluates `pin` and returns its score, strength and reasons.
    ///
    /// # Arguments
    /// * `pin` - The PIN to evaluate (4 or 6 ASCII digits)
    /// * `demographics` - Optional personal dates
    pub fn validate(&self, pin: &SecretString, demographics: Option<&Demographics>) -> ValidationResult {
        validate_with(&self.database, pin, demographics)
    }
}

/// Evaluates `pin` against the built-in pattern database.
pub fn validate_pin(pin: &SecretString, demographics: Option<&Demographics>) -> ValidationResult {
    validate_with(&*BUILTIN_DATABASE, pin, demographics)
}

fn validate_with(
    database: &dyn PatternDatabase,
    pin: &SecretString,
    demographics: Option<&Demographics>,
) -> ValidationResult {
    let pin = pin.expose_secret();

    let length = match PinLength::parse(pin) {
        Ok(length) => length,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("PIN rejected: {}", _err);
            return ValidationResult::invalid_input();
        }
    };

    let input = SectionInput {
        pin,
        length,
        demographics,
        database,
    };

    // Orchestrator: execute sections in sequence
    let sections: [(&str, fn(&SectionInput<'_>) -> SectionResult); 4] = [
        ("demographic", demographic_section),
        ("common", common_pin_section),
        ("sequence", sequence_section),
        ("keypad", keypad_section),
    ];

    let mut accumulator = ScoreAccumulator::new(base_score(pin));
    for (_section_name, section_fn) in sections {
        let reasons = section_fn(&input);

        #[cfg(feature = "tracing")]
        {
            if !reasons.is_empty() {
                tracing::debug!("Section {} triggered {} rule(s)", _section_name, reasons.len());
            }
        }

        for reason in reasons {
            accumulator.record(reason);
        }
    }

    let result = accumulator.finish();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "PIN validation finished: strength={} reasons={}",
        result.strength(),
        result.reasons.len()
    );

    result
}

/// Async version that sends the validation result via channel.
#[cfg(feature = "async")]
pub async fn validate_pin_tx(
    pin: &SecretString,
    demographics: Option<&Demographics>,
    tx: mpsc::Sender<ValidationResult>,
) {
    let result = validate_pin(pin, demographics);

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send PIN validation result: {}", _e);
    }
}

/// Validates a batch of PINs, sending `(index, result)` pairs in input order.
///
/// Stops before the next PIN once `token` is cancelled or the receiver is
/// dropped. Returns how many results were sent.
#[cfg(feature = "async")]
pub async fn validate_batch_tx(
    pins: &[SecretString],
    demographics: Option<&Demographics>,
    token: CancellationToken,
    tx: mpsc::Sender<(usize, ValidationResult)>,
) -> usize {
    #[cfg(feature = "tracing")]
    tracing::info!("batch validation of {} PINs is about to start...", pins.len());

    let mut sent = 0;
    for (index, pin) in pins.iter().enumerate() {
        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::info!("Batch validation cancelled after {} PINs", sent);
            break;
        }

        let result = validate_pin(pin, demographics);
        if tx.send((index, result)).await.is_err() {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send batch validation result {}", index);
            break;
        }
        sent += 1;
    }
    sent
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::types::PinStrength;

    fn secret(pin: &str) -> SecretString {
        SecretString::new(pin.to_string().into())
    }

    #[tokio::test]
    async fn test_validate_pin_tx() {
        let (tx, mut rx) = mpsc::channel(1);

        validate_pin_tx(&secret("1397"), None, tx).await;

        let result = rx.recv().await.expect("Should receive validation");
        assert_eq!(result.strength(), PinStrength::Strong);
    }

    #[tokio::test]
    async fn test_validate_batch_tx() {
        let (tx, mut rx) = mpsc::channel(8);
        let token = CancellationToken::new();
        let pins = vec![secret("1234"), secret("1397"), secret("12a4")];

        let sent = validate_batch_tx(&pins, None, token, tx).await;
        assert_eq!(sent, 3);

        let mut results = Vec::new();
        while let Some(item) = rx.recv().await {
            results.push(item);
        }
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, 0);
        assert!(results[0].1.has_reason("COMMONLY_USED"));
        assert_eq!(results[1].1.strength(), PinStrength::Strong);
        assert_eq!(results[2].1.strength(), PinStrength::InvalidInput);
    }

    #[tokio::test]
    async fn test_validate_batch_with_cancellation() {
        let (tx, mut rx) = mpsc::channel(8);
        let token = CancellationToken::new();
        token.cancel();

        let pins = vec![secret("1234"), secret("1397")];
        let sent = validate_batch_tx(&pins, None, token, tx).await;

        assert_eq!(sent, 0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_validate_batch_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let pins = vec![secret("1234"), secret("1397")];
        let sent = validate_batch_tx(&pins, None, CancellationToken::new(), tx).await;
        assert_eq!(sent, 0);
    }
}
