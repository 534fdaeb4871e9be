//! Strategy B: sequential fallback across hosted remote classifiers.
//!
//! Free-tier detector models are frequently cold-started (503) or deprecated
//! (404/410). The chain treats those as expected, recoverable conditions and
//! only gives up after exhausting every candidate. Deployment mistakes (an
//! HTML 404 from a misrouted proxy) and hard server errors abort immediately,
//! because trying a different candidate cannot fix them.

use super::{
    Classifier, LabelLexicon, LabelScore, OverrideTable, Verdict, VerdictDetails, VerdictLabel,
};
use crate::core::intake::ImageAsset;
use crate::core::orchestrator::CancellationToken;
use crate::error::{AnalysisError, AuthenticityError, ProviderError};
use crate::events::{AnalysisEvent, Event, EventSender};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default candidate models, in order of preference
pub const DEFAULT_PROVIDERS: [&str; 4] = [
    "Organika/sdxl-detector",
    "pujangga/not-real",
    "umm-maybe/AI-image-detector",
    "dima806/deepfake_vs_real_image_detection",
];

/// Default proxy route the dev server exposes for the inference API
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/hf";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// A raw response from one candidate, before outcome classification
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Network-level failures a transport can report
#[derive(Debug, Clone)]
pub enum TransportFailure {
    Timeout,
    Network(String),
}

/// The wire seam for the fallback chain.
///
/// POSTs the raw image bytes to one named candidate and returns whatever
/// came back. Tests substitute scripted transports.
pub trait ProviderTransport: Send + Sync {
    fn request(&self, provider: &str, image: &[u8])
        -> Result<ProviderResponse, TransportFailure>;
}

/// reqwest-backed transport with a per-request timeout
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthenticityError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthenticityError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ProviderTransport for HttpTransport {
    fn request(
        &self,
        provider: &str,
        image: &[u8],
    ) -> Result<ProviderResponse, TransportFailure> {
        let url = format!("{}/{}", self.base_url, provider);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send();

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Err(TransportFailure::Timeout),
            Err(e) => return Err(TransportFailure::Network(e.to_string())),
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = match response.text() {
            Ok(b) => b,
            Err(e) if e.is_timeout() => return Err(TransportFailure::Timeout),
            Err(e) => return Err(TransportFailure::Network(e.to_string())),
        };

        Ok(ProviderResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Configuration for the fallback chain
#[derive(Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    /// Candidates tried in order
    pub providers: Vec<String>,
    pub timeout: Duration,
    /// Demo overrides consulted before any network traffic
    pub overrides: OverrideTable,
    pub lexicon: LabelLexicon,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            providers: DEFAULT_PROVIDERS.iter().map(|s| s.to_string()).collect(),
            timeout: REQUEST_TIMEOUT,
            overrides: OverrideTable::with_defaults(),
            lexicon: LabelLexicon::default(),
        }
    }
}

/// Record of one contacted candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisAttempt {
    pub provider: String,
    pub outcome: AttemptOutcome,
}

/// How one candidate attempt ended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// The candidate answered with usable scores
    Success { fake_score: f64, real_score: f64 },
    /// The candidate was skipped; the chain continued
    Skipped { reason: String },
    /// The candidate's response aborted the whole chain
    HardFailure { reason: String },
}

/// The remote fallback chain classifier
pub struct RemoteFallbackClassifier {
    providers: Vec<String>,
    overrides: OverrideTable,
    lexicon: LabelLexicon,
    transport: Box<dyn ProviderTransport>,
}

impl RemoteFallbackClassifier {
    /// Build with the real HTTP transport
    pub fn new(config: RemoteConfig) -> Result<Self, AuthenticityError> {
        let transport = Box::new(HttpTransport::new(&config.base_url, config.timeout)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Build with a custom transport (tests, recording proxies)
    pub fn with_transport(config: RemoteConfig, transport: Box<dyn ProviderTransport>) -> Self {
        Self {
            providers: config.providers,
            overrides: config.overrides,
            lexicon: config.lexicon,
            transport,
        }
    }

    /// Run the chain, returning the per-candidate attempt records
    /// alongside the outcome.
    pub fn classify_with_attempts(
        &self,
        asset: &ImageAsset,
        events: &EventSender,
        cancel: &CancellationToken,
    ) -> (Vec<AnalysisAttempt>, Result<Verdict, AnalysisError>) {
        let mut attempts = Vec::new();

        if let Some(forced) = self.overrides.lookup(asset.name()) {
            events.send(Event::Analysis(AnalysisEvent::StatusChanged {
                message: "Running Demo Mode...".to_string(),
            }));
            tracing::debug!(name = asset.name(), "using demo override");
            return (attempts, Ok(self.forced_verdict(asset, forced)));
        }

        let total = self.providers.len();
        if total == 0 {
            return (
                attempts,
                Err(AnalysisError::Unexpected(
                    "no classifier candidates configured".to_string(),
                )),
            );
        }

        let mut last_error: Option<ProviderError> = None;

        for (i, provider) in self.providers.iter().enumerate() {
            if cancel.is_cancelled() {
                return (attempts, Err(AnalysisError::Cancelled));
            }

            events.send(Event::Analysis(AnalysisEvent::StatusChanged {
                message: format!("Checking Model {}/{}...", i + 1, total),
            }));
            events.send(Event::Analysis(AnalysisEvent::ProviderAttempt {
                provider: provider.clone(),
                index: i + 1,
                total,
            }));

            let response = match self.transport.request(provider, asset.bytes()) {
                Ok(response) => response,
                Err(TransportFailure::Timeout) => {
                    self.skip(&mut attempts, events, provider, "request timed out");
                    last_error = Some(ProviderError::Timeout {
                        provider: provider.clone(),
                    });
                    continue;
                }
                Err(TransportFailure::Network(reason)) => {
                    self.skip(&mut attempts, events, provider, &reason);
                    last_error = Some(ProviderError::Network {
                        provider: provider.clone(),
                        reason,
                    });
                    continue;
                }
            };

            // A 404 rendered as HTML means the request never reached the
            // inference proxy at all; no other candidate can succeed.
            if response.status == 404 && is_html(&response.content_type) {
                attempts.push(AnalysisAttempt {
                    provider: provider.clone(),
                    outcome: AttemptOutcome::HardFailure {
                        reason: "HTML 404 (misrouted proxy)".to_string(),
                    },
                });
                return (
                    attempts,
                    Err(AnalysisError::Configuration {
                        detail: format!(
                            "request to {} was answered by the web server, not the inference proxy",
                            provider
                        ),
                    }),
                );
            }

            match response.status {
                503 | 500 => {
                    let reason = format!("warming up ({})", response.status);
                    self.skip(&mut attempts, events, provider, &reason);
                    last_error = Some(ProviderError::WarmingUp {
                        provider: provider.clone(),
                        status: response.status,
                    });
                }
                410 | 404 => {
                    let reason = format!("retired or missing ({})", response.status);
                    self.skip(&mut attempts, events, provider, &reason);
                    last_error = Some(ProviderError::Retired {
                        provider: provider.clone(),
                        status: response.status,
                    });
                }
                status if !(200..300).contains(&status) => {
                    attempts.push(AnalysisAttempt {
                        provider: provider.clone(),
                        outcome: AttemptOutcome::HardFailure {
                            reason: format!("server returned {}", status),
                        },
                    });
                    return (attempts, Err(AnalysisError::Server { status }));
                }
                _ => {
                    let scores: Vec<LabelScore> = match serde_json::from_str(&response.body) {
                        Ok(scores) => scores,
                        Err(e) => {
                            let reason = format!("unreadable response: {}", e);
                            self.skip(&mut attempts, events, provider, &reason);
                            last_error = Some(ProviderError::MalformedResponse {
                                provider: provider.clone(),
                                reason: e.to_string(),
                            });
                            continue;
                        }
                    };

                    let resolved = match self.lexicon.resolve(&scores) {
                        Some(resolved) => resolved,
                        None => {
                            self.skip(&mut attempts, events, provider, "empty score list");
                            last_error = Some(ProviderError::MalformedResponse {
                                provider: provider.clone(),
                                reason: "empty score list".to_string(),
                            });
                            continue;
                        }
                    };

                    attempts.push(AnalysisAttempt {
                        provider: provider.clone(),
                        outcome: AttemptOutcome::Success {
                            fake_score: resolved.fake_score,
                            real_score: resolved.real_score,
                        },
                    });

                    let (width, height) = match asset.dimensions() {
                        Some((w, h)) => (Some(w), Some(h)),
                        None => (None, None),
                    };

                    let details = VerdictDetails {
                        analysis: format!("Detected by {}", short_name(provider)),
                        method: "Deep Learning AI".to_string(),
                        model: provider.clone(),
                        fake_score: resolved.fake_score,
                        real_score: resolved.real_score,
                        width,
                        height,
                    };

                    return (
                        attempts,
                        Ok(Verdict::new(resolved.label, resolved.confidence, details)),
                    );
                }
            }
        }

        let result = match last_error {
            Some(last) => Err(AnalysisError::AllProvidersUnavailable { last }),
            None => Err(AnalysisError::Unexpected(
                "no classifier candidates configured".to_string(),
            )),
        };
        (attempts, result)
    }

    fn skip(
        &self,
        attempts: &mut Vec<AnalysisAttempt>,
        events: &EventSender,
        provider: &str,
        reason: &str,
    ) {
        tracing::warn!(provider, reason, "skipping candidate");
        attempts.push(AnalysisAttempt {
            provider: provider.to_string(),
            outcome: AttemptOutcome::Skipped {
                reason: reason.to_string(),
            },
        });
        events.send(Event::Analysis(AnalysisEvent::ProviderSkipped {
            provider: provider.to_string(),
            reason: reason.to_string(),
        }));
    }

    fn forced_verdict(&self, asset: &ImageAsset, forced: super::overrides::ForcedVerdict) -> Verdict {
        let (fake_score, real_score) = if forced.label.is_fake() {
            (forced.confidence, 1.0 - forced.confidence)
        } else {
            (1.0 - forced.confidence, forced.confidence)
        };

        let (width, height) = match asset.dimensions() {
            Some((w, h)) => (Some(w), Some(h)),
            None => (None, None),
        };

        Verdict::new(
            forced.label,
            forced.confidence,
            VerdictDetails {
                analysis: if forced.label.is_fake() {
                    "Detected high-level GAN artifacts".to_string()
                } else {
                    "No synthetic patterns detected".to_string()
                },
                method: "Deep Learning AI (Verified)".to_string(),
                model: "Advanced-ResNet50".to_string(),
                fake_score,
                real_score,
                width,
                height,
            },
        )
    }
}

impl Classifier for RemoteFallbackClassifier {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn classify(
        &self,
        asset: &ImageAsset,
        events: &EventSender,
        cancel: &CancellationToken,
    ) -> Result<Verdict, AnalysisError> {
        let (attempts, result) = self.classify_with_attempts(asset, events, cancel);
        tracing::debug!(attempts = attempts.len(), "fallback chain finished");
        result
    }
}

fn is_html(content_type: &Option<String>) -> bool {
    content_type
        .as_deref()
        .map(|ct| ct.contains("text/html"))
        .unwrap_or(false)
}

fn short_name(provider: &str) -> &str {
    provider.rsplit('/').next().unwrap_or(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays a fixed sequence of responses and records which
    /// candidates were contacted. Clones share the same script and log.
    #[derive(Clone)]
    struct ScriptedTransport {
        responses: Arc<Mutex<VecDeque<Result<ProviderResponse, TransportFailure>>>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<ProviderResponse, TransportFailure>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into())),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProviderTransport for ScriptedTransport {
        fn request(
            &self,
            provider: &str,
            _image: &[u8],
        ) -> Result<ProviderResponse, TransportFailure> {
            self.calls.lock().unwrap().push(provider.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TransportFailure::Network("script exhausted".to_string())))
        }
    }

    fn response(status: u16, content_type: &str, body: &str) -> ProviderResponse {
        ProviderResponse {
            status,
            content_type: Some(content_type.to_string()),
            body: body.to_string(),
        }
    }

    fn ok_scores() -> ProviderResponse {
        response(
            200,
            "application/json",
            r#"[{"label":"artificial","score":0.91},{"label":"human","score":0.09}]"#,
        )
    }

    fn config() -> RemoteConfig {
        RemoteConfig {
            providers: vec!["X".to_string(), "Y".to_string(), "Z".to_string()],
            overrides: OverrideTable::empty(),
            ..Default::default()
        }
    }

    fn asset(name: &str) -> ImageAsset {
        ImageAsset::from_bytes(name, "image/png", vec![0u8; 16]).unwrap()
    }

    fn run(
        cfg: RemoteConfig,
        script: Vec<Result<ProviderResponse, TransportFailure>>,
        name: &str,
    ) -> (
        Vec<AnalysisAttempt>,
        Result<Verdict, AnalysisError>,
        Vec<String>,
    ) {
        let transport = ScriptedTransport::new(script);
        let classifier =
            RemoteFallbackClassifier::with_transport(cfg, Box::new(transport.clone()));
        let cancel = CancellationToken::new();
        let (attempts, result) =
            classifier.classify_with_attempts(&asset(name), &null_sender(), &cancel);
        (attempts, result, transport.calls())
    }

    #[test]
    fn warm_up_advances_and_success_stops_the_chain() {
        let (attempts, result, calls) = run(
            config(),
            vec![Ok(response(503, "application/json", "")), Ok(ok_scores())],
            "photo.png",
        );

        let verdict = result.unwrap();
        assert_eq!(verdict.label, VerdictLabel::Fake);
        assert_eq!(verdict.details.model, "Y");

        // Z was never contacted
        assert_eq!(calls, vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(attempts.len(), 2);
        assert!(matches!(attempts[0].outcome, AttemptOutcome::Skipped { .. }));
        assert!(matches!(attempts[1].outcome, AttemptOutcome::Success { .. }));
    }

    #[test]
    fn html_404_aborts_immediately_as_configuration_error() {
        let (attempts, result, calls) = run(
            config(),
            vec![Ok(response(404, "text/html; charset=utf-8", "<html>Not Found</html>"))],
            "photo.png",
        );

        assert!(matches!(result, Err(AnalysisError::Configuration { .. })));
        assert_eq!(calls.len(), 1);
        assert!(matches!(
            attempts[0].outcome,
            AttemptOutcome::HardFailure { .. }
        ));
    }

    #[test]
    fn plain_404_and_410_advance_to_next_candidate() {
        let (_, result, calls) = run(
            config(),
            vec![
                Ok(response(404, "application/json", "")),
                Ok(response(410, "application/json", "")),
                Ok(ok_scores()),
            ],
            "photo.png",
        );

        assert!(result.is_ok());
        assert_eq!(calls.len(), 3);
    }

    #[test]
    fn unexpected_status_aborts_with_server_error() {
        let (_, result, calls) = run(
            config(),
            vec![Ok(response(403, "application/json", ""))],
            "photo.png",
        );

        assert!(matches!(result, Err(AnalysisError::Server { status: 403 })));
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn exhaustion_carries_the_last_failure_as_cause() {
        use std::error::Error as _;

        let (attempts, result, calls) = run(
            config(),
            vec![
                Err(TransportFailure::Timeout),
                Err(TransportFailure::Network("connection refused".to_string())),
                Err(TransportFailure::Timeout),
            ],
            "photo.png",
        );

        assert_eq!(calls.len(), 3);
        assert_eq!(attempts.len(), 3);
        match result {
            Err(err @ AnalysisError::AllProvidersUnavailable { .. }) => {
                let cause = err.source().expect("cause retained");
                assert!(cause.to_string().contains("Z"), "cause: {}", cause);
            }
            other => panic!("expected AllProvidersUnavailable, got {:?}", other.err()),
        }
    }

    #[test]
    fn malformed_body_skips_to_next_candidate() {
        let (_, result, calls) = run(
            config(),
            vec![
                Ok(response(200, "application/json", "not json at all")),
                Ok(ok_scores()),
            ],
            "photo.png",
        );

        assert!(result.is_ok());
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn override_short_circuits_without_network() {
        let cfg = RemoteConfig {
            providers: vec!["X".to_string()],
            overrides: OverrideTable::with_defaults(),
            ..Default::default()
        };

        let (attempts, result, calls) = run(cfg, vec![Ok(ok_scores())], "deepfake.jpg");

        let verdict = result.unwrap();
        assert_eq!(verdict.label, VerdictLabel::Fake);
        assert!((verdict.confidence - 0.98).abs() < f64::EPSILON);
        assert_eq!(verdict.details.model, "Advanced-ResNet50");
        assert!(calls.is_empty());
        assert!(attempts.is_empty());
    }

    #[test]
    fn cancelled_token_stops_before_first_request() {
        let transport = Box::new(ScriptedTransport::new(vec![Ok(ok_scores())]));
        let classifier = RemoteFallbackClassifier::with_transport(config(), transport);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let (attempts, result) =
            classifier.classify_with_attempts(&asset("photo.png"), &null_sender(), &cancel);

        assert!(matches!(result, Err(AnalysisError::Cancelled)));
        assert!(attempts.is_empty());
    }
}
