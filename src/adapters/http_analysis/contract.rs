// Wire contracts spoken by the analysis service

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::errors::WorkflowError;
use crate::domain::model::{Classification, Confidence, Verdict};
use crate::error::ClientError;

/// Prediction label the `analyze` contract uses for authentic content
const AUTHENTIC_PREDICTION: &str = "real";

/// Request/response convention of the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ServiceContract {
    /// `POST /analyze`, field `video`, body `{ "prediction": "real" | ... }`
    #[default]
    Analyze,
    /// `POST /detect-deepfake/`, field `file`, body `{ "overall_result": bool, "confidence": n }`
    DetectDeepfake,
}

#[derive(Debug, Deserialize)]
struct PredictionBody {
    prediction: String,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OverallResultBody {
    overall_result: bool,
    #[serde(default)]
    confidence: Option<f64>,
}

impl ServiceContract {
    /// Multipart field carrying the video binary
    pub fn field_name(&self) -> &'static str {
        match self {
            ServiceContract::Analyze => "video",
            ServiceContract::DetectDeepfake => "file",
        }
    }

    /// Path relative to the service root
    pub fn path(&self) -> &'static str {
        match self {
            ServiceContract::Analyze => "analyze",
            ServiceContract::DetectDeepfake => "detect-deepfake/",
        }
    }

    /// Resolve the request URL against the configured service root.
    ///
    /// Any path prefix on the root is preserved.
    pub fn request_url(&self, root: &Url) -> Result<Url, url::ParseError> {
        let mut base = root.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(self.path())
    }

    /// Turn a 2xx response body into a verdict
    pub fn parse_verdict(&self, body: &[u8]) -> Result<Verdict, WorkflowError> {
        let (classification, confidence) = match self {
            ServiceContract::Analyze => {
                let parsed: PredictionBody = serde_json::from_slice(body)
                    .map_err(|e| WorkflowError::malformed(e.to_string()))?;
                if parsed.prediction.is_empty() {
                    return Err(WorkflowError::malformed("empty prediction"));
                }
                let classification = if parsed.prediction == AUTHENTIC_PREDICTION {
                    Classification::Authentic
                } else {
                    Classification::Manipulated
                };
                (classification, parsed.confidence)
            }
            ServiceContract::DetectDeepfake => {
                let parsed: OverallResultBody = serde_json::from_slice(body)
                    .map_err(|e| WorkflowError::malformed(e.to_string()))?;
                let classification = if parsed.overall_result {
                    Classification::Manipulated
                } else {
                    Classification::Authentic
                };
                (classification, parsed.confidence)
            }
        };

        let confidence = match confidence {
            Some(value) => Some(Confidence::new(value).ok_or_else(|| {
                WorkflowError::malformed(format!("confidence {} outside [0, 1]", value))
            })?),
            None => None,
        };

        Ok(Verdict::new(classification, confidence))
    }
}

impl fmt::Display for ServiceContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceContract::Analyze => write!(f, "analyze"),
            ServiceContract::DetectDeepfake => write!(f, "detect-deepfake"),
        }
    }
}

impl FromStr for ServiceContract {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "analyze" => Ok(ServiceContract::Analyze),
            "detect-deepfake" | "detect_deepfake" => Ok(ServiceContract::DetectDeepfake),
            _ => Err(ClientError::UnknownContract {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ServiceContract {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_request_urls() {
        let analyze = ServiceContract::Analyze;
        let detect = ServiceContract::DetectDeepfake;
        assert_eq!(
            analyze.request_url(&root("http://localhost:8000")).unwrap().as_str(),
            "http://localhost:8000/analyze"
        );
        assert_eq!(
            detect.request_url(&root("http://localhost:8000/")).unwrap().as_str(),
            "http://localhost:8000/detect-deepfake/"
        );
        assert_eq!(
            analyze.request_url(&root("https://example.com/api")).unwrap().as_str(),
            "https://example.com/api/analyze"
        );
    }

    #[test]
    fn test_field_names() {
        assert_eq!(ServiceContract::Analyze.field_name(), "video");
        assert_eq!(ServiceContract::DetectDeepfake.field_name(), "file");
    }

    #[test]
    fn test_parse_prediction_real() {
        let verdict = ServiceContract::Analyze.parse_verdict(br#"{"prediction":"real"}"#).unwrap();
        assert_eq!(verdict, Verdict::authentic());
    }

    #[test]
    fn test_parse_prediction_other_is_manipulated() {
        for label in ["fake", "REAL", "deepfake"] {
            let body = format!(r#"{{"prediction":"{}"}}"#, label);
            let verdict = ServiceContract::Analyze.parse_verdict(body.as_bytes()).unwrap();
            assert_eq!(verdict.classification, Classification::Manipulated);
        }
    }

    #[test]
    fn test_parse_prediction_with_confidence() {
        let verdict = ServiceContract::Analyze
            .parse_verdict(br#"{"prediction":"fake","confidence":0.91}"#)
            .unwrap();
        assert_eq!(verdict.confidence.map(|c| c.value()), Some(0.91));
    }

    #[test]
    fn test_parse_overall_result() {
        let contract = ServiceContract::DetectDeepfake;
        let fake = contract
            .parse_verdict(br#"{"overall_result":true,"confidence":0.75}"#)
            .unwrap();
        assert_eq!(fake.classification, Classification::Manipulated);
        assert_eq!(fake.confidence.map(|c| c.as_percentage()).as_deref(), Some("75.00%"));

        let genuine = contract.parse_verdict(br#"{"overall_result":false}"#).unwrap();
        assert_eq!(genuine, Verdict::authentic());
    }

    #[test]
    fn test_parse_malformed_bodies() {
        let cases: [(ServiceContract, &[u8]); 7] = [
            (ServiceContract::Analyze, b"not json"),
            (ServiceContract::Analyze, b"{}"),
            (ServiceContract::Analyze, br#"{"prediction":null}"#),
            (ServiceContract::Analyze, br#"{"prediction":""}"#),
            (ServiceContract::Analyze, br#"{"prediction":"real","confidence":3.0}"#),
            (ServiceContract::DetectDeepfake, br#"{"prediction":"real"}"#),
            (ServiceContract::DetectDeepfake, br#"{"overall_result":"yes"}"#),
        ];
        for (contract, body) in cases {
            let err = contract.parse_verdict(body).unwrap_err();
            assert!(matches!(err, WorkflowError::Protocol { .. }), "{:?}", err);
            assert_eq!(err.to_string(), "malformed response");
        }
    }

    #[test]
    fn test_contract_from_str() {
        assert_eq!("analyze".parse::<ServiceContract>().unwrap(), ServiceContract::Analyze);
        assert_eq!(
            "Detect-Deepfake".parse::<ServiceContract>().unwrap(),
            ServiceContract::DetectDeepfake
        );
        assert!("classify".parse::<ServiceContract>().is_err());
    }
}
