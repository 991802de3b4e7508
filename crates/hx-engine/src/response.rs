//! Response Interpretation

use hx_net::{NetError, Response};

use crate::{ExchangeError, ExchangeStatus};

/// What to do with a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapDecision {
    /// Swap this markup into the target
    Swap(String),
    /// Success without content; leave the document alone
    NoSwap,
    /// Report and leave the document alone
    Fail(ExchangeError),
}

impl SwapDecision {
    /// Final exchange status this decision implies
    pub fn status(&self) -> ExchangeStatus {
        match self {
            SwapDecision::Swap(_) => ExchangeStatus::Succeeded,
            SwapDecision::NoSwap => ExchangeStatus::NoContent,
            SwapDecision::Fail(_) => ExchangeStatus::Failed,
        }
    }
}

/// Classifies transport results
pub struct ResponseInterpreter;

impl ResponseInterpreter {
    pub fn interpret(result: Result<Response, NetError>) -> SwapDecision {
        match result {
            Ok(response) => Self::classify(response.status, response.body),
            Err(err) => SwapDecision::Fail(ExchangeError::NetworkFailure(err.to_string())),
        }
    }

    pub fn classify(status: u16, body: String) -> SwapDecision {
        match status {
            204 => SwapDecision::NoSwap,
            200..=299 => SwapDecision::Swap(body),
            status => SwapDecision::Fail(ExchangeError::HttpError { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ResponseInterpreter::classify(200, "ok".into()), SwapDecision::Swap("ok".into()));
        assert_eq!(ResponseInterpreter::classify(201, "".into()), SwapDecision::Swap(String::new()));
        assert_eq!(ResponseInterpreter::classify(204, "ignored".into()), SwapDecision::NoSwap);
        assert_eq!(
            ResponseInterpreter::classify(304, "".into()),
            SwapDecision::Fail(ExchangeError::HttpError { status: 304 })
        );
        assert_eq!(
            ResponseInterpreter::classify(500, "boom".into()).status(),
            ExchangeStatus::Failed
        );
    }

    #[test]
    fn test_network_error() {
        let decision = ResponseInterpreter::interpret(Err(NetError::Network("refused".into())));
        match decision {
            SwapDecision::Fail(ExchangeError::NetworkFailure(reason)) => assert!(reason.contains("refused")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
