//! hx Engine
//!
//! Declarative hypermedia exchange: elements carry `hx-*` attributes saying
//! which event issues a request, where the response goes and how it is merged.
//!
//! Pipeline: DOM event → [`TriggerResolver`] → [`RequestDispatcher`] →
//! [`Transport`] → [`ResponseInterpreter`] → [`SwapEngine`] → [`Activator`].
//! [`Engine`] wires the stages together over one [`Document`].

mod activate;
mod attributes;
mod config;
mod dispatch;
mod engine;
mod error;
mod reporter;
mod response;
mod swap;
mod trigger;

pub use activate::{Activation, Activator};
pub use attributes::{AttributeReader, Directives, HxAttributeReader, TargetSpec};
pub use config::EngineConfig;
pub use dispatch::{Exchange, ExchangeStatus, RequestDispatcher};
pub use engine::{ElementState, Engine};
pub use error::{EngineError, ExchangeError};
pub use reporter::{CollectingReporter, ErrorReporter, TracingReporter};
pub use response::{ResponseInterpreter, SwapDecision};
pub use swap::{SwapEngine, SwapMode, SwapPlan, SwapResult};
pub use trigger::{Binding, Listener, TriggerEntry, TriggerResolver, TriggerSpec};

pub use hx_dom::{Document, NodeId};
pub use hx_net::{Completion, FakeServer, HttpConfig, HttpTransport, Method, Request, RequestId, Response, Transport};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
