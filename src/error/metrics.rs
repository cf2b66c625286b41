use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to bind statsd socket: {source}")]
    StatsdBind {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to resolve statsd address '{addr}': {source}")]
    StatsdResolve {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("No addresses resolved for statsd '{addr}'.")]
    StatsdNoAddress { addr: String },
    #[error("Failed to connect statsd socket to '{addr}': {source}")]
    StatsdConnect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
