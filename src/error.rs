use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `Valise`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ValiseError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Oracle (reasoning service) ──────────────────────────────────────
    #[error("oracle: {0}")]
    Oracle(#[from] OracleError),

    // ── Upstream media services ─────────────────────────────────────────
    #[error("upstream: {0}")]
    Upstream(#[from] UpstreamError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Oracle errors ──────────────────────────────────────────────────────────

/// Failures of the external reasoning call.
///
/// `Unavailable` covers everything that prevents an answer from arriving
/// (network, timeout, 5xx). A malformed answer is NOT an error here — the
/// turn evaluator recovers from that locally and the caller never sees it.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle unreachable: {0}")]
    Unavailable(String),

    #[error("oracle authentication failed: {0}")]
    Auth(String),

    #[error("oracle request failed: {0}")]
    Request(String),
}

// ─── Upstream media-service errors ──────────────────────────────────────────

/// Captioning / transcription / synthesis failures. Single-call boundaries:
/// no retries, no partial results — the whole turn fails with one reason.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("image captioning failed: {0}")]
    Captioning(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ValiseError>;
