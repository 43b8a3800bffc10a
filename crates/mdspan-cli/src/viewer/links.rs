//! Opening links in the system browser

/// Hand a URL to the platform opener without waiting for it
///
/// Failures are logged; the viewer keeps running either way.
pub fn open_url(url: &str) {
    tracing::info!(url, "Opening link");
    if let Err(e) = open::that_detached(url) {
        tracing::warn!(url, error = %e, "Failed to open link");
    }
}
