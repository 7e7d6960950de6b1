//! Identity provider widget port

use async_trait::async_trait;
use exjobnet_domain::AuthResult;

/// Port for the third-party identity widget running in the page.
///
/// The widget (Google Identity Services in production) lives in the
/// embedding UI process; this trait is the seam through which the broker
/// drives it. Both interactive calls resolve with the provider's signed
/// assertion, which the broker then exchanges with the backend.
#[async_trait]
pub trait IdentityProviderClient: Send + Sync {
    /// Waits until the provider script is loaded and initialized.
    ///
    /// # Errors
    /// `ScriptLoadFailed` when the script never becomes available,
    /// `ProviderUnavailable` when initialization times out.
    async fn ensure_loaded(&self) -> AuthResult<()>;

    /// Opens the provider's consent popup and resolves with the assertion.
    ///
    /// # Errors
    /// `Cancelled` when the user closes the popup, `PopupBlocked` when the
    /// browser refuses to open it, plus the [`Self::ensure_loaded`] failure
    /// space.
    async fn prompt_popup(&self) -> AuthResult<String>;

    /// Renders the provider's interactive button into the given surface and
    /// resolves with the assertion once the user completes sign-in.
    ///
    /// Popups are unreliable on mobile browsers, so this is the
    /// mobile-optimized entry point; the failure space matches
    /// [`Self::prompt_popup`].
    ///
    /// # Errors
    /// Same as [`Self::prompt_popup`], minus `PopupBlocked`.
    async fn render_button(&self, container: &str) -> AuthResult<String>;
}
