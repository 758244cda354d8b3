use axum::Router;

/// A business module that contributes HTTP routes.
///
/// The `admind` binary collects every module and nests its routes under
/// `/{name}`.
pub trait Module: Send + Sync {
    /// Module name, used for logging and as the route prefix.
    fn name(&self) -> &str;

    /// Routes relative to `/{name}`, with state already attached.
    fn routes(&self) -> Router;
}
