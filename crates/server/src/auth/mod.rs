pub mod cookies;
pub mod middleware;

/// Access token resolved for the current request, either read from the
/// cookie or obtained by the middleware's transparent refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
