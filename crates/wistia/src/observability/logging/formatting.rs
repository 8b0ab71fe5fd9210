use std::fmt;
use std::time::Duration;

#[must_use]
pub fn tracing_err<'a, E: std::error::Error + 'static>(err: &'a E) -> impl tracing::Value + 'a {
    err as &dyn std::error::Error
}

pub(crate) fn tracing_duration(duration: Duration) -> impl tracing::Value {
    tracing::field::display(display_with(move |f| write!(f, "{duration:.2?}")))
}

/// Displays the URL without its query string. The API password travels in the
/// query, so it must never reach the logs.
pub(crate) fn tracing_url(url: &url::Url) -> impl tracing::Value + '_ {
    tracing::field::display(display_with(move |f| {
        f.write_str(&url[..url::Position::AfterPath])
    }))
}

struct DisplayWith<F>(F);

fn display_with<F>(imp: F) -> DisplayWith<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    DisplayWith(imp)
}

impl<F> fmt::Display for DisplayWith<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.0)(f)
    }
}
