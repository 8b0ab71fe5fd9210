use crate::prelude::*;
use std::ops::Deref;
use tracing_subscriber::prelude::*;

/// Installs the global `tracing` subscriber. Meant to be called once at the
/// start of `main`, the library itself never calls it.
///
/// The filter is read from the `WISTIA_LOG` env var (e.g. `WISTIA_LOG=wistia=debug`).
/// Set `COLORS=0` to disable ANSI colors in the output.
pub fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_env("WISTIA_LOG");

    let fmt = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::env::var("COLORS").as_deref() != Ok("0"))
        .with_writer(std::io::stderr)
        .pretty();

    tracing_subscriber::registry()
        .with(fmt)
        .with(env_filter)
        .with(tracing_error::ErrorLayer::default())
        .init();

    init_panic_hook();
}

fn init_panic_hook() {
    let current_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // Call the default hook first, the panic may happen inside of the
        // `tracing` machinery itself, in which case nothing below reaches the logs.
        current_hook(panic_info);

        let location = panic_info
            .location()
            .map(|location| format!("{}:{}", location.file(), location.line()));

        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<String>()
            .map(<_>::deref)
            .or_else(|| payload.downcast_ref::<&str>().map(<_>::deref))
            .unwrap_or("<unknown>");

        error!(
            target: "panic",
            thread = std::thread::current().name(),
            location,
            span_trace = %tracing_error::SpanTrace::capture(),
            "{message}"
        );
    }));
}
