//! Example: Basic usage of the hx engine
//!
//! Runs a click → request → swap round trip against the in-memory server.
//! With `HX_BASE_URL=http://host:port` set, the same page talks to a real
//! server over HTTP instead (it must answer `GET /greeting`).

use std::time::Duration;

use anyhow::Context;
use hx_engine::{Engine, FakeServer, HttpConfig, HttpTransport, Method};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r##"<html><body>
    <button id="greet" hx-get="/greeting" hx-target="#out">Say hello</button>
    <div id="out">nothing yet</div>
</body></html>"##;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("hx engine v{}", hx_engine::VERSION);

    let document = hx_html::parse(PAGE);
    let fake = FakeServer::new();
    fake.respond_with(
        Method::Get,
        "/greeting",
        r#"<p>Hello! <a id="more" hx-get="/more" hx-swap="append">more</a></p>"#,
    );
    fake.respond_with(Method::Get, "/more", " and again");

    let mut engine = match std::env::var("HX_BASE_URL") {
        Ok(base) => {
            let transport = HttpTransport::new(HttpConfig {
                base_url: Some(base),
                ..Default::default()
            })
            .context("invalid HX_BASE_URL")?;
            Engine::new(document, transport)
        }
        Err(_) => Engine::new(document, fake.clone()),
    };
    engine.process_document();

    let greet = engine.by_id("greet").context("page has no #greet button")?;
    engine.click(greet);
    fake.respond();
    while engine.in_flight() > 0 {
        engine.pump_wait(Duration::from_millis(500));
    }

    let out = engine.by_id("out").context("page has no #out div")?;
    println!("#out: {}", engine.inner_html(out));

    if let Some(more) = engine.by_id("more") {
        engine.click(more);
        fake.respond();
        while engine.in_flight() > 0 {
            engine.pump_wait(Duration::from_millis(500));
        }
        println!("#out: {}", engine.inner_html(out));
    }

    Ok(())
}
