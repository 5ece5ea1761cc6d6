//! The subscriber routes structured events to the configured writer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ashe_cli::logging::{LogConfig, LogFormat, init_logging_with_writer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// One test per binary: the subscriber is process-global.
#[test]
fn json_events_carry_fields_and_respect_level() {
    let captured = Captured::default();
    let mut config = LogConfig::default()
        .with_level(LevelFilter::INFO)
        .with_format(LogFormat::Json)
        .with_ansi(false);
    config.use_env_filter = false;
    config.with_spans = false;
    init_logging_with_writer(&config, captured.clone());

    tracing::warn!(table = "Table 2 - Occupation (2)", year = 2023, "previous-year extract missing");
    tracing::info!("below the default level for other crates");

    let output = String::from_utf8(captured.0.lock().expect("lock").clone()).expect("utf8");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1, "{output}");
    assert!(lines[0].contains("\"level\":\"WARN\""));
    assert!(lines[0].contains("\"table\":\"Table 2 - Occupation (2)\""));
    assert!(lines[0].contains("\"year\":2023"));
}
