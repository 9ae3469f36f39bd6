use logbridge::{log_error, log_info};

#[derive(Debug)]
struct MissingConfig(&'static str);

impl std::fmt::Display for MissingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing configuration key {}", self.0)
    }
}

impl std::error::Error for MissingConfig {}

fn main() -> std::io::Result<()> {
    // run with LOGBRIDGE_DELEGATE_FACTORY=file (or log, or an unknown name to see the fallback)
    let _guard = logbridge::guard();
    let logger = logbridge::get_logger("main");
    log_info!(
        logger,
        "logging through the \"{0}\" backend",
        logbridge::global().selected_backend().unwrap_or_default()
    )?;

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let logger = logbridge::get_logger(&format!("worker {i}"));
                log_info!(logger, "hello from worker {0}", i)
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked")?;
    }

    let err = MissingConfig("db.url");
    log_error!(logger, "{0} could not start", err, "server")?;
    Ok(())
}
