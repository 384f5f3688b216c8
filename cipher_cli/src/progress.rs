use cipher_core::ProgressSink;
use std::error::Error;
use std::io::Write;
use tokio::sync::mpsc;

pub type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Runs `job` on the blocking pool and renders its progress on stderr until
/// the job drops its sink.
pub async fn run_with_progress<T, F>(label: &'static str, quiet: bool, job: F) -> CliResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn ProgressSink) -> cipher_core::Result<T> + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<u8>();
    let worker = tokio::task::spawn_blocking(move || {
        let sink = move |percent: u8| {
            let _ = tx.send(percent);
        };
        job(&sink)
    });

    let mut stderr = std::io::stderr();
    while let Some(percent) = rx.recv().await {
        log::trace!("{label}: {percent}%");
        if !quiet {
            let _ = write!(stderr, "\r{label}: {percent:>3}%");
            let _ = stderr.flush();
        }
    }
    if !quiet {
        let _ = writeln!(stderr);
    }

    Ok(worker.await??)
}

/// Runs a CPU-bound job without progress reporting.
pub async fn run_blocking<T, F>(job: F) -> CliResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> cipher_core::Result<T> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(job).await??)
}
