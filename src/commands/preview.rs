use std::io;
use std::path::{Path, PathBuf};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::{
    PreviewArgs,
    config::{PreviewConfig, Settings},
};

pub async fn run(args: &PreviewArgs, config_file: Option<&Path>) -> Result<(), anyhow::Error> {
    let mut settings = Settings::load(config_file)?;
    if let Some(port) = args.port {
        settings.preview.port = port;
        settings.preview.max_port = settings.preview.max_port.max(port);
    }
    settings.validate_preview()?;

    let path = args.path.clone().unwrap_or_else(|| settings.output.clone());
    let dir = site_dir(&path)?;

    serve(&dir, &settings.preview, !args.no_open).await
}

/// Serve `dir` until Ctrl+C.
pub async fn serve(
    dir: &Path,
    preview: &PreviewConfig,
    open_browser: bool,
) -> Result<(), anyhow::Error> {
    let listener = bind_available(&preview.bind, preview.port, preview.max_port).await?;
    let port = listener.local_addr()?.port();
    if port != preview.port {
        println!("Port {} is in use, using {} instead", preview.port, port);
    }

    let serve_dir = ServeDir::new(dir).append_index_html_on_directories(true);
    let app = Router::new().fallback_service(serve_dir);

    // Determine the URL to display
    let display_host = if preview.bind == "0.0.0.0" {
        "localhost"
    } else {
        preview.bind.as_str()
    };
    let url = format!("http://{display_host}:{port}");

    println!("\nServing {} at {}", dir.display(), url);
    println!("Press Ctrl+C to stop\n");

    if open_browser
        && let Err(e) = open::that(&url)
    {
        eprintln!("Failed to open browser: {}", e);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("Preview server stopped");
    Ok(())
}

/// The directory to serve for `path`: the path itself, or its parent for a file.
fn site_dir(path: &Path) -> Result<PathBuf, anyhow::Error> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Path does not exist: {path}",
            path = path.display()
        ));
    }

    if path.is_file() {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Ok(parent.to_path_buf())
    } else {
        Ok(path.to_path_buf())
    }
}

/// Bind the first free port in `start..=max`.
async fn bind_available(bind: &str, start: u16, max: u16) -> io::Result<TcpListener> {
    for port in start..=max {
        match TcpListener::bind((bind, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "port in use");
            }
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AddrInUse,
        format!("no free port between {start} and {max}"),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
    }
}
