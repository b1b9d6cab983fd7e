// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cicerone CLI entrypoint.
//!
//! By default this runs the interactive authoring TUI and serves the tour
//! tools over MCP streamable HTTP at `http://127.0.0.1:<port>/mcp`.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool
//! integrations).

use std::error::Error;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};

use cicerone::model::CourseId;
use cicerone::store::{TourFolder, WriteDurability};

const DEFAULT_MCP_HTTP_PORT: u16 = 27587;
const DEFAULT_COURSE_ID: i64 = 101;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<course-dir>] [--course <id>] [--durable-writes] [--mcp-http-port <port>]\n  {program} --demo [--course <id>] [--mcp-http-port <port>]\n  {program} [<course-dir>] [--course <id>] [--durable-writes] --mcp\n  {program} --demo --mcp\n\nTUI mode (default) serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--mcp-http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\nIf course-dir is omitted, the current working directory is used.\n--course selects the course id the editor runs against (default {DEFAULT_COURSE_ID}).\n--demo uses a throwaway course folder and cannot be combined with course-dir.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp: bool,
    demo: bool,
    course_dir: Option<String>,
    course_id: Option<i64>,
    mcp_http_port: Option<u16>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--course" => {
                if options.course_id.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let course_id: i64 = raw.parse().map_err(|_| ())?;
                options.course_id = Some(course_id);
            }
            "--mcp-http-port" => {
                if options.mcp_http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.mcp_http_port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.course_dir.is_some() {
                    return Err(());
                }
                options.course_dir = Some(arg);
            }
        }
    }

    if options.demo && options.course_dir.is_some() {
        return Err(());
    }

    if options.mcp && options.mcp_http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn folder_for_options(options: &CliOptions) -> TourFolder {
    let dir = if options.demo {
        let now_millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        std::env::temp_dir()
            .join(format!("cicerone-demo-course-{}-{now_millis}", std::process::id()))
            .to_string_lossy()
            .into_owned()
    } else {
        options.course_dir.clone().unwrap_or_else(|| ".".to_owned())
    };

    let folder = TourFolder::new(dir);
    if options.durable_writes {
        folder.with_durability(WriteDurability::Durable)
    } else {
        folder
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "cicerone".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let course_id = CourseId::new(options.course_id.unwrap_or(DEFAULT_COURSE_ID));
        let folder = folder_for_options(&options);

        if options.mcp {
            let mcp = cicerone::mcp::CiceroneMcp::new(folder);
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        }

        let mcp_http_port = options.mcp_http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT);
        let mcp = cicerone::mcp::CiceroneMcp::new(folder.clone());

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", mcp_http_port)).await?;

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = std::sync::Arc::new(LocalSessionManager::default());
            let mcp_service = {
                let mcp = mcp.clone();
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
            };

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    eprintln!("cicerone: MCP HTTP server error: {err}");
                }
            });

            let tui_join = tokio::task::spawn_blocking(move || {
                cicerone::tui::run(folder, course_id).map_err(|err| err.to_string())
            })
            .await;

            shutdown_token.cancel();
            let _ = server_handle.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("cicerone: {err}");
        std::process::exit(1);
    }
}
