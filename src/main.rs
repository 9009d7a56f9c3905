//! MCP server generating Playwright assertion snippets and inserting them into a document.

use anyhow::Result;
use clap::Parser;
use inspect_assert::{assert_tools::InspectAssert, config::GeneratorConfig};
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;

/// Model Context Protocol server for Playwright assertion snippets
#[derive(Parser)]
#[command(
    name = "inspect_assert_mcp",
    version = env!("CARGO_PKG_VERSION"),
    about = "MCP server that turns a picked locator into a Playwright assertion",
    long_about = "A Model Context Protocol (MCP) server that generates Playwright assertion code for a \
                  locator, copies it to the clipboard and inserts it below the cursor of the active \
                  document with matching indentation.\n\n\
                  Generator settings can also be set through INSPECT_ASSERT_MAX_DIFF_PIXEL_RATIO, \
                  INSPECT_ASSERT_DROPDOWN_SETTLE_MS and INSPECT_ASSERT_DROPDOWN_TIMEOUT_MS; flags win."
)]
struct Args {
    /// Allowed fraction of differing pixels in screenshot assertions (default: 0.01)
    #[arg(long, value_name = "RATIO")]
    max_diff_pixel_ratio: Option<f64>,

    /// Wait after clicking a select before looking for its dropdown (default: 1000)
    #[arg(long, value_name = "MILLIS")]
    dropdown_settle_ms: Option<u64>,

    /// First wait for a select dropdown before clicking again (default: 3000)
    #[arg(long, value_name = "MILLIS")]
    dropdown_timeout_ms: Option<u64>,

    /// Also copy generated code to the OS clipboard
    #[arg(long, help = "Mirror generated code to the system clipboard when one is available")]
    system_clipboard: bool,

    /// Log to rolling file instead of stderr
    #[arg(long, help = "Write logs to a rolling daily file instead of stderr")]
    log_to_file: bool,

    /// Enable verbose (debug-level) logging
    #[arg(long, help = "Enable verbose debug logging")]
    verbose: bool,
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::from_env()?;
        if let Some(ratio) = self.max_diff_pixel_ratio {
            info!("Using custom max diff pixel ratio: {ratio}");
            config = config.with_max_diff_pixel_ratio(ratio);
        }
        if let Some(millis) = self.dropdown_settle_ms {
            info!("Using custom dropdown settle time: {millis} ms");
            config = config.with_dropdown_settle_ms(millis);
        }
        if let Some(millis) = self.dropdown_timeout_ms {
            info!("Using custom dropdown timeout: {millis} ms");
            config = config.with_dropdown_timeout_ms(millis);
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    inspect_assert::logging::init_subscriber(args.log_to_file, args.verbose);

    info!("Starting MCP server");
    let config = args.generator_config()?;
    if args.system_clipboard {
        info!("System clipboard mirroring enabled");
    }

    let service = InspectAssert::new(config)
        .with_system_clipboard(args.system_clipboard)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "prog",
            "--max-diff-pixel-ratio",
            "0.2",
            "--dropdown-timeout-ms",
            "500",
        ]);
        let config = args.generator_config().unwrap();
        assert_eq!(config.max_diff_pixel_ratio, 0.2);
        assert_eq!(config.dropdown_timeout_ms, 500);
    }

    #[test]
    fn test_out_of_range_ratio_rejected() {
        let args = Args::parse_from(["prog", "--max-diff-pixel-ratio", "3"]);
        assert!(args.generator_config().is_err());
    }
}
