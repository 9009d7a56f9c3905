use anyhow::Result;
use rmcp::{
    ServiceExt,
    model::CallToolRequestParam,
    object,
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use tokio::process::Command;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("info,{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MCP client to exercise the assertion server");

    let client = ()
        .serve(TokioChildProcess::new(Command::new("cargo").configure(
            |cmd| {
                cmd.arg("run").arg("--bin").arg("inspect_assert_mcp");
            },
        ))?)
        .await?;

    let server_info = client.peer_info();
    tracing::info!("Connected to server: {server_info:#?}");

    let tools = client.list_all_tools().await?;
    tracing::info!("Available tools: {tools:#?}");

    let catalog = client
        .call_tool(CallToolRequestParam {
            name: "list_assertions".into(),
            arguments: None,
        })
        .await?;
    tracing::info!("Assertion catalog: {catalog:#?}");

    let generated = client
        .call_tool(CallToolRequestParam {
            name: "generate_assertion".into(),
            arguments: Some(object!({
                "selector": "getByRole('heading')",
                "assertion": "toContain",
                "value": "Welcome"
            })),
        })
        .await?;
    tracing::info!("Generated: {generated:#?}");

    let inserted = client
        .call_tool(CallToolRequestParam {
            name: "insert_assertion".into(),
            arguments: Some(object!({
                "selector": "getByLabel('Remember me')",
                "assertion": "toBeChecked",
                "document": "test('login', async ({ page }) => {\n    await page.goto('/');\n});",
                "cursor_line": 1,
                "cursor_character": 25
            })),
        })
        .await?;
    tracing::info!("Inserted: {inserted:#?}");

    client.cancel().await?;

    tracing::info!("Client run completed");
    Ok(())
}
