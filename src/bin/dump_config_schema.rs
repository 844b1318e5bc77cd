use anyhow::Result;

/// Prints the JSON schema of `config.toml` for editor tooling.
fn main() -> Result<()> {
    let schema = neuroscribe::Config::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
