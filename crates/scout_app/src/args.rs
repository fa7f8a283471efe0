use std::path::PathBuf;

pub const USAGE: &str = "\
usage: scout_app [options] <url>

options:
  --server <base>     analysis server base URL (default http://localhost:8080)
  --bots <a,b,...>    bot user-agents to simulate (default googlebot)
  --ai                request AI content enrichment
  --token <token>     bearer token for authenticated deployments
  --state-dir <dir>   directory for the analysis history file (default .)
  --log-file          write logs to ./scout.log instead of the terminal

while an analysis runs:
  c  cancel the analysis
  w  keep watching (answer to the long-run prompt)
  l  leave and receive the result by email (answer to the long-run prompt)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub url: String,
    pub server: String,
    pub bots: Vec<String>,
    pub ai_enrichment: bool,
    pub token: Option<String>,
    pub state_dir: PathBuf,
    pub log_to_file: bool,
}

pub fn parse(mut args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut url = None;
    let mut server = "http://localhost:8080".to_string();
    let mut bots = vec!["googlebot".to_string()];
    let mut ai_enrichment = false;
    let mut token = None;
    let mut state_dir = PathBuf::from(".");
    let mut log_to_file = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--server" => {
                server = args.next().ok_or("--server needs a value")?;
            }
            "--bots" => {
                let list = args.next().ok_or("--bots needs a value")?;
                bots = list
                    .split(',')
                    .map(str::trim)
                    .filter(|bot| !bot.is_empty())
                    .map(ToOwned::to_owned)
                    .collect();
                if bots.is_empty() {
                    return Err("--bots needs at least one bot name".to_string());
                }
            }
            "--ai" => ai_enrichment = true,
            "--token" => {
                token = Some(args.next().ok_or("--token needs a value")?);
            }
            "--state-dir" => {
                state_dir = PathBuf::from(args.next().ok_or("--state-dir needs a value")?);
            }
            "--log-file" => log_to_file = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown option {other}"));
            }
            other => {
                if url.replace(other.to_string()).is_some() {
                    return Err("expected exactly one url".to_string());
                }
            }
        }
    }

    Ok(CliOptions {
        url: url.ok_or("expected a url to analyze")?,
        server,
        bots,
        ai_enrichment,
        token,
        state_dir,
        log_to_file,
    })
}
