//! rsuaparser 命令行工具
//! 从参数或标准输入（每行一条）读取 User-Agent，逐条输出解析结果

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rsuaparser::{ConfigManager, MissingPolicy, UaParser, DEFAULT_CACHE_CAPACITY};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rsuaparser", version, about = "Classify user-agent strings with ua-parser rules", long_about = None)]
struct Cli {
    /// Rule file (ua-parser JSON schema)
    #[arg(short, long, default_value = "data/regexes.json")]
    rules: PathBuf,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Leave OS/device out when no rule matches instead of reporting "Other"
    #[arg(long)]
    absent: bool,

    /// Result cache capacity, 0 uses the fallback capacity
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// User-agent strings; read from stdin when omitted (one per line, blank lines skipped, no trimming)
    agents: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let missing_policy = if cli.absent { MissingPolicy::Absent } else { MissingPolicy::Other };
    let config = ConfigManager::custom()
        .rule_path(&cli.rules)
        .cache_capacity(cli.cache_capacity)
        .missing_policy(missing_policy)
        .build();

    let parser = UaParser::with_config(config)
        .with_context(|| format!("failed to load rules from {}", cli.rules.display()))?;
    info!("Parser ready: {:?}", parser.rule_stats());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.agents.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            if let Some(agent) = agent_from_line(&line) {
                print_result(&mut out, &parser, agent, cli.json)?;
            }
        }
    } else {
        for agent in &cli.agents {
            print_result(&mut out, &parser, agent, cli.json)?;
        }
    }

    out.flush()?;
    debug!("Cache entries at exit: {}", parser.cache_len());
    Ok(())
}

fn print_result(out: &mut impl Write, parser: &UaParser, agent: &str, json: bool) -> anyhow::Result<()> {
    match (parser.classify(agent), json) {
        (Some(ua), true) => writeln!(out, "{}", serde_json::to_string(ua.as_ref())?)?,
        (Some(ua), false) => writeln!(out, "{ua}")?,
        (None, true) => writeln!(out, "null")?,
        (None, false) => writeln!(out, "Unknown")?,
    }
    Ok(())
}

// `lines()` 已去掉 `\n` / `\r\n`，其余内容原样作为输入与缓存键
fn agent_from_line(line: &str) -> Option<&str> {
    if line.is_empty() { None } else { Some(line) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stdin_lines_keep_whitespace() {
        let input = Cursor::new("  Wget/1.0 \r\n\nFirefox/60.0\n");
        let agents: Vec<String> = input
            .lines()
            .map(|line| line.unwrap())
            .filter_map(|line| agent_from_line(&line).map(str::to_string))
            .collect();
        assert_eq!(agents, vec!["  Wget/1.0 ", "Firefox/60.0"]);
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::parse_from(["rsuaparser", "--json", "--cache-capacity", "8", "Wget/1.0"]);
        assert!(cli.json);
        assert!(!cli.absent);
        assert_eq!(cli.cache_capacity, 8);
        assert_eq!(cli.agents, vec!["Wget/1.0"]);
        assert_eq!(cli.rules, PathBuf::from("data/regexes.json"));
    }
}
