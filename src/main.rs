use std::{env, fs};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use qrlua::{config::ParserConfig, grammar::LuaGrammar, parse_source};

const INPUT: &str = r#"
-- a little bit of everything
robot.motors = {left = 1, right = 2, [3] = "spare"}
speed, direction = 100, -robot.sensors:read("gyro") ^ 2
robot:say "hello"
answer = not ready and 6 * 7 or nil
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let source = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?,
        None => INPUT.to_string(),
    };

    let grammar = LuaGrammar::with_config(ParserConfig::default())?;
    let output = parse_source(&grammar, &source)?;

    if let Some(root) = &output.root {
        println!("{}", root.tree());
        println!();
        println!("{root}");
    }

    for error in &output.diagnostics {
        eprintln!("error: {}", error.render(&source));
    }

    if output.root.is_none() {
        anyhow::bail!("failed to parse program");
    }

    Ok(())
}
