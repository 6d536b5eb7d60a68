use anyhow::{anyhow, Context, Result};
use arm_core::{ArmPipeline, PipelineConfig};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;

/// Generate, rate-limit and solve a joint-space move of a two-link arm
#[derive(Parser, Debug)]
#[clap(name = "arm_pipeline")]
#[clap(author, version)]
#[clap(about, long_about = None)]
struct CmdOptions {
    /// JSON file with a pipeline configuration
    #[clap(long, short)]
    config: Option<PathBuf>,
    /// Parameter override, e.g. `--set goal_theta1=-1.57` (repeatable)
    #[clap(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
    /// Number of trajectory samples, endpoints included
    #[clap(long)]
    samples: Option<usize>,
    /// Joint velocity limit [rad/s]
    #[clap(long)]
    velocity_limit: Option<f64>,
    /// Length of link 1 [m]
    #[clap(long)]
    link1: Option<f64>,
    /// Length of link 2 [m]
    #[clap(long)]
    link2: Option<f64>,
    /// Show every Nth joint sample in the text report
    #[clap(long, short, default_value_t = 5)]
    decimate: usize,
    /// Print the full report as JSON instead of text
    #[clap(long, default_value_t = false)]
    json: bool,
}

fn parse_override(pair: &str) -> Result<(String, f64)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got `{}`", pair))?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("value of `{}` is not a number", key))?;
    Ok((key.trim().to_string(), value))
}

fn load_config(args: &CmdOptions) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let params = args
        .overrides
        .iter()
        .map(|pair| parse_override(pair))
        .collect::<Result<HashMap<_, _>>>()?;
    config.configure(&params)?;

    if let Some(samples) = args.samples {
        config.num_samples = samples;
    }
    if let Some(limit) = args.velocity_limit {
        config.velocity_limit = limit;
    }
    if let Some(link1) = args.link1 {
        config.geometry.link1_length = link1;
    }
    if let Some(link2) = args.link2 {
        config.geometry.link2_length = link2;
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CmdOptions::parse();

    let config = load_config(&args)?;
    let pipeline = ArmPipeline::new(config).context("invalid pipeline configuration")?;
    let report = pipeline.run();

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.text(args.decimate)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        assert_eq!(
            parse_override("goal_theta1=-1.5").unwrap(),
            ("goal_theta1".to_string(), -1.5)
        );
        assert!(parse_override("goal_theta1").is_err());
        assert!(parse_override("goal_theta1=fast").is_err());
    }

    #[test]
    fn flags_override_file_and_pairs() {
        let args = CmdOptions::parse_from([
            "arm_pipeline",
            "--set",
            "num_samples=11",
            "--set",
            "velocity_limit=0.5",
            "--velocity-limit",
            "0.25",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.num_samples, 11);
        assert_eq!(config.velocity_limit, 0.25);
        assert_eq!(args.decimate, 5);
    }
}
