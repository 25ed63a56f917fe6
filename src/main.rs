//! Behavioral auth entrypoint: score one payload and print the verdict.
//! Reads the payload from a file or stdin; the verdict goes to stdout, logs and
//! the audit line to stderr.

use behavioral_auth::{
    config::AuthConfig,
    fusion::{ContinuousFusionEngine, DecisionFusionEngine},
    logging::{AuditEvent, StructuredLogger},
    model::{ContinuousModels, ModelBundles},
    payload::BehavioralPayload,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Login-time decision over keystroke, tap, swipe and motion scores
    OneShot,
    /// Session check over motion and touch identity votes
    Continuous,
}

impl Mode {
    fn as_str(&self) -> &'static str {
        match self {
            Mode::OneShot => "one_shot",
            Mode::Continuous => "continuous",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "behavioral-auth", version, about = "Score a behavioral biometrics payload")]
struct Args {
    /// Config file (JSON); falls back to BEHAVIORAL_AUTH_CONFIG_PATH, then config.json
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "one-shot")]
    mode: Mode,

    /// Payload file; stdin when omitted
    payload: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("BEHAVIORAL_AUTH_CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.json"));
    let config = AuthConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level, std::io::stderr)?;

    info!(model_dir = ?config.model_dir, mode = args.mode.as_str(), "behavioral auth starting");

    let payload = match &args.payload {
        Some(path) => BehavioralPayload::from_path(path)?,
        None => BehavioralPayload::from_reader(std::io::stdin().lock())?,
    };
    let request_id = uuid::Uuid::new_v4().to_string();

    let audit = match args.mode {
        Mode::OneShot => {
            let bundles = Arc::new(ModelBundles::load(&config.model_dir)?);
            let engine = DecisionFusionEngine::new(bundles, config.fusion.clone());
            let verdict = engine.authenticate(&payload);
            println!("{}", serde_json::to_string(&verdict)?);
            (verdict.authenticated, verdict.confidence, None, verdict.reason)
        }
        Mode::Continuous => {
            let models = Arc::new(ContinuousModels::load(&config.continuous.model_dir));
            let engine = ContinuousFusionEngine::new(models, config.continuous.clone());
            let verdict = engine.authenticate(&payload);
            println!("{}", serde_json::to_string(&verdict)?);
            (verdict.authenticated, verdict.confidence, Some(verdict.anomaly), verdict.reason)
        }
    };

    let (authenticated, confidence, anomaly, reason) = audit;
    StructuredLogger::emit_json(
        &AuditEvent {
            ts: chrono::Utc::now().to_rfc3339(),
            request_id: &request_id,
            mode: args.mode.as_str(),
            user_id: payload.user_id.as_deref(),
            authenticated,
            confidence,
            anomaly,
            reason: reason.as_deref(),
        },
        &mut std::io::stderr(),
    )?;

    Ok(())
}
