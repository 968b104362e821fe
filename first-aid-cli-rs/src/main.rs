use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};

use first_aid_sdk::{
    classify, flow, AgeGroup, BackendConfig, FirstAidClient, GuidanceRequest, ServiceError, Upload,
};

mod render;

#[derive(Parser)]
#[command(name = "first-aid")]
#[command(about = "First-aid assistant command-line client")]
struct Cli {
    /// Backend base URL (overrides FIRST_AID_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Detection {
    InjuryType,
    Severity,
    Emergency,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the backend is reachable
    Health,
    /// Classify a description locally, without the backend
    Classify {
        /// Injury description
        #[arg(required = true)]
        text: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Upload an injury photo for analysis
    AnalyzeImage {
        /// Image file (jpg, png, gif, webp, bmp)
        path: PathBuf,
        /// Patient age group
        #[arg(long)]
        age_group: Option<AgeGroup>,
    },
    /// Generate first aid guidance for an injury
    Guidance {
        /// Injury type, e.g. "Burns"
        #[arg(long)]
        injury_type: String,
        /// Severity, e.g. "Moderate"
        #[arg(long, default_value = "Moderate")]
        severity: String,
        /// Affected body area
        #[arg(long)]
        area: Option<String>,
        /// Patient age group
        #[arg(long)]
        age_group: Option<AgeGroup>,
    },
    /// Fetch the emergency checklist for an injury type
    Emergency {
        /// Injury or emergency type
        injury_type: String,
    },
    /// Fetch prevention tips for an injury type
    Prevention {
        /// Injury type
        injury_type: String,
    },
    /// Transcribe an audio recording
    Transcribe {
        /// Audio file (wav, mp3, m4a, ogg, flac)
        path: PathBuf,
    },
    /// Ask the backend to parse injury details from text
    Parse {
        /// Transcribed or typed text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Run one of the backend's voice text detectors
    Detect {
        /// Which detector to run
        #[arg(value_enum)]
        detector: Detection,
        /// Transcribed or typed text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Show the backend's voice input status
    VoiceStatus,
    /// Classify a description (or a recording) and fetch guidance for it
    Describe {
        /// Injury description
        text: Vec<String>,
        /// Transcribe this recording instead of using text
        #[arg(long, conflicts_with = "text")]
        audio: Option<PathBuf>,
        /// Patient age group
        #[arg(long)]
        age_group: Option<AgeGroup>,
    },
    /// Show emergency numbers and instructions
    EmergencyMode,
    /// Recommend a specialist for an injury type
    Specialist {
        /// Injury type, e.g. "fracture"
        injury_type: String,
        /// Severity to mention in the recommendation
        #[arg(long)]
        severity: Option<String>,
        /// Search near this place instead of "near me"
        #[arg(long)]
        location: Option<String>,
    },
}

impl Commands {
    fn needs_backend(&self) -> bool {
        !matches!(
            self,
            Commands::Health
                | Commands::Classify { .. }
                | Commands::EmergencyMode
                | Commands::Specialist { .. }
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<ServiceError>() {
                Some(service_error) => eprintln!("{}", render::error(service_error)),
                None => eprintln!("Error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn build_client(backend_url: Option<String>) -> anyhow::Result<FirstAidClient> {
    let mut config = BackendConfig::from_env().context("Failed to load backend configuration")?;
    if let Some(url) = backend_url {
        config = config.with_backend_url(url);
    }
    debug!("Using backend at {}", config.backend_url);
    Ok(FirstAidClient::from_config(config)?)
}

fn joined(words: &[String]) -> String {
    words.join(" ")
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let Some(command) = cli.command else {
        println!("{}", render::emergency_mode());
        println!("Run `first-aid --help` to see all commands.");
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Classify { text, json } => {
            let result = classify(&joined(&text));
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::classification(&result));
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::EmergencyMode => {
            print!("{}", render::emergency_mode());
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Specialist {
            injury_type,
            severity,
            location,
        } => {
            print!(
                "{}",
                render::specialist(&injury_type, severity.as_deref(), location.as_deref())
            );
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let client = build_client(cli.backend_url)?;

    if let Commands::Health = command {
        return Ok(if client.health_check().await {
            println!("✅ Backend at {} is healthy", client.base_url());
            ExitCode::SUCCESS
        } else {
            println!("❌ Backend at {} is unavailable", client.base_url());
            ExitCode::FAILURE
        });
    }

    if command.needs_backend() && !client.health_check().await {
        eprintln!(
            "⚠️ Backend unavailable at {}. Start the backend and try again.",
            client.base_url()
        );
        return Ok(ExitCode::FAILURE);
    }

    match command {
        Commands::AnalyzeImage { path, age_group } => {
            let upload = Upload::from_path(&path).await?;
            info!("Analyzing {}", upload.file_name);
            let analysis = client.analyze_image(upload, age_group).await?;
            print!("{}", render::analysis(&analysis));
        }
        Commands::Guidance {
            injury_type,
            severity,
            area,
            age_group,
        } => {
            let mut request = GuidanceRequest::new(injury_type, severity);
            if let Some(age_group) = age_group {
                request = request.age_group(age_group);
            }
            if let Some(area) = area {
                request = request.affected_area(area);
            }
            let guidance = client.generate_guidance(&request).await?;
            print!("{}", render::guidance(&guidance));
        }
        Commands::Emergency { injury_type } => {
            let guidance = client.emergency_guidance(&injury_type).await?;
            print!("{}", render::emergency(&guidance));
            println!("\nEmergency Number: 911");
        }
        Commands::Prevention { injury_type } => {
            let tips = client.prevention_tips(&injury_type).await?;
            println!("Prevention Tips");
            for (i, tip) in tips.prevention_tips.iter().enumerate() {
                println!("{}. {}", i + 1, tip);
            }
        }
        Commands::Transcribe { path } => {
            let upload = Upload::from_path(&path).await?;
            let transcription = client.transcribe_audio(upload).await?;
            println!("{}", transcription.text());
        }
        Commands::Parse { text } => {
            let parsed = client.parse_injury(&joined(&text)).await?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Commands::Detect { detector, text } => {
            let text = joined(&text);
            let detected = match detector {
                Detection::InjuryType => client.detect_injury_type(&text).await?,
                Detection::Severity => client.detect_severity(&text).await?,
                Detection::Emergency => client.detect_emergency(&text).await?,
            };
            println!("{}", serde_json::to_string_pretty(&detected)?);
        }
        Commands::VoiceStatus => {
            let status = client.voice_input_status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Describe {
            text,
            audio,
            age_group,
        } => {
            let outcome = match audio {
                Some(path) => {
                    let upload = Upload::from_path(&path).await?;
                    flow::guidance_for_audio(&client, upload, age_group).await?
                }
                None => {
                    let text = joined(&text);
                    if text.trim().is_empty() {
                        anyhow::bail!("Describe the injury as text or pass --audio <file>");
                    }
                    flow::guidance_for_text(&client, &text, age_group).await?
                }
            };
            print!("{}", render::outcome(&outcome));
        }
        Commands::Health
        | Commands::Classify { .. }
        | Commands::EmergencyMode
        | Commands::Specialist { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
