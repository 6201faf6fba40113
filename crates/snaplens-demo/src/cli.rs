use clap::{Args, Parser, Subcommand};
use snaplens_classifier::{ModelConfig, DEFAULT_INPUT_EDGE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snaplens-demo")]
#[command(
    author,
    version,
    about = "Interactive image-classification demo with per-label content"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the demo server with web UI
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        #[command(flatten)]
        model: ModelArgs,

        /// Content catalog path (YAML)
        #[arg(long, default_value = "./catalog.yaml")]
        catalog: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify a single image file and print the result
    Classify {
        /// Image file (jpg, png, webp, tiff)
        image: PathBuf,

        /// Show the content panel for this label instead of the prediction
        #[arg(short, long)]
        label: Option<String>,

        #[command(flatten)]
        model: ModelArgs,

        /// Content catalog path (YAML)
        #[arg(long, default_value = "./catalog.yaml")]
        catalog: PathBuf,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Where the model artifacts come from.
///
/// With `--hf-repo`, `--weights` and `--labels` name files inside the
/// repository; otherwise they are local paths.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Hugging Face repository id (e.g. someone/snaplens-model)
    #[arg(long, env = "SNAPLENS_HF_REPO")]
    pub hf_repo: Option<String>,

    /// Repository revision (only with --hf-repo)
    #[arg(long)]
    pub revision: Option<String>,

    /// Weights file (safetensors)
    #[arg(long, default_value = "model.safetensors")]
    pub weights: String,

    /// Label vocabulary file (JSON array)
    #[arg(long, default_value = "labels.json")]
    pub labels: String,

    /// Input edge length the model was trained for
    #[arg(long, default_value_t = DEFAULT_INPUT_EDGE)]
    pub input_edge: u32,
}

impl ModelArgs {
    pub fn into_config(self) -> ModelConfig {
        let config = match self.hf_repo {
            Some(repo_id) => {
                let config = ModelConfig::from_hf(repo_id, self.weights, self.labels);
                match self.revision {
                    Some(rev) => config.with_revision(rev),
                    None => config,
                }
            }
            None => ModelConfig::from_local(self.weights, self.labels),
        };
        config.with_input_edge(self.input_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaplens_classifier::ModelSource;

    #[test]
    fn model_args_build_a_local_config_by_default() {
        let cli = Cli::parse_from(["snaplens-demo", "classify", "photo.jpg"]);
        let Commands::Classify { model, .. } = cli.command else {
            panic!("expected classify command");
        };
        let config = model.into_config();
        assert!(matches!(config.weights, ModelSource::LocalPath(_)));
        assert_eq!(config.input_edge, DEFAULT_INPUT_EDGE);
    }

    #[test]
    fn model_args_build_an_hf_config_with_revision() {
        let cli = Cli::parse_from([
            "snaplens-demo",
            "serve",
            "--hf-repo",
            "someone/snaplens-model",
            "--revision",
            "v1",
            "--input-edge",
            "32",
        ]);
        let Commands::Serve { model, .. } = cli.command else {
            panic!("expected serve command");
        };
        let config = model.into_config();
        assert_eq!(config.input_edge, 32);
        match config.labels {
            ModelSource::HuggingFace {
                repo_id, revision, ..
            } => {
                assert_eq!(repo_id, "someone/snaplens-model");
                assert_eq!(revision.as_deref(), Some("v1"));
            }
            _ => panic!("expected HuggingFace source"),
        }
    }
}
