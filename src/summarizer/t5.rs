//! Local T5 summarization via Candle
//!
//! Model files are read from a model directory or the local Hugging Face
//! cache. Nothing is ever downloaded: a model that is not on disk makes the
//! backend unavailable and the orchestrator falls back.

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config, T5ForConditionalGeneration};
use hf_hub::Cache;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::{BackendOutput, LengthBounds, SummaryBackend};

/// Input tokens the encoder accepts, including the end-of-sequence token
pub const MAX_INPUT_TOKENS: usize = 512;

const TASK_PREFIX: &str = "summarize: ";

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHTS_FILE: &str = "model.safetensors";

/// Paths of the three files a T5 model needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    /// Find the files for `model`, a directory path or a Hugging Face repo id
    pub fn locate(model: &str) -> Result<Self> {
        let dir = Path::new(model);
        if dir.is_dir() {
            let files = Self {
                config: dir.join(CONFIG_FILE),
                tokenizer: dir.join(TOKENIZER_FILE),
                weights: dir.join(WEIGHTS_FILE),
            };
            for path in [&files.config, &files.tokenizer, &files.weights] {
                if !path.is_file() {
                    anyhow::bail!("{} is missing", path.display());
                }
            }
            return Ok(files);
        }

        let repo = Cache::default().model(model.to_string());
        let cached = |file: &str| {
            repo.get(file)
                .with_context(|| format!("{} not found in the local model cache", file))
        };

        Ok(Self {
            config: cached(CONFIG_FILE)?,
            tokenizer: cached(TOKENIZER_FILE)?,
            weights: cached(WEIGHTS_FILE)?,
        })
    }

    /// Whether all files for `model` are on disk
    pub fn installed(model: &str) -> bool {
        Self::locate(model).is_ok()
    }
}

/// T5 encoder-decoder summarizer
pub struct T5Backend {
    name: String,
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
}

impl T5Backend {
    /// Load `model` from disk
    pub fn load(model: &str) -> Result<Self> {
        let files = ModelFiles::locate(model)?;
        let device = Device::cuda_if_available(0).context("Failed to select compute device")?;

        let config_contents =
            std::fs::read_to_string(&files.config).context("Failed to read model config")?;
        let config: Config =
            serde_json::from_str(&config_contents).context("Failed to parse model config")?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device)
                .context("Failed to load model weights")?
        };
        let t5 = T5ForConditionalGeneration::load(vb, &config)
            .context("Failed to create T5 model")?;

        info!(model, device = ?device, "Loaded T5 model");

        Ok(Self {
            name: model.to_string(),
            model: t5,
            tokenizer,
            config,
            device,
        })
    }

    fn encode_prompt(&self, text: &str) -> Result<(Vec<u32>, bool)> {
        let encoding = self
            .tokenizer
            .encode(format!("{}{}", TASK_PREFIX, text), true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let mut ids = encoding.get_ids().to_vec();
        let eos = self.config.eos_token_id as u32;
        if ids.last() != Some(&eos) {
            ids.push(eos);
        }

        let truncated = ids.len() > MAX_INPUT_TOKENS;
        if truncated {
            ids.truncate(MAX_INPUT_TOKENS - 1);
            ids.push(eos);
        }
        Ok((ids, truncated))
    }

    fn generate(&self, input_ids: &[u32], bounds: LengthBounds) -> Result<Vec<u32>> {
        // Per-request copy: the KV cache lives in the model
        let mut model = self.model.clone();
        model.clear_kv_cache();

        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = model.encode(&input)?;

        let start = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;
        let eos = self.config.eos_token_id as u32;
        let (min_tokens, max_tokens) = token_budget(bounds);

        let mut output = vec![start];
        for step in 0..max_tokens {
            let decoder_ids = if step == 0 || !self.config.use_cache {
                Tensor::new(output.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = output[output.len() - 1];
                Tensor::new(&[last], &self.device)?.unsqueeze(0)?
            };

            let logits = model
                .decode(&decoder_ids, &encoder_output)?
                .squeeze(0)?
                .to_dtype(DType::F32)?
                .to_vec1::<f32>()?;

            let suppress_eos = step < min_tokens;
            let next = argmax(&logits, suppress_eos.then_some(eos as usize))
                .context("Decoder produced empty logits")? as u32;

            if next == eos {
                break;
            }
            output.push(next);
        }

        debug!(tokens = output.len() - 1, "Decoding finished");
        Ok(output.split_off(1))
    }
}

impl SummaryBackend for T5Backend {
    fn name(&self) -> &str {
        &self.name
    }

    fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<BackendOutput> {
        let (input_ids, truncated) = self.encode_prompt(text)?;
        let output_ids = self.generate(&input_ids, bounds)?;

        let summary = self
            .tokenizer
            .decode(&output_ids, true)
            .map_err(|e| anyhow::anyhow!("Detokenization failed: {}", e))?;

        let summary = summary.trim();
        if summary.is_empty() {
            anyhow::bail!("model produced an empty summary");
        }

        Ok(BackendOutput {
            text: summary.to_string(),
            truncated,
        })
    }
}

/// Decoder token limits for a word budget (about 4 tokens per 3 words)
fn token_budget(bounds: LengthBounds) -> (usize, usize) {
    let max_tokens = bounds.max_words * 4 / 3 + 8;
    let min_tokens = bounds.min_words.min(max_tokens);
    (min_tokens, max_tokens)
}

/// Index of the largest logit, optionally ignoring one index
fn argmax(logits: &[f32], suppressed: Option<usize>) -> Option<usize> {
    logits
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != suppressed)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}
