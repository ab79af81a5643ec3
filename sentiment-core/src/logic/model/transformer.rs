//! Transformer Strategy - ONNX Runtime Integration
//!
//! Runs a RoBERTa sequence classifier exported to ONNX. The model directory
//! must hold `model.onnx` and `tokenizer.json`. The classifier emits three
//! logits (`LABEL_0` negative, `LABEL_1` neutral, `LABEL_2` positive); only
//! the configured positive label maps to positive.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokenizers::{Tokenizer, TruncationParams};

use super::{ModelError, Sentiment};
use crate::logic::config::TransformerParams;

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Raw pipeline output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    /// Softmax probability of `label`
    pub score: f32,
}

/// Loaded ONNX session + tokenizer
pub struct TransformerPredictor {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    output_name: String,
    model_path: PathBuf,
    positive_label: String,
}

impl std::fmt::Debug for TransformerPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerPredictor")
            .field("model_path", &self.model_path)
            .field("positive_label", &self.positive_label)
            .finish()
    }
}

/// Truncate encodings to `max_length` tokens, special tokens included
fn with_max_length(mut tokenizer: Tokenizer, max_length: usize) -> Result<Tokenizer, ModelError> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
    Ok(tokenizer)
}

fn require_file(path: &Path) -> Result<(), ModelError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ModelError::MissingFile(path.to_path_buf()))
    }
}

impl TransformerPredictor {
    /// Load session and tokenizer from the configured model directory
    pub fn load(params: &TransformerParams) -> Result<Self, ModelError> {
        let dir = params.resolved_dir();
        let model_path = dir.join(MODEL_FILE);
        let tokenizer_path = dir.join(TOKENIZER_FILE);

        log::info!("Loading transformer {} from: {}", params.model_name, dir.display());

        require_file(&model_path)?;
        require_file(&tokenizer_path)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        let tokenizer = with_max_length(tokenizer, params.max_length.max(2))?;

        let session = Session::builder()
            .map_err(|e| ModelError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| ModelError::Runtime(format!("Failed to load model: {}", e)))?;

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ModelError::Output("No output defined".to_string()))?;

        log::info!("Transformer loaded successfully (output: {})", output_name);

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            output_name,
            model_path,
            positive_label: params.positive_label.clone(),
        })
    }

    /// Run the classifier on one text
    pub fn classify(&self, text: &str) -> Result<Classification, ModelError> {
        let encoding = self.tokenizer.encode(text, true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let mask: Vec<i64> = encoding.get_attention_mask().iter().map(|&m| m as i64).collect();

        let seq_len = ids.len();
        let ids_array = Array2::<i64>::from_shape_vec((1, seq_len), ids)
            .map_err(|e| ModelError::Runtime(format!("Array error: {}", e)))?;
        let mask_array = Array2::<i64>::from_shape_vec((1, seq_len), mask)
            .map_err(|e| ModelError::Runtime(format!("Array error: {}", e)))?;

        let ids_tensor = Value::from_array(ids_array)
            .map_err(|e| ModelError::Runtime(format!("Tensor error: {}", e)))?;
        let mask_tensor = Value::from_array(mask_array)
            .map_err(|e| ModelError::Runtime(format!("Tensor error: {}", e)))?;

        let logits: Vec<f32> = {
            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![
                    "input_ids" => ids_tensor,
                    "attention_mask" => mask_tensor
                ])
                .map_err(|e| ModelError::Runtime(format!("Inference failed: {}", e)))?;

            let output = outputs.get(&self.output_name)
                .ok_or_else(|| ModelError::Output("No output".to_string()))?;

            let output_tensor = output.try_extract_tensor::<f32>()
                .map_err(|e| ModelError::Output(format!("Extract error: {}", e)))?;

            output_tensor.1.to_vec()
        };

        let probs = softmax(&logits);
        let (index, score) = argmax(&probs)
            .ok_or_else(|| ModelError::Output("Empty logits".to_string()))?;

        Ok(Classification {
            label: format!("LABEL_{}", index),
            score,
        })
    }

    pub fn predict(&self, text: &str) -> Result<Sentiment, ModelError> {
        self.classify(text)
            .map(|c| map_label(&c.label, &self.positive_label))
    }
}

/// Only the positive class is positive; neutral collapses to negative
pub fn map_label(label: &str, positive_label: &str) -> Sentiment {
    if label == positive_label {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    }
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    values.iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((i, v)),
        })
}
