// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Loads the latest checkpoint and scores question pairs by the
// L1 distance between their representations. The same lowercase
// + character-encode path used in training is applied here, so
// a question is embedded identically at train and check time.

use anyhow::Result;
use burn::prelude::*;

use crate::data::vocab;
use crate::domain::traits::PairScorer;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::encoder::{EncoderConfig, QuestionEncoder};
use crate::ml::loss::manhattan_distance;

type InferBackend = burn::backend::Wgpu;

pub struct Inferencer {
    model:         QuestionEncoder<InferBackend>,
    embedding_dim: usize,
    device:        burn::backend::wgpu::WgpuDevice,
}

impl Inferencer {
    /// Rebuild the trained encoder from the checkpoint directory.
    /// The saved TrainConfig carries the architecture, the latest
    /// epoch's record carries the weights.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let cfg    = ckpt_manager.load_config()?;

        let model_cfg = EncoderConfig::new(
            cfg.encoder, cfg.embedding_dim, cfg.lstm_size, cfg.n_layers,
        );
        let model: QuestionEncoder<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;

        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, embedding_dim: cfg.embedding_dim, device })
    }

    /// Encode one raw question as a [1, embedding_dim] index tensor
    fn encode_one(&self, question: &str) -> Tensor<InferBackend, 2, Int> {
        let indices = vocab::encode(&question.to_lowercase(), self.embedding_dim);
        let flat: Vec<i32> = indices.iter().map(|&t| t as i32).collect();

        Tensor::<InferBackend, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([1, self.embedding_dim])
    }
}

impl PairScorer for Inferencer {
    fn distance(&self, question1: &str, question2: &str) -> Result<f32> {
        let q1_repr = self.model.forward(self.encode_one(question1));
        let q2_repr = self.model.forward(self.encode_one(question2));

        let distance: f32 = manhattan_distance(q1_repr, q2_repr)
            .into_scalar()
            .elem::<f32>();

        tracing::debug!("Pair distance: {:.4}", distance);
        Ok(distance)
    }
}
