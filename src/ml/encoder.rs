// ============================================================
// Layer 5 — Siamese Question Encoder
// ============================================================
// Turns a batch of character-index rows into a batch of
// fixed-size representation vectors.
//
// The embedding is an identity lookup: token index i becomes a
// one-hot vector of width embedding_dim. It is NOT a trainable
// parameter matrix — the recurrent cells do all the learning.
// Because the one-hot width equals embedding_dim, the config
// needs embedding_dim >= 38 so every vocabulary index fits
// (the training use case checks this up front).
//
// Three interchangeable recurrent variants, chosen by config:
//   Rnn          — one forward LSTM, repr size = lstm_size
//   BiRnn        — one BiLSTM, forward/backward outputs
//                  concatenated by burn, repr size = 2*lstm_size
//   StackedBiRnn — n_layers BiLSTMs stacked, repr size =
//                  2*lstm_size
//
// All variants read the representation off the final time step.
//
// The siamese property is structural: the trainer holds ONE
// QuestionEncoder and calls forward() twice per pair. There is
// no second tower to keep in sync.
//
// Reference: Burn Book §3 (Building Blocks)
//            Hochreiter & Schmidhuber (1997) LSTM

use burn::{
    nn::{BiLstm, BiLstmConfig, Lstm, LstmConfig},
    prelude::*,
};
use serde::{Deserialize, Serialize};

// ─── Configuration ────────────────────────────────────────────────────────────
/// Which recurrent variant the encoder is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncoderKind {
    /// Single-direction, single-layer LSTM
    Rnn,
    /// Bidirectional, single-layer LSTM
    BiRnn,
    /// Bidirectional stack of n_layers LSTMs per direction
    StackedBiRnn,
}

/// Everything needed to (re)build a QuestionEncoder.
/// Serialisable so the checkpoint directory can carry it and
/// inference can rebuild the exact architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub kind:          EncoderKind,
    pub embedding_dim: usize,
    pub lstm_size:     usize,
    pub n_layers:      usize,
}

impl EncoderConfig {
    pub fn new(kind: EncoderKind, embedding_dim: usize, lstm_size: usize, n_layers: usize) -> Self {
        Self { kind, embedding_dim, lstm_size, n_layers }
    }

    /// Width of the representation vectors this config produces
    pub fn repr_size(&self) -> usize {
        match self.kind {
            EncoderKind::Rnn => self.lstm_size,
            EncoderKind::BiRnn | EncoderKind::StackedBiRnn => 2 * self.lstm_size,
        }
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> QuestionEncoder<B> {
        let cells = match self.kind {
            EncoderKind::Rnn => EncoderCells::Unidirectional(
                LstmConfig::new(self.embedding_dim, self.lstm_size, true).init(device),
            ),
            EncoderKind::BiRnn => EncoderCells::Bidirectional(
                BiLstmConfig::new(self.embedding_dim, self.lstm_size, true).init(device),
            ),
            EncoderKind::StackedBiRnn => {
                let layers = (0..self.n_layers.max(1))
                    .map(|layer| {
                        // Layer 0 reads one-hot rows; deeper layers read the
                        // concatenated forward+backward outputs below them.
                        let d_input = if layer == 0 {
                            self.embedding_dim
                        } else {
                            2 * self.lstm_size
                        };
                        BiLstmConfig::new(d_input, self.lstm_size, true).init(device)
                    })
                    .collect();
                EncoderCells::Stacked(layers)
            }
        };

        QuestionEncoder {
            cells,
            embedding_dim: self.embedding_dim,
        }
    }
}

// ─── Module ───────────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub enum EncoderCells<B: Backend> {
    Unidirectional(Lstm<B>),
    Bidirectional(BiLstm<B>),
    Stacked(Vec<BiLstm<B>>),
}

#[derive(Module, Debug)]
pub struct QuestionEncoder<B: Backend> {
    pub cells:         EncoderCells<B>,
    pub embedding_dim: usize,
}

impl<B: Backend> QuestionEncoder<B> {
    /// token_ids: [batch, embedding_dim] → representations: [batch, repr_size]
    pub fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = token_ids.dims();

        // Identity-lookup embedding: each index becomes a one-hot row
        // of width embedding_dim.
        let embedded: Tensor<B, 3, Int> = token_ids.one_hot(self.embedding_dim);
        let embedded = embedded.float();

        // [batch, seq_len, lstm_size] or [batch, seq_len, 2*lstm_size]
        let outputs = match &self.cells {
            EncoderCells::Unidirectional(cell) => cell.forward(embedded, None).0,
            EncoderCells::Bidirectional(cell) => cell.forward(embedded, None).0,
            EncoderCells::Stacked(layers) => {
                let mut hidden = embedded;
                for layer in layers {
                    hidden = layer.forward(hidden, None).0;
                }
                hidden
            }
        };

        // The representation is the final time step's output.
        let repr_size = outputs.dims()[2];
        outputs
            .slice([0..batch_size, seq_len - 1..seq_len, 0..repr_size])
            .squeeze::<2>(1)
    }
}
