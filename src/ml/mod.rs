// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// and the batcher that feeds it.
//
// What's in this layer:
//
//   encoder.rs    — The siamese question encoder
//                   One-hot identity embedding into one of three
//                   recurrent variants:
//                   • single-direction single-layer LSTM
//                   • bidirectional single-layer LSTM
//                   • stacked bidirectional LSTM
//                   The final time-step output is the fixed-size
//                   representation. ONE weight set serves both
//                   questions of a pair — that sharing is what
//                   makes the network siamese.
//
//   loss.rs       — Contrastive L1 loss
//                   Pulls duplicate pairs together, pushes
//                   non-duplicates apart until they clear the
//                   margin.
//
//   trainer.rs    — The training loop
//                   Forward both questions, loss, backward,
//                   Adam step, per-epoch validation pass,
//                   metrics and checkpoint saving.
//
//   inferencer.rs — The inference engine
//                   Loads a checkpoint, encodes two questions,
//                   reports their representation distance.
//
// Reference: Hochreiter & Schmidhuber (1997) LSTM
//            Hadsell et al. (2006) contrastive loss
//            Mueller & Thyagarajan (2016) siamese LSTM

/// Siamese recurrent question encoder
pub mod encoder;

/// Contrastive L1 loss over representation pairs
pub mod loss;

/// Full training loop with validation, metrics and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and scores pairs
pub mod inferencer;
