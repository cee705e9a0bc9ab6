// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop over the pair dataset's batch
// generator, with Adam updates on the autodiff backend.
//
// Backend split:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on MyInnerBackend (Wgpu)
//     for the per-epoch validation pass, no autodiff overhead
//
// Each batch step:
//   1. Tensors for the train side of the batch
//   2. Forward BOTH questions through the ONE shared encoder
//   3. Contrastive loss on the two representation batches
//   4. Backward + Adam step
//
// The validation pass reuses the same generator and reads the
// validation side of each batch, skipping the empty tail slices
// once the smaller partition is exhausted. Besides the loss it
// tracks the mean distance per class — the number the margin is
// supposed to drive apart.
//
// Reference: Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::PairBatcher, dataset::PairDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::encoder::{EncoderConfig, QuestionEncoder};
use crate::ml::loss::{manhattan_distance, ContrastiveLoss};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

pub fn run_training(
    cfg:          &TrainConfig,
    dataset:      PairDataset,
    ckpt_manager: CheckpointManager,
    metrics:      MetricsLogger,
) -> Result<()> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, dataset, ckpt_manager, metrics, device)
}

fn train_loop(
    cfg:          &TrainConfig,
    dataset:      PairDataset,
    ckpt_manager: CheckpointManager,
    metrics:      MetricsLogger,
    device:       burn::backend::wgpu::WgpuDevice,
) -> Result<()> {

    // ── Build the shared encoder ──────────────────────────────────────────────
    // One weight set; forward() is simply called twice per pair.
    let model_cfg = EncoderConfig::new(cfg.encoder, cfg.embedding_dim, cfg.lstm_size, cfg.n_layers);
    let mut model: QuestionEncoder<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Encoder ready: {:?}, lstm_size={}, repr_size={}",
        cfg.encoder,
        cfg.lstm_size,
        model_cfg.repr_size(),
    );

    let loss_fn = ContrastiveLoss::new(cfg.margin);

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    let train_batcher = PairBatcher::<MyBackend>::new(device.clone());
    let valid_batcher = PairBatcher::<MyInnerBackend>::new(device.clone());

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in dataset.batch_generator(cfg.batch_size) {
            let b = train_batcher.batch(batch.train_x1, batch.train_x2, batch.train_labels);

            let q1_repr = model.forward(b.x1);
            let q2_repr = model.forward(b.x2);
            let loss = loss_fn.forward(q1_repr, q2_repr, b.labels);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;
            tracing::debug!("epoch {} batch {} loss {:.6}", epoch, train_batches, loss_val);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → QuestionEncoder<MyInnerBackend>
        let model_valid = model.valid();

        let mut val_loss_sum     = 0.0f64;
        let mut val_batches      = 0usize;
        let mut dup_dist_sum     = 0.0f64;
        let mut dup_count        = 0.0f64;
        let mut non_dup_dist_sum = 0.0f64;
        let mut non_dup_count    = 0.0f64;

        for batch in dataset.batch_generator(cfg.batch_size) {
            // The validation partition is smaller than the training
            // partition; its slices run out first.
            if !batch.has_validation_rows() {
                continue;
            }

            let b = valid_batcher.batch(batch.valid_x1, batch.valid_x2, batch.valid_labels);

            let q1_repr = model_valid.forward(b.x1);
            let q2_repr = model_valid.forward(b.x2);

            let loss = loss_fn.forward(q1_repr.clone(), q2_repr.clone(), b.labels.clone());
            val_loss_sum += loss.into_scalar().elem::<f64>();
            val_batches  += 1;

            // Mean L1 distance per class, accumulated with tensor sums
            let distance = manhattan_distance(q1_repr, q2_repr);
            let labels_t = b.labels.float();
            let labels_f = labels_t.ones_like() - labels_t.clone();

            dup_dist_sum     += (distance.clone() * labels_t.clone()).sum().into_scalar().elem::<f64>();
            dup_count        += labels_t.sum().into_scalar().elem::<f64>();
            non_dup_dist_sum += (distance * labels_f.clone()).sum().into_scalar().elem::<f64>();
            non_dup_count    += labels_f.sum().into_scalar().elem::<f64>();
        }

        let avg_val_loss = if val_batches > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let dup_dist     = if dup_count     > 0.0 { dup_dist_sum / dup_count }         else { 0.0 };
        let non_dup_dist = if non_dup_count > 0.0 { non_dup_dist_sum / non_dup_count } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | dup_dist={:.2} | non_dup_dist={:.2}",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, dup_dist, non_dup_dist,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, dup_dist, non_dup_dist))?;

        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(())
}
