// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   checkpoint.rs — Saving and loading model weights
//                   Uses Burn's CompactRecorder to serialise
//                   encoder parameters to disk. Also saves and
//                   loads TrainConfig as JSON so inference can
//                   rebuild the exact architecture.
//
//   metrics.rs    — Training metrics logging
//                   Writes epoch-level metrics (losses and the
//                   per-class validation distances) to a CSV
//                   file for later analysis and plotting.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
