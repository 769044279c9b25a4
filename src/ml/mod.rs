// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn model code. Other layers only
// name the Backend bound (to stay generic over it) and the
// backend aliases in backend.rs; the checkpoint store in
// Layer 6 uses Burn's recorder to save and load weights.
//
// What's in this layer:
//
//   model.rs      - The character LSTM
//                   • Character embedding
//                   • Stacked LSTM layers (dropout in between)
//                   • Linear projection back to the vocabulary
//                   • Hidden state stacked as [layers, batch, d_hidden]
//
//   inferencer.rs - The SequenceModel adapter
//                   Feeds one character index per step, returns
//                   a softmax distribution and the new state
//
//   backend.rs    - CPU (NdArray) / GPU (Wgpu) selection
//
// Reference: Burn Book §3 (Building Blocks)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Character-level LSTM architecture
pub mod model;

/// One-step inference behind the SequenceModel trait
pub mod inferencer;

/// CPU / GPU backend aliases and selection
pub mod backend;
